//! Bounded linear undo/redo over immutable world snapshots.

use crate::layers::Layer;
use crate::measure::Totals;
use crate::objects::DraftObject;
use serde::{Deserialize, Serialize};

/// Maximum number of snapshots to keep.
pub const MAX_HISTORY: usize = 50;

/// A deep, structurally independent copy of the drafting state.
///
/// Snapshots never alias live state: every field is cloned at record time,
/// so later mutation of the engine cannot corrupt an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// All live objects.
    pub objects: Vec<DraftObject>,
    /// All layers with their id lists.
    pub layers: Vec<Layer>,
    /// Current-layer index.
    pub current_layer: usize,
    /// Running totals at record time.
    pub totals: Totals,
}

/// Linear history with a cursor into a bounded snapshot list.
///
/// The cursor always points at the entry describing the present state. There
/// is no entry for "before anything existed": undoing past the first
/// recorded action is a no-op.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<WorldSnapshot>,
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    /// Record a snapshot as the new present state.
    ///
    /// Any redo-able entries past the cursor are discarded (new actions after
    /// an undo abandon that branch). When the capacity is exceeded the oldest
    /// entry is evicted; the cursor keeps pointing at the entry just recorded.
    pub fn record(&mut self, snapshot: WorldSnapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            log::debug!("history capacity reached, evicted oldest snapshot");
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry and return the snapshot now pointed to.
    ///
    /// Returns `None` at the oldest recorded state, leaving the cursor put.
    pub fn undo(&mut self) -> Option<WorldSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry and return the snapshot now pointed to.
    pub fn redo(&mut self) -> Option<WorldSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Drop every entry (full-history clear).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Totals;

    fn snapshot(marker: f64) -> WorldSnapshot {
        WorldSnapshot {
            objects: Vec::new(),
            layers: vec![Layer::new("Layer 1")],
            current_layer: 0,
            totals: Totals {
                length: marker,
                area: 0.0,
            },
        }
    }

    #[test]
    fn test_empty_history_has_nothing_to_do() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_stops_at_oldest() {
        let mut history = History::new();
        history.record(snapshot(1.0));
        // The first recorded action is the floor; there is no "before".
        assert!(history.undo().is_none());

        history.record(snapshot(2.0));
        let back = history.undo().unwrap();
        assert_eq!(back.totals.length, 1.0);
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::new();
        for i in 0..5 {
            history.record(snapshot(i as f64));
        }

        for _ in 0..4 {
            assert!(history.undo().is_some());
        }
        for expected in 1..5 {
            let snap = history.redo().unwrap();
            assert_eq!(snap.totals.length, expected as f64);
        }
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_record_after_undo_discards_redo_branch() {
        let mut history = History::new();
        history.record(snapshot(1.0));
        history.record(snapshot(2.0));
        history.record(snapshot(3.0));

        history.undo();
        history.undo();
        assert!(history.can_redo());

        history.record(snapshot(9.0));
        assert!(!history.can_redo());
        assert_eq!(history.undo().unwrap().totals.length, 1.0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::with_capacity(50);
        for i in 0..55 {
            history.record(snapshot(i as f64));
        }
        assert_eq!(history.len(), 50);

        // Walk all the way back: the oldest reachable entry is #5, the
        // evicted ones are unrecoverable.
        let mut last = None;
        while let Some(snap) = history.undo() {
            last = Some(snap);
        }
        assert_eq!(last.unwrap().totals.length, 5.0);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.record(snapshot(1.0));
        history.clear();
        assert!(history.is_empty());
        assert!(!history.can_undo());
    }
}
