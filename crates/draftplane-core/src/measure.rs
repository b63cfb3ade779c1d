//! Running length/area totals over the live object set.

use crate::objects::DraftObject;
use serde::{Deserialize, Serialize};

/// The two running totals shown by the shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of length-like measures (line length, perimeters, circumference).
    pub length: f64,
    /// Sum of area-like measures.
    pub area: f64,
}

/// Maintains the running totals.
///
/// Additions are applied incrementally in O(1); every removal path (delete,
/// undo, redo, load, clear) goes through [`recompute`](Self::recompute) so
/// the totals stay a pure function of the live object set and never drift
/// from incremental subtraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasurementAggregator {
    totals: Totals,
}

impl MeasurementAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Add one object's contribution to the totals.
    pub fn apply_add(&mut self, object: &DraftObject) {
        self.totals.length += object.geometry.length_contribution();
        self.totals.area += object.geometry.area_contribution();
    }

    /// Resum the totals from the full object set.
    pub fn recompute(&mut self, objects: &[DraftObject]) {
        let mut totals = Totals::default();
        for object in objects {
            totals.length += object.geometry.length_contribution();
            totals.area += object.geometry.area_contribution();
        }
        self.totals = totals;
    }

    /// Zero both totals.
    pub fn reset(&mut self) {
        self.totals = Totals::default();
    }
}
