//! Pan gesture tracking for the label center.

use super::GesturePhase;
use crate::util::{Point, Vector};
use log::debug;

/// Tracks the label center across pan gestures.
///
/// `Began` snapshots the displayed center as the reference, `Changed` offsets
/// the reference by the cumulative translation, and `Ended`/`Cancelled`
/// commit the displayed center as the new reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanTracker {
    reference_center: Point,
    center: Point,
    active: bool,
    committed: bool,
}

impl PanTracker {
    pub fn new(center: Point) -> Self {
        Self {
            reference_center: center,
            center,
            active: false,
            committed: false,
        }
    }

    /// Applies one pan update and returns the displayed center.
    pub fn handle(&mut self, phase: GesturePhase, translation: Vector) -> Point {
        match phase {
            GesturePhase::Began => {
                self.reference_center = self.center;
                self.active = true;
            }
            GesturePhase::Changed => {
                self.center = self.reference_center + translation;
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                self.reference_center = self.center;
                self.active = false;
                self.committed = true;
                debug!(
                    "Pan committed at ({:.1}, {:.1})",
                    self.center.x, self.center.y
                );
            }
        }
        self.center
    }

    /// The displayed center.
    pub fn center(&self) -> Point {
        self.center
    }

    /// The last committed center.
    pub fn reference_center(&self) -> Point {
        self.reference_center
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether any pan has been committed since creation or the last reset.
    pub fn has_committed(&self) -> bool {
        self.committed
    }

    /// Moves the label without a gesture (layout, text edits).
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
        if !self.active {
            self.reference_center = center;
        }
    }

    /// Forgets committed placement; the next layout recenters the label.
    pub fn reset(&mut self, center: Point) {
        *self = Self::new(center);
    }
}
