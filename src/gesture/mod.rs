//! Gesture events and the state machines that turn them into label placement.
//!
//! The host toolkit recognizes pan, pinch and rotate gestures and delivers
//! their updates here as [`GestureEvent`]s. Each recognizer reports phases in
//! the order `Began → Changed* → (Ended | Cancelled)`; events that break this
//! order are a caller error and are not defended against.

pub mod pan;
pub mod transform;

pub use pan::PanTracker;
pub use transform::{MIN_SCALE, TransformAccumulator};

use crate::util::Vector;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a recognizer update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    /// Commits like `Ended`; there is no rollback.
    Cancelled,
}

impl GesturePhase {
    /// `true` for the phases that commit accumulated state.
    pub fn is_terminal(self) -> bool {
        matches!(self, GesturePhase::Ended | GesturePhase::Cancelled)
    }
}

/// Gesture kind together with its payload.
///
/// Payloads are cumulative since the gesture began.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Gesture {
    Pan { translation: Vector },
    Pinch { scale: f64 },
    /// Angle in radians
    Rotate { angle: f64 },
}

/// One update from a gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    #[serde(flatten)]
    pub gesture: Gesture,
}

impl GestureEvent {
    pub fn pan(phase: GesturePhase, dx: f64, dy: f64) -> Self {
        Self {
            phase,
            gesture: Gesture::Pan {
                translation: Vector::new(dx, dy),
            },
        }
    }

    pub fn pinch(phase: GesturePhase, scale: f64) -> Self {
        Self {
            phase,
            gesture: Gesture::Pinch { scale },
        }
    }

    pub fn rotate(phase: GesturePhase, angle: f64) -> Self {
        Self {
            phase,
            gesture: Gesture::Rotate { angle },
        }
    }
}
