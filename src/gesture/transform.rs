//! Rotation and zoom accumulation for the text label.

use super::GesturePhase;
use crate::util::Affine;
use log::debug;

/// Smallest committed zoom factor.
pub const MIN_SCALE: f64 = 0.01;

/// Composed rotate/scale state driven by pinch and rotate gestures.
///
/// At most one pinch and one rotation are live at a time; both may run
/// together. While live, the displayed transform is rebuilt from the last
/// committed reference on every `Changed` update as
/// `reference ∘ R(θ) ∘ S(s) ∘ R(θ)`, omitting the parts of gestures that are
/// not active. The rotation really is applied on both sides of the pinch.
///
/// Rotation commits into the reference matrix. Zoom commits into the scalar
/// [`TransformAccumulator::scale`] instead, because it also drives the
/// label's font size.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformAccumulator {
    reference_transform: Affine,
    current_transform: Affine,
    scale: f64,
    /// Cumulative scale of the live pinch.
    active_pinch: Option<f64>,
    /// Cumulative angle of the live rotation, in radians.
    active_rotation: Option<f64>,
}

impl Default for TransformAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformAccumulator {
    pub fn new() -> Self {
        Self {
            reference_transform: Affine::IDENTITY,
            current_transform: Affine::IDENTITY,
            scale: 1.0,
            active_pinch: None,
            active_rotation: None,
        }
    }

    /// Applies one rotate update and returns the displayed transform.
    pub fn handle_rotate(&mut self, phase: GesturePhase, angle: f64) -> Affine {
        match phase {
            GesturePhase::Began => {
                self.current_transform = self.reference_transform;
                self.active_rotation = Some(angle);
            }
            GesturePhase::Changed => {
                self.active_rotation = Some(angle);
                self.current_transform = self.compose_live();
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                self.reference_transform = self.reference_transform.rotated(angle);
                self.current_transform = self.reference_transform;
                self.active_rotation = None;
                debug!("Rotation committed: {:.4} rad", angle);
            }
        }
        self.current_transform
    }

    /// Applies one pinch update and returns the displayed transform.
    pub fn handle_pinch(&mut self, phase: GesturePhase, scale: f64) -> Affine {
        match phase {
            GesturePhase::Began => {
                self.active_pinch = Some(scale);
            }
            GesturePhase::Changed => {
                self.active_pinch = Some(scale);
                self.current_transform = self.compose_live();
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                self.scale = (self.scale * scale).max(MIN_SCALE);
                self.active_pinch = None;
                // The zoom now lives in `scale`; keep only what is still live.
                self.current_transform = self.compose_live();
                debug!("Pinch committed: scale now {:.4}", self.scale);
            }
        }
        self.current_transform
    }

    fn compose_live(&self) -> Affine {
        let mut transform = self.reference_transform;
        if let Some(angle) = self.active_rotation {
            transform = transform.rotated(angle);
        }
        if let Some(scale) = self.active_pinch {
            transform = transform.scaled(scale, scale);
        }
        if let Some(angle) = self.active_rotation {
            transform = transform.rotated(angle);
        }
        transform
    }

    /// Last committed rotation transform.
    pub fn reference_transform(&self) -> Affine {
        self.reference_transform
    }

    /// Transform to display right now, possibly mid-gesture.
    pub fn current_transform(&self) -> Affine {
        self.current_transform
    }

    /// Committed zoom factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn active_pinch(&self) -> Option<f64> {
        self.active_pinch
    }

    pub fn active_rotation(&self) -> Option<f64> {
        self.active_rotation
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

    const EPS: f64 = 1e-12;

    #[test]
    fn rotate_then_end_commits_pure_rotation() {
        let mut acc = TransformAccumulator::new();
        acc.handle_rotate(GesturePhase::Began, 0.0);
        acc.handle_rotate(GesturePhase::Changed, FRAC_PI_6);
        acc.handle_rotate(GesturePhase::Ended, FRAC_PI_6);

        assert!(
            acc.reference_transform()
                .approx_eq(&Affine::rotation(FRAC_PI_6), EPS)
        );
        assert_eq!(acc.current_transform(), acc.reference_transform());
        assert_eq!(acc.active_rotation(), None);
        assert_eq!(acc.scale(), 1.0);
    }

    #[test]
    fn pinch_after_committed_rotation_composes_rotation_then_scale() {
        let theta = FRAC_PI_4;
        let mut acc = TransformAccumulator::new();
        acc.handle_rotate(GesturePhase::Began, 0.0);
        acc.handle_rotate(GesturePhase::Ended, theta);

        acc.handle_pinch(GesturePhase::Began, 1.0);
        let shown = acc.handle_pinch(GesturePhase::Changed, 2.5);
        let expected = Affine::rotation(theta).compose(&Affine::scaling(2.5, 2.5));
        assert!(shown.approx_eq(&expected, EPS));

        acc.handle_pinch(GesturePhase::Ended, 2.5);
        assert_eq!(acc.scale(), 2.5);
        assert_eq!(acc.active_pinch(), None);
        // Zoom moved into `scale`; the matrix keeps only the rotation.
        assert!(acc.current_transform().approx_eq(&Affine::rotation(theta), EPS));
    }

    #[test]
    fn concurrent_pinch_and_rotate_applies_rotation_twice() {
        let theta = 0.3;
        let s = 1.75;
        let mut acc = TransformAccumulator::new();
        acc.handle_rotate(GesturePhase::Began, 0.0);
        acc.handle_rotate(GesturePhase::Changed, theta);
        acc.handle_pinch(GesturePhase::Began, 1.0);
        let shown = acc.handle_pinch(GesturePhase::Changed, s);

        let expected = Affine::IDENTITY
            .compose(&Affine::rotation(theta))
            .compose(&Affine::scaling(s, s))
            .compose(&Affine::rotation(theta));
        assert!(shown.approx_eq(&expected, EPS));

        // Equivalent closed form: uniform scale by s, rotation by 2θ.
        let (sin, cos) = (2.0 * theta).sin_cos();
        assert!((shown.xx - s * cos).abs() < EPS);
        assert!((shown.yx - s * sin).abs() < EPS);
        assert!((shown.xy + s * sin).abs() < EPS);
        assert!((shown.yy - s * cos).abs() < EPS);
    }

    #[test]
    fn rotate_changed_uses_committed_reference() {
        let mut acc = TransformAccumulator::new();
        acc.handle_rotate(GesturePhase::Began, 0.0);
        acc.handle_rotate(GesturePhase::Ended, FRAC_PI_2);

        acc.handle_rotate(GesturePhase::Began, 0.0);
        let shown = acc.handle_rotate(GesturePhase::Changed, 0.1);
        let expected = Affine::rotation(FRAC_PI_2).rotated(0.1).rotated(0.1);
        assert!(shown.approx_eq(&expected, EPS));
    }

    #[test]
    fn replaying_changed_is_idempotent() {
        let mut acc = TransformAccumulator::new();
        acc.handle_pinch(GesturePhase::Began, 1.0);
        let first = acc.handle_pinch(GesturePhase::Changed, 1.4);
        let second = acc.handle_pinch(GesturePhase::Changed, 1.4);
        assert_eq!(first, second);
    }

    #[test]
    fn rotate_began_resets_display_to_reference() {
        let mut acc = TransformAccumulator::new();
        acc.handle_pinch(GesturePhase::Began, 1.0);
        acc.handle_pinch(GesturePhase::Changed, 3.0);
        assert!(!acc.current_transform().is_identity());

        let shown = acc.handle_rotate(GesturePhase::Began, 0.0);
        assert!(shown.is_identity());
        assert_eq!(acc.active_pinch(), Some(3.0));
    }

    #[test]
    fn cancelled_pinch_commits_scale() {
        let mut acc = TransformAccumulator::new();
        acc.handle_pinch(GesturePhase::Began, 1.0);
        acc.handle_pinch(GesturePhase::Changed, 0.5);
        acc.handle_pinch(GesturePhase::Cancelled, 0.5);
        assert_eq!(acc.scale(), 0.5);

        acc.handle_pinch(GesturePhase::Began, 1.0);
        acc.handle_pinch(GesturePhase::Ended, 3.0);
        assert_eq!(acc.scale(), 1.5);
    }

    #[test]
    fn cancelled_rotation_commits_like_end() {
        let mut acc = TransformAccumulator::new();
        acc.handle_rotate(GesturePhase::Began, 0.0);
        acc.handle_rotate(GesturePhase::Changed, 0.4);
        let shown = acc.handle_rotate(GesturePhase::Cancelled, 0.4);

        assert!(acc.reference_transform().approx_eq(&Affine::rotation(0.4), EPS));
        assert_eq!(shown, acc.reference_transform());
        assert_eq!(acc.active_rotation(), None);
    }

    #[test]
    fn pinch_ending_first_keeps_live_rotation() {
        let theta = 0.25;
        let s = 1.6;
        let mut acc = TransformAccumulator::new();
        acc.handle_rotate(GesturePhase::Began, 0.0);
        acc.handle_pinch(GesturePhase::Began, 1.0);
        acc.handle_rotate(GesturePhase::Changed, theta);
        acc.handle_pinch(GesturePhase::Changed, s);

        let shown = acc.handle_pinch(GesturePhase::Ended, s);
        assert_eq!(acc.scale(), s);
        assert_eq!(acc.active_pinch(), None);
        assert_eq!(acc.active_rotation(), Some(theta));
        assert!(shown.approx_eq(&Affine::rotation(2.0 * theta), EPS));

        let shown = acc.handle_rotate(GesturePhase::Ended, theta);
        assert_eq!(shown, acc.reference_transform());
        assert!(shown.approx_eq(&Affine::rotation(theta), EPS));
    }

    #[test]
    fn rotation_ending_first_hides_live_pinch() {
        let mut acc = TransformAccumulator::new();
        acc.handle_rotate(GesturePhase::Began, 0.0);
        acc.handle_pinch(GesturePhase::Began, 1.0);
        acc.handle_rotate(GesturePhase::Changed, 0.5);
        acc.handle_pinch(GesturePhase::Changed, 2.0);

        let shown = acc.handle_rotate(GesturePhase::Ended, 0.5);
        assert!(shown.approx_eq(&Affine::rotation(0.5), EPS));
        assert_eq!(acc.active_pinch(), Some(2.0));
        assert_eq!(acc.scale(), 1.0);

        // The next pinch update brings the zoom back on top of the new reference.
        let shown = acc.handle_pinch(GesturePhase::Changed, 2.0);
        let expected = Affine::rotation(0.5).scaled(2.0, 2.0);
        assert!(shown.approx_eq(&expected, EPS));
    }

    #[test]
    fn committed_scale_is_clamped() {
        let mut acc = TransformAccumulator::new();
        acc.handle_pinch(GesturePhase::Began, 1.0);
        acc.handle_pinch(GesturePhase::Ended, 0.0);
        assert_eq!(acc.scale(), MIN_SCALE);
    }

    #[test]
    fn reset_restores_identity() {
        let mut acc = TransformAccumulator::new();
        acc.handle_rotate(GesturePhase::Began, 0.0);
        acc.handle_rotate(GesturePhase::Ended, 1.0);
        acc.handle_pinch(GesturePhase::Began, 1.0);
        acc.reset();
        assert_eq!(acc, TransformAccumulator::new());
    }
}
