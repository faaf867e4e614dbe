//! Immutable label layout derived from measurement, zoom and placement.

use crate::util::{Affine, Point, Rect, Size, Vector};

/// Padding factor applied to measured text when sizing the label frame.
pub const LABEL_FRAME_PADDING: f64 = 1.05;

/// Where and how large the label is drawn.
///
/// The frame is laid out untransformed around `center`; `transform` is then
/// applied about that center. Recomputing a layout never touches the
/// transform, so resizing the frame cannot disturb the label's rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    /// Displayed font size (`base × scale`)
    pub font_size: f64,
    /// Untransformed frame size
    pub size: Size,
    pub center: Point,
    pub transform: Affine,
}

impl LabelLayout {
    pub fn compute(
        measured: Size,
        base_font_size: f64,
        scale: f64,
        center: Point,
        transform: Affine,
    ) -> Self {
        Self {
            font_size: base_font_size * scale,
            size: measured.scaled(scale * LABEL_FRAME_PADDING),
            center,
            transform,
        }
    }

    /// Untransformed frame rectangle.
    pub fn frame(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Maps label-local coordinates (origin at the center) to surface coordinates.
    pub fn to_surface(&self) -> Affine {
        Affine::translation(Vector::new(self.center.x, self.center.y)).compose(&self.transform)
    }

    /// Frame corners after the transform, clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        let m = self.to_surface();
        let (hw, hh) = (self.size.width / 2.0, self.size.height / 2.0);
        [
            m.transform_point(Point::new(-hw, -hh)),
            m.transform_point(Point::new(hw, -hh)),
            m.transform_point(Point::new(hw, hh)),
            m.transform_point(Point::new(-hw, hh)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn frame_is_measured_size_times_scale_with_padding() {
        let layout = LabelLayout::compute(
            Size::new(200.0, 40.0),
            60.0,
            1.5,
            Point::new(100.0, 100.0),
            Affine::IDENTITY,
        );
        assert_eq!(layout.font_size, 90.0);
        assert!((layout.size.width - 200.0 * 1.5 * 1.05).abs() < 1e-9);
        assert!((layout.size.height - 40.0 * 1.5 * 1.05).abs() < 1e-9);
        assert_eq!(layout.frame().center(), Point::new(100.0, 100.0));
    }

    #[test]
    fn corners_rotate_about_center() {
        let layout = LabelLayout {
            font_size: 10.0,
            size: Size::new(20.0, 10.0),
            center: Point::new(50.0, 50.0),
            transform: Affine::rotation(FRAC_PI_2),
        };
        let [top_left, ..] = layout.corners();
        // (-10, -5) rotated a quarter turn is (5, -10).
        assert!((top_left.x - 55.0).abs() < 1e-9);
        assert!((top_left.y - 40.0).abs() < 1e-9);
    }
}
