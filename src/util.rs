//! Geometry primitives shared by the stroke renderer and the text overlay.
//!
//! This module provides:
//! - Points, vectors, sizes, rectangles and edge insets (all `f64`)
//! - [`Affine`], a 2D affine matrix with prepend-style rotate/scale helpers
//! - Colour name lookup used by the configuration layer

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

// ============================================================================
// Points, Vectors, Sizes
// ============================================================================

/// A position in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }
}

/// A displacement between two points (e.g. a pan translation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Multiplies both dimensions by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

// ============================================================================
// Rectangles and Insets
// ============================================================================

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Rectangle of `size` whose center sits on `center`.
    pub fn from_center_size(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Shrinks every side by `dx` horizontally and `dy` vertically.
    ///
    /// The result never has a negative width or height; an over-inset
    /// rectangle collapses onto its center line.
    pub fn inset_by(&self, dx: f64, dy: f64) -> Self {
        let width = (self.width - 2.0 * dx).max(0.0);
        let height = (self.height - 2.0 * dy).max(0.0);
        Self::from_center_size(self.center(), Size::new(width, height))
    }
}

/// Edge insets (margins) applied to a view's bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

// ============================================================================
// Affine Transform
// ============================================================================

/// A 2D affine transform stored in cairo component order.
///
/// A point `(x, y)` maps to `(xx*x + xy*y + x0, yx*x + yy*y + y0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        x0: 0.0,
        y0: 0.0,
    };

    /// Rotation about the origin by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            xx: cos,
            yx: sin,
            xy: -sin,
            yy: cos,
            x0: 0.0,
            y0: 0.0,
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            xx: sx,
            yx: 0.0,
            xy: 0.0,
            yy: sy,
            x0: 0.0,
            y0: 0.0,
        }
    }

    pub fn translation(offset: Vector) -> Self {
        Self {
            x0: offset.x,
            y0: offset.y,
            ..Self::IDENTITY
        }
    }

    /// Returns `self ∘ inner`: `inner` is applied to coordinates first, then `self`.
    pub fn compose(&self, inner: &Affine) -> Affine {
        Affine {
            xx: self.xx * inner.xx + self.xy * inner.yx,
            yx: self.yx * inner.xx + self.yy * inner.yx,
            xy: self.xx * inner.xy + self.xy * inner.yy,
            yy: self.yx * inner.xy + self.yy * inner.yy,
            x0: self.xx * inner.x0 + self.xy * inner.y0 + self.x0,
            y0: self.yx * inner.x0 + self.yy * inner.y0 + self.y0,
        }
    }

    /// Prepends a rotation: coordinates are rotated first, then this transform applies.
    pub fn rotated(&self, angle: f64) -> Affine {
        self.compose(&Affine::rotation(angle))
    }

    /// Prepends a scale: coordinates are scaled first, then this transform applies.
    pub fn scaled(&self, sx: f64, sy: f64) -> Affine {
        self.compose(&Affine::scaling(sx, sy))
    }

    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.xx * p.x + self.xy * p.y + self.x0,
            self.yx * p.x + self.yy * p.y + self.y0,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Affine::IDENTITY
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Affine, eps: f64) -> bool {
        [
            (self.xx, other.xx),
            (self.yx, other.yx),
            (self.xy, other.xy),
            (self.yy, other.yy),
            (self.x0, other.x0),
            (self.y0, other.y0),
        ]
        .iter()
        .all(|(a, b)| (a - b).abs() <= eps)
    }

    pub fn to_cairo(&self) -> cairo::Matrix {
        cairo::Matrix::new(self.xx, self.yx, self.xy, self.yy, self.x0, self.y0)
    }
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration and scene files to parse color names.
/// Names are matched case-insensitively; unknown names return `None`.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" | "clear" => Some(TRANSPARENT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-12;

    #[test]
    fn rotation_by_quarter_turn_maps_x_axis_to_y_axis() {
        let p = Affine::rotation(FRAC_PI_2).transform_point(Point::new(1.0, 0.0));
        assert!((p.x - 0.0).abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn rotated_applies_new_rotation_before_existing_transform() {
        // Translate then rotate: the rotation acts on the raw point first.
        let t = Affine::translation(Vector::new(10.0, 0.0)).rotated(FRAC_PI_2);
        let p = t.transform_point(Point::new(1.0, 0.0));
        assert!((p.x - 10.0).abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn uniform_scale_commutes_with_rotation() {
        let a = Affine::IDENTITY.rotated(0.7).scaled(2.0, 2.0);
        let b = Affine::IDENTITY.scaled(2.0, 2.0).rotated(0.7);
        assert!(a.approx_eq(&b, EPS));
    }

    #[test]
    fn compose_with_identity_is_noop() {
        let t = Affine::rotation(PI / 3.0).scaled(1.5, 0.5);
        assert_eq!(t.compose(&Affine::IDENTITY), t);
        assert_eq!(Affine::IDENTITY.compose(&t), t);
    }

    #[test]
    fn to_cairo_preserves_components() {
        let t = Affine::rotation(0.3).scaled(2.0, 2.0);
        let m = t.to_cairo();
        assert!((m.xx() - t.xx).abs() < EPS);
        assert!((m.yx() - t.yx).abs() < EPS);
        assert!((m.xy() - t.xy).abs() < EPS);
        assert!((m.yy() - t.yy).abs() < EPS);
    }

    #[test]
    fn rect_inset_shrinks_each_side() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0).inset_by(10.0, 5.0);
        assert_eq!(r, Rect::new(10.0, 5.0, 80.0, 40.0));
    }

    #[test]
    fn rect_inset_never_goes_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset_by(20.0, 20.0);
        assert_eq!(r.size(), Size::ZERO);
        assert_eq!(r.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn rect_from_center_size_round_trips_center() {
        let r = Rect::from_center_size(Point::new(40.0, 30.0), Size::new(20.0, 10.0));
        assert_eq!(r.x, 30.0);
        assert_eq!(r.y, 25.0);
        assert_eq!(r.center(), Point::new(40.0, 30.0));
    }

    #[test]
    fn point_plus_vector() {
        assert_eq!(
            Point::new(1.0, 2.0) + Vector::new(3.0, -4.0),
            Point::new(4.0, -2.0)
        );
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn name_color_mapping() {
        assert_eq!(name_to_color("white").unwrap(), WHITE);
        assert_eq!(name_to_color("Black").unwrap(), BLACK);
        assert!(name_to_color("chartreuse").is_none());
    }
}
