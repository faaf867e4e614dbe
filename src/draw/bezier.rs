//! Bezier stroke segments and the drawable stroke primitives built on them.

use super::color::Color;
use super::surface::{LineCap, RasterSurface};
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Number of disc stamps used to render one variable-width segment.
///
/// Fixed regardless of segment length or width so output is reproducible.
pub const DRAW_STEPS_PER_BEZIER: usize = 300;

/// Geometry of a single cubic bezier curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicPath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicPath {
    /// Evaluates the curve at parameter `t` (0.0 = start, 1.0 = end).
    pub fn point_at(&self, t: f64) -> Point {
        let tt = t * t;
        let ttt = tt * t;
        let u = 1.0 - t;
        let uu = u * u;
        let uuu = uu * u;

        let x = uuu * self.start.x
            + 3.0 * uu * t * self.control1.x
            + 3.0 * u * tt * self.control2.x
            + ttt * self.end.x;
        let y = uuu * self.start.y
            + 3.0 * uu * t * self.control1.y
            + 3.0 * u * tt * self.control2.y
            + ttt * self.end.y;

        Point::new(x, y)
    }
}

/// One recorded touch segment: a cubic curve with per-endpoint widths.
///
/// Segments are produced by stroke capture and rendered once; they are never
/// mutated after construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BezierSegment {
    pub start_point: Point,
    pub end_point: Point,
    pub control_point1: Point,
    pub control_point2: Point,
    pub start_width: f64,
    pub end_width: f64,
    pub stroke_color: Color,
    /// `true` renders a single stroked path, `false` stamps tapered discs.
    pub is_constant_width: bool,
}

/// A single stamp of a variable-width segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSample {
    pub t: f64,
    pub center: Point,
    pub width: f64,
}

impl BezierSegment {
    pub fn path(&self) -> CubicPath {
        CubicPath {
            start: self.start_point,
            control1: self.control_point1,
            control2: self.control_point2,
            end: self.end_point,
        }
    }

    pub fn point_at(&self, t: f64) -> Point {
        self.path().point_at(t)
    }

    /// Stroke width at parameter `t`.
    ///
    /// The width delta is scaled by `t³`, so the stroke keeps close to its
    /// start width for most of the segment and swings toward the end width
    /// only near `t = 1`.
    pub fn width_at(&self, t: f64) -> f64 {
        self.start_width + t * t * t * (self.end_width - self.start_width)
    }

    /// The [`DRAW_STEPS_PER_BEZIER`] stamps, `t = i / N` for `i` in `0..N`.
    pub fn samples(&self) -> impl Iterator<Item = StrokeSample> + '_ {
        let path = self.path();
        (0..DRAW_STEPS_PER_BEZIER).map(move |i| {
            let t = i as f64 / DRAW_STEPS_PER_BEZIER as f64;
            StrokeSample {
                t,
                center: path.point_at(t),
                width: self.width_at(t),
            }
        })
    }

    /// Draws the segment into `surface`.
    pub fn draw(&self, surface: &mut dyn RasterSurface) {
        if self.is_constant_width {
            surface.stroke_curve(
                &self.path(),
                self.start_width,
                LineCap::Round,
                self.stroke_color,
            );
        } else {
            for sample in self.samples() {
                draw_disc(surface, sample.center, sample.width, self.stroke_color);
            }
        }
    }
}

/// A single tap: one filled disc.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub point: Point,
    pub width: f64,
    pub stroke_color: Color,
}

impl TouchPoint {
    pub fn draw(&self, surface: &mut dyn RasterSurface) {
        draw_disc(surface, self.point, self.width, self.stroke_color);
    }
}

fn draw_disc(surface: &mut dyn RasterSurface, center: Point, width: f64, color: Color) {
    surface.fill_ellipse(
        Rect::new(center.x - width / 2.0, center.y - width / 2.0, width, width),
        color,
    );
}

/// Drawable stroke primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Stroke {
    /// Recorded curve segment
    Bezier(BezierSegment),
    /// Single tap without movement
    Point(TouchPoint),
}

impl Stroke {
    pub fn draw(&self, surface: &mut dyn RasterSurface) {
        match self {
            Stroke::Bezier(segment) => segment.draw(surface),
            Stroke::Point(point) => point.draw(surface),
        }
    }
}

impl From<BezierSegment> for Stroke {
    fn from(segment: BezierSegment) -> Self {
        Stroke::Bezier(segment)
    }
}

impl From<TouchPoint> for Stroke {
    fn from(point: TouchPoint) -> Self {
        Stroke::Point(point)
    }
}
