//! Frame container for managing the recorded strokes of a drawing.

use super::bezier::Stroke;
use super::surface::RasterSurface;
use serde::{Deserialize, Serialize};

/// All strokes of the current drawing, in draw order.
///
/// Acts as the drawing canvas state: strokes are appended as touch segments
/// are recorded and can be undone or cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Strokes in draw order (first = bottom layer, last = top layer)
    pub strokes: Vec<Stroke>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all strokes, giving a blank slate.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn add_stroke(&mut self, stroke: impl Into<Stroke>) {
        self.strokes.push(stroke.into());
    }

    /// Attempts to add a stroke, enforcing a maximum stroke count when `max` > 0.
    ///
    /// Returns `true` if the stroke was added, `false` if the limit would be exceeded.
    pub fn try_add_stroke(&mut self, stroke: impl Into<Stroke>, max: usize) -> bool {
        if max == 0 || self.strokes.len() < max {
            self.strokes.push(stroke.into());
            true
        } else {
            false
        }
    }

    /// Removes and returns the most recently added stroke, if any.
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Draws every stroke into `surface`, bottom layer first.
    pub fn draw(&self, surface: &mut dyn RasterSurface) {
        for stroke in &self.strokes {
            stroke.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::bezier::TouchPoint;
    use crate::draw::color::{GREEN, RED};
    use crate::draw::surface::recording::{DrawOp, RecordingSurface};
    use crate::util::Point;

    fn tap(x: f64, color: crate::draw::Color) -> TouchPoint {
        TouchPoint {
            point: Point::new(x, 0.0),
            width: 2.0,
            stroke_color: color,
        }
    }

    #[test]
    fn try_add_stroke_respects_limit() {
        let mut frame = Frame::new();
        assert!(frame.try_add_stroke(tap(0.0, RED), 1));
        assert!(!frame.try_add_stroke(tap(1.0, GREEN), 1));
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn zero_limit_means_unlimited() {
        let mut frame = Frame::new();
        for i in 0..10 {
            assert!(frame.try_add_stroke(tap(i as f64, RED), 0));
        }
        assert_eq!(frame.len(), 10);
    }

    #[test]
    fn undo_pops_most_recent() {
        let mut frame = Frame::new();
        frame.add_stroke(tap(0.0, RED));
        frame.add_stroke(tap(1.0, GREEN));
        assert_eq!(frame.undo(), Some(Stroke::Point(tap(1.0, GREEN))));
        frame.clear();
        assert!(frame.is_empty());
        assert_eq!(frame.undo(), None);
    }

    #[test]
    fn draw_preserves_stroke_order() {
        let mut frame = Frame::new();
        frame.add_stroke(tap(0.0, RED));
        frame.add_stroke(tap(10.0, GREEN));

        let mut surface = RecordingSurface::default();
        frame.draw(&mut surface);
        let colors: Vec<_> = surface
            .ops
            .iter()
            .map(|op| match op {
                DrawOp::FillEllipse { color, .. } => *color,
                DrawOp::Stroke { color, .. } => *color,
            })
            .collect();
        assert_eq!(colors, vec![RED, GREEN]);
    }
}
