//! Stroke geometry and Cairo-based rendering.
//!
//! This module defines the core drawing types used for annotation:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Stroke`]: recorded drawables (tapered Bézier segments and single taps)
//! - [`Frame`]: container for all strokes of the current drawing
//! - [`RasterSurface`]: the drawing target strokes render into, with a Cairo implementation
//! - Rendering functions for composing finished annotations

pub mod bezier;
pub mod color;
pub mod font;
pub mod frame;
pub mod render;
pub mod surface;

// Re-export commonly used types at module level
pub use bezier::{BezierSegment, CubicPath, DRAW_STEPS_PER_BEZIER, Stroke, StrokeSample, TouchPoint};
pub use color::Color;
pub use font::FontDescriptor;
pub use frame::Frame;
pub use render::{
    compose_annotation, render_frame, render_label, render_strokes, solid_image, write_png,
};
pub use surface::{CairoSurface, LineCap, RasterSurface, RenderError};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
