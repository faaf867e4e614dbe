//! Raster surface abstraction and its cairo-backed implementation.

use super::bezier::CubicPath;
use super::color::Color;
use crate::util::{Rect, Size};
use log::debug;
use thiserror::Error;

/// Errors that can occur while acquiring or finishing a raster surface.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },

    #[error("Unable to allocate drawing surface: {0}")]
    SurfaceUnavailable(#[source] cairo::Error),

    #[error("Drawing failed: {0}")]
    Draw(#[source] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Line cap style for stroked paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl From<LineCap> for cairo::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        }
    }
}

/// A mutable pixel target that strokes can be drawn into.
///
/// Implementations draw synchronously: once a call returns, its pixels are written.
pub trait RasterSurface {
    /// Strokes a cubic path with the given width, cap and color at full opacity.
    fn stroke_curve(&mut self, path: &CubicPath, width: f64, cap: LineCap, color: Color);

    /// Fills the ellipse inscribed in `rect`.
    fn fill_ellipse(&mut self, rect: Rect, color: Color);
}

/// Cairo image surface paired with its drawing context.
pub struct CairoSurface {
    surface: cairo::ImageSurface,
    ctx: cairo::Context,
}

impl CairoSurface {
    /// Allocates a transparent ARGB surface of `size` pixels (rounded up).
    ///
    /// # Errors
    /// Returns [`RenderError::InvalidSize`] for empty or non-finite sizes, and
    /// [`RenderError::SurfaceUnavailable`] when cairo cannot allocate the surface.
    pub fn begin(size: Size) -> Result<Self, RenderError> {
        if !size.width.is_finite() || !size.height.is_finite() || size.is_empty() {
            return Err(RenderError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        let width = size.width.ceil() as i32;
        let height = size.height.ceil() as i32;

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
            .map_err(RenderError::SurfaceUnavailable)?;
        let ctx = cairo::Context::new(&surface).map_err(RenderError::SurfaceUnavailable)?;
        debug!("Created {}x{} drawing surface", width, height);

        Ok(Self { surface, ctx })
    }

    /// The underlying context, for drawing operations outside [`RasterSurface`].
    pub fn context(&self) -> &cairo::Context {
        &self.ctx
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// Ends drawing and hands back the finished image.
    ///
    /// # Errors
    /// Returns [`RenderError::Draw`] if any drawing call left the context in an error state.
    pub fn finish(self) -> Result<cairo::ImageSurface, RenderError> {
        let Self { surface, ctx } = self;
        ctx.status().map_err(RenderError::Draw)?;
        drop(ctx);
        surface.flush();
        Ok(surface)
    }
}

impl RasterSurface for CairoSurface {
    fn stroke_curve(&mut self, path: &CubicPath, width: f64, cap: LineCap, color: Color) {
        let ctx = &self.ctx;
        ctx.save().ok();
        ctx.set_operator(cairo::Operator::Over);
        ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        ctx.set_line_width(width);
        ctx.set_line_cap(cap.into());

        ctx.move_to(path.start.x, path.start.y);
        ctx.curve_to(
            path.control1.x,
            path.control1.y,
            path.control2.x,
            path.control2.y,
            path.end.x,
            path.end.y,
        );
        let _ = ctx.stroke();
        ctx.restore().ok();
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        // A zero radius would make the scale matrix singular and poison the context.
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }

        let ctx = &self.ctx;
        let center = rect.center();
        color.apply_source(ctx);

        ctx.save().ok();
        ctx.translate(center.x, center.y);
        ctx.scale(rect.width / 2.0, rect.height / 2.0);
        ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
        ctx.restore().ok();

        let _ = ctx.fill();
    }
}
