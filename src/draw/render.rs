//! Cairo-based rendering of strokes, labels and finished annotations.

use super::bezier::Stroke;
use super::color::Color;
use super::frame::Frame;
use super::surface::{CairoSurface, RasterSurface, RenderError};
use crate::text::TextMeasurer;
use crate::text::TextOverlay;
use crate::text::measure::{WrapConstraint, configure_layout};
use crate::util::Size;
use log::{debug, warn};
use std::fs::File;
use std::path::Path;

/// Renders all strokes in order (first stroke = bottom layer).
pub fn render_strokes(surface: &mut dyn RasterSurface, strokes: &[Stroke]) {
    for stroke in strokes {
        stroke.draw(surface);
    }
}

/// Rasterizes a frame onto a fresh transparent surface of `size`.
///
/// # Errors
/// Fails when the surface cannot be allocated or drawing left cairo in an error state.
pub fn render_frame(size: Size, frame: &Frame) -> Result<cairo::ImageSurface, RenderError> {
    let mut surface = CairoSurface::begin(size)?;
    frame.draw(&mut surface);
    surface.finish()
}

/// Produces an image of `size` filled entirely with `color`.
pub fn solid_image(color: Color, size: Size) -> Result<cairo::ImageSurface, RenderError> {
    let surface = CairoSurface::begin(size)?;
    let ctx = surface.context();
    color.apply_source(ctx);
    ctx.set_operator(cairo::Operator::Source);
    let _ = ctx.paint();
    surface.finish()
}

/// Draws the overlay's text centered on its layout, under the layout's transform.
///
/// Empty labels draw nothing.
pub fn render_label<M: TextMeasurer>(ctx: &cairo::Context, overlay: &TextOverlay<M>) {
    if overlay.text().is_empty() {
        return;
    }

    let label = overlay.layout();
    if label.font_size <= 0.0 || label.transform.to_cairo().try_invert().is_err() {
        warn!("Skipping label with degenerate transform or font size");
        return;
    }

    if let Ok((x1, y1, x2, y2)) = ctx.clip_extents() {
        let corners = label.corners();
        if corners.iter().all(|p| p.x < x1)
            || corners.iter().all(|p| p.x > x2)
            || corners.iter().all(|p| p.y < y1)
            || corners.iter().all(|p| p.y > y2)
        {
            debug!("Label lies outside the surface, not drawing it");
            return;
        }
    }

    // Save context state to prevent settings from leaking to other drawing operations
    ctx.save().ok();
    ctx.transform(label.to_surface().to_cairo());

    // Gray antialiasing; subpixel fringes on transparent surfaces
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);
    let constraint = if overlay.fit_to_view_width() {
        WrapConstraint::Wrap {
            width: label.size.width,
            height: label.size.height,
        }
    } else {
        WrapConstraint::SingleLine
    };
    configure_layout(
        &layout,
        overlay.text(),
        overlay.font(),
        label.font_size,
        overlay.alignment(),
        constraint,
    );

    let (_ink, logical) = layout.pixel_extents();
    let x = match constraint {
        WrapConstraint::Wrap { width, .. } => -width / 2.0,
        WrapConstraint::SingleLine => -(logical.width() as f64) / 2.0,
    };
    let y = -(logical.height() as f64) / 2.0;

    overlay.color().apply_source(ctx);
    ctx.move_to(x, y);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

/// Composites a finished annotation: background, strokes, then the text label.
///
/// The background is scaled to fill `size`.
///
/// # Errors
/// Fails when the output surface cannot be allocated or drawing failed.
pub fn compose_annotation<M: TextMeasurer>(
    size: Size,
    background: Option<&cairo::ImageSurface>,
    frame: &Frame,
    overlay: Option<&TextOverlay<M>>,
) -> Result<cairo::ImageSurface, RenderError> {
    let mut surface = CairoSurface::begin(size)?;

    if let Some(background) = background {
        paint_scaled(surface.context(), background, surface.width(), surface.height());
    }

    frame.draw(&mut surface);

    if let Some(overlay) = overlay {
        render_label(surface.context(), overlay);
    }

    debug!(
        "Composed {}x{} annotation with {} strokes",
        surface.width(),
        surface.height(),
        frame.len()
    );
    surface.finish()
}

fn paint_scaled(ctx: &cairo::Context, image: &cairo::ImageSurface, width: i32, height: i32) {
    if image.width() <= 0 || image.height() <= 0 {
        return;
    }

    ctx.save().ok();
    ctx.scale(
        width as f64 / image.width() as f64,
        height as f64 / image.height() as f64,
    );
    match ctx.set_source_surface(image, 0.0, 0.0) {
        Ok(()) => {
            // Pad so bilinear filtering does not fade the edges to transparent.
            ctx.source().set_extend(cairo::Extend::Pad);
            let _ = ctx.paint();
        }
        Err(err) => warn!("Unable to use background image: {}", err),
    }
    ctx.restore().ok();
}

/// Writes `surface` to `path` as PNG.
pub fn write_png(surface: &cairo::ImageSurface, path: &Path) -> Result<(), RenderError> {
    let mut file = File::create(path)?;
    surface.write_to_png(&mut file)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
