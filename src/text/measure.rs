//! Text measurement boundary.
//!
//! The overlay only needs the natural size of its text; shaping and wrapping
//! are delegated to a [`TextMeasurer`]. [`PangoMeasurer`] is the host
//! implementation used outside of tests.

use crate::draw::FontDescriptor;
use crate::util::{Insets, Rect, Size};
use log::error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Horizontal alignment of label text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
    Justified,
}

impl TextAlignment {
    fn apply(self, layout: &pango::Layout) {
        let (alignment, justify) = match self {
            TextAlignment::Left => (pango::Alignment::Left, false),
            TextAlignment::Center => (pango::Alignment::Center, false),
            TextAlignment::Right => (pango::Alignment::Right, false),
            TextAlignment::Justified => (pango::Alignment::Left, true),
        };
        layout.set_alignment(alignment);
        layout.set_justify(justify);
    }
}

/// How measured text may flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WrapConstraint {
    /// One line of unconstrained width
    SingleLine,
    /// Wrap within `width` using as many lines as needed
    Wrap { width: f64, height: f64 },
}

/// Everything a measurer needs to size a label.
#[derive(Debug, Clone, Copy)]
pub struct MeasureRequest<'a> {
    pub text: &'a str,
    pub font: &'a FontDescriptor,
    pub font_size: f64,
    pub alignment: TextAlignment,
    /// Wrap to the view width instead of laying out a single line.
    pub fit_width: bool,
    /// Bounds of the view hosting the label.
    pub bounds: Rect,
    pub insets: Insets,
}

impl MeasureRequest<'_> {
    /// Resolves the fitting mode into a concrete constraint.
    ///
    /// In fit mode each side of the bounds is inset by the sum of the
    /// horizontal insets horizontally and the sum of the vertical insets
    /// vertically.
    pub fn constraint(&self) -> WrapConstraint {
        if self.fit_width {
            let area = self.bounds.inset_by(
                self.insets.left + self.insets.right,
                self.insets.top + self.insets.bottom,
            );
            WrapConstraint::Wrap {
                width: area.width,
                height: area.height,
            }
        } else {
            WrapConstraint::SingleLine
        }
    }
}

/// Host text-layout facility returning the natural size of a text block.
///
/// [`Size::ZERO`] means there is nothing to lay out: the text is empty or
/// could not be measured at all. Implementations log the latter at error level.
pub trait TextMeasurer {
    fn measure(&self, request: &MeasureRequest<'_>) -> Size;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, request: &MeasureRequest<'_>) -> Size {
        (**self).measure(request)
    }
}

/// Applies font, text, alignment and wrapping to a Pango layout.
pub(crate) fn configure_layout(
    layout: &pango::Layout,
    text: &str,
    font: &FontDescriptor,
    font_size: f64,
    alignment: TextAlignment,
    constraint: WrapConstraint,
) {
    layout.set_font_description(Some(&font.to_pango(font_size)));
    layout.set_text(text);
    alignment.apply(layout);

    match constraint {
        WrapConstraint::SingleLine => {
            layout.set_single_paragraph_mode(true);
            layout.set_width(-1);
        }
        WrapConstraint::Wrap { width, .. } => {
            layout.set_single_paragraph_mode(false);
            layout.set_wrap(pango::WrapMode::WordChar);
            layout.set_width((width * pango::SCALE as f64).round() as i32);
        }
    }
}

/// Measures text with Pango on a scratch cairo surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct PangoMeasurer;

impl TextMeasurer for PangoMeasurer {
    fn measure(&self, request: &MeasureRequest<'_>) -> Size {
        if request.text.is_empty() {
            return Size::ZERO;
        }

        // A tiny image surface is enough; only the layout is needed.
        let ctx = match cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1)
            .and_then(|surface| cairo::Context::new(&surface))
        {
            Ok(ctx) => ctx,
            Err(err) => {
                error!("Unable to create measurement surface: {}", err);
                return Size::ZERO;
            }
        };

        let layout = pangocairo::functions::create_layout(&ctx);
        configure_layout(
            &layout,
            request.text,
            request.font,
            request.font_size,
            request.alignment,
            request.constraint(),
        );

        let (_ink, logical) = layout.extents();
        let scale = pango::SCALE as f64;
        Size::new(
            logical.width() as f64 / scale,
            logical.height() as f64 / scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(font: &'a FontDescriptor, text: &'a str, fit_width: bool) -> MeasureRequest<'a> {
        MeasureRequest {
            text,
            font,
            font_size: 40.0,
            alignment: TextAlignment::Center,
            fit_width,
            bounds: Rect::new(0.0, 0.0, 400.0, 300.0),
            insets: Insets::new(10.0, 20.0, 5.0, 30.0),
        }
    }

    #[test]
    fn single_line_ignores_bounds_and_insets() {
        let font = FontDescriptor::default();
        assert_eq!(
            request(&font, "hi", false).constraint(),
            WrapConstraint::SingleLine
        );
    }

    #[test]
    fn fit_width_insets_each_side_by_summed_margins() {
        let font = FontDescriptor::default();
        // dx = 20 + 30 = 50 per side, dy = 10 + 5 = 15 per side
        assert_eq!(
            request(&font, "hi", true).constraint(),
            WrapConstraint::Wrap {
                width: 300.0,
                height: 270.0
            }
        );
    }

    #[test]
    fn pango_measures_empty_text_as_zero() {
        let font = FontDescriptor::default();
        assert_eq!(PangoMeasurer.measure(&request(&font, "", false)), Size::ZERO);
    }

    #[test]
    fn pango_measures_non_empty_text() {
        let font = FontDescriptor::default();
        let size = PangoMeasurer.measure(&request(&font, "Hello", false));
        assert!(size.width > 0.0);
        assert!(size.height > 0.0);
    }

    #[test]
    fn pango_wrapped_text_stays_within_constraint() {
        let font = FontDescriptor::default();
        let text = "a fairly long caption that cannot possibly fit on one narrow line";
        let wrapped = PangoMeasurer.measure(&request(&font, text, true));
        let single = PangoMeasurer.measure(&request(&font, text, false));
        assert!(wrapped.width <= 300.0 + 1.0);
        assert!(wrapped.height > single.height);
    }
}
