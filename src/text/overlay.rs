//! The manipulable text label laid over a drawing.

use super::layout::LabelLayout;
use super::measure::{MeasureRequest, PangoMeasurer, TextAlignment, TextMeasurer};
use crate::config::TextConfig;
use crate::draw::{Color, FontDescriptor, color::WHITE};
use crate::gesture::{Gesture, GestureEvent, PanTracker, TransformAccumulator};
use crate::util::{Insets, Point, Rect, Size};
use log::debug;

/// Default base font size, in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 60.0;

/// A text label that can be panned, pinched and rotated.
///
/// Every update path (gestures, text edits, font changes, view resizes)
/// funnels into [`TextOverlay::layout`], which derives a fresh
/// [`LabelLayout`] from the current state instead of mutating frame, font and
/// transform piecemeal.
pub struct TextOverlay<M: TextMeasurer = PangoMeasurer> {
    text: String,
    font: FontDescriptor,
    base_font_size: f64,
    color: Color,
    alignment: TextAlignment,
    fit_to_view_width: bool,
    insets: Insets,
    bounds: Rect,
    pan: PanTracker,
    transform: TransformAccumulator,
    /// Natural text size at the base font size
    measured: Size,
    measurer: M,
}

impl<M: TextMeasurer> TextOverlay<M> {
    /// Creates an empty label centered in `bounds`.
    pub fn new(bounds: Rect, measurer: M) -> Self {
        Self {
            text: String::new(),
            font: FontDescriptor::default(),
            base_font_size: DEFAULT_FONT_SIZE,
            color: WHITE,
            alignment: TextAlignment::default(),
            fit_to_view_width: false,
            insets: Insets::ZERO,
            bounds,
            pan: PanTracker::new(bounds.center()),
            transform: TransformAccumulator::new(),
            measured: Size::ZERO,
            measurer,
        }
    }

    /// Creates an empty label styled from the text configuration.
    pub fn from_config(config: &TextConfig, bounds: Rect, measurer: M) -> Self {
        let mut overlay = Self::new(bounds, measurer);
        overlay.font = config.font_descriptor();
        overlay.base_font_size = config.font_size;
        overlay.color = config.color.to_color();
        overlay.alignment = config.alignment;
        overlay.fit_to_view_width = config.fit_to_view_width;
        overlay.insets = config.edge_insets();
        overlay
    }

    /// Routes one gesture update and returns the resulting layout.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> LabelLayout {
        match event.gesture {
            Gesture::Pan { translation } => {
                self.pan.handle(event.phase, translation);
            }
            Gesture::Pinch { scale } => {
                let before = self.transform.scale();
                self.transform.handle_pinch(event.phase, scale);
                if self.transform.scale() != before {
                    debug!(
                        "Label font size now {:.1}",
                        self.base_font_size * self.transform.scale()
                    );
                }
            }
            Gesture::Rotate { angle } => {
                self.transform.handle_rotate(event.phase, angle);
            }
        }
        self.layout()
    }

    /// Current layout of the label.
    pub fn layout(&self) -> LabelLayout {
        LabelLayout::compute(
            self.measured,
            self.base_font_size,
            self.transform.scale(),
            self.pan.center(),
            self.transform.current_transform(),
        )
    }

    /// Replaces the text, keeping the label's center.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.remeasure();
    }

    pub fn set_font(&mut self, font: FontDescriptor) {
        self.font = font;
        self.remeasure();
    }

    /// Sets the unzoomed font size; the displayed size is this times the zoom factor.
    pub fn set_font_size(&mut self, size: f64) {
        self.base_font_size = size;
        self.remeasure();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
        self.remeasure();
    }

    pub fn set_fit_to_view_width(&mut self, fit: bool) {
        self.fit_to_view_width = fit;
        self.remeasure();
    }

    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
        self.remeasure();
    }

    /// Updates the hosting view's bounds.
    ///
    /// Until the label has been placed by a pan it stays centered in the bounds.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        if !self.pan.has_committed() && !self.pan.is_active() {
            self.pan.set_center(bounds.center());
        }
        if self.fit_to_view_width {
            self.remeasure();
        }
    }

    /// Clears the text and forgets zoom, rotation and placement.
    pub fn clear_text(&mut self) {
        self.transform.reset();
        self.pan.reset(self.bounds.center());
        self.text.clear();
        self.remeasure();
    }

    fn remeasure(&mut self) {
        self.measured = if self.text.is_empty() {
            Size::ZERO
        } else {
            self.measurer.measure(&MeasureRequest {
                text: &self.text,
                font: &self.font,
                font_size: self.base_font_size,
                alignment: self.alignment,
                fit_width: self.fit_to_view_width,
                bounds: self.bounds,
                insets: self.insets,
            })
        };
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }

    pub fn base_font_size(&self) -> f64 {
        self.base_font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    pub fn fit_to_view_width(&self) -> bool {
        self.fit_to_view_width
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Committed zoom factor.
    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    pub fn center(&self) -> Point {
        self.pan.center()
    }

    pub fn measured_size(&self) -> Size {
        self.measured
    }

    pub fn accumulator(&self) -> &TransformAccumulator {
        &self.transform
    }

    pub fn pan_tracker(&self) -> &PanTracker {
        &self.pan
    }
}
