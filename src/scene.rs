//! Scene files: a recorded drawing plus label gestures, replayed offline.
//!
//! A scene stands in for the host application. It lists the stroke segments
//! stroke capture would have produced and the gesture updates a recognizer
//! would have delivered to the label, so the whole annotation can be
//! rendered without a UI toolkit.
//!
//! # Example TOML
//! ```toml
//! width = 400
//! height = 300
//! background = "white"
//!
//! [[stroke]]
//! kind = "bezier"
//! start = { x = 20.0, y = 40.0 }
//! end = { x = 380.0, y = 60.0 }
//! start_width = 2.0
//! end_width = 12.0
//!
//! [[stroke]]
//! kind = "point"
//! at = { x = 200.0, y = 200.0 }
//!
//! [label]
//! text = "Hello"
//!
//! [[label.gesture]]
//! phase = "began"
//! kind = "rotate"
//! angle = 0.0
//! ```

use crate::config::{ColorSpec, Config, StrokeConfig};
use crate::draw::{BezierSegment, Frame, Stroke, TouchPoint, compose_annotation, solid_image};
use crate::gesture::GestureEvent;
use crate::text::{TextMeasurer, TextOverlay};
use crate::util::{Point, Rect, Size};
use anyhow::{Context, Result, ensure};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A drawing to render: canvas size, background, strokes and an optional label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,

    /// Solid background; transparent when absent
    #[serde(default)]
    pub background: Option<ColorSpec>,

    /// Maximum number of strokes kept (0 = unlimited)
    #[serde(default)]
    pub max_strokes: usize,

    #[serde(default, rename = "stroke")]
    pub strokes: Vec<StrokeSpec>,

    #[serde(default)]
    pub label: Option<LabelScene>,
}

/// One recorded stroke; unset style fields come from [`StrokeConfig`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StrokeSpec {
    Bezier {
        start: Point,
        end: Point,
        /// Defaults to one third of the way from `start` to `end`
        control1: Option<Point>,
        /// Defaults to two thirds of the way from `start` to `end`
        control2: Option<Point>,
        start_width: Option<f64>,
        end_width: Option<f64>,
        color: Option<ColorSpec>,
        constant_width: Option<bool>,
    },
    Point {
        at: Point,
        width: Option<f64>,
        color: Option<ColorSpec>,
    },
}

/// The text label and the gesture updates replayed on it, in order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScene {
    pub text: String,
    #[serde(default, rename = "gesture")]
    pub gestures: Vec<GestureEvent>,
}

impl StrokeSpec {
    /// Resolves this entry into a drawable stroke using `defaults` for unset fields.
    pub fn to_stroke(&self, defaults: &StrokeConfig) -> Stroke {
        match self {
            StrokeSpec::Bezier {
                start,
                end,
                control1,
                control2,
                start_width,
                end_width,
                color,
                constant_width,
            } => {
                let along = |f: f64| {
                    Point::new(
                        start.x + (end.x - start.x) * f,
                        start.y + (end.y - start.y) * f,
                    )
                };
                BezierSegment {
                    start_point: *start,
                    end_point: *end,
                    control_point1: control1.unwrap_or_else(|| along(1.0 / 3.0)),
                    control_point2: control2.unwrap_or_else(|| along(2.0 / 3.0)),
                    start_width: start_width.unwrap_or(defaults.default_width),
                    end_width: end_width.unwrap_or(defaults.default_width),
                    stroke_color: color.as_ref().unwrap_or(&defaults.default_color).to_color(),
                    is_constant_width: constant_width.unwrap_or(defaults.constant_width),
                }
                .into()
            }
            StrokeSpec::Point { at, width, color } => TouchPoint {
                point: *at,
                width: width.unwrap_or(defaults.default_width),
                stroke_color: color.as_ref().unwrap_or(&defaults.default_color).to_color(),
            }
            .into(),
        }
    }
}

impl Scene {
    /// Reads and parses a scene file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// declares an empty canvas.
    pub fn load(path: &Path) -> Result<Self> {
        let input = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene from {}", path.display()))?;
        let scene = Self::from_toml_str(&input)
            .with_context(|| format!("Failed to parse scene from {}", path.display()))?;
        info!(
            "Loaded scene {} ({}x{}, {} strokes)",
            path.display(),
            scene.width,
            scene.height,
            scene.strokes.len()
        );
        Ok(scene)
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        let scene: Scene = toml::from_str(input)?;
        ensure!(
            scene.width.is_finite() && scene.height.is_finite(),
            "Scene size must be finite"
        );
        ensure!(
            scene.width > 0.0 && scene.height > 0.0,
            "Scene size must be positive, got {}x{}",
            scene.width,
            scene.height
        );
        Ok(scene)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Builds the stroke frame, dropping strokes beyond `max_strokes`.
    pub fn frame(&self, defaults: &StrokeConfig) -> Frame {
        let mut frame = Frame::new();
        for (index, spec) in self.strokes.iter().enumerate() {
            if !frame.try_add_stroke(spec.to_stroke(defaults), self.max_strokes) {
                warn!(
                    "Stroke limit {} reached, discarding {} remaining strokes",
                    self.max_strokes,
                    self.strokes.len() - index
                );
                break;
            }
        }
        frame
    }

    /// Creates the label and replays its gestures, if the scene has one.
    pub fn overlay<M: TextMeasurer>(
        &self,
        config: &Config,
        measurer: M,
    ) -> Option<TextOverlay<M>> {
        let label = self.label.as_ref()?;
        let mut overlay =
            TextOverlay::from_config(&config.text, Rect::from_size(self.size()), measurer);
        overlay.set_text(label.text.clone());
        for event in &label.gestures {
            overlay.handle_gesture(*event);
        }
        debug!(
            "Replayed {} label gestures, final layout {:?}",
            label.gestures.len(),
            overlay.layout()
        );
        Some(overlay)
    }

    /// Renders the complete annotation.
    ///
    /// # Errors
    /// Returns an error if a drawing surface cannot be created.
    pub fn render<M: TextMeasurer>(
        &self,
        config: &Config,
        measurer: M,
    ) -> Result<cairo::ImageSurface> {
        let size = self.size();
        let background = self
            .background
            .as_ref()
            .map(|color| solid_image(color.to_color(), size))
            .transpose()
            .context("Failed to create background")?;
        let frame = self.frame(&config.stroke);
        let overlay = self.overlay(config, measurer);

        compose_annotation(size, background.as_ref(), &frame, overlay.as_ref())
            .context("Failed to compose annotation")
    }
}
