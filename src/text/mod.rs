//! Text overlay: label state, layout and the measurement boundary.

pub mod layout;
pub mod measure;
pub mod overlay;

pub use layout::{LABEL_FRAME_PADDING, LabelLayout};
pub use measure::{MeasureRequest, PangoMeasurer, TextAlignment, TextMeasurer, WrapConstraint};
pub use overlay::{DEFAULT_FONT_SIZE, TextOverlay};
