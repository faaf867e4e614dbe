//! Library exports for the doodlekit annotation core.
//!
//! Exposes the stroke renderer, the gesture accumulators driving the text
//! label and the configuration structures so that hosts (and the bundled CLI
//! harness) share one implementation.

pub mod config;
pub mod draw;
pub mod gesture;
pub mod scene;
pub mod text;
pub mod util;

pub use config::Config;
