//! Color model shared between effect options and renderers.

pub mod color;

pub use color::{ColorInput, Rgb};
