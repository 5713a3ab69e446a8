//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the windows, and exposes each window to
//! effects as a [`WindowHost`] (render container + frame scheduler).

mod host;
mod runtime;

pub use host::WindowHost;
pub use runtime::{Runtime, RuntimeConfig, WindowConfig};
