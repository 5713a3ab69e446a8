//! stellar-fx engine crate.
//!
//! Decorative real-time effects (a procedural nebula and a recycling
//! starfield) rendered with wgpu, plus the scene, render-context and runtime
//! pieces that host them.

pub mod core;
pub mod device;
pub mod effects;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;

#[cfg(test)]
mod testing;
