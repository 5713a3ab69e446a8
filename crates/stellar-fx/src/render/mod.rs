//! GPU rendering subsystem.
//!
//! `RenderContext` binds a scene and camera to a host container through the
//! [`Renderer`] contract; `WgpuRenderer` is the wgpu implementation. Each
//! pipeline renderer owns its GPU resources (pipelines, buffers) and keys
//! per-object state on `ObjectKey`.
//!
//! Convention:
//! - world space is right-handed, the camera looks toward -z with +y up
//! - WGSL sources live in `shaders/` and are embedded with `include_str!`

mod container;
mod context;
mod ctx;
mod error;
mod renderer;
mod wgpu_renderer;

pub mod pipelines;

pub use container::{Container, ListenerId};
pub use context::{RenderContext, RenderOptions};
pub use ctx::{RenderCtx, Viewport};
pub use error::ActivationError;
pub use renderer::{RenderStatus, Renderer};
pub use wgpu_renderer::WgpuRenderer;
