use winit::dpi::PhysicalSize;

use crate::scene::{PerspectiveCamera, Scene};

/// Outcome of one render call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderStatus {
    /// A frame was submitted.
    Presented,
    /// Nothing was drawn this time (zero-size surface, transient surface error,
    /// disposed renderer). Rendering may resume next tick.
    Skipped,
    /// The surface is unrecoverable; the host should tear the effect down.
    Lost,
}

/// Draws a scene into a display surface.
///
/// Implementations own every GPU resource they create and key per-object
/// resources on [`ObjectKey`](crate::scene::ObjectKey). Resources of objects no
/// longer in the scene are released on the next `render`.
pub trait Renderer {
    /// Resizes the backing surface (physical pixels).
    fn resize(&mut self, size: PhysicalSize<u32>);

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> RenderStatus;

    /// Releases every GPU handle. Idempotent; `render` is a no-op afterwards.
    fn dispose(&mut self);
}
