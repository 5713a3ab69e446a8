use winit::dpi::PhysicalSize;

use super::{RenderOptions, Renderer};

/// Opaque id of a registered resize listener.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(pub u64);

/// Host element a render surface is attached to.
///
/// Methods take `&self`: containers are cheap handles onto host state (a
/// window, a test fixture) shared with the host that drives them.
pub trait Container {
    type Renderer: Renderer;

    /// Current client size in physical pixels.
    fn client_size(&self) -> PhysicalSize<u32>;

    /// `false` while the host element is not mounted yet.
    fn is_mounted(&self) -> bool {
        true
    }

    /// Whether a render surface is currently attached.
    fn has_surface(&self) -> bool;

    /// Creates a renderer whose surface is attached to this container.
    ///
    /// Callers check [`has_surface`](Self::has_surface) first; attaching twice
    /// without detaching is a caller error.
    fn attach_surface(&self, options: &RenderOptions) -> anyhow::Result<Self::Renderer>;

    /// Marks the surface as detached. Idempotent.
    fn detach_surface(&self);

    /// Starts delivering resize notifications for this container.
    fn add_resize_listener(&self) -> ListenerId;

    fn remove_resize_listener(&self, id: ListenerId);
}
