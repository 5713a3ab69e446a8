use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowId};

use crate::core::{FrameHandle, FrameScheduler};
use crate::device::GpuInit;
use crate::render::{Container, ListenerId, RenderOptions, WgpuRenderer};

/// A runtime window seen from an effect: the container its surface attaches
/// to and the scheduler that paces its frames.
///
/// Clones share state; the runtime keeps one and hands another to the app.
#[derive(Clone)]
pub struct WindowHost {
    window: Arc<Window>,
    state: Rc<HostState>,
}

struct HostState {
    gpu_init: GpuInit,
    attached: Cell<bool>,
    resize_listener: Cell<Option<ListenerId>>,
    pending_frame: Cell<Option<FrameHandle>>,
    next_id: Cell<u64>,
}

impl WindowHost {
    pub(crate) fn new(window: Arc<Window>, gpu_init: GpuInit) -> Self {
        Self {
            window,
            state: Rc::new(HostState {
                gpu_init,
                attached: Cell::new(false),
                resize_listener: Cell::new(None),
                pending_frame: Cell::new(None),
                next_id: Cell::new(1),
            }),
        }
    }

    #[inline]
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Whether resize notifications should be forwarded to the effect.
    pub fn has_resize_listener(&self) -> bool {
        self.state.resize_listener.get().is_some()
    }

    /// Consumes the pending frame request. `None` means the redraw was not
    /// requested by the effect (or was cancelled) and must not tick it.
    pub(crate) fn take_pending_frame(&self) -> Option<FrameHandle> {
        self.state.pending_frame.take()
    }

    fn next_id(&self) -> u64 {
        let id = self.state.next_id.get();
        self.state.next_id.set(id.wrapping_add(1));
        id
    }
}

impl Container for WindowHost {
    type Renderer = WgpuRenderer;

    fn client_size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    fn has_surface(&self) -> bool {
        self.state.attached.get()
    }

    fn attach_surface(&self, options: &RenderOptions) -> anyhow::Result<WgpuRenderer> {
        let base = &self.state.gpu_init;
        let init = GpuInit {
            antialias: base.antialias && options.antialias,
            ..base.clone()
        };

        let renderer = pollster::block_on(WgpuRenderer::create(
            Arc::clone(&self.window),
            self.client_size(),
            init,
        ))
        .with_context(|| format!("GPU initialization failed for window {:?}", self.id()))?;

        self.state.attached.set(true);
        Ok(renderer)
    }

    fn detach_surface(&self) {
        self.state.attached.set(false);
    }

    fn add_resize_listener(&self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.state.resize_listener.set(Some(id));
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) {
        if self.state.resize_listener.get() == Some(id) {
            self.state.resize_listener.set(None);
        }
    }
}

impl FrameScheduler for WindowHost {
    fn request_frame(&self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.state.pending_frame.set(Some(handle));
        self.window.request_redraw();
        handle
    }

    /// winit cannot retract a redraw; dropping the pending handle makes the
    /// runtime ignore it when it arrives.
    fn cancel_frame(&self, handle: FrameHandle) {
        if self.state.pending_frame.get() == Some(handle) {
            self.state.pending_frame.set(None);
        }
    }
}
