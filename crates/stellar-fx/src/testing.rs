//! Headless stand-ins for the host: a container that hands out recording
//! renderers and a scheduler that records frame requests.

use std::cell::RefCell;
use std::rc::Rc;

use winit::dpi::PhysicalSize;

use crate::core::{FrameHandle, FrameScheduler};
use crate::render::{Container, ListenerId, RenderOptions, RenderStatus, Renderer};
use crate::scene::{PerspectiveCamera, Scene};

// ── renderer ──────────────────────────────────────────────────────────────

/// What every renderer handed out by a [`MockContainer`] has done.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RendererLog {
    pub renders: usize,
    pub resizes: usize,
    pub disposed: usize,
    pub last_resize: Option<PhysicalSize<u32>>,
    pub last_scene_len: usize,
    pub last_aspect: Option<f32>,
}

pub struct MockRenderer {
    state: Rc<RefCell<ContainerState>>,
    disposed: bool,
}

impl Renderer for MockRenderer {
    fn resize(&mut self, size: PhysicalSize<u32>) {
        let mut state = self.state.borrow_mut();
        state.log.resizes += 1;
        state.log.last_resize = Some(size);
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> RenderStatus {
        if self.disposed {
            return RenderStatus::Skipped;
        }
        let mut state = self.state.borrow_mut();
        state.log.renders += 1;
        state.log.last_scene_len = scene.len();
        state.log.last_aspect = Some(camera.aspect);
        state.render_status
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.state.borrow_mut().log.disposed += 1;
        }
    }
}

// ── container ─────────────────────────────────────────────────────────────

struct ContainerState {
    size: PhysicalSize<u32>,
    mounted: bool,
    attached: bool,
    attach_count: usize,
    detach_count: usize,
    fail_next_attach: bool,
    listeners: Vec<ListenerId>,
    next_listener: u64,
    listeners_removed: usize,
    render_status: RenderStatus,
    log: RendererLog,
}

/// Cheap-to-clone handle onto shared container state.
#[derive(Clone)]
pub struct MockContainer {
    state: Rc<RefCell<ContainerState>>,
}

impl MockContainer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(ContainerState {
                size: PhysicalSize::new(width, height),
                mounted: true,
                attached: false,
                attach_count: 0,
                detach_count: 0,
                fail_next_attach: false,
                listeners: Vec::new(),
                next_listener: 1,
                listeners_removed: 0,
                render_status: RenderStatus::Presented,
                log: RendererLog::default(),
            })),
        }
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.state.borrow_mut().size = PhysicalSize::new(width, height);
    }

    pub fn set_mounted(&self, mounted: bool) {
        self.state.borrow_mut().mounted = mounted;
    }

    /// Makes the next `attach_surface` fail like a missing GPU.
    pub fn fail_next_attach(&self) {
        self.state.borrow_mut().fail_next_attach = true;
    }

    /// Status every subsequent `render` returns.
    pub fn set_render_status(&self, status: RenderStatus) {
        self.state.borrow_mut().render_status = status;
    }

    pub fn attach_count(&self) -> usize {
        self.state.borrow().attach_count
    }

    pub fn detach_count(&self) -> usize {
        self.state.borrow().detach_count
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn listeners_removed(&self) -> usize {
        self.state.borrow().listeners_removed
    }

    pub fn renderer_log(&self) -> RendererLog {
        self.state.borrow().log.clone()
    }
}

impl Container for MockContainer {
    type Renderer = MockRenderer;

    fn client_size(&self) -> PhysicalSize<u32> {
        self.state.borrow().size
    }

    fn is_mounted(&self) -> bool {
        self.state.borrow().mounted
    }

    fn has_surface(&self) -> bool {
        self.state.borrow().attached
    }

    fn attach_surface(&self, _options: &RenderOptions) -> anyhow::Result<MockRenderer> {
        let mut state = self.state.borrow_mut();
        if std::mem::take(&mut state.fail_next_attach) {
            anyhow::bail!("no suitable adapter");
        }
        state.attached = true;
        state.attach_count += 1;
        Ok(MockRenderer {
            state: Rc::clone(&self.state),
            disposed: false,
        })
    }

    fn detach_surface(&self) {
        let mut state = self.state.borrow_mut();
        if state.attached {
            state.attached = false;
            state.detach_count += 1;
        }
    }

    fn add_resize_listener(&self) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.listeners.push(id);
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|l| *l != id);
        if state.listeners.len() != before {
            state.listeners_removed += 1;
        }
    }
}

// ── scheduler ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct SchedulerState {
    next: u64,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: Vec<FrameHandle>,
}

/// Records frame requests; nothing is ever delivered on its own.
#[derive(Clone, Default)]
pub struct MockScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested(&self) -> usize {
        self.state.borrow().requested
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.state.borrow().pending
    }

    pub fn cancelled(&self) -> Vec<FrameHandle> {
        self.state.borrow().cancelled.clone()
    }
}

impl FrameScheduler for MockScheduler {
    fn request_frame(&self) -> FrameHandle {
        let mut state = self.state.borrow_mut();
        state.next += 1;
        let handle = FrameHandle(state.next);
        state.pending = Some(handle);
        state.requested += 1;
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let mut state = self.state.borrow_mut();
        state.cancelled.push(handle);
        if state.pending == Some(handle) {
            state.pending = None;
        }
    }
}
