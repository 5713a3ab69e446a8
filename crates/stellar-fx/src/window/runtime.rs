use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl};
use crate::device::GpuInit;
use crate::effects::{EffectHandle, TickOutcome};

use super::WindowHost;

/// One window to open at startup.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Let the compositor show what is behind the window.
    pub transparent: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "stellar-fx".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            transparent: false,
        }
    }
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub windows: Vec<WindowConfig>,
    /// Base GPU settings. MSAA is used only if both this and the effect ask for it.
    pub gpu: GpuInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            windows: vec![WindowConfig::default()],
            gpu: GpuInit::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the configured windows, mounts one effect per window and runs
    /// until every window is closed or the app asks to exit.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let mut state = EffectLoop::new(config, app);
        EventLoop::new()
            .context("cannot create event loop")?
            .run_app(&mut state)
            .context("event loop failed")
    }
}

/// Effect is declared first so it is torn down before the window goes away.
struct WindowEntry {
    effect: Box<dyn EffectHandle>,
    host: WindowHost,
}

struct EffectLoop<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    app: A,

    windows: HashMap<WindowId, WindowEntry>,
    started: bool,
    exit_requested: bool,
}

impl<A> EffectLoop<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            windows: HashMap::new(),
            started: false,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.teardown_all();
        self.request_exit();
        event_loop.exit();
    }

    fn open_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size)
            .with_transparent(config.transparent);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let id = window.id();
        let host = WindowHost::new(window, self.config.gpu.clone());

        let effect = self
            .app
            .mount(id, host.clone())
            .with_context(|| format!("effect unavailable in window {id:?}"))?;

        log::info!("mounted {} in window {:?}", effect.name(), id);
        self.windows.insert(id, WindowEntry { effect, host });
        Ok(id)
    }

    fn close_window(&mut self, id: WindowId) {
        if let Some(mut entry) = self.windows.remove(&id) {
            entry.effect.teardown();
        }
        if self.windows.is_empty() {
            self.request_exit();
        }
    }

    fn teardown_all(&mut self) {
        for (_, mut entry) in self.windows.drain() {
            entry.effect.teardown();
        }
    }
}

impl<A> ApplicationHandler for EffectLoop<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        let configs = self.config.windows.clone();
        for config in &configs {
            if let Err(e) = self.open_window(event_loop, config) {
                log::warn!("{e:#}");
            }
        }

        if self.windows.is_empty() {
            log::error!("no effect could be mounted; exiting");
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.exit_requested {
            true => event_loop.exit(),
            // Effects request their own redraws.
            false => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let (app, windows) = (&mut self.app, &mut self.windows);
        let Some(entry) = windows.get_mut(&window_id) else {
            return;
        };

        if app.on_window_event(window_id, &event, entry.effect.as_mut()) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.close_window(window_id);
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if entry.host.has_resize_listener() {
                    entry.effect.handle_resize();
                }
            }

            WindowEvent::RedrawRequested => {
                if entry.host.take_pending_frame().is_none() {
                    return;
                }
                if entry.effect.tick() == TickOutcome::Lost {
                    log::error!("surface lost in window {window_id:?}; closing it");
                    self.close_window(window_id);
                }
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown_all();
    }
}
