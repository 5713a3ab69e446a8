use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::effects::EffectHandle;
use crate::render::ActivationError;
use crate::window::WindowHost;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once per window, right after it is created.
    ///
    /// The returned handle is ticked on every redraw the runtime delivers for
    /// that window and torn down before the window is dropped. An error leaves
    /// the window without an effect; the runtime closes it.
    fn mount(
        &mut self,
        window_id: WindowId,
        host: WindowHost,
    ) -> Result<Box<dyn EffectHandle>, ActivationError>;

    /// Called for window events, before the runtime handles them.
    fn on_window_event(
        &mut self,
        window_id: WindowId,
        event: &WindowEvent,
        effect: &mut dyn EffectHandle,
    ) -> AppControl {
        let _ = (window_id, event, effect);
        AppControl::Continue
    }
}
