//! Studio application: mounts one effect per window and maps keys onto
//! effect parameters.

use std::collections::{HashMap, VecDeque};

use stellar_fx::core::{App, AppControl};
use stellar_fx::effects::{
    EffectHandle, EffectParam, NebulaController, NebulaOptions, StarfieldController,
    StarfieldOptions,
};
use stellar_fx::paint::ColorInput;
use stellar_fx::render::ActivationError;
use stellar_fx::window::WindowHost;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::config::EffectChoice;

/// Colors cycled with `C`.
pub const PALETTE: [&str; 5] = ["#3366ff", "#ff6633", "#33ff99", "#cc33ff", "#ffffff"];

const DENSITY_STEP: f32 = 0.1;
const SPEED_STEP: f32 = 0.05;
const INTENSITY_STEP: f32 = 0.25;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EffectKind {
    Nebula,
    Starfield,
}

impl EffectKind {
    pub fn title(self) -> &'static str {
        match self {
            EffectKind::Nebula => "stellar-fx · nebula",
            EffectKind::Starfield => "stellar-fx · starfield",
        }
    }
}

/// Windows to open for `choice`, in order.
pub fn kinds_for(choice: EffectChoice) -> Vec<EffectKind> {
    match choice {
        EffectChoice::Nebula => vec![EffectKind::Nebula],
        EffectChoice::Starfield => vec![EffectKind::Starfield],
        EffectChoice::Both => vec![EffectKind::Nebula, EffectKind::Starfield],
    }
}

/// Keyboard-adjusted parameter values of one window.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub density: f32,
    pub speed: f32,
    pub intensity: f32,
    pub palette_index: usize,
}

impl Tuning {
    fn for_nebula(options: &NebulaOptions) -> Self {
        Self {
            density: options.density,
            speed: options.speed,
            intensity: options.intensity,
            palette_index: 0,
        }
    }

    fn for_starfield(options: &StarfieldOptions) -> Self {
        Self {
            density: 0.0,
            speed: options.speed,
            intensity: 0.0,
            palette_index: PALETTE.len() - 1,
        }
    }

    /// Adjusts the tuning for `key` and returns the parameter to send.
    ///
    /// Values never go below zero.
    pub fn param_for_key(&mut self, key: KeyCode) -> Option<EffectParam> {
        fn step(value: &mut f32, delta: f32) -> f32 {
            *value = (*value + delta).max(0.0);
            *value
        }

        match key {
            KeyCode::ArrowUp => Some(EffectParam::Density(step(&mut self.density, DENSITY_STEP))),
            KeyCode::ArrowDown => {
                Some(EffectParam::Density(step(&mut self.density, -DENSITY_STEP)))
            }
            KeyCode::ArrowRight => Some(EffectParam::Speed(step(&mut self.speed, SPEED_STEP))),
            KeyCode::ArrowLeft => Some(EffectParam::Speed(step(&mut self.speed, -SPEED_STEP))),
            KeyCode::PageUp => {
                Some(EffectParam::Intensity(step(&mut self.intensity, INTENSITY_STEP)))
            }
            KeyCode::PageDown => {
                Some(EffectParam::Intensity(step(&mut self.intensity, -INTENSITY_STEP)))
            }
            KeyCode::KeyC => {
                self.palette_index = (self.palette_index + 1) % PALETTE.len();
                Some(EffectParam::Color(ColorInput::from(PALETTE[self.palette_index])))
            }
            _ => None,
        }
    }
}

pub struct StudioApp {
    pending: VecDeque<EffectKind>,
    nebula: NebulaOptions,
    starfield: StarfieldOptions,
    tuning: HashMap<WindowId, Tuning>,
}

impl StudioApp {
    /// `kinds` lists the effect of each window in creation order.
    pub fn new(kinds: Vec<EffectKind>, nebula: NebulaOptions, starfield: StarfieldOptions) -> Self {
        Self {
            pending: kinds.into(),
            nebula,
            starfield,
            tuning: HashMap::new(),
        }
    }
}

impl App for StudioApp {
    fn mount(
        &mut self,
        window_id: WindowId,
        host: WindowHost,
    ) -> Result<Box<dyn EffectHandle>, ActivationError> {
        let kind = self.pending.pop_front().unwrap_or(EffectKind::Nebula);

        let (effect, tuning) = match kind {
            EffectKind::Nebula => {
                let controller =
                    NebulaController::mount(Some(host.clone()), host, self.nebula.clone())?;
                (Box::new(controller) as Box<dyn EffectHandle>, Tuning::for_nebula(&self.nebula))
            }
            EffectKind::Starfield => {
                let controller =
                    StarfieldController::mount(Some(host.clone()), host, self.starfield.clone())?;
                (Box::new(controller) as Box<dyn EffectHandle>, Tuning::for_starfield(&self.starfield))
            }
        };

        self.tuning.insert(window_id, tuning);
        Ok(effect)
    }

    fn on_window_event(
        &mut self,
        window_id: WindowId,
        event: &WindowEvent,
        effect: &mut dyn EffectHandle,
    ) -> AppControl {
        let WindowEvent::KeyboardInput { event: key, .. } = event else {
            return AppControl::Continue;
        };
        if key.state != ElementState::Pressed {
            return AppControl::Continue;
        }
        let PhysicalKey::Code(code) = key.physical_key else {
            return AppControl::Continue;
        };

        if code == KeyCode::Escape {
            return AppControl::Exit;
        }

        let Some(tuning) = self.tuning.get_mut(&window_id) else {
            return AppControl::Continue;
        };
        if let Some(param) = tuning.param_for_key(code) {
            let label = format!("{param:?}");
            if effect.apply(param) {
                log::info!("{}: {label}", effect.name());
            } else {
                log::debug!("{} ignores {label}", effect.name());
            }
        }

        AppControl::Continue
    }
}
