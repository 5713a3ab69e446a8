use crate::core::FrameScheduler;
use crate::paint::ColorInput;
use crate::render::Container;

use super::{Effect, EffectController, Lifecycle, TickOutcome};

/// Type-erased parameter change.
///
/// Effects ignore parameters they do not have.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectParam {
    Color(ColorInput),
    Density(f32),
    Speed(f32),
    Intensity(f32),
}

/// Object-safe view of a mounted effect, used by hosts that drive several
/// effect kinds through one code path.
pub trait EffectHandle {
    fn name(&self) -> &'static str;

    fn lifecycle(&self) -> Lifecycle;

    fn is_active(&self) -> bool {
        self.lifecycle() == Lifecycle::Active
    }

    fn tick(&mut self) -> TickOutcome;

    fn handle_resize(&mut self) -> bool;

    /// Applies `param`. `false` if inactive or unsupported by the effect.
    fn apply(&mut self, param: EffectParam) -> bool;

    fn teardown(&mut self);
}

impl<C, S, E> EffectHandle for EffectController<C, S, E>
where
    C: Container,
    S: FrameScheduler,
    E: Effect,
{
    fn name(&self) -> &'static str {
        E::NAME
    }

    fn lifecycle(&self) -> Lifecycle {
        EffectController::lifecycle(self)
    }

    fn tick(&mut self) -> TickOutcome {
        EffectController::tick(self)
    }

    fn handle_resize(&mut self) -> bool {
        EffectController::handle_resize(self)
    }

    fn apply(&mut self, param: EffectParam) -> bool {
        self.with_effect(|effect, scene| effect.apply(scene, &param))
            .unwrap_or(false)
    }

    fn teardown(&mut self) {
        EffectController::teardown(self)
    }
}
