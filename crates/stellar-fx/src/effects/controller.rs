use crate::core::{FrameHandle, FrameScheduler};
use crate::render::{ActivationError, Container, RenderContext, RenderOptions, RenderStatus};
use crate::scene::Scene;
use crate::time::{FrameClock, FrameTime};

use super::EffectParam;

/// Controller state. `TornDown` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Active,
    TornDown,
}

/// Result of one [`EffectController::tick`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    /// State advanced and a frame was presented.
    Rendered,
    /// State advanced but no frame was presented (zero size, transient surface error).
    Skipped,
    /// The controller is not active; nothing happened.
    Inactive,
    /// The surface is gone for good. The host should tear the effect down.
    Lost,
}

/// Effect state living in a render context's scene.
///
/// Implementations add their objects to the scene in `build`, mutate them in
/// `advance` and remove them in `dispose`.
pub trait Effect: Sized {
    type Options;

    /// Short name used in logs.
    const NAME: &'static str;

    /// Camera/surface parameters the effect is designed for.
    fn render_options(options: &Self::Options) -> RenderOptions;

    fn build(scene: &mut Scene, options: Self::Options) -> Self;

    /// Advances the effect by one frame.
    fn advance(&mut self, scene: &mut Scene, time: &FrameTime);

    /// Applies a type-erased parameter. Returns `false` if unsupported.
    fn apply(&mut self, scene: &mut Scene, param: &EffectParam) -> bool {
        let _ = (scene, param);
        false
    }

    /// Removes the effect's objects from `scene`. Idempotent.
    fn dispose(&mut self, scene: &mut Scene);
}

/// Owns one render context plus one effect and drives the update/render cycle.
///
/// `C` is the host container the surface attaches to, `S` paces frames.
pub struct EffectController<C: Container, S: FrameScheduler, E: Effect> {
    lifecycle: Lifecycle,
    scheduler: S,
    scheduled: Option<FrameHandle>,
    context: Option<RenderContext<C>>,
    effect: Option<E>,
    clock: FrameClock,
}

impl<C: Container, S: FrameScheduler, E: Effect> EffectController<C, S, E> {
    /// Creates an `Uninitialized` controller.
    pub fn new(scheduler: S) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            scheduler,
            scheduled: None,
            context: None,
            effect: None,
            clock: FrameClock::new(),
        }
    }

    /// Creates a controller and activates it in one step.
    pub fn mount(
        container: Option<C>,
        scheduler: S,
        options: E::Options,
    ) -> Result<Self, ActivationError> {
        let mut controller = Self::new(scheduler);
        controller.activate(container, options)?;
        Ok(controller)
    }

    /// Builds the render context and effect, then renders the first frame.
    ///
    /// On error the controller stays `Uninitialized` and nothing is allocated.
    pub fn activate(
        &mut self,
        container: Option<C>,
        options: E::Options,
    ) -> Result<(), ActivationError> {
        if self.lifecycle != Lifecycle::Uninitialized {
            return Err(ActivationError::InvalidState(self.lifecycle));
        }

        let render_options = E::render_options(&options);
        let mut context = match RenderContext::create(container, &render_options) {
            Ok(context) => context,
            Err(err) => {
                log::warn!("{} unavailable: {err}", E::NAME);
                return Err(err);
            }
        };

        let effect = E::build(context.scene_mut(), options);

        self.context = Some(context);
        self.effect = Some(effect);
        self.clock.restart();
        self.lifecycle = Lifecycle::Active;

        log::info!("{} activated", E::NAME);

        self.tick();
        Ok(())
    }

    /// One loop iteration: schedule the next frame, advance, render.
    pub fn tick(&mut self) -> TickOutcome {
        if self.lifecycle != Lifecycle::Active {
            return TickOutcome::Inactive;
        }
        let (Some(context), Some(effect)) = (self.context.as_mut(), self.effect.as_mut()) else {
            return TickOutcome::Inactive;
        };

        self.scheduled = Some(self.scheduler.request_frame());

        let time = self.clock.tick();
        effect.advance(context.scene_mut(), &time);

        match context.render() {
            RenderStatus::Presented => TickOutcome::Rendered,
            RenderStatus::Skipped => TickOutcome::Skipped,
            RenderStatus::Lost => TickOutcome::Lost,
        }
    }

    /// Forwards a host resize notification. Returns `false` when inactive.
    pub fn handle_resize(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Active {
            return false;
        }
        self.context
            .as_mut()
            .is_some_and(|context| context.handle_resize())
    }

    /// Stops the loop and releases everything. Safe before activation and
    /// safe to call repeatedly.
    pub fn teardown(&mut self) {
        let previous = std::mem::replace(&mut self.lifecycle, Lifecycle::TornDown);

        if let Some(handle) = self.scheduled.take() {
            self.scheduler.cancel_frame(handle);
        }

        if let Some(mut context) = self.context.take() {
            context.dispose();
            if let Some(mut effect) = self.effect.take() {
                effect.dispose(context.scene_mut());
            }
        }

        if previous != Lifecycle::TornDown {
            log::debug!("{} torn down (was {previous:?})", E::NAME);
        }
    }

    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// The pending next-frame request, if any.
    #[inline]
    pub fn scheduled(&self) -> Option<FrameHandle> {
        self.scheduled
    }

    #[inline]
    pub fn effect(&self) -> Option<&E> {
        self.effect.as_ref()
    }

    #[inline]
    pub fn context(&self) -> Option<&RenderContext<C>> {
        self.context.as_ref()
    }

    #[inline]
    pub fn scene(&self) -> Option<&Scene> {
        self.context.as_ref().map(|context| context.scene())
    }

    /// Runs `f` against the live effect and its scene; `None` unless active.
    pub(crate) fn with_effect<R>(&mut self, f: impl FnOnce(&mut E, &mut Scene) -> R) -> Option<R> {
        if self.lifecycle != Lifecycle::Active {
            return None;
        }
        let (Some(context), Some(effect)) = (self.context.as_mut(), self.effect.as_mut()) else {
            return None;
        };
        Some(f(effect, context.scene_mut()))
    }
}

impl<C: Container, S: FrameScheduler, E: Effect> Drop for EffectController<C, S, E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{NebulaController, NebulaOptions, StarfieldController, StarfieldOptions};
    use crate::testing::{MockContainer, MockScheduler};

    type Nebula = NebulaController<MockContainer, MockScheduler>;

    // ── activation ────────────────────────────────────────────────────────

    #[test]
    fn failed_activation_stays_uninitialized() {
        let scheduler = MockScheduler::new();
        let mut controller = Nebula::new(scheduler.clone());

        let err = controller.activate(None, NebulaOptions::default()).unwrap_err();
        assert!(matches!(err, ActivationError::MissingContainer));
        assert_eq!(controller.lifecycle(), Lifecycle::Uninitialized);
        assert_eq!(controller.tick(), TickOutcome::Inactive);
        assert_eq!(scheduler.requested(), 0);

        controller.teardown();
        assert_eq!(controller.lifecycle(), Lifecycle::TornDown);
        assert!(scheduler.cancelled().is_empty());
    }

    #[test]
    fn surface_failure_allocates_nothing() {
        let container = MockContainer::new(640, 480);
        container.fail_next_attach();
        let result = Nebula::mount(Some(container.clone()), MockScheduler::new(), NebulaOptions::default());
        assert!(matches!(result, Err(ActivationError::Surface(_))));
        assert_eq!(container.listener_count(), 0);
        assert_eq!(container.renderer_log().renders, 0);
    }

    #[test]
    fn activate_twice_is_rejected() {
        let container = MockContainer::new(640, 480);
        let mut controller =
            Nebula::mount(Some(container.clone()), MockScheduler::new(), NebulaOptions::default())
                .unwrap();
        let err = controller
            .activate(Some(container.clone()), NebulaOptions::default())
            .unwrap_err();
        assert!(matches!(err, ActivationError::InvalidState(Lifecycle::Active)));
        assert_eq!(container.attach_count(), 1);
    }

    #[test]
    fn teardown_is_terminal() {
        let mut controller = Nebula::new(MockScheduler::new());
        controller.teardown();
        let err = controller
            .activate(Some(MockContainer::new(10, 10)), NebulaOptions::default())
            .unwrap_err();
        assert!(matches!(err, ActivationError::InvalidState(Lifecycle::TornDown)));
    }

    // ── loop ──────────────────────────────────────────────────────────────

    #[test]
    fn tick_schedules_before_rendering() {
        let container = MockContainer::new(640, 480);
        let scheduler = MockScheduler::new();
        let mut controller =
            Nebula::mount(Some(container.clone()), scheduler.clone(), NebulaOptions::default())
                .unwrap();

        for _ in 0..3 {
            controller.tick();
        }
        assert_eq!(scheduler.requested(), 4);
        assert_eq!(container.renderer_log().renders, 4);
        assert_eq!(controller.scheduled(), scheduler.pending());
    }

    #[test]
    fn skipped_and_lost_frames_are_reported() {
        let container = MockContainer::new(640, 480);
        let mut controller =
            Nebula::mount(Some(container.clone()), MockScheduler::new(), NebulaOptions::default())
                .unwrap();

        container.set_render_status(RenderStatus::Skipped);
        assert_eq!(controller.tick(), TickOutcome::Skipped);

        container.set_render_status(RenderStatus::Lost);
        assert_eq!(controller.tick(), TickOutcome::Lost);
        // Losing the surface does not tear down by itself.
        assert!(controller.is_active());
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_reaches_camera_and_renderer() {
        let container = MockContainer::new(800, 600);
        let mut controller = StarfieldController::mount(
            Some(container.clone()),
            MockScheduler::new(),
            StarfieldOptions {
                count: 10,
                seed: Some(1),
                ..StarfieldOptions::default()
            },
        )
        .unwrap();

        container.set_size(400, 300);
        assert!(controller.handle_resize());
        controller.tick();

        let ctx = controller.context().unwrap();
        assert_eq!(ctx.surface_size(), winit::dpi::PhysicalSize::new(400, 300));
        assert_eq!(ctx.camera().aspect, 4.0 / 3.0);
        assert_eq!(container.renderer_log().last_aspect, Some(4.0 / 3.0));

        controller.teardown();
        assert!(!controller.handle_resize());
    }

    #[test]
    fn zero_size_keeps_previous_aspect() {
        let container = MockContainer::new(800, 600);
        let mut controller =
            Nebula::mount(Some(container.clone()), MockScheduler::new(), NebulaOptions::default())
                .unwrap();

        container.set_size(0, 0);
        assert!(controller.handle_resize());
        let ctx = controller.context().unwrap();
        assert_eq!(ctx.camera().aspect, 800.0 / 600.0);
        assert_eq!(ctx.surface_size(), winit::dpi::PhysicalSize::new(0, 0));
    }

    // ── teardown ──────────────────────────────────────────────────────────

    #[test]
    fn drop_tears_down() {
        let container = MockContainer::new(320, 240);
        let scheduler = MockScheduler::new();
        {
            let _controller =
                Nebula::mount(Some(container.clone()), scheduler.clone(), NebulaOptions::default())
                    .unwrap();
        }
        assert_eq!(container.renderer_log().disposed, 1);
        assert_eq!(container.detach_count(), 1);
        assert_eq!(scheduler.cancelled().len(), 1);
        assert_eq!(scheduler.pending(), None);
    }

    #[test]
    fn independent_controllers_share_nothing() {
        let a = MockContainer::new(100, 100);
        let b = MockContainer::new(200, 100);
        let mut first =
            Nebula::mount(Some(a.clone()), MockScheduler::new(), NebulaOptions::default()).unwrap();
        let second = StarfieldController::mount(
            Some(b.clone()),
            MockScheduler::new(),
            StarfieldOptions {
                count: 3,
                seed: Some(7),
                ..StarfieldOptions::default()
            },
        )
        .unwrap();

        first.teardown();
        assert_eq!(a.renderer_log().disposed, 1);
        assert_eq!(b.renderer_log().disposed, 0);
        assert!(second.is_active());
    }
}
