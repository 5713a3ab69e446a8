//! Recycling starfield: point sprites drifting toward the viewer.

mod field;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::FrameScheduler;
use crate::paint::ColorInput;
use crate::render::{Container, RenderOptions};
use crate::scene::Scene;
use crate::time::FrameTime;

use super::{Effect, EffectController, EffectParam};

pub use field::{advance_particles, create_star_field, ParticleField, FIELD_EXTENT, MIN_VELOCITY};

/// Starfield parameters.
///
/// Only omitted fields take defaults. Zero is kept as given: `speed: 0.0`
/// still moves particles at the minimum velocity, and `count: 0` builds an
/// empty field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldOptions {
    pub count: usize,
    pub size: f32,
    pub speed: f32,
    pub color: ColorInput,
    /// Fixed RNG seed; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for StarfieldOptions {
    fn default() -> Self {
        Self {
            count: 1000,
            size: 0.7,
            speed: 0.05,
            color: ColorInput::Packed(0xffffff),
            seed: None,
        }
    }
}

impl StarfieldOptions {
    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

impl Effect for ParticleField {
    type Options = StarfieldOptions;

    const NAME: &'static str = "starfield";

    fn render_options(options: &StarfieldOptions) -> RenderOptions {
        let _ = options;
        RenderOptions {
            far: 2000.0,
            camera_distance: 500.0,
            ..RenderOptions::default()
        }
    }

    fn build(scene: &mut Scene, options: StarfieldOptions) -> Self {
        let mut field =
            create_star_field(scene, options.count, options.size, options.speed, options.rng());
        field.update_color(scene, &options.color);
        field
    }

    fn advance(&mut self, scene: &mut Scene, _time: &FrameTime) {
        self.update(scene);
    }

    fn apply(&mut self, scene: &mut Scene, param: &EffectParam) -> bool {
        match param {
            EffectParam::Color(color) => self.update_color(scene, color),
            EffectParam::Speed(speed) => {
                self.update_speed(*speed);
                true
            }
            EffectParam::Density(_) | EffectParam::Intensity(_) => false,
        }
    }

    fn dispose(&mut self, scene: &mut Scene) {
        ParticleField::dispose(self, scene);
    }
}

/// Controller driving a [`ParticleField`].
pub type StarfieldController<C, S> = EffectController<C, S, ParticleField>;

impl<C: Container, S: FrameScheduler> EffectController<C, S, ParticleField> {
    pub fn update_speed(&mut self, speed: f32) {
        self.with_effect(|field, _| field.update_speed(speed));
    }

    pub fn update_color(&mut self, color: impl Into<ColorInput>) {
        let color = color.into();
        self.with_effect(|field, scene| field.update_color(scene, &color));
    }

    /// Current particle positions; `None` unless active.
    pub fn positions(&self) -> Option<&[[f32; 3]]> {
        let scene = self.scene()?;
        self.effect()?.positions(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectHandle, Lifecycle, TickOutcome};
    use crate::paint::Rgb;
    use crate::testing::{MockContainer, MockScheduler};

    fn mount(
        options: StarfieldOptions,
    ) -> (StarfieldController<MockContainer, MockScheduler>, MockContainer, MockScheduler) {
        let container = MockContainer::new(800, 600);
        let scheduler = MockScheduler::new();
        let controller =
            StarfieldController::mount(Some(container.clone()), scheduler.clone(), options)
                .unwrap();
        (controller, container, scheduler)
    }

    fn seeded(count: usize) -> StarfieldOptions {
        StarfieldOptions {
            count,
            seed: Some(42),
            ..StarfieldOptions::default()
        }
    }

    // ── options ───────────────────────────────────────────────────────────

    #[test]
    fn camera_sits_back_with_far_plane() {
        let options = ParticleField::render_options(&StarfieldOptions::default());
        assert_eq!(options.camera_distance, 500.0);
        assert_eq!(options.far, 2000.0);
        assert_eq!(options.fov, 75.0);
    }

    #[test]
    fn build_uses_option_color() {
        let mut scene = Scene::new();
        let field = ParticleField::build(
            &mut scene,
            StarfieldOptions {
                color: ColorInput::from("ff0000"),
                ..seeded(3)
            },
        );
        assert_eq!(field.material(&scene).unwrap().color, Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn explicit_zero_speed_is_kept() {
        let mut scene = Scene::new();
        let field = ParticleField::build(
            &mut scene,
            StarfieldOptions {
                speed: 0.0,
                ..seeded(8)
            },
        );
        assert_eq!(field.speed(), 0.0);
        assert!(field.velocities().iter().all(|&v| v == MIN_VELOCITY));
    }

    // ── controller ────────────────────────────────────────────────────────

    #[test]
    fn each_tick_moves_particles_and_schedules() {
        let (mut controller, container, scheduler) = mount(seeded(10));
        // Activation already ticked once.
        assert_eq!(scheduler.requested(), 1);

        let before = controller.positions().unwrap().to_vec();
        assert_eq!(controller.tick(), TickOutcome::Rendered);
        let after = controller.positions().unwrap();

        assert_eq!(scheduler.requested(), 2);
        assert_eq!(container.renderer_log().renders, 2);
        assert!(before.iter().zip(after).any(|(a, b)| a != b));
    }

    #[test]
    fn tick_recycles_particle_past_far_edge() {
        let (mut controller, _container, _scheduler) = mount(StarfieldOptions {
            count: 3,
            speed: 0.05,
            seed: Some(8),
            ..StarfieldOptions::default()
        });

        controller
            .with_effect(|field, scene| {
                let key = field.key().unwrap();
                scene.points_mut(key).unwrap().geometry.positions_mut()[0][2] = -1000.2;
            })
            .unwrap();
        let before = controller.positions().unwrap().to_vec();
        let velocities = controller.effect().unwrap().velocities().to_vec();

        assert_eq!(controller.tick(), TickOutcome::Rendered);
        let after = controller.positions().unwrap();

        assert_eq!(after[0][2], FIELD_EXTENT);
        assert!(after[0][0].abs() <= FIELD_EXTENT && after[0][1].abs() <= FIELD_EXTENT);
        for i in 1..3 {
            assert_eq!(after[i][0], before[i][0]);
            assert_eq!(after[i][1], before[i][1]);
            assert_eq!(after[i][2], before[i][2] - velocities[i]);
        }
    }

    #[test]
    fn speed_update_keeps_positions() {
        let (mut controller, _container, _scheduler) = mount(seeded(20));
        let before = controller.positions().unwrap().to_vec();
        controller.update_speed(1.5);
        assert_eq!(controller.positions().unwrap(), before.as_slice());
        let field = controller.effect().unwrap();
        assert!(field.velocities().iter().all(|v| (0.01..1.51).contains(v)));
    }

    #[test]
    fn handle_ignores_unsupported_parameters() {
        let (mut controller, _container, _scheduler) = mount(seeded(5));
        let handle: &mut dyn EffectHandle = &mut controller;
        assert!(handle.apply(EffectParam::Speed(0.2)));
        assert!(handle.apply(EffectParam::Color(ColorInput::Packed(0x123456))));
        assert!(!handle.apply(EffectParam::Density(1.0)));
        assert!(!handle.apply(EffectParam::Intensity(1.0)));
    }

    #[test]
    fn teardown_cancels_pending_frame_and_releases_everything() {
        let (mut controller, container, scheduler) = mount(seeded(5));
        let pending = controller.scheduled().unwrap();

        controller.teardown();
        controller.teardown();

        assert_eq!(controller.lifecycle(), Lifecycle::TornDown);
        assert_eq!(scheduler.cancelled(), vec![pending]);
        assert_eq!(scheduler.pending(), None);
        assert!(controller.positions().is_none());
        assert_eq!(container.renderer_log().disposed, 1);
        assert_eq!(container.detach_count(), 1);
        assert_eq!(container.listener_count(), 0);

        // A redraw already in flight still arrives; it must do nothing.
        assert_eq!(controller.tick(), TickOutcome::Inactive);
        assert_eq!(container.renderer_log().renders, 1);
    }
}
