//! Procedural nebula painted on a flat plane.
//!
//! The look comes entirely from the fragment program: two layers of animated
//! hash noise shaped with `smoothstep` form the cloud, a sharpened high-frequency
//! layer adds stars. The host only advances `time` and forwards parameter changes.

mod shading;

use serde::{Deserialize, Serialize};

use crate::core::FrameScheduler;
use crate::paint::ColorInput;
use crate::render::{Container, RenderOptions};
use crate::scene::{Mesh, NebulaMaterial, NebulaUniforms, ObjectKey, PlaneGeometry, Scene};
use crate::time::FrameTime;

use super::{Effect, EffectController, EffectParam};

pub use shading::{fract, hash, mix, shade, smoothstep};

/// Side length of the square the nebula is painted on, in world units.
pub const PLANE_SIZE: f32 = 10.0;

/// Nebula parameters.
///
/// Only omitted fields take defaults. Zero is not treated as unset: an
/// explicit `density: 0.0` hides the nebula and `speed: 0.0` freezes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NebulaOptions {
    pub color: ColorInput,
    pub density: f32,
    pub speed: f32,
    pub intensity: f32,
}

impl Default for NebulaOptions {
    fn default() -> Self {
        let defaults = NebulaUniforms::default();
        Self {
            color: ColorInput::default(),
            density: defaults.density,
            speed: defaults.speed,
            intensity: defaults.intensity,
        }
    }
}

/// Builds the additive nebula material with `time = 0`.
pub fn create_nebula_material(options: &NebulaOptions) -> NebulaMaterial {
    NebulaMaterial::new(NebulaUniforms {
        time: 0.0,
        color: options.color.resolve(),
        density: options.density,
        speed: options.speed,
        intensity: options.intensity,
    })
}

/// The nebula plane inside a scene.
#[derive(Debug)]
pub struct NebulaEffect {
    mesh: Option<ObjectKey>,
}

impl NebulaEffect {
    #[inline]
    pub fn mesh_key(&self) -> Option<ObjectKey> {
        self.mesh
    }

    pub fn uniforms<'s>(&self, scene: &'s Scene) -> Option<&'s NebulaUniforms> {
        self.mesh
            .and_then(|key| scene.mesh(key))
            .map(|mesh| &mesh.material.uniforms)
    }

    fn uniforms_mut<'s>(&self, scene: &'s mut Scene) -> Option<&'s mut NebulaUniforms> {
        self.mesh
            .and_then(|key| scene.mesh_mut(key))
            .map(|mesh| &mut mesh.material.uniforms)
    }

    /// Writes one uniform through `f`. `false` if the mesh is gone.
    fn set(&self, scene: &mut Scene, f: impl FnOnce(&mut NebulaUniforms)) -> bool {
        match self.uniforms_mut(scene) {
            Some(uniforms) => {
                f(uniforms);
                true
            }
            None => false,
        }
    }
}

impl Effect for NebulaEffect {
    type Options = NebulaOptions;

    const NAME: &'static str = "nebula";

    fn render_options(options: &NebulaOptions) -> RenderOptions {
        let _ = options;
        RenderOptions::default()
    }

    fn build(scene: &mut Scene, options: NebulaOptions) -> Self {
        let key = scene.add(Mesh {
            geometry: PlaneGeometry::new(PLANE_SIZE, PLANE_SIZE),
            material: create_nebula_material(&options),
        });
        Self { mesh: Some(key) }
    }

    fn advance(&mut self, scene: &mut Scene, time: &FrameTime) {
        self.set(scene, |u| u.time = time.elapsed as f32);
    }

    fn apply(&mut self, scene: &mut Scene, param: &EffectParam) -> bool {
        match param {
            EffectParam::Color(color) => self.set(scene, |u| u.color = color.resolve()),
            EffectParam::Density(v) => self.set(scene, |u| u.density = *v),
            EffectParam::Speed(v) => self.set(scene, |u| u.speed = *v),
            EffectParam::Intensity(v) => self.set(scene, |u| u.intensity = *v),
        }
    }

    fn dispose(&mut self, scene: &mut Scene) {
        if let Some(key) = self.mesh.take() {
            scene.remove(key);
        }
    }
}

/// Controller driving a [`NebulaEffect`].
pub type NebulaController<C, S> = EffectController<C, S, NebulaEffect>;

impl<C: Container, S: FrameScheduler> EffectController<C, S, NebulaEffect> {
    pub fn update_color(&mut self, color: impl Into<ColorInput>) {
        let param = EffectParam::Color(color.into());
        self.with_effect(|effect, scene| effect.apply(scene, &param));
    }

    pub fn update_density(&mut self, density: f32) {
        self.with_effect(|effect, scene| effect.apply(scene, &EffectParam::Density(density)));
    }

    pub fn update_speed(&mut self, speed: f32) {
        self.with_effect(|effect, scene| effect.apply(scene, &EffectParam::Speed(speed)));
    }

    pub fn update_intensity(&mut self, intensity: f32) {
        self.with_effect(|effect, scene| effect.apply(scene, &EffectParam::Intensity(intensity)));
    }

    /// Current uniforms; `None` unless active.
    pub fn uniforms(&self) -> Option<&NebulaUniforms> {
        let scene = self.scene()?;
        self.effect()?.uniforms(scene)
    }
}
