use crate::paint::Rgb;

/// How a material's output combines with what is already in the target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Blending {
    /// `src * srcAlpha + dst * (1 - srcAlpha)`.
    #[default]
    Normal,
    /// `src * srcAlpha + dst`. Contributions accumulate.
    Additive,
}

/// Uniform set read by the nebula program every frame.
///
/// No validation: callers own sane ranges (density/intensity roughly `[0, 3]`,
/// speed roughly `[0, 2]`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NebulaUniforms {
    /// Monotonic seconds.
    pub time: f32,
    pub color: Rgb,
    pub density: f32,
    pub speed: f32,
    pub intensity: f32,
}

impl Default for NebulaUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            color: Rgb::DEFAULT_BLUE,
            density: 0.5,
            speed: 0.2,
            intensity: 1.5,
        }
    }
}

/// Procedural nebula program + its uniforms.
#[derive(Debug, Clone, PartialEq)]
pub struct NebulaMaterial {
    pub uniforms: NebulaUniforms,
    pub blending: Blending,
}

impl NebulaMaterial {
    /// Additive material: the nebula brightens whatever is behind it.
    pub fn new(uniforms: NebulaUniforms) -> Self {
        Self {
            uniforms,
            blending: Blending::Additive,
        }
    }
}

/// Uniform-size point sprites.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: Rgb,
    /// World-space size when attenuated, pixel size otherwise.
    pub size: f32,
    pub opacity: f32,
    pub transparent: bool,
    /// Scale sprites by `viewport_height / 2 / depth`.
    pub size_attenuation: bool,
    pub blending: Blending,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            size: 1.0,
            opacity: 1.0,
            transparent: false,
            size_attenuation: true,
            blending: Blending::Normal,
        }
    }
}
