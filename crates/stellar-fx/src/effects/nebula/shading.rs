//! Host-side reference of the nebula fragment program.
//!
//! Mirrors `render/shaders/nebula.wgsl` operation for operation so shading can
//! be checked without a GPU. Results agree with the shader up to f32 rounding
//! of `sin` on the device.

use glam::Vec2;

use crate::scene::NebulaUniforms;

/// GLSL-style fract: `x - floor(x)`, always in `[0, 1)`.
///
/// Differs from [`f32::fract`] for negative inputs.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Pseudo-random value in `[0, 1)` for a 2D point.
#[inline]
pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.5453)
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Straight (non-premultiplied) RGBA the nebula program outputs at `uv`.
pub fn shade(uv: Vec2, u: &NebulaUniforms) -> [f32; 4] {
    let t = u.time * u.speed;

    let n1 = hash(uv * 3.0 + Vec2::new(t * 0.5, t * 0.3));
    let n2 = hash(uv * 6.0 - Vec2::new(t * 0.2, t * 0.4));

    let nebula = smoothstep(0.3, 0.7, mix(n1, n2, 0.5)) * u.density;
    let stars = hash(uv * 40.0).powf(20.0) * u.intensity;

    let [r, g, b] = u.color.scaled(nebula).to_array();
    [r + stars, g + stars, b + stars, nebula * 0.8 + stars]
}
