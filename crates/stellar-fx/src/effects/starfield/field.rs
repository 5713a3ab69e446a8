use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::paint::{ColorInput, Rgb};
use crate::scene::{ObjectKey, PointGeometry, Points, PointsMaterial, Scene};

/// Particles live in the cube `[-FIELD_EXTENT, FIELD_EXTENT]^3`.
pub const FIELD_EXTENT: f32 = 1000.0;

/// Floor added to every drawn velocity so no particle stalls.
pub const MIN_VELOCITY: f32 = 0.01;

/// Uniform sample in `[-FIELD_EXTENT, FIELD_EXTENT)`.
#[inline]
fn sample_axis(rng: &mut impl Rng) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * FIELD_EXTENT
}

/// `uniform(0, 1) * speed + MIN_VELOCITY`.
#[inline]
fn sample_velocity(rng: &mut impl Rng, speed: f32) -> f32 {
    rng.random::<f32>() * speed + MIN_VELOCITY
}

/// Moves every particle toward -z by its velocity.
///
/// A particle that passes `-FIELD_EXTENT` is recycled at the far plane
/// (`z = FIELD_EXTENT`) with fresh x/y.
pub fn advance_particles(positions: &mut [[f32; 3]], velocities: &[f32], rng: &mut impl Rng) {
    for (p, &v) in positions.iter_mut().zip(velocities) {
        p[2] -= v;
        if p[2] < -FIELD_EXTENT {
            p[0] = sample_axis(rng);
            p[1] = sample_axis(rng);
            p[2] = FIELD_EXTENT;
        }
    }
}

/// Fixed-size particle buffer rendered as a point cloud.
///
/// Positions live in the scene (so the renderer can upload them); velocities
/// and the RNG live here. Particles are only ever recycled.
#[derive(Debug)]
pub struct ParticleField {
    points: Option<ObjectKey>,
    velocities: Vec<f32>,
    speed: f32,
    rng: ChaCha8Rng,
}

/// Adds `count` randomly placed white point sprites to `scene`.
///
/// x, y and z are drawn uniformly from `[-1000, 1000)`.
pub fn create_star_field(
    scene: &mut Scene,
    count: usize,
    point_size: f32,
    speed: f32,
    mut rng: ChaCha8Rng,
) -> ParticleField {
    let positions: Vec<[f32; 3]> = (0..count)
        .map(|_| {
            let x = sample_axis(&mut rng);
            let y = sample_axis(&mut rng);
            let z = rng.random::<f32>() * 2.0 * FIELD_EXTENT - FIELD_EXTENT;
            [x, y, z]
        })
        .collect();

    let velocities = (0..count).map(|_| sample_velocity(&mut rng, speed)).collect();

    let key = scene.add(Points {
        geometry: PointGeometry::new(positions),
        material: PointsMaterial {
            color: Rgb::WHITE,
            size: point_size,
            opacity: 1.0,
            transparent: true,
            size_attenuation: true,
            ..PointsMaterial::default()
        },
    });

    log::debug!("star field created with {count} particles");

    ParticleField {
        points: Some(key),
        velocities,
        speed,
        rng,
    }
}

impl ParticleField {
    /// One animation step. No-op after `dispose`.
    pub fn update(&mut self, scene: &mut Scene) {
        let Some(points) = self.points.and_then(|key| scene.points_mut(key)) else {
            return;
        };
        advance_particles(points.geometry.positions_mut(), &self.velocities, &mut self.rng);
    }

    /// Redraws every velocity from `speed`. Positions are untouched.
    pub fn update_speed(&mut self, speed: f32) {
        self.speed = speed;
        let rng = &mut self.rng;
        for v in &mut self.velocities {
            *v = sample_velocity(rng, speed);
        }
    }

    /// Recolors the point material. `false` after `dispose`.
    pub fn update_color(&mut self, scene: &mut Scene, color: &ColorInput) -> bool {
        match self.points.and_then(|key| scene.points_mut(key)) {
            Some(points) => {
                points.material.color = color.resolve();
                true
            }
            None => false,
        }
    }

    /// Removes the point cloud from `scene`. Idempotent.
    pub fn dispose(&mut self, scene: &mut Scene) {
        if let Some(key) = self.points.take() {
            scene.remove(key);
        }
    }

    #[inline]
    pub fn key(&self) -> Option<ObjectKey> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn positions<'s>(&self, scene: &'s Scene) -> Option<&'s [[f32; 3]]> {
        self.points
            .and_then(|key| scene.points(key))
            .map(|points| points.geometry.positions())
    }

    pub fn material<'s>(&self, scene: &'s Scene) -> Option<&'s PointsMaterial> {
        self.points
            .and_then(|key| scene.points(key))
            .map(|points| &points.material)
    }
}
