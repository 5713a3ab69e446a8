use super::material::{NebulaMaterial, PointsMaterial};

/// Flat rectangle in the xy-plane, centered at the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
}

impl PlaneGeometry {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Corner `(position, uv)` pairs, counter-clockwise from bottom-left.
    ///
    /// uv `(0, 0)` is the bottom-left corner, v grows along +y.
    pub fn corners(&self) -> [([f32; 3], [f32; 2]); 4] {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        [
            ([-hw, -hh, 0.0], [0.0, 0.0]),
            ([hw, -hh, 0.0], [1.0, 0.0]),
            ([hw, hh, 0.0], [1.0, 1.0]),
            ([-hw, hh, 0.0], [0.0, 1.0]),
        ]
    }

    pub const INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];
}

/// Host-side point positions with a change counter.
///
/// Every mutable borrow bumps `version`; renderers re-upload when the version
/// they last saw differs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointGeometry {
    positions: Vec<[f32; 3]>,
    version: u64,
}

impl PointGeometry {
    pub fn new(positions: Vec<[f32; 3]>) -> Self {
        Self { positions, version: 0 }
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Mutable positions. The length is fixed; marks the geometry for upload.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [[f32; 3]] {
        self.version = self.version.wrapping_add(1);
        &mut self.positions
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: PlaneGeometry,
    pub material: NebulaMaterial,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    pub geometry: PointGeometry,
    pub material: PointsMaterial,
}

/// Drawable stored in a scene.
///
/// Renderer dispatch matches on this enum; there is no general material system.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    Mesh(Mesh),
    Points(Points),
}

impl From<Mesh> for SceneObject {
    fn from(m: Mesh) -> Self {
        SceneObject::Mesh(m)
    }
}

impl From<Points> for SceneObject {
    fn from(p: Points) -> Self {
        SceneObject::Points(p)
    }
}
