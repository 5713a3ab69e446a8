//! Minimal scene model hosting the effects.
//!
//! Responsibilities:
//! - store renderer-agnostic drawables (a textured plane, a point cloud)
//! - hand out stable keys so renderers can cache GPU resources per object
//! - describe the camera used to view them
//!
//! This is not a general scene graph: there is no hierarchy and no transforms.

mod camera;
mod graph;
mod key;
mod material;
mod object;

pub use camera::PerspectiveCamera;
pub use graph::Scene;
pub use key::ObjectKey;
pub use material::{Blending, NebulaMaterial, NebulaUniforms, PointsMaterial};
pub use object::{Mesh, PlaneGeometry, PointGeometry, Points, SceneObject};
