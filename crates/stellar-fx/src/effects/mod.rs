//! Effects and the controller that drives them.
//!
//! An effect owns a few objects in a render context's scene. The controller
//! owns the context, paces frames through a [`FrameScheduler`](crate::core::FrameScheduler)
//! and guarantees that teardown runs exactly once.

mod controller;
mod handle;

pub mod nebula;
pub mod starfield;

pub use controller::{Effect, EffectController, Lifecycle, TickOutcome};
pub use handle::{EffectHandle, EffectParam};
pub use nebula::{NebulaController, NebulaEffect, NebulaOptions};
pub use starfield::{ParticleField, StarfieldController, StarfieldOptions};
