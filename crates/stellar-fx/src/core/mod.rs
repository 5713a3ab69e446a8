//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform loop)
//! and higher layers (studio, tools): how effects are mounted into windows and
//! how the host paces their frames.

mod app;
mod scheduler;

pub use app::{App, AppControl};
pub use scheduler::{FrameHandle, FrameScheduler};
