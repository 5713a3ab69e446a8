//! Frame timing.
//!
//! Each effect controller owns one [`FrameClock`] and ticks it once per
//! scheduled frame; effects animate from the resulting [`FrameTime`].

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
