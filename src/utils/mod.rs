//! Utility Module
//!
//! - [`FpsCounter`]: Frame rate measurement utility
//! - [`time`]: Clocks driving the frame loop

pub mod fps_counter;
pub mod time;

pub use fps_counter::FpsCounter;
pub use time::{Clock, FrameTime, ManualClock, SystemClock};
