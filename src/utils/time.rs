use std::time::{Duration, Instant};

/// One clock reading, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Total elapsed time since the clock started.
    pub elapsed: f64,
    /// Time since the previous tick.
    pub delta: f64,
}

/// Source of frame timing for the frame loop.
pub trait Clock {
    /// Advances the clock and returns the new reading.
    fn tick(&mut self) -> FrameTime;
}

/// Wall clock for tracking frame timing and elapsed time.
pub struct SystemClock {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Creates a new clock starting from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }
}

impl Clock for SystemClock {
    fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;

        FrameTime {
            elapsed: self.elapsed.as_secs_f64(),
            delta: self.delta.as_secs_f64(),
        }
    }
}

/// Deterministic clock that advances by a fixed step per tick.
///
/// Used for headless runs and tests. `elapsed` may be set directly to
/// replay a specific moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualClock {
    pub elapsed: f64,
    pub step: f64,
}

impl ManualClock {
    #[must_use]
    pub fn new(step: f64) -> Self {
        Self { elapsed: 0.0, step }
    }
}

impl Clock for ManualClock {
    fn tick(&mut self) -> FrameTime {
        self.elapsed += self.step;
        FrameTime {
            elapsed: self.elapsed,
            delta: self.step,
        }
    }
}
