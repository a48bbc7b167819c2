//! Time management utilities
//!
//! The frame loop never reads wall time directly. It samples a [`Clock`], so
//! headless runs and tests can drive time deterministically.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since the clock was created
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock starting at zero now
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
///
/// With a non-zero `auto_step` every read advances the clock, which gives a
/// fixed frame rate for headless sessions.
#[derive(Debug, Default)]
pub struct ManualClock {
    current: Cell<Duration>,
    auto_step: Duration,
}

impl ManualClock {
    /// Create a clock frozen at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock that advances by `step` each time it is read
    pub fn with_auto_step(step: Duration) -> Self {
        Self {
            current: Cell::new(Duration::ZERO),
            auto_step: step,
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        let now = self.current.get();
        self.current.set(now + self.auto_step);
        now
    }
}

/// High-precision timer for frame timing
#[derive(Debug, Clone)]
pub struct Timer {
    last_frame: Duration,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: Option<f32>,
}

impl Timer {
    /// Create a new timer anchored at the clock's current time
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            last_frame: clock.now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta: None,
        }
    }

    /// Clamp every frame delta to at most `max_delta` seconds
    pub fn with_max_delta(mut self, max_delta: Option<f32>) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self, clock: &dyn Clock) -> f32 {
        let now = clock.now();
        let elapsed = now.saturating_sub(self.last_frame).as_secs_f32();
        self.delta_time = match self.max_delta {
            Some(max) if elapsed > max => {
                log::debug!("Frame delta {:.4}s clamped to {:.4}s", elapsed, max);
                max
            }
            _ => elapsed,
        };
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
