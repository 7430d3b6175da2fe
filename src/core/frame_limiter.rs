use std::time::{Duration, Instant};

/// Caps the redraw rate of an event loop
///
/// Feed `deadline()` to `ControlFlow::WaitUntil` and call `advance` once a
/// frame has been drawn.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    interval: Duration,
    deadline: Instant,
}

impl FrameLimiter {
    /// Limiter for `fps` frames per second, first frame due immediately
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    pub fn starting_at(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            deadline: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next frame may be drawn
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Schedule the next frame after one drawn at `now`
    ///
    /// Keeps a steady cadence, but never schedules in the past if the loop
    /// has fallen more than one interval behind.
    pub fn advance(&mut self, now: Instant) {
        let next = self.deadline + self.interval;
        self.deadline = if next <= now { now + self.interval } else { next };
    }
}
