//! Fixed-step frame driver.
//!
//! Wall-clock frame time goes in, a whole number of simulation ticks comes
//! out. Physics runs per tick, so the game plays at the same speed whatever
//! the render rate is.

use std::time::Duration;

/// Upper bound on ticks simulated for a single frame.
pub const MAX_CATCH_UP: u32 = 5;

#[derive(Debug, Clone)]
pub struct FixedStep {
    tick: Duration,
    acc: Duration,
}

impl FixedStep {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            acc: Duration::ZERO,
        }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Banks `elapsed` and returns how many ticks are due. Backlog beyond
    /// [`MAX_CATCH_UP`] ticks is discarded.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.acc += elapsed;
        let mut due = 0;
        while self.acc >= self.tick && due < MAX_CATCH_UP {
            self.acc -= self.tick;
            due += 1;
        }
        if due == MAX_CATCH_UP && self.acc >= self.tick {
            tracing::debug!(dropped = ?self.acc, "frame driver fell behind");
            self.acc = Duration::ZERO;
        }
        due
    }
}
