use crate::config::Config;
use crate::pipe::Pipe;
use rand::Rng;
use std::time::Duration;

/// Timer-gated pipe factory.
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: Duration,
    last_spawn: Duration,
}

impl Spawner {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_spawn: Duration::ZERO,
        }
    }

    /// Restart the countdown from `now`.
    pub fn reset(&mut self, now: Duration) {
        self.last_spawn = now;
    }

    pub fn last_spawn(&self) -> Duration {
        self.last_spawn
    }

    /// Appends a pipe once strictly more than one interval has elapsed since
    /// the last spawn. Returns whether a pipe was added.
    pub fn poll<R: Rng>(
        &mut self,
        now: Duration,
        cfg: &Config,
        rng: &mut R,
        pipes: &mut Vec<Pipe>,
    ) -> bool {
        if now.saturating_sub(self.last_spawn) <= self.interval {
            return false;
        }
        pipes.push(Pipe::spawn(cfg, rng));
        self.last_spawn = now;
        true
    }
}
