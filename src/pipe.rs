use crate::config::Config;
use crate::geometry::Rect;
use rand::Rng;

/// A pair of solid segments with a fixed-height opening between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// First row of the opening.
    pub gap_start: u32,
    pub top: Rect,
    pub bottom: Rect,
    /// Set once the pipe has been counted towards the score.
    pub passed: bool,
    speed: f64,
}

impl Pipe {
    /// New pipe at the right screen edge with a uniformly drawn gap.
    pub fn spawn<R: Rng>(cfg: &Config, rng: &mut R) -> Self {
        let gap_start = rng.gen_range(cfg.gap_range());
        Self::with_gap(cfg, gap_start)
    }

    pub fn with_gap(cfg: &Config, gap_start: u32) -> Self {
        let gap_end = f64::from(gap_start + cfg.pipe_gap);
        Self {
            gap_start,
            top: Rect::new(cfg.width, 0.0, cfg.pipe_width, f64::from(gap_start)),
            bottom: Rect::new(
                cfg.width,
                gap_end,
                cfg.pipe_width,
                (cfg.height - gap_end).max(0.0),
            ),
            passed: false,
            speed: cfg.pipe_speed,
        }
    }

    pub fn right(&self) -> f64 {
        self.top.right()
    }

    pub fn move_left(&mut self) {
        self.top.x += self.speed;
        self.bottom.x += self.speed;
    }

    /// Fully past the left screen edge.
    pub fn off_screen(&self) -> bool {
        self.right() < 0.0
    }

    pub fn segments(&self) -> [&Rect; 2] {
        [&self.top, &self.bottom]
    }
}
