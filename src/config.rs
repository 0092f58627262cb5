//! World dimensions and physics tunables.
//!
//! Physics values are expressed per fixed tick (see [`crate::clock`]), not
//! per second: gravity is added to the velocity once per tick and the
//! velocity is added to the position once per tick.

use std::ops::RangeInclusive;
use std::time::Duration;

pub const SCREEN_WIDTH: f64 = 400.0;
pub const SCREEN_HEIGHT: f64 = 600.0;

pub const GRAVITY: f64 = 0.5;
pub const JUMP_FORCE: f64 = -10.0;

pub const PLAYER_X: f64 = 50.0;
pub const PLAYER_SIZE: f64 = 30.0;

pub const PIPE_SPEED: f64 = -3.0;
pub const PIPE_WIDTH: f64 = 50.0;
pub const PIPE_GAP: u32 = 150;
/// Distance kept between a gap and the top/bottom screen edge.
pub const GAP_MARGIN: u32 = 100;
pub const PIPE_INTERVAL: Duration = Duration::from_millis(1500);

pub const TICK_RATE: u32 = 60;

pub const TITLE: &str = "Flippyblock Extreme";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: f64,
    pub height: f64,
    pub gravity: f64,
    pub jump_force: f64,
    pub player_x: f64,
    pub player_size: f64,
    pub pipe_speed: f64,
    pub pipe_width: f64,
    pub pipe_gap: u32,
    pub gap_margin: u32,
    pub pipe_interval: Duration,
    pub tick_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            pipe_speed: PIPE_SPEED,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            gap_margin: GAP_MARGIN,
            pipe_interval: PIPE_INTERVAL,
            tick_rate: TICK_RATE,
        }
    }
}

impl Config {
    /// Inclusive range of valid gap-start rows.
    ///
    /// Collapses to the lower bound when the world is too short to fit the
    /// margins and the gap, so a spawn always has somewhere to go.
    pub fn gap_range(&self) -> RangeInclusive<u32> {
        let lo = self.gap_margin;
        let hi = (self.height as u32)
            .saturating_sub(self.gap_margin + self.pipe_gap)
            .max(lo);
        lo..=hi
    }

    pub fn tick(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// Vertical start position of the player at the beginning of a session.
    pub fn player_start_y(&self) -> f64 {
        (self.height / 2.0).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gap_range() {
        let cfg = Config::default();
        assert_eq!(cfg.gap_range(), 100..=350);
    }

    #[test]
    fn test_gap_range_collapses_on_short_world() {
        let cfg = Config {
            height: 200.0,
            ..Config::default()
        };
        assert_eq!(cfg.gap_range(), 100..=100);
    }

    #[test]
    fn test_tick_is_sixtieth_of_second() {
        let cfg = Config::default();
        assert_eq!(cfg.tick(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_player_starts_at_vertical_center() {
        assert!((Config::default().player_start_y() - 300.0).abs() < f64::EPSILON);
    }
}
