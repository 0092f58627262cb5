use crate::config::Config;
use crate::geometry::Rect;

/// The falling block the player steers.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub velocity: f64,
    gravity: f64,
    jump_force: f64,
}

impl Player {
    pub fn new(cfg: &Config) -> Self {
        Self {
            rect: Rect::new(
                cfg.player_x,
                cfg.player_start_y(),
                cfg.player_size,
                cfg.player_size,
            ),
            velocity: 0.0,
            gravity: cfg.gravity,
            jump_force: cfg.jump_force,
        }
    }

    /// Puts the block back at its start height with no momentum.
    pub fn reset(&mut self, cfg: &Config) {
        self.rect.y = cfg.player_start_y();
        self.velocity = 0.0;
    }

    /// Overrides the current velocity with the jump impulse.
    pub fn jump(&mut self) {
        self.velocity = self.jump_force;
    }

    /// One physics tick. The top edge is clamped at 0; there is no floor
    /// clamp, hitting the floor is a collision.
    pub fn update(&mut self) {
        self.velocity += self.gravity;
        self.rect.y += self.velocity;
        if self.rect.top() < 0.0 {
            self.rect.y = 0.0;
            self.velocity = 0.0;
        }
    }
}
