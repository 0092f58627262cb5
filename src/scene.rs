//! Per-frame draw list handed to the renderer.

use crate::game::{Game, State};
use crate::geometry::Rect;
use crate::score_store::ScoreStore;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(135, 206, 250);
pub const PLAYER: Rgb = Rgb(0, 255, 0);
pub const PIPE: Rgb = Rgb(255, 0, 0);
pub const TEXT: Rgb = Rgb(255, 255, 255);
pub const SCORE: Rgb = Rgb(255, 255, 255);

/// Horizontal anchoring of a label relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: Anchor,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Rgb,
    pub rects: Vec<(Rect, Rgb)>,
    pub labels: Vec<Label>,
}

impl Scene {
    fn centered(&mut self, cx: f64, y: f64, text: String) {
        self.labels.push(Label {
            text,
            x: cx,
            y,
            anchor: Anchor::Center,
            color: TEXT,
        });
    }
}

impl<R: Rng, S: ScoreStore> Game<R, S> {
    pub fn scene(&self) -> Scene {
        let mut scene = Scene {
            background: BACKGROUND,
            rects: Vec::new(),
            labels: Vec::new(),
        };
        let cx = self.config().width / 2.0;

        match self.state() {
            State::Menu => {
                scene.centered(cx, 200.0, crate::config::TITLE.to_string());
                scene.centered(cx, 300.0, "Press SPACE to Start".to_string());
                scene.centered(cx, 400.0, format!("High Score: {}", self.high_score()));
            }
            State::Playing => {
                let session = self.session();
                for pipe in &session.pipes {
                    scene.rects.push((pipe.top, PIPE));
                    scene.rects.push((pipe.bottom, PIPE));
                }
                scene.rects.push((session.player.rect, PLAYER));
                scene.labels.push(Label {
                    text: format!("Score: {}", session.score),
                    x: 10.0,
                    y: 10.0,
                    anchor: Anchor::Left,
                    color: SCORE,
                });
            }
            State::GameOver => {
                scene.centered(cx, 200.0, "Game Over!".to_string());
                scene.centered(cx, 300.0, format!("Score: {}", self.score()));
                scene.centered(cx, 400.0, "Press SPACE for Menu".to_string());
            }
        }
        scene
    }
}
