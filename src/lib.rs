//! Flippyblock Extreme: a block, some pipes, and gravity.
//!
//! The library holds the simulation (entities, collision, the session state
//! machine) plus the renderer and audio collaborators; `main.rs` wires them
//! to a terminal.

pub mod audio;
pub mod clock;
pub mod collision;
pub mod config;
pub mod game;
pub mod geometry;
pub mod pipe;
pub mod player;
pub mod scene;
pub mod score_store;
pub mod spawner;
pub mod terminal;

pub use config::Config;
pub use game::{Flow, Game, GameEvent, Input, State};
pub use score_store::{FileStore, HighScores, MemoryStore, ScoreStore};
