//! Session state machine: menu, playing and game over.
//!
//! [`Game::handle`] applies discrete inputs, [`Game::tick`] advances one
//! fixed simulation step. Neither touches the terminal or the speakers; the
//! caller turns the returned [`GameEvent`]s into sound and log output.

use crate::collision::{Crash, award_passes, detect_crash};
use crate::config::Config;
use crate::pipe::Pipe;
use crate::player::Player;
use crate::score_store::{HighScores, ScoreStore};
use crate::spawner::Spawner;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Menu,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Jump,
    Quit,
}

/// Whether the frame driver should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted,
    Jumped,
    Scored { score: u32 },
    Crashed { cause: Crash, score: u32 },
    NewHighScore { score: u32 },
}

/// Everything that lives for one run of the game process.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: State,
    pub player: Player,
    /// On-screen pipes in spawn order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub spawner: Spawner,
    /// Simulated time, advanced one tick per [`Game::tick`].
    pub clock: Duration,
}

impl Session {
    fn new(cfg: &Config) -> Self {
        Self {
            state: State::Menu,
            player: Player::new(cfg),
            pipes: Vec::new(),
            score: 0,
            spawner: Spawner::new(cfg.pipe_interval),
            clock: Duration::ZERO,
        }
    }
}

pub struct Game<R, S> {
    cfg: Config,
    session: Session,
    high_scores: HighScores<S>,
    rng: R,
}

impl<R: Rng, S: ScoreStore> Game<R, S> {
    pub fn new(cfg: Config, rng: R, store: S) -> Self {
        Self {
            session: Session::new(&cfg),
            high_scores: HighScores::load(store),
            cfg,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> State {
        self.session.state
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_scores.best()
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Applies one input to the state machine.
    pub fn handle(&mut self, input: Input, events: &mut Vec<GameEvent>) -> Flow {
        let s = &mut self.session;
        match (input, s.state) {
            (Input::Quit, _) => return Flow::Quit,
            (Input::Jump, State::Menu) => {
                s.state = State::Playing;
                s.player.reset(&self.cfg);
                s.pipes.clear();
                s.score = 0;
                s.spawner.reset(s.clock);
                tracing::debug!("session started");
                events.push(GameEvent::SessionStarted);
            }
            (Input::Jump, State::Playing) => {
                s.player.jump();
                events.push(GameEvent::Jumped);
            }
            (Input::Jump, State::GameOver) => {
                s.state = State::Menu;
            }
        }
        Flow::Continue
    }

    /// Advances one fixed step. Entities only move while playing.
    ///
    /// Order within a step: player physics, spawning, pipe movement and
    /// pruning, scoring, then crash detection. A pipe cleared on the same
    /// step as a crash still counts towards the final score.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.session.clock += self.cfg.tick();
        if self.session.state != State::Playing {
            return events;
        }

        let s = &mut self.session;
        s.player.update();
        s.spawner.poll(s.clock, &self.cfg, &mut self.rng, &mut s.pipes);

        for pipe in &mut s.pipes {
            pipe.move_left();
        }
        s.pipes.retain(|pipe| !pipe.off_screen());

        let gained = award_passes(&s.player.rect, &mut s.pipes);
        if gained > 0 {
            s.score += gained;
            events.push(GameEvent::Scored { score: s.score });
        }

        if let Some(cause) = detect_crash(&s.player.rect, &s.pipes, self.cfg.height) {
            let score = s.score;
            s.state = State::GameOver;
            tracing::info!(?cause, score, "session over");
            events.push(GameEvent::Crashed { cause, score });
            if self.high_scores.record(score) {
                tracing::info!(score, "new high score");
                events.push(GameEvent::NewHighScore { score });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score_store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn new_game() -> Game<ChaCha8Rng, MemoryStore> {
        Game::new(
            Config::default(),
            ChaCha8Rng::seed_from_u64(42),
            MemoryStore::default(),
        )
    }

    fn press(game: &mut Game<ChaCha8Rng, MemoryStore>, input: Input) -> Vec<GameEvent> {
        let mut events = Vec::new();
        game.handle(input, &mut events);
        events
    }

    #[test]
    fn test_starts_in_menu() {
        let game = new_game();
        assert_eq!(game.state(), State::Menu);
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 0);
    }

    #[test]
    fn test_menu_ticks_do_not_move_player() {
        let mut game = new_game();
        let before = game.session().player.clone();
        for _ in 0..120 {
            assert!(game.tick().is_empty());
        }
        assert_eq!(game.session().player, before);
        assert!(game.session().pipes.is_empty());
    }

    #[test]
    fn test_jump_cycles_through_states() {
        let mut game = new_game();
        assert_eq!(press(&mut game, Input::Jump), vec![GameEvent::SessionStarted]);
        assert_eq!(game.state(), State::Playing);

        assert_eq!(press(&mut game, Input::Jump), vec![GameEvent::Jumped]);
        assert_eq!(game.state(), State::Playing);
        assert_eq!(game.session().player.velocity, -10.0);

        game.session_mut().state = State::GameOver;
        assert!(press(&mut game, Input::Jump).is_empty());
        assert_eq!(game.state(), State::Menu);
    }

    #[test]
    fn test_quit_from_every_state() {
        let mut game = new_game();
        for state in [State::Menu, State::Playing, State::GameOver] {
            game.session_mut().state = state;
            let mut events = Vec::new();
            assert_eq!(game.handle(Input::Quit, &mut events), Flow::Quit);
            assert!(events.is_empty());
            assert_eq!(game.state(), state);
        }
    }

    #[test]
    fn test_free_fall_ends_on_floor() {
        let mut game = new_game();
        press(&mut game, Input::Jump);
        let mut crash = None;
        for _ in 0..200 {
            for event in game.tick() {
                if let GameEvent::Crashed { cause, .. } = event {
                    crash = Some(cause);
                }
            }
            if game.state() == State::GameOver {
                break;
            }
        }
        assert_eq!(crash, Some(Crash::Floor));
        assert_eq!(game.state(), State::GameOver);
    }

    #[test]
    fn test_game_over_freezes_entities() {
        let mut game = new_game();
        press(&mut game, Input::Jump);
        while game.state() == State::Playing {
            game.tick();
        }
        let frozen = game.session().player.clone();
        let pipes = game.session().pipes.clone();
        for _ in 0..30 {
            game.tick();
        }
        assert_eq!(game.session().player, frozen);
        assert_eq!(game.session().pipes, pipes);
    }
}
