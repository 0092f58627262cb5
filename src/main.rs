use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, terminal,
};
use flippyblock::audio::{Audio, Cue, Silent};
use flippyblock::clock::FixedStep;
use flippyblock::config::{Config, TITLE};
use flippyblock::score_store::{self, FileStore, HIGH_SCORE_FILE, ScoreStore};
use flippyblock::terminal::Renderer;
use flippyblock::{Flow, Game, Input};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, Write, stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── Setup ───────────────────────────────────────────────────────────────────

/// Logs go to a file; stdout belongs to the renderer.
fn init_logging() {
    let Ok(dir) = score_store::data_dir() else {
        return;
    };
    let Ok(file) = File::create(dir.join("flippyblock.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn open_store() -> FileStore {
    match FileStore::in_data_dir() {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("no data directory ({e}), keeping high score in working directory");
            FileStore::new(HIGH_SCORE_FILE)
        }
    }
}

fn open_audio() -> Box<dyn Audio> {
    #[cfg(feature = "audio")]
    {
        match flippyblock::audio::Speaker::open() {
            Ok(speaker) => return Box::new(speaker),
            Err(e) => tracing::warn!("audio disabled: {e}"),
        }
    }
    Box::new(Silent)
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )
}

fn restore_terminal() -> io::Result<()> {
    leave_screen(&mut stdout())?;
    terminal::disable_raw_mode()
}

/// A panic must not leave the shell in raw mode on the alternate screen.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

// ── Input ───────────────────────────────────────────────────────────────────

fn map_key(key: KeyEvent) -> Option<Input> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Input::Jump),
        _ => None,
    }
}

// ── Main ────────────────────────────────────────────────────────────────────

fn run<R: Rng, S: ScoreStore>(
    out: &mut io::Stdout,
    game: &mut Game<R, S>,
    audio: &mut dyn Audio,
) -> Result<()> {
    let (cols, rows) = terminal::size().context("reading terminal size")?;
    let mut renderer = Renderer::new(game.config().width, game.config().height, cols, rows);
    let frame_dur = game.config().tick();
    let mut step = FixedStep::new(frame_dur);
    let mut events = Vec::new();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let Some(input) = map_key(key) else {
                        continue;
                    };
                    if game.handle(input, &mut events) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(c, r) => renderer.resize(c, r),
                _ => {}
            }
        }

        // Update
        for _ in 0..step.advance(frame_start.duration_since(last)) {
            events.extend(game.tick());
        }
        last = frame_start;

        for event in events.drain(..) {
            if let Some(cue) = Cue::for_event(&event) {
                audio.play(cue);
            }
        }

        // Render
        renderer.draw(&game.scene(), out).context("drawing frame")?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let mut game = Game::new(Config::default(), StdRng::from_entropy(), open_store());
    let mut audio = open_audio();

    install_panic_hook();
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    let result = execute!(
        out,
        terminal::EnterAlternateScreen,
        terminal::SetTitle(TITLE),
        cursor::Hide,
        terminal::DisableLineWrap,
    )
    .context("entering alternate screen")
    .and_then(|()| run(&mut out, &mut game, audio.as_mut()));

    restore_terminal()?;
    tracing::info!(best = game.high_score(), "exiting");
    result
}
