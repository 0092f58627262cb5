//! High-score persistence.
//!
//! The backing value is a single non-negative integer stored as decimal text.
//! [`HighScores`] is the policy layer the game talks to: it never fails, it
//! falls back to 0 on anything it cannot read and only warns when a write
//! does not go through.

use directories::ProjectDirs;
use std::cell::Cell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

pub const HIGH_SCORE_FILE: &str = "highscore.txt";

/// Raw load/save of the persisted best score.
pub trait ScoreStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> io::Result<Option<u32>>;
    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// Plain-text file holding the score.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory, created on demand.
    pub fn in_data_dir() -> io::Result<Self> {
        let dir = data_dir()?;
        Ok(Self::new(dir.join(HIGH_SCORE_FILE)))
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> io::Result<Option<u32>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        text.trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())
    }
}

/// Per-user data directory for the game, created if missing.
pub fn data_dir() -> io::Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "flippyblock").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
    })?;
    let dir = dirs.data_dir();
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// after giving one to the game.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<Option<u32>>>,
    saves: Rc<Cell<u32>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn with_value(score: u32) -> Self {
        let store = Self::default();
        store.value.set(Some(score));
        store
    }

    /// Store whose every `save` fails.
    pub fn read_only(value: Option<u32>) -> Self {
        let store = Self {
            fail_writes: true,
            ..Self::default()
        };
        store.value.set(value);
        store
    }

    pub fn value(&self) -> Option<u32> {
        self.value.get()
    }

    /// Number of successful writes.
    pub fn saves(&self) -> u32 {
        self.saves.get()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> io::Result<Option<u32>> {
        Ok(self.value.get())
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "store is read-only",
            ));
        }
        self.value.set(Some(score));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Best score seen so far, backed by a [`ScoreStore`].
#[derive(Debug)]
pub struct HighScores<S> {
    store: S,
    best: u32,
    write_warned: bool,
}

impl<S: ScoreStore> HighScores<S> {
    /// Reads the stored value once. Anything unreadable counts as 0.
    pub fn load(store: S) -> Self {
        let best = match store.load() {
            Ok(Some(score)) => score,
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!("ignoring unreadable high score: {e}");
                0
            }
        };
        tracing::info!(best, "high score loaded");
        Self {
            store,
            best,
            write_warned: false,
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Raises the best score if `score` beats it and persists the new value.
    /// Returns whether the best score changed.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = self.store.save(score) {
            if self.write_warned {
                tracing::debug!("high score not saved: {e}");
            } else {
                tracing::warn!("could not save high score {score}: {e}");
                self.write_warned = true;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn score_file() -> (PathBuf, TempDir) {
        let dir = TempDir::new().unwrap();
        (dir.path().join(HIGH_SCORE_FILE), dir)
    }

    #[test]
    fn test_file_store_missing_is_none() {
        let (path, _dir) = score_file();
        assert_eq!(FileStore::new(path).load().unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let (path, _dir) = score_file();
        let mut store = FileStore::new(&path);
        store.save(42).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "42");
        assert_eq!(store.load().unwrap(), Some(42));
    }

    #[test]
    fn test_file_store_tolerates_trailing_newline() {
        let (path, _dir) = score_file();
        fs::write(&path, "17\n").unwrap();
        assert_eq!(FileStore::new(&path).load().unwrap(), Some(17));
    }

    #[test]
    fn test_file_store_corrupt_is_invalid_data() {
        let (path, _dir) = score_file();
        fs::write(&path, "twelve").unwrap();
        let err = FileStore::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_zero() {
        let (path, _dir) = score_file();
        fs::write(&path, "-3").unwrap();
        let scores = HighScores::load(FileStore::new(&path));
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_record_only_saves_improvements() {
        let store = MemoryStore::with_value(3);
        let mut scores = HighScores::load(store.clone());
        assert_eq!(scores.best(), 3);

        assert!(!scores.record(2));
        assert!(!scores.record(3));
        assert_eq!(store.saves(), 0);

        assert!(scores.record(5));
        assert_eq!(scores.best(), 5);
        assert_eq!(store.value(), Some(5));
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_failed_write_keeps_best_in_memory() {
        let mut scores = HighScores::load(MemoryStore::read_only(Some(1)));
        assert!(scores.record(4));
        assert!(scores.record(6));
        assert_eq!(scores.best(), 6);
        assert_eq!(scores.store().value(), Some(1));
        assert!(scores.write_warned);
    }
}
