use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicI64, Ordering},
    },
};

use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access high score file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("High score file {} holds {content:?} instead of a number", .path.display())]
    Corrupt { path: PathBuf, content: String },
}

/// Where the best score survives between games.
pub trait HighScoreStore: Send + Sync {
    /// The best score recorded so far, 0 if there is none.
    fn read(&self) -> Result<i64, StoreError>;

    /// Records `score` if it beats the stored one, otherwise does nothing.
    fn write(&self, score: i64) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn HighScoreStore>;

#[derive(Debug, Default)]
pub struct MemoryHighScoreStore {
    best: AtomicI64,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn read(&self) -> Result<i64, StoreError> {
        Ok(self.best.load(Ordering::Acquire))
    }

    fn write(&self, score: i64) -> Result<(), StoreError> {
        self.best.fetch_max(score, Ordering::AcqRel);
        Ok(())
    }
}

/// Keeps the high score as a decimal number in a plain text file.
#[derive(Debug)]
pub struct FileHighScoreStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_unlocked(&self) -> Result<i64, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }

        trimmed.parse().map_err(|_| StoreError::Corrupt {
            path: self.path.clone(),
            content: trimmed.to_string(),
        })
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn read(&self) -> Result<i64, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_unlocked()
    }

    #[instrument(level = "trace", skip(self), fields(path = %self.path.display()))]
    fn write(&self, score: i64) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.read_unlocked()?;
        if score <= current {
            debug!("Score {} does not beat high score {}", score, current);
            return Ok(());
        }

        fs::write(&self.path, score.to_string()).map_err(|e| self.io_error(e))?;
        info!("New high score {} (previous {})", score, current);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("minesweeper-high-score-{}", nanoid::nanoid!()))
    }

    #[test]
    fn memory_store_keeps_the_best_score() {
        let store = MemoryHighScoreStore::default();
        assert_eq!(store.read().unwrap(), 0);

        store.write(49495).unwrap();
        assert_eq!(store.read().unwrap(), 49495);

        store.write(1000).unwrap();
        assert_eq!(store.read().unwrap(), 49495);
    }

    #[test]
    fn memory_store_ignores_negative_scores() {
        let store = MemoryHighScoreStore::default();
        store.write(-5).unwrap();
        assert_eq!(store.read().unwrap(), 0);
    }

    #[test]
    fn file_store_starts_at_zero_without_a_file() {
        let store = FileHighScoreStore::new(scratch_path());
        assert_eq!(store.read().unwrap(), 0);
    }

    #[test]
    fn file_store_keeps_the_best_score() {
        let path = scratch_path();
        let store = FileHighScoreStore::new(&path);
        assert_eq!(store.path(), path.as_path());

        store.write(49495).unwrap();
        assert_eq!(store.read().unwrap(), 49495);

        store.write(1000).unwrap();
        assert_eq!(store.read().unwrap(), 49495);
        assert_eq!(fs::read_to_string(&path).unwrap(), "49495");

        let reopened = FileHighScoreStore::new(&path);
        assert_eq!(reopened.read().unwrap(), 49495);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn file_store_treats_blank_file_as_zero() {
        let path = scratch_path();
        fs::write(&path, "  \n").unwrap();

        let store = FileHighScoreStore::new(&path);
        assert_eq!(store.read().unwrap(), 0);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn file_store_reports_garbage() {
        let path = scratch_path();
        fs::write(&path, "lots").unwrap();

        let store = FileHighScoreStore::new(&path);
        assert!(matches!(store.read(), Err(StoreError::Corrupt { .. })));
        assert!(store.write(10).is_err());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn file_store_reports_unwritable_location() {
        let store = FileHighScoreStore::new(scratch_path().join("missing-dir").join("score"));
        assert!(matches!(store.write(10), Err(StoreError::Io { .. })));
    }
}
