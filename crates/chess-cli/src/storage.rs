//! File storage for saved games.
//!
//! Each saved game is one text file in the save directory, named after the
//! save and holding a [`GameRecord`] in its text form.

use chess_core::{GameRecord, RecordError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while saving or loading games.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no saved game named '{0}'")]
    NotFound(String),
    #[error("saved game '{name}' is corrupt: {source}")]
    Corrupt {
        name: String,
        #[source]
        source: RecordError,
    },
}

/// A directory of saved games.
///
/// The directory is created on the first save.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Writes a game under `name`, replacing any earlier save of that name.
    pub fn save(&self, name: &str, record: &GameRecord) -> Result<PathBuf, StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_of(name);
        std::fs::write(&path, record.to_text()).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Reads and parses the game saved under `name`.
    pub fn load(&self, name: &str) -> Result<GameRecord, StorageError> {
        let path = self.path_of(name);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_string()))
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        GameRecord::parse(&text).map_err(|source| StorageError::Corrupt {
            name: name.to_string(),
            source,
        })
    }

    /// Returns the names of all saved games, sorted.
    ///
    /// A save directory that does not exist yet holds no games.
    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::Io {
                path: self.dir.clone(),
                source,
            })?;
            if entry.path().is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
