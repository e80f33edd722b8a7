use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("data directory {path:?} is unusable: {reason}")]
    DataDir { path: PathBuf, reason: String },
    #[error("data directory {0:?} is not a directory")]
    NotADirectory(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// One state file inside a data directory. Writes replace the whole file at once.
#[derive(Debug, Clone)]
pub struct StateFile {
    dir: PathBuf,
    path: PathBuf,
}

impl StateFile {
    /// Names `filename` inside `dir`, creating the directory when it is missing.
    pub fn open(dir: &Path, filename: &str) -> Result<Self, PersistError> {
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(PersistError::NotADirectory(dir.to_path_buf())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(dir).map_err(|e| PersistError::DataDir {
                    path: dir.to_path_buf(),
                    reason: e.to_string(),
                })?;
            }
            Err(err) => {
                return Err(PersistError::DataDir {
                    path: dir.to_path_buf(),
                    reason: err.to_string(),
                })
            }
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            path: dir.join(filename),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents, or `None` before the first write.
    pub fn read(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes a temp file next to the target and renames it over the target.
    pub fn replace(&self, content: &str) -> Result<(), PersistError> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // `persist` renames over an existing file on every platform we target.
        tmp.persist(&self.path).map_err(|e| PersistError::Io(e.error))?;
        Ok(())
    }
}
