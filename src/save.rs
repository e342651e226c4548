//! Saved session persistence using JSON
//!
//! Stores the session in <data dir>/session.json (platform equivalent via
//! `directories`).

use crate::game::SessionState;
use directories::ProjectDirs;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Why a session could not be saved or loaded
#[derive(Debug)]
pub enum SaveError {
    /// No platform data directory could be determined
    NoDataDir,
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::NoDataDir => write!(f, "could not determine data directory"),
            SaveError::Io(e) => write!(f, "save file I/O failed: {e}"),
            SaveError::Json(e) => write!(f, "save file is not valid: {e}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::NoDataDir => None,
            SaveError::Io(e) => Some(e),
            SaveError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

/// Default location of the save file
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "blxst", "blxst").map(|dirs| dirs.data_dir().join("session.json"))
}

/// Write `state` to `path`, creating parent directories as needed
pub fn save_to(path: &Path, state: &SessionState) -> Result<(), SaveError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let contents = serde_json::to_string_pretty(state)?;
    fs::write(path, contents)?;
    debug!(path = %path.display(), "session saved");
    Ok(())
}

/// Read a session from `path`
pub fn load_from(path: &Path) -> Result<SessionState, SaveError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Delete the save file at `path`. A file that is already gone is fine.
pub fn clear_at(path: &Path) -> Result<(), SaveError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "session deleted");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Delete the save file at the default location
pub fn clear() -> Result<(), SaveError> {
    let path = default_path().ok_or(SaveError::NoDataDir)?;
    clear_at(&path)
}

/// Save to the default location
pub fn save(state: &SessionState) -> Result<(), SaveError> {
    let path = default_path().ok_or(SaveError::NoDataDir)?;
    save_to(&path, state)
}

/// Load from the default location. A missing or unreadable file means
/// there is nothing to resume.
pub fn load() -> Option<SessionState> {
    let path = default_path()?;
    match load_from(&path) {
        Ok(state) => Some(state),
        Err(SaveError::Io(e)) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), "ignoring saved session: {}", e);
            None
        }
    }
}
