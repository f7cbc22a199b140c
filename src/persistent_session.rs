// persistent_session.rs

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::error::StitchError;
use crate::models::Session;

type Result<T> = std::result::Result<T, StitchError>;

/// PersistentSession keeps the client's session in a JSON file so it
/// survives restarts. File access is serialized across clones.
#[derive(Debug, Clone)]
pub struct PersistentSession {
    file_path: PathBuf,
    io_lock: Arc<Mutex<()>>,
}

impl PersistentSession {
    /// Creates a store for the given file path, creating parent directories.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref().to_path_buf();

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { file_path, io_lock: Arc::new(Mutex::new(())) })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the stored session. A missing or empty file means no session.
    pub fn load(&self) -> Result<Option<Session>> {
        let _guard = self.io_lock.lock().map_err(|e| StitchError::IoError(e.to_string()))?;
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Saves the session, or empties the file when `None`.
    pub fn save(&self, session: Option<&Session>) -> Result<()> {
        let _guard = self.io_lock.lock().map_err(|e| StitchError::IoError(e.to_string()))?;
        let content = match session {
            Some(session) => serde_json::to_string_pretty(session)?,
            None => String::new(),
        };
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}
