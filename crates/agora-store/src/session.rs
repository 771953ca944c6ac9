use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use agora_data::Session;

use crate::errors::SessionError;

/// The session persisted between invocations, one JSON object in one file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
    lifetime: Duration,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>, lifetime: Duration) -> Self {
        Self {
            path: path.into(),
            lifetime,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current session. An expired session is removed
    /// and reported as absent.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Option<Session>, SessionError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let session: Session = serde_json::from_str(&data)?;
        if session.is_expired(now, self.lifetime) {
            info!(path = %self.path.display(), "session expired");
            self.clear()?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let data = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, data)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the session. Returns false if there was none.
    pub fn clear(&self) -> Result<bool, SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
