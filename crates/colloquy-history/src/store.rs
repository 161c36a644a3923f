//! JSON file persistence for conversation history and the API credential.
//!
//! One store owns one scope directory; everything inside it belongs to this
//! process-wide installation.  Writes go through a temporary file and a
//! rename so a crash mid-write never leaves a half-written history behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::conversation::Conversation;
use crate::error::{HistoryError, Result};

/// File holding the conversation list.
const CHATS_FILE_NAME: &str = "chats.json";
/// File holding the API credential.
const CREDENTIAL_FILE_NAME: &str = "credential";

/// Resolve the history scope directory.
/// Priority: `COLLOQUY_DATA_DIR` env > platform data dir > current dir.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COLLOQUY_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(base) = dirs::data_dir() {
        return base.join("colloquy");
    }
    PathBuf::from(".colloquy")
}

/// Conversation and credential storage rooted at one scope directory.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    /// Open a store at the default scope directory (see [`data_dir`]).
    pub fn open_default() -> Result<Self> {
        Self::open(data_dir())
    }

    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| HistoryError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the conversation list.
    ///
    /// Returns an empty list if nothing was saved yet (first run).
    pub fn load(&self) -> Result<Vec<Conversation>> {
        let path = self.dir.join(CHATS_FILE_NAME);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved history; starting empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(HistoryError::Io { path, source }),
        };

        let conversations: Vec<Conversation> = serde_json::from_str(&raw)?;
        info!(path = %path.display(), count = conversations.len(), "loaded history");
        Ok(conversations)
    }

    /// Persist the full conversation list, replacing any previous state.
    pub fn save(&self, conversations: &[Conversation]) -> Result<()> {
        let raw = serde_json::to_string_pretty(conversations)?;
        self.write_atomically(CHATS_FILE_NAME, raw.as_bytes())?;
        debug!(count = conversations.len(), "saved history");
        Ok(())
    }

    /// Load the stored API credential, if one was saved.
    pub fn load_credential(&self) -> Result<Option<String>> {
        let path = self.dir.join(CREDENTIAL_FILE_NAME);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw.trim().to_owned())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(HistoryError::Io { path, source }),
        }
    }

    /// Persist the API credential.
    pub fn save_credential(&self, credential: &str) -> Result<()> {
        self.write_atomically(CREDENTIAL_FILE_NAME, credential.as_bytes())
    }

    fn write_atomically(&self, file_name: &str, contents: &[u8]) -> Result<()> {
        let path = self.dir.join(file_name);
        let tmp = self.dir.join(format!("{file_name}.tmp"));

        fs::write(&tmp, contents).map_err(|source| HistoryError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| HistoryError::Io { path, source })?;
        Ok(())
    }
}
