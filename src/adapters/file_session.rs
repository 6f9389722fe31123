//! File-based session storage.
//!
//! Persists the session map as JSON under `~/.intellichat/session.json`.
//! Loading is tolerant: a missing or corrupt file behaves as an empty
//! session rather than an error, and persistence failures are logged and
//! otherwise ignored so a read-only home directory cannot break streaming.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::traits::SessionStore;

/// The session directory name.
const SESSION_DIR: &str = ".intellichat";

/// The session file name.
const SESSION_FILE: &str = "session.json";

/// Session store backed by a JSON file in the user's home directory.
#[derive(Debug)]
pub struct FileSessionStore {
    /// Path to the session file.
    session_path: PathBuf,
    /// In-memory view of the file, written through on every mutation.
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Create a store at the default location.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let session_path = home.join(SESSION_DIR).join(SESSION_FILE);
        Some(Self::with_path(session_path))
    }

    /// Create a store backed by an explicit file path.
    pub fn with_path(session_path: PathBuf) -> Self {
        let entries = Self::load_entries(&session_path);
        Self {
            session_path,
            entries: Mutex::new(entries),
        }
    }

    /// Get the path to the session file.
    pub fn session_path(&self) -> &PathBuf {
        &self.session_path
    }

    /// Load entries from disk, treating a missing or corrupt file as empty.
    fn load_entries(path: &PathBuf) -> HashMap<String, String> {
        if !path.exists() {
            return HashMap::new();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return HashMap::new(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(entries) => entries,
            Err(_) => HashMap::new(),
        }
    }

    /// Write the current entries to disk, creating the parent directory if
    /// needed. Failures are logged and swallowed.
    fn persist(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.session_path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                tracing::warn!(path = %self.session_path.display(), "could not create session directory");
                return;
            }
        }

        let file = match File::create(&self.session_path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(error = %e, "could not write session file");
                return;
            }
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, entries).is_err() || writer.flush().is_err() {
            tracing::warn!(path = %self.session_path.display(), "could not persist session");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        self.persist(&entries);
    }

    fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        self.persist(&entries);
    }
}
