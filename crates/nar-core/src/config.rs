//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use nar_session::DEFAULT_HOME_URL;

use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Home page used until the user saves another one
    pub homepage: String,
    /// Suffix for the window title
    pub app_name: String,
    /// Upper bound on waiting for a page to report its title
    pub bookmark_title_timeout_ms: u64,
    /// Bookmark toolbar labels are elided past this many characters
    pub bookmark_label_max_chars: usize,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("nar.db"),
            homepage: DEFAULT_HOME_URL.to_string(),
            app_name: "NAR Browser".to_string(),
            bookmark_title_timeout_ms: 3_000,
            bookmark_label_max_chars: 24,
        }
    }

    /// Read a JSON config file. A missing file yields the defaults; fields
    /// absent from the file keep their default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn bookmark_title_timeout(&self) -> Duration {
        Duration::from_millis(self.bookmark_title_timeout_ms)
    }

    pub fn data_dir() -> PathBuf {
        platform_data_dir()
            .map(|d| d.join("NAR"))
            .unwrap_or_else(|| PathBuf::from(".nar"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

/// Per-user data directory as the desktop session advertises it.
fn platform_data_dir() -> Option<PathBuf> {
    let var = |name: &str| {
        std::env::var_os(name)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    };

    if cfg!(target_os = "windows") {
        var("LOCALAPPDATA")
    } else if cfg!(target_os = "macos") {
        var("HOME").map(|home| home.join("Library/Application Support"))
    } else {
        var("XDG_DATA_HOME").or_else(|| var("HOME").map(|home| home.join(".local/share")))
    }
}
