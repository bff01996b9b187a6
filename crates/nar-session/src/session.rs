//! Session data structures

use serde::{Deserialize, Serialize};

use nar_storage::StoredBookmark;

/// Home page used when nothing has been saved yet.
pub const DEFAULT_HOME_URL: &str = "https://duckduckgo.com";

/// A saved (title, url) pair. Equality is exact on both fields: trailing
/// slash or case variants of a URL are different bookmarks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

impl From<StoredBookmark> for Bookmark {
    fn from(stored: StoredBookmark) -> Self {
        Self {
            title: stored.title,
            url: stored.url,
        }
    }
}

impl From<&Bookmark> for StoredBookmark {
    fn from(bookmark: &Bookmark) -> Self {
        StoredBookmark {
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub default_url: String,
    /// Toolbar order
    pub bookmarks: Vec<Bookmark>,
}

impl SessionState {
    pub fn new(default_url: impl Into<String>) -> Self {
        Self {
            default_url: default_url.into(),
            bookmarks: Vec::new(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_HOME_URL)
    }
}
