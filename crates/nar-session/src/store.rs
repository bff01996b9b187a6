//! Session persistence
//!
//! `save` replaces the stored default URL and bookmark list in a single
//! transaction, so a crash mid-write leaves the previous session intact.

use nar_storage::{Database, StoredBookmark};

use crate::session::{Bookmark, SessionState};
use crate::Result;

const DEFAULT_URL_KEY: &str = "default_url";

pub trait SessionStore {
    /// Read the saved session, filling in defaults for anything missing.
    fn load(&self) -> Result<SessionState>;

    /// Write `state` back in full.
    fn save(&self, state: &SessionState) -> Result<()>;
}

pub struct SqliteSessionStore {
    db: Database,
    /// Used when no default URL has been saved
    fallback_home: String,
}

impl SqliteSessionStore {
    pub fn new(db: Database, fallback_home: impl Into<String>) -> Self {
        Self {
            db,
            fallback_home: fallback_home.into(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&self) -> Result<SessionState> {
        let state = self.db.with_connection(|conn| {
            let default_url = Database::read_setting(conn, DEFAULT_URL_KEY)?
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| self.fallback_home.clone());
            let bookmarks = Database::read_bookmarks(conn)?
                .into_iter()
                .map(Bookmark::from)
                .collect();

            Ok(SessionState {
                default_url,
                bookmarks,
            })
        })?;

        tracing::info!(
            default_url = %state.default_url,
            bookmark_count = state.bookmarks.len(),
            "Loaded session"
        );

        Ok(state)
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        let rows: Vec<StoredBookmark> = state.bookmarks.iter().map(StoredBookmark::from).collect();

        self.db.transaction(|conn| {
            Database::write_setting(conn, DEFAULT_URL_KEY, &state.default_url)?;
            Database::write_bookmarks(conn, &rows)
        })?;

        tracing::info!(
            default_url = %state.default_url,
            bookmark_count = state.bookmarks.len(),
            "Saved session"
        );

        Ok(())
    }
}

impl Clone for SqliteSessionStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            fallback_home: self.fallback_home.clone(),
        }
    }
}
