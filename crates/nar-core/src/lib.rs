//! NAR Core
//!
//! Coordination layer for the NAR browser shell. The engine renders pages
//! and reports events; every piece of tab, address bar and bookmark state
//! lives here and is pushed to the window through `ShellView`.

mod bookmarks;
mod browser;
mod config;
mod error;
mod manager;
mod shell;

#[cfg(test)]
mod test_support;

pub use bookmarks::{BookmarkEntry, BookmarkStore};
pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;
pub use manager::{NavigationStateManager, UrlBar, HOME_TAB_LABEL, NEW_TAB_LABEL};
pub use shell::{NullShell, ShellView};

// Re-export the component crates
pub use nar_navigation::{normalize_user_url, NavigationError};
pub use nar_session::{
    Bookmark, SessionError, SessionState, SessionStore, SqliteSessionStore, DEFAULT_HOME_URL,
};
pub use nar_storage::{Database, StorageError};
pub use nar_tabs::{
    LoadState, PageEvent, PageEventSink, PageFactory, PageHandle, PageId, ScriptReply, Tab,
    TabCollection, TabId, TabSummary,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
