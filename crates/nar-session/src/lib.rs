//! NAR Session State
//!
//! The durable part of a browsing session is small: the default home URL
//! and the ordered bookmark list. It is loaded once at startup and written
//! back once, atomically, when the window closes.

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{Bookmark, SessionState, DEFAULT_HOME_URL};
pub use store::{SessionStore, SqliteSessionStore};

pub type Result<T> = std::result::Result<T, SessionError>;
