//! NAR Storage Layer
//!
//! SQLite-backed persistence for the settings and bookmark list that
//! survive between browser runs.

mod database;
mod error;
mod migrations;

pub use database::{Database, StoredBookmark};
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
