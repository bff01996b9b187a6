//! Database connection and operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

/// A bookmark row as stored, in toolbar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBookmark {
    pub title: String,
    pub url: String,
}

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL keeps the shutdown write from blocking readers of a previous run
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Run `f` inside a transaction; nothing is written unless `f` succeeds.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| Self::read_setting(conn, key))
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_connection(|conn| Self::write_setting(conn, key, value))
    }

    pub fn read_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
        let value = conn
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn write_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn bookmarks(&self) -> Result<Vec<StoredBookmark>> {
        self.with_connection(|conn| Self::read_bookmarks(conn))
    }

    pub fn read_bookmarks(conn: &Connection) -> Result<Vec<StoredBookmark>> {
        let mut stmt =
            conn.prepare("SELECT title, url FROM bookmarks ORDER BY position ASC")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(StoredBookmark {
                    title: row.get(0)?,
                    url: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Replace the whole bookmark list, preserving slice order as toolbar order.
    pub fn write_bookmarks(conn: &Connection, bookmarks: &[StoredBookmark]) -> Result<()> {
        conn.execute("DELETE FROM bookmarks", [])?;

        let created_at = Utc::now().to_rfc3339();
        let mut stmt = conn.prepare(
            "INSERT INTO bookmarks (position, title, url, created_at) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (position, bookmark) in bookmarks.iter().enumerate() {
            stmt.execute(rusqlite::params![
                position as i64,
                bookmark.title,
                bookmark.url,
                created_at
            ])?;
        }

        tracing::debug!(count = bookmarks.len(), "Wrote bookmarks");
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
