//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Page did not answer the title query within {timeout_ms} ms")]
    TitleTimeout { timeout_ms: u64 },

    #[error("Page dropped the title query without answering")]
    TitleDropped,

    #[error("Title query returned a non-text value: {0}")]
    TitleNotText(serde_json::Value),
}

impl NavigationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, NavigationError::TitleTimeout { .. })
    }
}
