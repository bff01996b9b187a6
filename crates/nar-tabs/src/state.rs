//! Page load state machine
//!
//! ```text
//! Loading --loadFinished--> Loaded
//! Loaded  --navigation----> Loading
//! ```
//!
//! There is no error state: a failed load finishes like any other.

use serde::{Deserialize, Serialize};

use crate::page::PageEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// A navigation is in flight
    Loading,
    /// The last navigation finished (successfully or not)
    Loaded,
}

impl LoadState {
    /// State after the engine reports `event`.
    pub fn after(self, event: &PageEvent) -> LoadState {
        match event {
            PageEvent::LoadStarted => LoadState::Loading,
            PageEvent::LoadFinished { .. } => LoadState::Loaded,
            PageEvent::UrlChanged(_) => self,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
