//! Tab data structure
//!
//! A tab owns exactly one engine page. The label shown in the tab bar is
//! kept separately from the page title: it starts as whatever the opener
//! chose ("New tab", a bookmark title) and follows the title once a load
//! finishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::page::{PageEvent, PageHandle, PageId};
use crate::state::LoadState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct Tab {
    id: TabId,
    page_id: PageId,
    page: Box<dyn PageHandle>,
    /// Tab-bar text
    label: String,
    /// Title last reported by the engine
    title: String,
    /// URL last shown for this tab
    url: String,
    load_state: LoadState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Render-ready snapshot of a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    pub id: TabId,
    pub index: usize,
    pub label: String,
    pub title: String,
    pub url: String,
    pub load_state: LoadState,
    pub active: bool,
}

impl Tab {
    pub fn new(page_id: PageId, page: Box<dyn PageHandle>, label: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: TabId::new(),
            page_id,
            page,
            label: label.into(),
            title: String::new(),
            url: String::new(),
            load_state: LoadState::Loading,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn page(&self) -> &dyn PageHandle {
        self.page.as_ref()
    }

    pub fn page_mut(&mut self) -> &mut dyn PageHandle {
        self.page.as_mut()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.updated_at = Utc::now();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.updated_at = Utc::now();
    }

    /// Apply an engine event to the load state.
    pub fn apply(&mut self, event: &PageEvent) {
        let next = self.load_state.after(event);
        if next != self.load_state {
            tracing::debug!(
                tab_id = %self.id,
                from = %self.load_state,
                to = %next,
                "Tab load state transition"
            );
            self.load_state = next;
            self.updated_at = Utc::now();
        }
    }

    /// Any command that starts a new navigation puts the tab back in `Loading`.
    pub fn begin_navigation(&mut self) {
        self.apply(&PageEvent::LoadStarted);
    }

    /// Title if the engine reported one, otherwise the URL.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    pub fn summary(&self, index: usize, active: bool) -> TabSummary {
        TabSummary {
            id: self.id,
            index,
            label: self.label.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            load_state: self.load_state,
            active,
        }
    }
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("page_id", &self.page_id)
            .field("label", &self.label)
            .field("title", &self.title)
            .field("url", &self.url)
            .field("load_state", &self.load_state)
            .finish_non_exhaustive()
    }
}
