//! Ordered tab collection
//!
//! Order is tab-bar order. Exactly one tab is active at any time; the
//! collection starts with one tab and closing the last one is refused.
//!
//! Closing the active tab activates the tab that slides into its index, or
//! the new last tab when the closed one was last.

use crate::page::{PageHandle, PageId};
use crate::tab::{Tab, TabId, TabSummary};

#[derive(Debug)]
pub struct TabCollection {
    tabs: Vec<Tab>,
    active: usize,
}

impl TabCollection {
    /// Create the collection with its first (active) tab.
    pub fn new(first: Tab) -> Self {
        Self {
            tabs: vec![first],
            active: 0,
        }
    }

    /// Append a tab for `page` and make it active.
    pub fn add(
        &mut self,
        page_id: PageId,
        page: Box<dyn PageHandle>,
        label: impl Into<String>,
    ) -> TabId {
        let tab = Tab::new(page_id, page, label);
        let id = tab.id();
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;

        tracing::info!(tab_id = %id, index = self.active, "Added tab");

        id
    }

    /// Remove a tab, returning it so the caller can release its page.
    /// `None` if the tab is unknown or is the only one left.
    pub fn close(&mut self, id: TabId) -> Option<Tab> {
        let index = self.index_of(id)?;
        if self.tabs.len() < 2 {
            tracing::debug!(tab_id = %id, "Refusing to close the last tab");
            return None;
        }

        let removed = self.tabs.remove(index);
        if index < self.active || self.active >= self.tabs.len() {
            self.active -= 1;
        }

        tracing::info!(tab_id = %id, index, active = self.active, "Closed tab");

        Some(removed)
    }

    /// Make `id` the active tab. Unknown ids are ignored.
    pub fn set_active(&mut self, id: TabId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    pub fn active_id(&self) -> TabId {
        self.active().id()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, id: TabId) -> bool {
        self.active_id() == id
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id() == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id() == id)
    }

    pub fn at(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(Tab::id).collect()
    }

    pub fn summaries(&self) -> Vec<TabSummary> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| tab.summary(index, index == self.active))
            .collect()
    }
}
