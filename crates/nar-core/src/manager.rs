//! Tab and navigation state
//!
//! Owns the tab collection and bookmark store, applies engine events and
//! keeps the address bar, window title and tab labels in step with the
//! pages.
//!
//! Engine events name the page they came from. Each page is bound to its tab
//! in `routes` when the tab is created, so a late event lands on the tab
//! that owns the page no matter which tab is active by then. Events from
//! pages whose tab has been closed find no route and are dropped.

use std::collections::HashMap;

use nar_navigation::{normalize_user_url, query_title};
use nar_session::{Bookmark, SessionState};
use nar_tabs::{
    PageEvent, PageEventQueue, PageFactory, PageId, RoutedPageEvent, Tab, TabCollection, TabId,
    TabSummary,
};

use crate::bookmarks::{BookmarkEntry, BookmarkStore};
use crate::config::Config;
use crate::shell::ShellView;

pub const HOME_TAB_LABEL: &str = "Homepage";
pub const NEW_TAB_LABEL: &str = "New tab";

/// Address bar contents as last pushed to the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlBar {
    pub text: String,
    pub cursor: usize,
}

pub struct NavigationStateManager {
    config: Config,
    default_url: String,
    tabs: TabCollection,
    bookmarks: BookmarkStore,
    /// Which tab each live page belongs to
    routes: HashMap<PageId, TabId>,
    events: PageEventQueue,
    factory: Box<dyn PageFactory>,
    shell: Box<dyn ShellView>,
    url_bar: UrlBar,
    window_title: String,
}

impl NavigationStateManager {
    /// Build the manager from a loaded session. One tab is opened at the
    /// session's home URL.
    pub fn new(
        config: Config,
        session: SessionState,
        mut factory: Box<dyn PageFactory>,
        shell: Box<dyn ShellView>,
    ) -> Self {
        let events = PageEventQueue::new();
        let SessionState {
            default_url,
            bookmarks,
        } = session;

        let page_id = PageId::new();
        let mut first = Tab::new(
            page_id,
            factory.create_page(events.sink_for(page_id)),
            HOME_TAB_LABEL,
        );
        first.set_url(default_url.clone());
        first.page_mut().navigate(&default_url);

        let mut routes = HashMap::new();
        routes.insert(page_id, first.id());

        let window_title = config.app_name.clone();
        let mut manager = Self {
            config,
            default_url,
            tabs: TabCollection::new(first),
            bookmarks: BookmarkStore::from_bookmarks(bookmarks),
            routes,
            events,
            factory,
            shell,
            url_bar: UrlBar::default(),
            window_title,
        };

        manager.shell.tab_opened(0, HOME_TAB_LABEL);
        manager.shell.set_current_tab(0);
        manager.publish_bookmarks();
        manager.show_active_tab();

        tracing::info!(
            tab_id = %manager.tabs.active_id(),
            url = %manager.default_url,
            "Navigation state initialized"
        );

        manager
    }

    // === Engine events ===

    /// Apply every event queued so far. Returns how many were taken.
    pub fn pump_events(&mut self) -> usize {
        let mut count = 0;
        while let Some(event) = self.events.try_next() {
            self.handle_event(event);
            count += 1;
        }
        count
    }

    /// Wait for one engine event and apply it.
    pub async fn process_next_event(&mut self) -> bool {
        match self.events.next().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_event(&mut self, routed: RoutedPageEvent) {
        let Some(tab_id) = self.routes.get(&routed.page_id).copied() else {
            tracing::trace!(page_id = %routed.page_id, "Event from released page ignored");
            return;
        };

        if let Some(tab) = self.tabs.get_mut(tab_id) {
            tab.apply(&routed.event);
        }

        match routed.event {
            PageEvent::UrlChanged(url) => self.on_url_changed(tab_id, url),
            PageEvent::LoadFinished { ok } => self.on_load_finished(tab_id, ok),
            PageEvent::LoadStarted => {}
        }
    }

    fn on_url_changed(&mut self, tab_id: TabId, url: String) {
        if !self.tabs.is_active(tab_id) {
            tracing::debug!(tab_id = %tab_id, url = %url, "URL change from background tab ignored");
            return;
        }

        self.tabs.active_mut().set_url(url.clone());
        self.show_url(url);
    }

    fn on_load_finished(&mut self, tab_id: TabId, ok: bool) {
        let Some(index) = self.tabs.index_of(tab_id) else {
            return;
        };
        let Some(tab) = self.tabs.get_mut(tab_id) else {
            return;
        };

        let title = tab.page().current_title();
        tab.set_title(title);
        let label = tab.display_title().to_string();
        tab.set_label(label.clone());

        tracing::debug!(tab_id = %tab_id, ok, title = %tab.title(), "Load finished");

        self.shell.set_tab_label(index, &label);
        if self.tabs.is_active(tab_id) {
            self.update_window_title();
        }
    }

    // === Tabs ===

    /// Open a tab at the default URL.
    pub fn new_tab(&mut self) -> TabId {
        let url = self.default_url.clone();
        self.open_tab(&url, NEW_TAB_LABEL)
    }

    /// Open `url` in a new, active tab labelled `label`.
    pub fn open_tab(&mut self, url: &str, label: &str) -> TabId {
        let page_id = PageId::new();
        let page = self.factory.create_page(self.events.sink_for(page_id));
        let tab_id = self.tabs.add(page_id, page, label);
        self.routes.insert(page_id, tab_id);

        let tab = self.tabs.active_mut();
        tab.set_url(url);
        tab.page_mut().navigate(url);

        let index = self.tabs.active_index();
        self.shell.tab_opened(index, label);
        self.shell.set_current_tab(index);
        self.show_active_tab();

        tab_id
    }

    /// Paste-and-go without the clipboard: open `url` as typed.
    pub fn open_in_new_tab(&mut self, url: &str) -> TabId {
        let label = self.tabs.active().title().to_string();
        let label = if label.is_empty() { NEW_TAB_LABEL } else { label.as_str() };
        self.open_tab(url, label)
    }

    /// Double click on the tab bar. Only a click on empty space (`None`)
    /// opens a tab.
    pub fn on_tab_bar_double_clicked(&mut self, index: Option<usize>) -> Option<TabId> {
        match index {
            None => Some(self.new_tab()),
            Some(_) => None,
        }
    }

    /// Close a tab. The last tab is never closed. A page still loading is
    /// stopped before it is released.
    pub fn close_tab(&mut self, tab_id: TabId) -> bool {
        let was_active = self.tabs.is_active(tab_id);
        let Some(index) = self.tabs.index_of(tab_id) else {
            return false;
        };
        let Some(mut tab) = self.tabs.close(tab_id) else {
            return false;
        };

        self.routes.remove(&tab.page_id());
        if tab.load_state().is_loading() {
            tracing::debug!(tab_id = %tab_id, "Stopping in-flight load of closed tab");
            tab.page_mut().stop();
        }
        drop(tab);

        self.shell.tab_closed(index);
        if was_active {
            self.shell.set_current_tab(self.tabs.active_index());
            self.show_active_tab();
        }

        true
    }

    pub fn close_active_tab(&mut self) -> bool {
        self.close_tab(self.tabs.active_id())
    }

    /// Switch tabs. Unknown ids are ignored.
    pub fn set_active(&mut self, tab_id: TabId) -> bool {
        if !self.tabs.set_active(tab_id) {
            return false;
        }

        self.shell.set_current_tab(self.tabs.active_index());
        self.show_active_tab();
        true
    }

    /// Switch tabs by tab-bar position.
    pub fn activate_index(&mut self, index: usize) -> bool {
        match self.tabs.at(index).map(Tab::id) {
            Some(id) => self.set_active(id),
            None => false,
        }
    }

    // === Navigation ===

    /// Load typed input in the active tab; input without a scheme gets
    /// `http`. Returns the URL handed to the engine.
    pub fn navigate_active_to(&mut self, input: &str) -> Option<String> {
        let Some(url) = normalize_user_url(input) else {
            tracing::debug!("Ignoring blank address bar input");
            return None;
        };

        let tab = self.tabs.active_mut();
        tab.begin_navigation();
        tab.page_mut().navigate(&url);

        tracing::info!(tab_id = %tab.id(), url = %url, "Navigating");

        Some(url)
    }

    pub fn navigate_home(&mut self) {
        let url = self.default_url.clone();
        let tab = self.tabs.active_mut();
        tab.begin_navigation();
        tab.page_mut().navigate(&url);
    }

    pub fn back(&mut self) {
        let tab = self.tabs.active_mut();
        tab.begin_navigation();
        tab.page_mut().back();
    }

    pub fn forward(&mut self) {
        let tab = self.tabs.active_mut();
        tab.begin_navigation();
        tab.page_mut().forward();
    }

    pub fn reload(&mut self) {
        let tab = self.tabs.active_mut();
        tab.begin_navigation();
        tab.page_mut().reload();
    }

    /// Stop the active page; its `loadFinished` moves the tab to `Loaded`.
    pub fn stop(&mut self) {
        self.tabs.active_mut().page_mut().stop();
    }

    pub fn default_home_url(&self) -> &str {
        &self.default_url
    }

    pub fn set_default_home_url(&mut self, url: impl Into<String>) {
        self.default_url = url.into();
        tracing::info!(url = %self.default_url, "Default home URL changed");
    }

    // === Bookmarks ===

    /// Bookmark the active page under its current title.
    ///
    /// The title is read from the page itself and this waits for the answer,
    /// up to the configured timeout. No other event is applied meanwhile. If
    /// the page does not answer with a usable title, the URL is used as the
    /// title.
    ///
    /// The wait uses `tokio::time::timeout`, so this must be polled inside a
    /// tokio runtime with the time driver enabled; any other executor panics
    /// on the first poll.
    pub async fn add_bookmark_for_active_tab(&mut self) -> Bookmark {
        let wait = self.config.bookmark_title_timeout();
        let tab = self.tabs.active_mut();
        let tab_id = tab.id();
        let url = tab.page().current_url();

        let title = match query_title(tab.page_mut(), wait).await {
            Ok(title) if !title.trim().is_empty() => title,
            Ok(_) => url.clone(),
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, error = %e, "Using URL as bookmark title");
                url.clone()
            }
        };

        let bookmark = Bookmark::new(title, url);
        self.add_bookmark(bookmark.clone());
        bookmark
    }

    pub fn add_bookmark(&mut self, bookmark: Bookmark) -> bool {
        let added = self.bookmarks.insert(bookmark);
        if added {
            self.publish_bookmarks();
        }
        added
    }

    /// Open the toolbar bookmark at `index` in a new tab labelled with its
    /// title. Out-of-range indexes do nothing.
    pub fn open_bookmark(&mut self, index: usize) -> Option<TabId> {
        let Some(bookmark) = self.bookmarks.get(index).cloned() else {
            tracing::debug!(index, "No bookmark at toolbar index");
            return None;
        };

        Some(self.open_tab(&bookmark.url, &bookmark.title))
    }

    pub fn import_bookmarks_html(&mut self, html: &str) -> usize {
        let added = self.bookmarks.import_html(html);
        if added > 0 {
            self.publish_bookmarks();
        }
        added
    }

    pub fn export_bookmarks_html(&self) -> String {
        self.bookmarks.export_html()
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn bookmark_entries(&self) -> Vec<BookmarkEntry> {
        self.bookmarks.entries(self.config.bookmark_label_max_chars)
    }

    // === Display state ===

    pub fn url_bar(&self) -> &UrlBar {
        &self.url_bar
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    /// URL of the page in the active tab, as the engine reports it now.
    pub fn active_url(&self) -> String {
        self.tabs.active().page().current_url()
    }

    pub fn active_tab(&self) -> &Tab {
        self.tabs.active()
    }

    pub fn tabs(&self) -> &TabCollection {
        &self.tabs
    }

    pub fn tab_summaries(&self) -> Vec<TabSummary> {
        self.tabs.summaries()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Session ===

    pub fn session_state(&self) -> SessionState {
        SessionState {
            default_url: self.default_url.clone(),
            bookmarks: self.bookmarks.to_vec(),
        }
    }

    /// Release every page and hand back the state to persist.
    pub fn into_session_state(self) -> SessionState {
        let state = self.session_state();
        tracing::debug!(tab_count = self.tabs.len(), "Releasing tabs");
        state
    }

    // === Internal ===

    /// Re-read the active page and push its URL and title to the shell.
    fn show_active_tab(&mut self) {
        let tab = self.tabs.active_mut();
        let url = tab.page().current_url();
        if !url.is_empty() {
            tab.set_url(url);
        }
        let title = tab.page().current_title();
        if !title.is_empty() {
            tab.set_title(title);
        }

        let url = tab.url().to_string();
        self.show_url(url);
        self.update_window_title();
    }

    fn show_url(&mut self, text: String) {
        self.url_bar = UrlBar { text, cursor: 0 };
        self.shell.show_url(&self.url_bar.text, self.url_bar.cursor);
    }

    fn update_window_title(&mut self) {
        let title = self.tabs.active().title();
        self.window_title = if title.trim().is_empty() {
            self.config.app_name.clone()
        } else {
            format!("{} - {}", title, self.config.app_name)
        };
        self.shell.set_window_title(&self.window_title);
    }

    fn publish_bookmarks(&mut self) {
        let entries = self.bookmark_entries();
        self.shell.show_bookmarks(&entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_config, FakeEngine, RecordingShell, ScriptAnswer, ShellCall};
    use nar_tabs::LoadState;
    use serde_json::Value;
    use std::time::Duration;

    const HOME: &str = "https://duckduckgo.com";

    fn manager_with(session: SessionState) -> (NavigationStateManager, FakeEngine, RecordingShell) {
        let engine = FakeEngine::new();
        let shell = RecordingShell::default();
        let mut manager = NavigationStateManager::new(
            test_config(),
            session,
            Box::new(engine.clone()),
            Box::new(shell.clone()),
        );
        manager.pump_events();
        (manager, engine, shell)
    }

    fn manager() -> (NavigationStateManager, FakeEngine, RecordingShell) {
        manager_with(SessionState::new(HOME))
    }

    #[test]
    fn test_starts_with_home_tab() {
        let (manager, engine, _) = manager();

        assert_eq!(manager.tabs().len(), 1);
        assert_eq!(manager.active_tab().label(), HOME_TAB_LABEL);
        assert_eq!(engine.page(0).navigations(), vec![HOME.to_string()]);
        assert_eq!(manager.url_bar().text, HOME);
        assert_eq!(manager.window_title(), "NAR Browser");
    }

    #[test]
    fn test_new_tab_then_close_first() {
        let (mut manager, engine, _) = manager();
        let tab0 = manager.active_tab().id();

        let tab1 = manager.new_tab();
        assert_eq!(manager.tabs().len(), 2);
        assert_eq!(manager.tabs().active_id(), tab1);
        assert_eq!(manager.active_tab().label(), NEW_TAB_LABEL);
        assert_eq!(engine.page(1).navigations(), vec![HOME.to_string()]);

        assert!(manager.close_tab(tab0));
        assert_eq!(manager.tabs().len(), 1);
        assert_eq!(manager.tabs().active_id(), tab1);
    }

    #[test]
    fn test_closing_last_tab_is_noop() {
        let (mut manager, _, _) = manager();
        assert!(!manager.close_active_tab());
        assert_eq!(manager.tabs().len(), 1);
    }

    #[test]
    fn test_navigate_defaults_to_http() {
        let (mut manager, engine, _) = manager();

        let dispatched = manager.navigate_active_to("example.com");
        assert_eq!(dispatched.as_deref(), Some("http://example.com"));
        assert_eq!(
            engine.page(0).navigations().last().map(String::as_str),
            Some("http://example.com")
        );
        assert_eq!(manager.active_tab().load_state(), LoadState::Loading);
    }

    #[test]
    fn test_blank_input_dispatches_nothing() {
        let (mut manager, engine, _) = manager();
        assert_eq!(manager.navigate_active_to("   "), None);
        assert_eq!(engine.page(0).navigations().len(), 1);
    }

    #[test]
    fn test_background_url_change_does_not_touch_url_bar() {
        let (mut manager, engine, _) = manager();
        let a = manager.active_tab().id();
        manager.open_tab("https://b.dev/", NEW_TAB_LABEL);
        manager.pump_events();
        manager.set_active(a);
        engine.page(0).change_url("https://a.dev/");
        manager.pump_events();

        engine.page(1).change_url("https://b.dev/elsewhere");
        manager.pump_events();

        assert_eq!(manager.url_bar().text, "https://a.dev/");
    }

    #[test]
    fn test_url_bar_follows_active_tab_after_switch() {
        let (mut manager, engine, _) = manager();
        let a = manager.active_tab().id();
        let b = manager.open_tab("https://b.dev/", NEW_TAB_LABEL);
        manager.set_active(a);
        manager.pump_events();

        manager.set_active(b);
        engine.page(1).change_url("https://b.dev/next");
        manager.pump_events();
        assert_eq!(manager.url_bar().text, "https://b.dev/next");
        assert_eq!(manager.url_bar().cursor, 0);

        engine.page(0).change_url("https://a.dev/stale");
        manager.pump_events();
        assert_eq!(manager.url_bar().text, "https://b.dev/next");
    }

    #[test]
    fn test_events_queued_before_switch_stay_with_their_tab() {
        let (mut manager, engine, _) = manager();
        let a = manager.active_tab().id();
        manager.open_tab("https://b.dev/", NEW_TAB_LABEL);
        manager.pump_events();

        // queued while B is active, delivered after switching to A
        engine.page(1).change_url("https://b.dev/late");
        engine.page(1).finish_load("B late");
        manager.set_active(a);
        manager.pump_events();

        assert_eq!(manager.url_bar().text, HOME);
        assert_eq!(manager.tabs().at(1).unwrap().label(), "B late");
        assert_eq!(manager.window_title(), "NAR Browser");
    }

    #[test]
    fn test_background_load_finished_updates_label_not_window_title() {
        let (mut manager, engine, shell) = manager();
        let a = manager.active_tab().id();
        manager.open_tab("https://b.dev/", NEW_TAB_LABEL);
        manager.set_active(a);
        engine.page(0).finish_load("Alpha");
        manager.pump_events();
        assert_eq!(manager.window_title(), "Alpha - NAR Browser");
        shell.take();

        engine.page(1).finish_load("Beta");
        manager.pump_events();

        let b = manager.tabs().at(1).unwrap();
        assert_eq!(b.label(), "Beta");
        assert_eq!(b.title(), "Beta");
        assert_eq!(b.load_state(), LoadState::Loaded);
        assert_eq!(manager.window_title(), "Alpha - NAR Browser");
        assert_eq!(shell.take(), vec![ShellCall::TabLabel(1, "Beta".to_string())]);
    }

    #[test]
    fn test_switching_tabs_refreshes_window_title() {
        let (mut manager, engine, _) = manager();
        let a = manager.active_tab().id();
        let b = manager.open_tab("https://b.dev/", NEW_TAB_LABEL);
        engine.page(0).finish_load("Alpha");
        engine.page(1).finish_load("Beta");
        manager.pump_events();
        assert_eq!(manager.window_title(), "Beta - NAR Browser");

        manager.set_active(a);
        assert_eq!(manager.window_title(), "Alpha - NAR Browser");
        assert_eq!(manager.url_bar().text, HOME);

        manager.set_active(b);
        assert_eq!(manager.url_bar().text, "https://b.dev/");
    }

    #[test]
    fn test_empty_title_labels_tab_with_url() {
        let (mut manager, engine, _) = manager();
        engine.page(0).finish_load("");
        manager.pump_events();

        assert_eq!(manager.active_tab().label(), HOME);
        assert_eq!(manager.window_title(), "NAR Browser");
    }

    #[test]
    fn test_closing_loading_tab_stops_and_releases_page() {
        let (mut manager, engine, _) = manager();
        let b = manager.open_tab("https://slow.example/", NEW_TAB_LABEL);
        manager.pump_events();
        assert!(manager.active_tab().load_state().is_loading());

        assert!(manager.close_tab(b));
        assert_eq!(engine.page(1).calls(), vec!["stop"]);

        // late events from the released page are dropped
        engine.page(1).finish_load("Too late");
        engine.page(1).change_url("https://slow.example/done");
        assert_eq!(manager.pump_events(), 2);
        assert_eq!(manager.url_bar().text, HOME);
        assert!(manager.tabs().iter().all(|t| t.label() != "Too late"));
    }

    #[test]
    fn test_closing_loaded_tab_does_not_stop() {
        let (mut manager, engine, _) = manager();
        let b = manager.open_tab("https://b.dev/", NEW_TAB_LABEL);
        engine.page(1).finish_load("Beta");
        manager.pump_events();

        manager.close_tab(b);
        assert!(engine.page(1).calls().is_empty());
    }

    #[test]
    fn test_close_active_selects_neighbour_and_refreshes_display() {
        let (mut manager, engine, _) = manager();
        let b = manager.open_tab("https://b.dev/", NEW_TAB_LABEL);
        manager.open_tab("https://c.dev/", NEW_TAB_LABEL);
        engine.page(2).finish_load("Gamma");
        manager.pump_events();
        manager.set_active(b);

        manager.close_tab(b);
        assert_eq!(manager.tabs().active_index(), 1);
        assert_eq!(manager.url_bar().text, "https://c.dev/");
        assert_eq!(manager.window_title(), "Gamma - NAR Browser");
    }

    #[test]
    fn test_navigation_controls_reach_active_page() {
        let (mut manager, engine, _) = manager();
        engine.page(0).finish_load("Home");
        manager.pump_events();

        manager.back();
        assert_eq!(manager.active_tab().load_state(), LoadState::Loading);
        manager.forward();
        manager.reload();
        manager.stop();

        assert_eq!(engine.page(0).calls(), vec!["back", "forward", "reload", "stop"]);
    }

    #[test]
    fn test_navigate_home_uses_current_default() {
        let (mut manager, engine, _) = manager();
        manager.set_default_home_url("https://start.example/");
        manager.navigate_home();

        assert_eq!(
            engine.page(0).navigations().last().map(String::as_str),
            Some("https://start.example/")
        );
        assert_eq!(manager.session_state().default_url, "https://start.example/");
    }

    #[test]
    fn test_double_click_on_empty_tab_bar_opens_tab() {
        let (mut manager, engine, _) = manager();
        assert!(manager.on_tab_bar_double_clicked(Some(0)).is_none());
        assert_eq!(manager.tabs().len(), 1);

        assert!(manager.on_tab_bar_double_clicked(None).is_some());
        assert_eq!(manager.tabs().len(), 2);
        assert_eq!(engine.page_count(), 2);
    }

    #[test]
    fn test_open_bookmark() {
        let mut session = SessionState::new(HOME);
        session.bookmarks.push(Bookmark::new("Rust", "https://rust-lang.org"));
        let (mut manager, engine, _) = manager_with(session);

        assert!(manager.open_bookmark(5).is_none());
        assert_eq!(manager.tabs().len(), 1);

        let id = manager.open_bookmark(0).unwrap();
        assert_eq!(manager.tabs().active_id(), id);
        assert_eq!(manager.active_tab().label(), "Rust");
        assert_eq!(engine.page(1).navigations(), vec!["https://rust-lang.org".to_string()]);
    }

    #[test]
    fn test_open_in_new_tab_uses_active_title_as_label() {
        let (mut manager, engine, _) = manager();
        engine.page(0).finish_load("Search");
        manager.pump_events();

        manager.open_in_new_tab("https://pasted.example/");
        assert_eq!(manager.active_tab().label(), "Search");
        assert_eq!(manager.active_url(), "https://pasted.example/");
    }

    #[tokio::test]
    async fn test_bookmark_waits_for_resolving_title() {
        let mut config = test_config();
        config.bookmark_title_timeout_ms = 2_000;
        let engine = FakeEngine::new();
        let mut manager = NavigationStateManager::new(
            config,
            SessionState::new(HOME),
            Box::new(engine.clone()),
            Box::new(RecordingShell::default()),
        );
        engine.page(0).set_answer(ScriptAnswer::After(
            Duration::from_millis(30),
            Value::from("Resolved title"),
        ));

        let bookmark = manager.add_bookmark_for_active_tab().await;

        assert_eq!(bookmark, Bookmark::new("Resolved title", HOME));
        assert_eq!(manager.bookmarks().all(), &[bookmark]);
    }

    #[tokio::test]
    async fn test_bookmark_title_timeout_falls_back_to_url() {
        let (mut manager, engine, _) = manager();
        engine.page(0).set_answer(ScriptAnswer::Never);

        let bookmark = manager.add_bookmark_for_active_tab().await;
        assert_eq!(bookmark, Bookmark::new(HOME, HOME));
    }

    #[tokio::test]
    async fn test_bookmarking_twice_keeps_one_entry() {
        let (mut manager, engine, shell) = manager();
        engine.page(0).finish_load("DuckDuckGo");
        manager.pump_events();
        shell.take();

        manager.add_bookmark_for_active_tab().await;
        manager.add_bookmark_for_active_tab().await;

        assert_eq!(manager.bookmarks().len(), 1);
        assert_eq!(
            shell.take(),
            vec![ShellCall::Bookmarks(vec!["DuckDuckGo".to_string()])]
        );
    }

    #[test]
    fn test_session_state_snapshot() {
        let mut session = SessionState::new(HOME);
        session.bookmarks.push(Bookmark::new("A", "https://a.dev"));
        let (mut manager, _, _) = manager_with(session);

        manager.add_bookmark(Bookmark::new("B", "https://b.dev"));
        manager.add_bookmark(Bookmark::new("A", "https://a.dev"));

        let state = manager.into_session_state();
        assert_eq!(state.default_url, HOME);
        assert_eq!(
            state.bookmarks,
            vec![Bookmark::new("A", "https://a.dev"), Bookmark::new("B", "https://b.dev")]
        );
    }

    #[test]
    fn test_shell_sees_initial_layout() {
        let engine = FakeEngine::new();
        let shell = RecordingShell::default();
        let mut session = SessionState::new(HOME);
        session.bookmarks.push(Bookmark::new("A", "https://a.dev"));

        let _manager = NavigationStateManager::new(
            test_config(),
            session,
            Box::new(engine),
            Box::new(shell.clone()),
        );

        assert_eq!(
            shell.take(),
            vec![
                ShellCall::TabOpened(0, HOME_TAB_LABEL.to_string()),
                ShellCall::CurrentTab(0),
                ShellCall::Bookmarks(vec!["A".to_string()]),
                ShellCall::Url(HOME.to_string(), 0),
                ShellCall::WindowTitle("NAR Browser".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_process_next_event() {
        let (mut manager, engine, _) = manager();
        engine.page(0).change_url("https://moved.example/");

        assert!(manager.process_next_event().await);
        assert_eq!(manager.url_bar().text, "https://moved.example/");
    }
}
