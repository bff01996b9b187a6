//! Scripted engine and recording shell for unit tests.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

use nar_tabs::{PageEventSink, PageFactory, PageHandle, ScriptReply};

use crate::bookmarks::BookmarkEntry;
use crate::config::Config;
use crate::shell::ShellView;

pub fn test_config() -> Config {
    let mut config = Config::new(std::env::temp_dir().join("nar-tests"));
    config.bookmark_title_timeout_ms = 50;
    config
}

/// How a page answers script evaluation.
#[derive(Debug, Clone)]
pub enum ScriptAnswer {
    /// Answer with the page's current title straight away
    CurrentTitle,
    /// Answer with a fixed value after a delay
    After(Duration, Value),
    /// Never answer
    Never,
}

#[derive(Debug)]
pub struct PageState {
    pub url: String,
    pub title: String,
    pub navigations: Vec<String>,
    pub calls: Vec<&'static str>,
    pub answer: ScriptAnswer,
    parked: Vec<oneshot::Sender<Value>>,
}

/// Test-side handle to one page the engine created.
#[derive(Clone)]
pub struct PageRemote {
    pub state: Arc<Mutex<PageState>>,
    pub sink: PageEventSink,
}

impl PageRemote {
    /// Engine reports a URL change, e.g. after a redirect.
    pub fn change_url(&self, url: &str) {
        self.state.lock().url = url.to_string();
        self.sink.url_changed(url);
    }

    /// Engine finishes loading with `title`.
    pub fn finish_load(&self, title: &str) {
        self.state.lock().title = title.to_string();
        self.sink.load_finished(true);
    }

    pub fn set_answer(&self, answer: ScriptAnswer) {
        self.state.lock().answer = answer;
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().navigations.clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().calls.clone()
    }
}

struct FakePage {
    state: Arc<Mutex<PageState>>,
    sink: PageEventSink,
}

impl PageHandle for FakePage {
    fn navigate(&mut self, url: &str) {
        {
            let mut state = self.state.lock();
            state.url = url.to_string();
            state.title.clear();
            state.navigations.push(url.to_string());
        }
        self.sink.load_started();
        self.sink.url_changed(url);
    }

    fn back(&mut self) {
        self.state.lock().calls.push("back");
        self.sink.load_started();
    }

    fn forward(&mut self) {
        self.state.lock().calls.push("forward");
        self.sink.load_started();
    }

    fn reload(&mut self) {
        self.state.lock().calls.push("reload");
        self.sink.load_started();
    }

    fn stop(&mut self) {
        self.state.lock().calls.push("stop");
    }

    fn current_url(&self) -> String {
        self.state.lock().url.clone()
    }

    fn current_title(&self) -> String {
        self.state.lock().title.clone()
    }

    fn evaluate_script(&mut self, _source: &str) -> ScriptReply {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state.lock();
        match state.answer.clone() {
            ScriptAnswer::CurrentTitle => {
                let _ = tx.send(Value::String(state.title.clone()));
            }
            ScriptAnswer::After(delay, value) => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(value);
                });
            }
            ScriptAnswer::Never => state.parked.push(tx),
        }
        rx
    }
}

/// Engine that records every page it creates.
#[derive(Clone, Default)]
pub struct FakeEngine {
    pages: Arc<Mutex<Vec<PageRemote>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, index: usize) -> PageRemote {
        self.pages.lock()[index].clone()
    }

    pub fn page_count(&self) -> usize {
        self.pages.lock().len()
    }
}

impl PageFactory for FakeEngine {
    fn create_page(&mut self, events: PageEventSink) -> Box<dyn PageHandle> {
        let state = Arc::new(Mutex::new(PageState {
            url: String::new(),
            title: String::new(),
            navigations: Vec::new(),
            calls: Vec::new(),
            answer: ScriptAnswer::CurrentTitle,
            parked: Vec::new(),
        }));
        self.pages.lock().push(PageRemote {
            state: Arc::clone(&state),
            sink: events.clone(),
        });
        Box::new(FakePage { state, sink: events })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCall {
    Url(String, usize),
    WindowTitle(String),
    TabOpened(usize, String),
    TabClosed(usize),
    TabLabel(usize, String),
    CurrentTab(usize),
    Bookmarks(Vec<String>),
}

#[derive(Clone, Default)]
pub struct RecordingShell {
    pub calls: Arc<Mutex<Vec<ShellCall>>>,
}

impl RecordingShell {
    pub fn take(&self) -> Vec<ShellCall> {
        std::mem::take(&mut *self.calls.lock())
    }
}

impl ShellView for RecordingShell {
    fn show_url(&mut self, text: &str, cursor: usize) {
        self.calls.lock().push(ShellCall::Url(text.to_string(), cursor));
    }

    fn set_window_title(&mut self, title: &str) {
        self.calls.lock().push(ShellCall::WindowTitle(title.to_string()));
    }

    fn tab_opened(&mut self, index: usize, label: &str) {
        self.calls.lock().push(ShellCall::TabOpened(index, label.to_string()));
    }

    fn tab_closed(&mut self, index: usize) {
        self.calls.lock().push(ShellCall::TabClosed(index));
    }

    fn set_tab_label(&mut self, index: usize, label: &str) {
        self.calls.lock().push(ShellCall::TabLabel(index, label.to_string()));
    }

    fn set_current_tab(&mut self, index: usize) {
        self.calls.lock().push(ShellCall::CurrentTab(index));
    }

    fn show_bookmarks(&mut self, entries: &[BookmarkEntry]) {
        let labels = entries.iter().map(|e| e.label.clone()).collect();
        self.calls.lock().push(ShellCall::Bookmarks(labels));
    }
}
