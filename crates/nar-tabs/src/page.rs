//! Rendering-engine page adapter
//!
//! A `PageHandle` is the manager's view of one engine instance. Engines run
//! their own threads; they report back through a `PageEventSink`, which only
//! enqueues. Events are applied when the owner drains the `PageEventQueue`
//! on its own thread.

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Identity of one engine page, assigned before the page is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(Uuid);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Load-lifecycle notifications emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    UrlChanged(String),
    LoadStarted,
    /// `ok` is the engine's own success flag; failed loads still finish.
    LoadFinished { ok: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedPageEvent {
    pub page_id: PageId,
    pub event: PageEvent,
}

/// Pending result of an asynchronous script evaluation.
pub type ScriptReply = oneshot::Receiver<Value>;

pub trait PageHandle {
    fn navigate(&mut self, url: &str);
    fn back(&mut self);
    fn forward(&mut self);
    fn reload(&mut self);
    fn stop(&mut self);
    fn current_url(&self) -> String;
    fn current_title(&self) -> String;
    fn evaluate_script(&mut self, source: &str) -> ScriptReply;
}

/// Creates engine pages wired to a sink that already knows their identity.
pub trait PageFactory {
    fn create_page(&mut self, events: PageEventSink) -> Box<dyn PageHandle>;
}

/// Event handler bound to a single page at creation time.
#[derive(Debug, Clone)]
pub struct PageEventSink {
    page_id: PageId,
    tx: mpsc::UnboundedSender<RoutedPageEvent>,
}

impl PageEventSink {
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn url_changed(&self, url: impl Into<String>) {
        self.emit(PageEvent::UrlChanged(url.into()));
    }

    pub fn load_started(&self) {
        self.emit(PageEvent::LoadStarted);
    }

    pub fn load_finished(&self, ok: bool) {
        self.emit(PageEvent::LoadFinished { ok });
    }

    pub fn emit(&self, event: PageEvent) {
        let routed = RoutedPageEvent {
            page_id: self.page_id,
            event,
        };
        if self.tx.send(routed).is_err() {
            tracing::trace!(page_id = %self.page_id, "Event queue closed, dropping page event");
        }
    }
}

/// Single-consumer queue all page sinks feed into.
pub struct PageEventQueue {
    tx: mpsc::UnboundedSender<RoutedPageEvent>,
    rx: mpsc::UnboundedReceiver<RoutedPageEvent>,
}

impl PageEventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn sink_for(&self, page_id: PageId) -> PageEventSink {
        PageEventSink {
            page_id,
            tx: self.tx.clone(),
        }
    }

    /// Next queued event without waiting.
    pub fn try_next(&mut self) -> Option<RoutedPageEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event. The queue holds a sender itself, so this
    /// only returns `None` if the queue is being torn down.
    pub async fn next(&mut self) -> Option<RoutedPageEvent> {
        self.rx.recv().await
    }
}

impl Default for PageEventQueue {
    fn default() -> Self {
        Self::new()
    }
}
