//! NAR Tab Management
//!
//! Tabs pair an engine page with display metadata. The collection is never
//! empty: it is seeded with one tab and refuses to close the last one.

mod collection;
mod page;
mod state;
mod tab;

pub use collection::TabCollection;
pub use page::{
    PageEvent, PageEventQueue, PageEventSink, PageFactory, PageHandle, PageId, RoutedPageEvent,
    ScriptReply,
};
pub use state::LoadState;
pub use tab::{Tab, TabId, TabSummary};
