//! Window shell interface
//!
//! The manager pushes display changes out through `ShellView`. A GUI binds
//! these to its widgets; every method defaults to doing nothing.

use crate::bookmarks::BookmarkEntry;

pub trait ShellView {
    /// Replace the address bar text and place the cursor.
    fn show_url(&mut self, _text: &str, _cursor: usize) {}

    fn set_window_title(&mut self, _title: &str) {}

    fn tab_opened(&mut self, _index: usize, _label: &str) {}

    fn tab_closed(&mut self, _index: usize) {}

    fn set_tab_label(&mut self, _index: usize, _label: &str) {}

    fn set_current_tab(&mut self, _index: usize) {}

    /// Full bookmark toolbar contents, in order.
    fn show_bookmarks(&mut self, _entries: &[BookmarkEntry]) {}
}

/// Shell for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullShell;

impl ShellView for NullShell {}
