//! Bookmark toolbar store
//!
//! Insertion-ordered and duplicate-free under exact (title, url) equality.
//! No normalisation: `https://a.dev` and `https://a.dev/` are two bookmarks.

use serde::{Deserialize, Serialize};

use nar_session::Bookmark;

/// One toolbar item: the elided label and the bookmark it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    pub index: usize,
    pub label: String,
    pub bookmark: Bookmark,
}

#[derive(Debug, Clone, Default)]
pub struct BookmarkStore {
    items: Vec<Bookmark>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a saved list, dropping later duplicates.
    pub fn from_bookmarks(bookmarks: impl IntoIterator<Item = Bookmark>) -> Self {
        let mut store = Self::new();
        for bookmark in bookmarks {
            store.insert(bookmark);
        }
        store
    }

    /// Append unless the exact pair is already present. Returns whether it
    /// was added.
    pub fn add(&mut self, title: impl Into<String>, url: impl Into<String>) -> bool {
        self.insert(Bookmark::new(title, url))
    }

    pub fn insert(&mut self, bookmark: Bookmark) -> bool {
        if self.items.contains(&bookmark) {
            tracing::debug!(url = %bookmark.url, "Bookmark already present");
            return false;
        }

        tracing::info!(title = %bookmark.title, url = %bookmark.url, "Added bookmark");
        self.items.push(bookmark);
        true
    }

    pub fn all(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.items.get(index)
    }

    pub fn contains(&self, title: &str, url: &str) -> bool {
        self.items.iter().any(|b| b.title == title && b.url == url)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Bookmark> {
        self.items.clone()
    }

    /// Toolbar entries with labels cut to `max_chars`.
    pub fn entries(&self, max_chars: usize) -> Vec<BookmarkEntry> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, bookmark)| BookmarkEntry {
                index,
                label: elide(&bookmark.title, max_chars),
                bookmark: bookmark.clone(),
            })
            .collect()
    }

    /// Netscape bookmark file, in toolbar order.
    pub fn export_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n");
        out.push_str("<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n");
        out.push_str("<TITLE>Bookmarks</TITLE>\n");
        out.push_str("<H1>Bookmarks</H1>\n");
        out.push_str("<DL><p>\n");
        for bookmark in &self.items {
            out.push_str("  <DT><A HREF=\"");
            out.push_str(&escape_html(&bookmark.url));
            out.push_str("\">");
            out.push_str(&escape_html(&bookmark.title));
            out.push_str("</A>\n");
        }
        out.push_str("</DL><p>\n");
        out
    }

    /// Add every `<A HREF>` link found in a bookmark file. Folder structure
    /// is flattened. Returns the number of bookmarks actually added.
    pub fn import_html(&mut self, html: &str) -> usize {
        parse_links(html)
            .into_iter()
            .filter(|bookmark| self.insert(bookmark.clone()))
            .count()
    }
}

fn elide(text: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn parse_links(html: &str) -> Vec<Bookmark> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let mut links = Vec::new();
    let mut pos = 0usize;

    while let Some(start) = find_anchor(&lower, pos) {
        let Some(gt) = find_from(&lower, ">", start) else {
            break;
        };
        let Some(close) = find_from(&lower, "</a", gt) else {
            break;
        };

        let href = extract_href(&lower[start..gt], &html[start..gt]);
        let title = unescape_html(html[gt + 1..close].trim());

        if let Some(url) = href.map(|h| unescape_html(&h)).filter(|u| !u.trim().is_empty()) {
            let title = if title.is_empty() { url.clone() } else { title };
            links.push(Bookmark::new(title, url));
        }

        pos = close + 3;
    }

    links
}

/// Next `<a` that opens an anchor tag, i.e. is followed by whitespace.
fn find_anchor(lower: &str, mut pos: usize) -> Option<usize> {
    loop {
        let start = find_from(lower, "<a", pos)?;
        match lower.as_bytes().get(start + 2) {
            Some(b) if b.is_ascii_whitespace() => return Some(start),
            Some(_) => pos = start + 2,
            None => return None,
        }
    }
}

fn find_from(haystack: &str, needle: &str, start: usize) -> Option<usize> {
    haystack.get(start..)?.find(needle).map(|i| start + i)
}

fn extract_href(tag_lower: &str, tag_raw: &str) -> Option<String> {
    let idx = tag_lower.find("href=")?;
    let mut i = idx + "href=".len();
    let quote = *tag_lower.as_bytes().get(i)?;

    let end = if quote == b'"' || quote == b'\'' {
        i += 1;
        tag_lower.get(i..)?.find(quote as char).map(|j| i + j)?
    } else {
        tag_lower
            .get(i..)?
            .find(|c: char| c.is_whitespace())
            .map(|j| i + j)
            .unwrap_or(tag_lower.len())
    };

    tag_raw.get(i..end).map(str::to_string)
}
