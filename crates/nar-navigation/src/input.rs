//! Address bar input normalisation
//!
//! Input that already names a scheme is passed through verbatim, malformed
//! or not; the engine reports its own load failures. Input without one is
//! given `http`.

use std::net::IpAddr;
use url::Url;

pub const DEFAULT_SCHEME: &str = "http";

/// Schemes that are complete without a host.
const HOSTLESS_SCHEMES: &[&str] = &[
    "about",
    "blob",
    "data",
    "file",
    "javascript",
    "mailto",
    "view-source",
];

/// URL to dispatch for typed input, or `None` for blank input.
pub fn normalize_user_url(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if has_scheme(input) {
        return Some(input.to_string());
    }

    let (host, rest) = split_host_and_rest(input);
    let normalized = if is_bare_ipv6(host) {
        format!("{DEFAULT_SCHEME}://[{host}]{rest}")
    } else {
        format!("{DEFAULT_SCHEME}://{input}")
    };

    Some(normalized)
}

/// `localhost:8080` parses with scheme `localhost`, so a parse alone is not
/// enough: the URL must also have a host or use a hostless scheme.
fn has_scheme(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => url.has_host() || HOSTLESS_SCHEMES.contains(&url.scheme()),
        Err(_) => false,
    }
}

fn is_bare_ipv6(host: &str) -> bool {
    !host.starts_with('[') && matches!(host.parse::<IpAddr>(), Ok(IpAddr::V6(_)))
}

fn split_host_and_rest(input: &str) -> (&str, &str) {
    let cut = ['/', '?', '#']
        .iter()
        .filter_map(|ch| input.find(*ch))
        .min()
        .unwrap_or(input.len());

    input.split_at(cut)
}
