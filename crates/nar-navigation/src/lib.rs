//! NAR Navigation
//!
//! - Address bar input: text without a scheme is sent as `http://<text>`;
//!   anything else goes to the engine untouched.
//! - Page title queries: the title is read by evaluating a script in the
//!   page and waiting, bounded, for the engine's answer.

mod error;
mod input;
mod title;

pub use error::NavigationError;
pub use input::{normalize_user_url, DEFAULT_SCHEME};
pub use title::{query_title, TITLE_SCRIPT};

pub type Result<T> = std::result::Result<T, NavigationError>;
