//! Page title query
//!
//! The engine answers script evaluations asynchronously. Callers that need
//! the answer before continuing await it here, bounded by `wait`.

use std::time::Duration;

use nar_tabs::PageHandle;
use serde_json::Value;
use tokio::time::timeout;

use crate::error::NavigationError;
use crate::Result;

pub const TITLE_SCRIPT: &str = "(function() { return document.title; })();";

/// Ask `page` for `document.title` and wait at most `wait` for the answer.
pub async fn query_title(page: &mut dyn PageHandle, wait: Duration) -> Result<String> {
    let reply = page.evaluate_script(TITLE_SCRIPT);

    match timeout(wait, reply).await {
        Ok(Ok(Value::String(title))) => Ok(title),
        Ok(Ok(other)) => {
            tracing::debug!(value = %other, "Title query answered with a non-text value");
            Err(NavigationError::TitleNotText(other))
        }
        Ok(Err(_)) => {
            tracing::debug!("Page dropped the title query");
            Err(NavigationError::TitleDropped)
        }
        Err(_) => {
            let timeout_ms = wait.as_millis() as u64;
            tracing::debug!(timeout_ms, "Title query timed out");
            Err(NavigationError::TitleTimeout { timeout_ms })
        }
    }
}
