//! Count resolution.
//!
//! A short page (fewer rows than the limit) is always the last page, so its
//! total follows from the window alone. A full page is ambiguous: exactly
//! `limit` rows may remain, or many more. Only then is the count query run.

use crate::error::Result;
use crate::query_builder::PageRequest;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// How the repository schedules the count query relative to the content query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountStrategy {
    /// Run the content query, then count only when the page is full
    #[default]
    Deferred,
    /// Run both concurrently; discard the count (and any count failure)
    /// whenever the page shape makes it unnecessary
    Speculative,
}

/// Total implied by the page shape, or `None` when a count query is required.
///
/// `content_len` never exceeds the limit; the executor enforces that.
pub fn infer_total(content_len: usize, page: &PageRequest) -> Option<u64> {
    let len = content_len as u64;
    if len >= page.limit() {
        return None;
    }
    if page.offset() == 0 {
        Some(len)
    } else {
        Some(page.offset() + len)
    }
}

/// Resolve the total for a fetched page, calling `count_supplier` at most once
/// and only when the page is full.
pub async fn resolve_total<F, Fut>(
    content_len: usize,
    page: &PageRequest,
    count_supplier: F,
) -> Result<u64>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<u64>>,
{
    match infer_total(content_len, page) {
        Some(total) => Ok(total),
        None => count_supplier().await,
    }
}
