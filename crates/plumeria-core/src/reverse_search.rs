//! Reverse image search collaborator contract.
//!
//! The similarity lookup itself is an external service; this module owns
//! only the contract and the one piece of logic the job layer keeps:
//! offset/limit paging over the ordered similar-match list.

use async_trait::async_trait;
use plumeria_commons::{ApiResult, PostId};
use serde::{Deserialize, Serialize};

/// What to look up: an image payload or a URL pointing at one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Url(String),
    Image(Vec<u8>),
}

/// One scored candidate match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub post_id: PostId,
    pub score: f64,
}

/// Result of a similarity lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseSearchResult {
    pub exact_match: Option<PostId>,
    /// Ordered best-first by the provider.
    pub similar: Vec<SearchHit>,
}

impl ReverseSearchResult {
    /// Slices one page out of the similar matches. Total: an offset past
    /// the end yields an empty page.
    pub fn page(&self, offset: usize, limit: usize) -> &[SearchHit] {
        let start = offset.min(self.similar.len());
        let end = start.saturating_add(limit).min(self.similar.len());
        &self.similar[start..end]
    }
}

/// The similarity-lookup service boundary (consumed, not implemented
/// here).
#[async_trait]
pub trait ReverseSearchProvider: Send + Sync {
    async fn lookup(&self, query: &SearchQuery) -> ApiResult<ReverseSearchResult>;
}
