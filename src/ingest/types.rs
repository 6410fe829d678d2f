// src/ingest/types.rs
use chrono::{DateTime, Utc};

use crate::error::FetchError;
use crate::posting::Category;

/// One entry as delivered by a feed. Never modified after fetch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Claimed publisher; may be missing or misleading.
    pub source_name: Option<String>,
}

/// A search request for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub category: Category,
    pub query: String,
}

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch entries for `query`. Timeouts and retries are the source's business;
    /// an `Err` here is turned into an empty list by the caller.
    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<RawEntry>, FetchError>;
    fn name(&self) -> &str;
}
