// src/ingest/types.rs
use anyhow::Result;

use crate::article::RawArticle;

/// A configured news source that can produce raw feed items.
#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawArticle>>;
    /// Display name, stamped onto every article as `sourceName`.
    fn name(&self) -> &str;
}
