// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod types;

use crate::article::{Article, RawArticle};
use crate::ingest::config::NewsConfig;
use crate::ingest::providers::rss::RssProvider;
use crate::ingest::types::FeedProvider;
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::time::Duration;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_items_total", "Raw items parsed from feeds.");
        describe_counter!(
            "ingest_articles_total",
            "Articles kept after normalization, cap and dedup."
        );
        describe_counter!("ingest_dedup_total", "Articles dropped as duplicate links.");
        describe_counter!(
            "ingest_provider_errors_total",
            "Feed fetch/parse errors."
        );
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!(
            "ingest_pipeline_last_run_ts",
            "Unix ts when ingest pipeline last ran."
        );
        describe_counter!("dashboard_refresh_total", "Dashboard summaries built.");
        describe_gauge!("dashboard_articles", "Articles in the latest summary.");
        describe_gauge!(
            "dashboard_last_refresh_ts",
            "Unix ts of the latest summary."
        );
    });
}

/// Outcome of one ingest pass.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Newest first, unique by link.
    pub articles: Vec<Article>,
    pub failed_sources: Vec<String>,
    pub providers: usize,
    pub dedup: usize,
}

impl IngestReport {
    /// True when there was at least one source and none of them answered.
    pub fn all_failed(&self) -> bool {
        self.providers > 0 && self.failed_sources.len() == self.providers
    }
}

/// HTTP providers for every configured source, sharing one client.
pub fn http_providers(cfg: &NewsConfig) -> Result<Vec<Box<dyn FeedProvider>>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building feed http client")?;
    Ok(cfg
        .sources
        .iter()
        .map(|s| Box::new(RssProvider::from_url(&s.name, &s.url, client.clone())) as Box<dyn FeedProvider>)
        .collect())
}

/// Normalize each source batch (capped at `max_per_source`, 0 = no cap),
/// drop repeated links (first wins), then order newest first with undated last.
/// Returns (articles, dedup_count).
pub fn normalize_dedup_sort(
    batches: Vec<(String, Vec<RawArticle>)>,
    max_per_source: usize,
) -> (Vec<Article>, usize) {
    let mut seen_links: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    let mut dedup = 0usize;

    for (source, raws) in batches {
        let cap = if max_per_source == 0 {
            usize::MAX
        } else {
            max_per_source
        };
        let normalized = raws
            .into_iter()
            .filter_map(|r| Article::from_raw(r, &source))
            .take(cap);
        for article in normalized {
            if !seen_links.insert(article.link.clone()) {
                dedup += 1;
                continue;
            }
            out.push(article);
        }
    }

    out.sort_by(|a, b| published_key(b).cmp(&published_key(a)));
    (out, dedup)
}

fn published_key(a: &Article) -> Option<DateTime<FixedOffset>> {
    a.published_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

/// Run ingest once over the given providers. A failing provider is logged,
/// counted and skipped; it never aborts the others.
pub async fn run_once(providers: &[Box<dyn FeedProvider>], max_per_source: usize) -> IngestReport {
    ensure_metrics_described();

    let mut batches = Vec::with_capacity(providers.len());
    let mut failed_sources = Vec::new();
    for p in providers {
        match p.fetch_latest().await {
            Ok(v) => batches.push((p.name().to_string(), v)),
            Err(e) => {
                tracing::warn!(target: "ingest", error = ?e, provider = p.name(), "provider error");
                counter!("ingest_provider_errors_total").increment(1);
                failed_sources.push(p.name().to_string());
            }
        }
    }

    let (articles, dedup) = normalize_dedup_sort(batches, max_per_source);

    let now = chrono::Utc::now().timestamp().max(0);
    counter!("ingest_articles_total").increment(articles.len() as u64);
    counter!("ingest_dedup_total").increment(dedup as u64);
    gauge!("ingest_pipeline_last_run_ts").set(now as f64);

    tracing::info!(
        target: "ingest",
        kept = articles.len(),
        dedup,
        failed = failed_sources.len(),
        providers = providers.len(),
        "ingest pass finished"
    );

    IngestReport {
        articles,
        failed_sources,
        providers: providers.len(),
        dedup,
    }
}
