// tests/ingest_pipeline.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use fx_news_impact::article::RawArticle;
use fx_news_impact::ingest::providers::rss::RssProvider;
use fx_news_impact::ingest::run_once;
use fx_news_impact::ingest::types::FeedProvider;

struct Broken;

#[async_trait]
impl FeedProvider for Broken {
    async fn fetch_latest(&self) -> Result<Vec<RawArticle>> {
        Err(anyhow!("connection refused"))
    }
    fn name(&self) -> &str {
        "Broken"
    }
}

fn fixture(name: &str) -> Box<dyn FeedProvider> {
    let xml = std::fs::read_to_string("tests/fixtures/fx_rss.xml").expect("fixture");
    Box::new(RssProvider::from_fixture(name, &xml))
}

#[tokio::test]
async fn failing_provider_is_isolated() {
    let providers: Vec<Box<dyn FeedProvider>> = vec![Box::new(Broken), fixture("FX Desk")];
    let report = run_once(&providers, 0).await;

    assert_eq!(report.providers, 2);
    assert_eq!(report.failed_sources, vec!["Broken".to_string()]);
    assert!(!report.all_failed());
    assert_eq!(report.articles.len(), 3);
}

#[tokio::test]
async fn same_feed_twice_is_deduplicated() {
    let providers: Vec<Box<dyn FeedProvider>> = vec![fixture("Primary"), fixture("Mirror")];
    let report = run_once(&providers, 0).await;

    assert_eq!(report.articles.len(), 3);
    assert_eq!(report.dedup, 3);
    assert!(report.articles.iter().all(|a| a.source_name == "Primary"));
}

#[tokio::test]
async fn cap_limits_each_source() {
    let providers: Vec<Box<dyn FeedProvider>> = vec![fixture("FX Desk")];
    let report = run_once(&providers, 1).await;
    assert_eq!(report.articles.len(), 1);
    assert_eq!(
        report.articles[0].link,
        "https://fxdesk.example.com/news/fed-hike"
    );
}

#[tokio::test]
async fn every_provider_failing_is_reported() {
    let providers: Vec<Box<dyn FeedProvider>> = vec![Box::new(Broken)];
    let report = run_once(&providers, 0).await;
    assert!(report.all_failed());
    assert!(report.articles.is_empty());
}

#[tokio::test]
async fn no_providers_is_not_a_failure() {
    let report = run_once(&[], 0).await;
    assert!(!report.all_failed());
    assert!(report.articles.is_empty());
}
