// tests/providers_rss.rs
use fx_news_impact::ingest::normalize_dedup_sort;
use fx_news_impact::ingest::providers::rss::RssProvider;
use fx_news_impact::ingest::types::FeedProvider;
use std::fs;

#[tokio::test]
async fn parses_fixture_feed() {
    let xml = fs::read_to_string("tests/fixtures/fx_rss.xml").expect("fixture");
    let p = RssProvider::from_fixture("FX Desk", &xml);
    let items = p.fetch_latest().await.expect("ok");

    assert_eq!(p.name(), "FX Desk");
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.link.is_some()));
    assert_eq!(items.iter().filter(|i| i.pub_date.is_some()).count(), 2);
}

#[tokio::test]
async fn full_body_is_preferred_over_teaser() {
    let xml = fs::read_to_string("tests/fixtures/fx_rss.xml").expect("fixture");
    let items = RssProvider::from_fixture("FX Desk", &xml)
        .fetch_latest()
        .await
        .expect("ok");

    let boj = items
        .iter()
        .find(|i| i.link.as_deref() == Some("https://fxdesk.example.com/news/boj-cut"))
        .expect("boj item");
    assert_eq!(
        boj.content.as_deref(),
        Some("<p>USD/JPY climbs toward recent highs.</p>")
    );

    // items without content:encoded keep their description
    let fed = items
        .iter()
        .find(|i| i.link.as_deref() == Some("https://fxdesk.example.com/news/fed-hike"))
        .expect("fed item");
    assert!(fed.content.as_deref().is_some_and(|c| c.contains("hawkish")));
}

#[tokio::test]
async fn fixture_normalizes_into_articles() {
    let xml = fs::read_to_string("tests/fixtures/fx_rss.xml").expect("fixture");
    let p = RssProvider::from_fixture("FX Desk", &xml);
    let items = p.fetch_latest().await.expect("ok");

    let (articles, dedup) = normalize_dedup_sort(vec![(p.name().to_string(), items)], 0);
    assert_eq!(dedup, 0);
    assert_eq!(articles.len(), 3);

    // newest first, undated last
    assert_eq!(articles[0].link, "https://fxdesk.example.com/news/fed-hike");
    assert_eq!(articles[0].published_at.as_deref(), Some("2025-06-03T14:30:00Z"));
    assert_eq!(articles[0].content, "Powell struck a hawkish tone on Tuesday.");
    assert_eq!(articles[2].link, "https://fxdesk.example.com/news/oil");
    assert!(articles[2].published_at.is_none());
    assert_eq!(articles[1].content, "USD/JPY climbs toward recent highs.");
    assert!(articles[2].content.is_empty());
    assert!(articles.iter().all(|a| a.source_name == "FX Desk"));
}

#[tokio::test]
async fn broken_feed_is_an_error() {
    let p = RssProvider::from_fixture("Broken", "<html><body>502</body></html>");
    assert!(p.fetch_latest().await.is_err());
}
