// src/summary.rs
//! Dashboard summary builder: runs the analyzer over a batch and stamps the time.

use chrono::Utc;
use metrics::{counter, gauge};

use crate::analyze::{ImpactAnalyzer, DEFAULT_ANALYZER};
use crate::article::Article;
use crate::impact::DashboardSummary;

/// Build with the built-in analyzer tables.
pub fn build(articles: &[Article]) -> DashboardSummary {
    build_with(&DEFAULT_ANALYZER, articles)
}

/// Input order is preserved one-to-one.
pub fn build_with(analyzer: &ImpactAnalyzer, articles: &[Article]) -> DashboardSummary {
    let analyses = articles
        .iter()
        .map(|a| analyzer.analyze_article(a))
        .collect::<Vec<_>>();

    let updated_at = Utc::now();
    counter!("dashboard_refresh_total").increment(1);
    gauge!("dashboard_articles").set(analyses.len() as f64);
    gauge!("dashboard_last_refresh_ts").set(updated_at.timestamp() as f64);

    tracing::debug!(
        target: "dashboard",
        articles = analyses.len(),
        with_impacts = analyses.iter().filter(|a| !a.impacts.is_empty()).count(),
        "summary built"
    );

    DashboardSummary {
        updated_at,
        analyses,
    }
}
