use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::aggregate::aggregate;
use crate::analyze::ImpactAnalyzer;
use crate::article::Article;
use crate::impact::{AggregatedImpact, ArticleAnalysis, DashboardSummary};
use crate::ingest::{self, config::load_sources_default, types::FeedProvider};
use crate::summary::build_with;

/// Read-only state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<ImpactAnalyzer>,
    providers: Arc<Vec<Box<dyn FeedProvider>>>,
    max_items_per_source: usize,
}

impl AppState {
    pub fn new(
        analyzer: ImpactAnalyzer,
        providers: Vec<Box<dyn FeedProvider>>,
        max_items_per_source: usize,
    ) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            providers: Arc::new(providers),
            max_items_per_source,
        }
    }

    /// Sources from config (env/file/seed), HTTP providers, cue table from env.
    pub fn from_env() -> Result<Self> {
        let cfg = load_sources_default()?;
        let providers = ingest::http_providers(&cfg)?;
        tracing::info!(
            target: "api",
            sources = cfg.sources.len(),
            max_items_per_source = cfg.max_items_per_source,
            "news sources loaded"
        );
        Ok(Self::new(
            ImpactAnalyzer::from_env(),
            providers,
            cfg.max_items_per_source,
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/news", get(news))
        .route("/api/news/impacts", get(news_impacts))
        .route("/api/analyze", post(analyze_articles))
        .route("/api/aggregate", post(aggregate_analyses))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

type ApiError = (StatusCode, Json<Value>);

async fn refresh(state: &AppState) -> Result<DashboardSummary, ApiError> {
    let report = ingest::run_once(&state.providers, state.max_items_per_source).await;
    if report.all_failed() {
        tracing::error!(target: "api", failed = ?report.failed_sources, "every news source failed");
        return Err((
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "error": "failed to fetch news from every source",
                "failedSources": report.failed_sources,
            })),
        ));
    }
    Ok(build_with(&state.analyzer, &report.articles))
}

async fn news(State(state): State<AppState>) -> Result<Json<DashboardSummary>, ApiError> {
    refresh(&state).await.map(Json)
}

async fn news_impacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AggregatedImpact>>, ApiError> {
    let summary = refresh(&state).await?;
    Ok(Json(aggregate(&summary.analyses)))
}

async fn analyze_articles(
    State(state): State<AppState>,
    Json(articles): Json<Vec<Article>>,
) -> Json<DashboardSummary> {
    Json(build_with(&state.analyzer, &articles))
}

/// Accepts a full `DashboardSummary`; only `analyses` is read.
#[derive(Deserialize)]
struct AggregateReq {
    #[serde(default)]
    analyses: Vec<ArticleAnalysis>,
}

async fn aggregate_analyses(Json(body): Json<AggregateReq>) -> Json<Vec<AggregatedImpact>> {
    Json(aggregate(&body.analyses))
}
