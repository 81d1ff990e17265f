// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregate;
pub mod analyze;
pub mod api;
pub mod article;
pub mod impact;
pub mod ingest;
pub mod summary;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::aggregate;
pub use crate::analyze::{analyze, Analysis, ImpactAnalyzer};
pub use crate::api::{router, AppState};
pub use crate::article::{Article, RawArticle};
pub use crate::impact::{
    AggregatedImpact, ArticleAnalysis, Confidence, CurrencyImpact, DashboardSummary, Direction,
};
pub use crate::summary::build;
