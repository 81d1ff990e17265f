//! Shared shapes for per-article analyses and the dashboard payload.
//!
//! Everything here serializes as camelCase JSON, enums as lowercase strings,
//! so the dashboard front-end can consume it without a mapping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::article::Article;

/// Directional call for a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
    Neutral,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Bullish => "bullish",
            Direction::Bearish => "bearish",
            Direction::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How sure the analyzer is about a single impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Multiplier applied to a raw score before averaging.
    pub fn weight(self) -> f64 {
        match self {
            Confidence::High => 3.0,
            Confidence::Medium => 2.0,
            Confidence::Low => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated effect of one article on one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyImpact {
    pub economy_id: String,
    pub economy_name: String,
    pub currency: String,
    pub direction: Direction,
    pub confidence: Confidence,
    /// Signed score in [-1.0, 1.0].
    pub score: f64,
    #[serde(default)]
    pub supporting_reasons: Vec<String>,
    #[serde(default)]
    pub major_pairs: Vec<String>,
}

/// An article paired with its analyzer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAnalysis {
    pub article: Article,
    pub summary: String,
    #[serde(default)]
    pub impacts: Vec<CurrencyImpact>,
}

/// Full dashboard payload; rebuilt from scratch on each refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub analyses: Vec<ArticleAnalysis>,
}

/// Per-currency rollup across all analyses of a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedImpact {
    pub currency: String,
    pub economy_id: String,
    pub economy_name: String,
    pub average_score: f64,
    pub direction: Direction,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    pub article_count: usize,
    pub major_pairs: Vec<String>,
}

/// Round to two decimal places (half away from zero).
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn confidence_weights_are_3_2_1() {
        assert_eq!(Confidence::High.weight(), 3.0);
        assert_eq!(Confidence::Medium.weight(), 2.0);
        assert_eq!(Confidence::Low.weight(), 1.0);
    }

    #[test]
    fn impact_serializes_camel_case_with_lowercase_enums() {
        let imp = CurrencyImpact {
            economy_id: "japan".into(),
            economy_name: "Japan".into(),
            currency: "JPY".into(),
            direction: Direction::Bearish,
            confidence: Confidence::Medium,
            score: -0.35,
            supporting_reasons: vec!["dovish: rate cut".into()],
            major_pairs: vec!["USD/JPY".into()],
        };
        let v = serde_json::to_value(&imp).unwrap();
        assert_eq!(v["economyId"], json!("japan"));
        assert_eq!(v["direction"], json!("bearish"));
        assert_eq!(v["confidence"], json!("medium"));
        assert_eq!(v["majorPairs"], json!(["USD/JPY"]));
        assert_eq!(v["supportingReasons"][0], json!("dovish: rate cut"));
    }

    #[test]
    fn round2_behaves() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.333), -0.33);
        assert_eq!(round2(0.0), 0.0);
    }
}
