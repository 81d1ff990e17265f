//! # Impact Aggregator
//! Pure rollup of a dashboard's per-article impacts into one row per currency.
//! No I/O and no state across calls, so it can run on either side of the wire.
//!
//! Policy: confidence-weighted samples (high=3, medium=2, low=1) are averaged;
//! direction is the strictly dominant bucket, else the averaged score decides.

use std::collections::BTreeMap;

use crate::impact::{round2, AggregatedImpact, ArticleAnalysis, CurrencyImpact, Direction};

/// |averageScore| beyond this decides direction when buckets tie.
pub const TIE_BREAK_THRESHOLD: f64 = 0.3;

#[derive(Debug)]
struct Acc {
    economy_id: String,
    economy_name: String,
    major_pairs: Vec<String>,
    samples: Vec<f64>,
    articles: usize,
    last_article: Option<usize>,
    bullish: usize,
    bearish: usize,
    neutral: usize,
}

impl Acc {
    fn first(impact: &CurrencyImpact) -> Self {
        Self {
            economy_id: impact.economy_id.clone(),
            economy_name: impact.economy_name.clone(),
            major_pairs: impact.major_pairs.clone(),
            samples: Vec::new(),
            articles: 0,
            last_article: None,
            bullish: 0,
            bearish: 0,
            neutral: 0,
        }
    }

    /// `article` is the index of the analysis the impact came from.
    fn push(&mut self, article: usize, impact: &CurrencyImpact) {
        if self.last_article != Some(article) {
            self.last_article = Some(article);
            self.articles += 1;
        }
        self.samples.push(impact.score * impact.confidence.weight());
        match impact.direction {
            Direction::Bullish => self.bullish += 1,
            Direction::Bearish => self.bearish += 1,
            Direction::Neutral => self.neutral += 1,
        }
    }

    fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        round2(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }
}

/// Group every impact by currency and rank by |averageScore|, largest first.
/// `articleCount` counts analyses, so a currency repeated inside one analysis
/// adds samples but counts once.
pub fn aggregate(analyses: &[ArticleAnalysis]) -> Vec<AggregatedImpact> {
    let mut by_currency: BTreeMap<&str, Acc> = BTreeMap::new();

    for (n, impact) in analyses
        .iter()
        .enumerate()
        .flat_map(|(n, a)| a.impacts.iter().map(move |i| (n, i)))
    {
        by_currency
            .entry(impact.currency.as_str())
            .or_insert_with(|| Acc::first(impact))
            .push(n, impact);
    }

    let mut out: Vec<AggregatedImpact> = by_currency
        .into_iter()
        .map(|(currency, acc)| {
            let average_score = acc.average();
            AggregatedImpact {
                currency: currency.to_string(),
                direction: resolve_direction(acc.bullish, acc.bearish, acc.neutral, average_score),
                article_count: acc.articles,
                average_score,
                bullish: acc.bullish,
                bearish: acc.bearish,
                neutral: acc.neutral,
                economy_id: acc.economy_id,
                economy_name: acc.economy_name,
                major_pairs: acc.major_pairs,
            }
        })
        .collect();

    // stable: equal magnitudes stay in currency-code order
    out.sort_by(|a, b| b.average_score.abs().total_cmp(&a.average_score.abs()));
    out
}

/// Strictly dominant bucket wins. When the two largest counts tie (three-way
/// ties included) the averaged score decides.
pub fn resolve_direction(
    bullish: usize,
    bearish: usize,
    neutral: usize,
    average_score: f64,
) -> Direction {
    let mut buckets = [
        (bullish, Direction::Bullish),
        (bearish, Direction::Bearish),
        (neutral, Direction::Neutral),
    ];
    buckets.sort_by(|a, b| b.0.cmp(&a.0));

    if buckets[0].0 > buckets[1].0 {
        return buckets[0].1;
    }
    if average_score > TIE_BREAK_THRESHOLD {
        Direction::Bullish
    } else if average_score < -TIE_BREAK_THRESHOLD {
        Direction::Bearish
    } else {
        Direction::Neutral
    }
}
