// src/analyze/mod.rs
//! Impact analyzer: article text → per-currency impact assessments.
//!
//! Order per sentence:
//! 1) Pair tickers (`EUR/USD`) are lifted out; base gets the sentence sign, quote the inverse.
//!    When only the quote is also named plainly, the base takes the inverse instead.
//! 2) Economy mentions from the keyword table (longest phrase wins).
//! 3) Cue phrases summed, each flipped when a negator sits within three tokens before it.
//! 4) The cue sum is credited to every economy touched by the sentence.
//!
//! Scores are then clamped to [-1, 1] and mapped onto direction and confidence.
//! The analyzer never fails: text without mentions yields no impacts.

pub mod cues;
pub mod economies;
pub(crate) mod text;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::article::Article;
use crate::impact::{round2, ArticleAnalysis, Confidence, CurrencyImpact, Direction};

pub use crate::analyze::cues::{Cue, CueSet};
pub use crate::analyze::economies::{Economy, ECONOMIES};

use text::{find_spans, is_negated, split_sentences, tokenize};

pub const NO_IMPACT_SUMMARY: &str = "No clear currency impact detected.";
pub const NO_CUE_REASON: &str = "mentioned without directional cue";

/// |score| at or beyond this is directional.
pub const DIRECTION_THRESHOLD: f64 = 0.15;
pub const HIGH_CONFIDENCE_SCORE: f64 = 0.6;
pub const MEDIUM_CONFIDENCE_SCORE: f64 = 0.3;

static RE_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z]{3})/([A-Za-z]{3})\b").expect("static regex"));

pub(crate) static DEFAULT_ANALYZER: Lazy<ImpactAnalyzer> = Lazy::new(ImpactAnalyzer::default);

/// Analyzer output for a single article.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub summary: String,
    pub impacts: Vec<CurrencyImpact>,
}

/// Analyze with the built-in economy and cue tables.
pub fn analyze(article: &Article) -> Analysis {
    DEFAULT_ANALYZER.analyze(article)
}

#[derive(Debug, Clone)]
pub struct ImpactAnalyzer {
    economies: Vec<Economy>,
    cues: Vec<Cue>,
    economy_phrases: Vec<(Vec<String>, usize)>,
    cue_phrases: Vec<(Vec<String>, usize)>,
}

impl Default for ImpactAnalyzer {
    fn default() -> Self {
        Self::new(ECONOMIES.to_vec(), CueSet::default_seed())
    }
}

#[derive(Debug, Default)]
struct Acc {
    score: f64,
    cue_hits: usize,
    reasons: Vec<String>,
}

impl Acc {
    fn reason(&mut self, r: String) {
        if !self.reasons.contains(&r) {
            self.reasons.push(r);
        }
    }
}

struct Hit {
    weight: f64,
    reason: String,
}

impl ImpactAnalyzer {
    pub fn new(economies: Vec<Economy>, cues: CueSet) -> Self {
        let economy_phrases = economies
            .iter()
            .enumerate()
            .flat_map(|(i, e)| e.keywords.iter().map(move |k| (tokenize(k), i)))
            .collect();
        let cue_phrases = cues
            .cues
            .iter()
            .enumerate()
            .map(|(i, c)| (tokenize(&c.phrase), i))
            .collect();
        Self {
            economies,
            cues: cues.cues,
            economy_phrases,
            cue_phrases,
        }
    }

    /// Built-in economies with the cue table from `$IMPACT_CUES_PATH` (or the seed).
    pub fn from_env() -> Self {
        Self::new(ECONOMIES.to_vec(), CueSet::load_default())
    }

    pub fn analyze(&self, article: &Article) -> Analysis {
        let mut accs: BTreeMap<usize, Acc> = BTreeMap::new();

        for sentence in split_sentences(&article.text()) {
            self.score_sentence(&sentence, &mut accs);
        }

        let mut impacts: Vec<CurrencyImpact> = accs
            .into_iter()
            .map(|(idx, acc)| self.finalize(&self.economies[idx], acc))
            .collect();
        impacts.sort_by(|a, b| b.score.abs().total_cmp(&a.score.abs()));

        Analysis {
            summary: summarize(&impacts),
            impacts,
        }
    }

    /// Convenience for the summary builder.
    pub fn analyze_article(&self, article: &Article) -> ArticleAnalysis {
        let Analysis { summary, impacts } = self.analyze(article);
        ArticleAnalysis {
            article: article.clone(),
            summary,
            impacts,
        }
    }

    fn score_sentence(&self, sentence: &str, accs: &mut BTreeMap<usize, Acc>) {
        // (1) pair tickers with both sides in the table: (base, quote, ticker)
        let pairs: Vec<(usize, usize, String)> = RE_PAIR
            .captures_iter(sentence)
            .filter_map(|caps| {
                let base = self.economy_by_currency(&caps[1])?;
                let quote = self.economy_by_currency(&caps[2])?;
                let ticker = format!("{}/{}", caps[1].to_uppercase(), caps[2].to_uppercase());
                Some((base, quote, ticker))
            })
            .collect();
        let stripped = if pairs.is_empty() {
            sentence.to_string()
        } else {
            RE_PAIR
                .replace_all(sentence, |caps: &regex::Captures| {
                    let known = self.economy_by_currency(&caps[1]).is_some()
                        && self.economy_by_currency(&caps[2]).is_some();
                    if known {
                        " ".to_string()
                    } else {
                        caps[0].to_string()
                    }
                })
                .to_string()
        };

        let tokens = tokenize(&stripped);

        // (2) plain mentions take the sentence sign and override pair sides
        let mut touched: Vec<(usize, f64, Option<String>)> = Vec::new();
        for span in find_spans(&tokens, &self.economy_phrases) {
            if !touched.iter().any(|(i, _, _)| *i == span.id) {
                touched.push((span.id, 1.0, None));
            }
        }
        let plain: Vec<usize> = touched.iter().map(|(i, _, _)| *i).collect();
        for (base, quote, ticker) in pairs {
            // a plainly named quote carries the sentence; the base moves against it
            let base_sign = if plain.contains(&quote) && !plain.contains(&base) {
                -1.0
            } else {
                1.0
            };
            for (i, sign, side) in [(base, base_sign, "base"), (quote, -1.0, "quote")] {
                if !touched.iter().any(|(j, _, _)| *j == i) {
                    touched.push((i, sign, Some(format!("pair: {ticker} ({side} currency)"))));
                }
            }
        }
        if touched.is_empty() {
            return;
        }

        // (3) cues
        let hits: Vec<Hit> = find_spans(&tokens, &self.cue_phrases)
            .into_iter()
            .map(|span| {
                let cue = &self.cues[span.id];
                let negated = is_negated(&tokens, span.start);
                Hit {
                    weight: if negated { -cue.weight } else { cue.weight },
                    reason: if negated {
                        format!("{}: {} (negated)", cue.label, cue.phrase)
                    } else {
                        format!("{}: {}", cue.label, cue.phrase)
                    },
                }
            })
            .collect();
        let sum: f64 = hits.iter().map(|h| h.weight).sum();

        // (4) credit
        for (idx, sign, pair_reason) in touched {
            let acc = accs.entry(idx).or_default();
            acc.score += sign * sum;
            acc.cue_hits += hits.len();
            if let Some(r) = pair_reason {
                if !hits.is_empty() {
                    acc.reason(r);
                }
            }
            for h in &hits {
                acc.reason(h.reason.clone());
            }
        }
    }

    fn economy_by_currency(&self, code: &str) -> Option<usize> {
        self.economies
            .iter()
            .position(|e| e.currency.eq_ignore_ascii_case(code))
    }

    fn finalize(&self, economy: &Economy, mut acc: Acc) -> CurrencyImpact {
        let score = round2(acc.score.clamp(-1.0, 1.0));
        if acc.cue_hits == 0 {
            acc.reasons = vec![NO_CUE_REASON.to_string()];
        }
        CurrencyImpact {
            economy_id: economy.id.to_string(),
            economy_name: economy.name.to_string(),
            currency: economy.currency.to_string(),
            direction: direction_for(score),
            confidence: confidence_for(score, acc.cue_hits),
            score,
            supporting_reasons: acc.reasons,
            major_pairs: economy.major_pairs.iter().map(|p| p.to_string()).collect(),
        }
    }
}

fn direction_for(score: f64) -> Direction {
    if score >= DIRECTION_THRESHOLD {
        Direction::Bullish
    } else if score <= -DIRECTION_THRESHOLD {
        Direction::Bearish
    } else {
        Direction::Neutral
    }
}

fn confidence_for(score: f64, cue_hits: usize) -> Confidence {
    let mag = score.abs();
    if mag >= HIGH_CONFIDENCE_SCORE && cue_hits >= 2 {
        Confidence::High
    } else if mag >= MEDIUM_CONFIDENCE_SCORE {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// "Bullish USD (medium); bearish JPY (low)" for the three strongest impacts.
fn summarize(impacts: &[CurrencyImpact]) -> String {
    if impacts.is_empty() {
        return NO_IMPACT_SUMMARY.to_string();
    }
    let joined = impacts
        .iter()
        .take(3)
        .map(|i| format!("{} {} ({})", i.direction, i.currency, i.confidence))
        .collect::<Vec<_>>()
        .join("; ");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, content: &str) -> Article {
        Article {
            title: title.into(),
            link: "https://example.com/a".into(),
            source_name: "Test".into(),
            published_at: None,
            content: content.into(),
        }
    }

    fn impact<'a>(a: &'a Analysis, ccy: &str) -> &'a CurrencyImpact {
        a.impacts
            .iter()
            .find(|i| i.currency == ccy)
            .unwrap_or_else(|| panic!("no {ccy} impact in {:?}", a.impacts))
    }

    #[test]
    fn hawkish_fed_is_bullish_usd() {
        let a = analyze(&article(
            "Fed signals rate hike as inflation rises",
            "Powell struck a hawkish tone.",
        ));
        let usd = impact(&a, "USD");
        assert_eq!(usd.direction, Direction::Bullish);
        assert_eq!(usd.confidence, Confidence::High);
        assert!(usd.score > 0.6 && usd.score <= 1.0);
        assert_eq!(
            usd.supporting_reasons,
            vec![
                "hawkish: rate hike".to_string(),
                "strong data: inflation rises".to_string(),
                "hawkish: hawkish".to_string(),
            ]
        );
        assert!(usd.major_pairs.contains(&"EUR/USD".to_string()));
        assert!(a.summary.starts_with("Bullish USD (high)"));
    }

    #[test]
    fn dovish_boj_is_bearish_jpy() {
        let a = analyze(&article("Bank of Japan signals rate cut", ""));
        let jpy = impact(&a, "JPY");
        assert_eq!(jpy.direction, Direction::Bearish);
        assert_eq!(jpy.score, -0.5);
        assert_eq!(jpy.confidence, Confidence::Medium);
        assert_eq!(jpy.economy_id, "japan");
    }

    #[test]
    fn negation_flips_the_cue() {
        let a = analyze(&article("ECB says no rate hike this year", ""));
        let eur = impact(&a, "EUR");
        assert_eq!(eur.direction, Direction::Bearish);
        assert_eq!(eur.score, -0.5);
        assert_eq!(eur.supporting_reasons, vec!["hawkish: rate hike (negated)"]);
    }

    #[test]
    fn pair_quote_side_is_inverted() {
        let a = analyze(&article("EUR/USD surges after data", ""));
        let eur = impact(&a, "EUR");
        let usd = impact(&a, "USD");
        assert_eq!(eur.score, 0.25);
        assert_eq!(usd.score, -0.25);
        assert_eq!(usd.direction, Direction::Bearish);
        assert!(usd
            .supporting_reasons
            .contains(&"pair: EUR/USD (quote currency)".to_string()));
    }

    #[test]
    fn plain_mention_beats_pair_side() {
        let a = analyze(&article("EUR/USD rallies as the dollar gains", ""));
        // dollar is mentioned directly, so USD takes the sentence sign
        assert!(impact(&a, "USD").score > 0.0);
        assert!(impact(&a, "EUR").score < 0.0);
    }

    #[test]
    fn base_moves_against_a_plainly_named_quote() {
        let a = analyze(&article("USD/JPY rises as yen weakens", ""));
        let jpy = impact(&a, "JPY");
        let usd = impact(&a, "USD");
        assert_eq!(jpy.score, -0.2);
        assert_eq!(jpy.direction, Direction::Bearish);
        assert_eq!(usd.score, 0.2);
        assert_eq!(usd.direction, Direction::Bullish);
        assert!(usd
            .supporting_reasons
            .contains(&"pair: USD/JPY (base currency)".to_string()));
        assert!(!jpy.supporting_reasons.iter().any(|r| r.starts_with("pair:")));
    }

    #[test]
    fn base_named_plainly_keeps_quote_inverse() {
        let a = analyze(&article("EUR/GBP slides as euro weakens", ""));
        assert_eq!(impact(&a, "EUR").score, -0.4);
        assert_eq!(impact(&a, "GBP").score, 0.4);
    }

    #[test]
    fn mention_without_cue_is_neutral_low() {
        let a = analyze(&article("Swiss National Bank publishes annual report", ""));
        let chf = impact(&a, "CHF");
        assert_eq!(chf.direction, Direction::Neutral);
        assert_eq!(chf.confidence, Confidence::Low);
        assert_eq!(chf.score, 0.0);
        assert_eq!(chf.supporting_reasons, vec![NO_CUE_REASON]);
    }

    #[test]
    fn cues_only_credit_economies_in_same_sentence() {
        let a = analyze(&article(
            "Canada retail sales steady. Yen plunges on intervention doubts",
            "",
        ));
        assert_eq!(impact(&a, "CAD").score, 0.0);
        assert_eq!(impact(&a, "JPY").score, -0.3);
    }

    #[test]
    fn australian_dollar_is_not_usd() {
        let a = analyze(&article("Australian dollar climbs", ""));
        assert!(a.impacts.iter().all(|i| i.currency != "USD"));
        assert_eq!(impact(&a, "AUD").score, 0.15);
        assert_eq!(impact(&a, "AUD").direction, Direction::Bullish);
    }

    #[test]
    fn no_mentions_yields_placeholder() {
        let a = analyze(&article("Oil prices edge higher", "Brent crude surges"));
        assert!(a.impacts.is_empty());
        assert_eq!(a.summary, NO_IMPACT_SUMMARY);
    }

    #[test]
    fn empty_article_never_fails() {
        let a = analyze(&article("", ""));
        assert!(a.impacts.is_empty());
        assert_eq!(a.summary, NO_IMPACT_SUMMARY);
    }

    #[test]
    fn scores_are_clamped() {
        let a = analyze(&article(
            "Fed rate hike, hawkish, tightening, higher for longer, strong, robust, surges",
            "",
        ));
        assert_eq!(impact(&a, "USD").score, 1.0);
    }

    #[test]
    fn impacts_sorted_by_magnitude() {
        let a = analyze(&article(
            "Yen slides. Bank of England raises rates and warns of recession risk",
            "",
        ));
        let mags: Vec<f64> = a.impacts.iter().map(|i| i.score.abs()).collect();
        let mut sorted = mags.clone();
        sorted.sort_by(|x, y| y.total_cmp(x));
        assert_eq!(mags, sorted);
    }

    #[test]
    fn analyzer_is_deterministic() {
        let art = article("ECB cuts rates; euro slides", "Lagarde dovish");
        assert_eq!(analyze(&art), analyze(&art));
    }
}
