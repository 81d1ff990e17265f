// src/analyze/text.rs
//! Tokenizing and phrase matching shared by mention and cue detection.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_US: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bu\.s\.(?:a\.)?").expect("static regex"));
static RE_UK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bu\.k\.").expect("static regex"));
static RE_SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?;]+(?:\s+|$)|\n+").expect("static regex"));

/// Alphanumeric lower-case tokens.
pub(crate) fn tokenize(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Split into sentences. Dotted country abbreviations are folded first so
/// "U.S. dollar" stays in one piece; decimals ("0.25") never split.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let folded = RE_US.replace_all(text, "USA");
    let folded = RE_UK.replace_all(&folded, "UK");
    RE_SENTENCE
        .split(&folded)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A phrase match over `[start, end)` token positions; `id` is the caller's
/// index into its phrase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
    pub id: usize,
}

impl Span {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn shadows(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end && self.len() > other.len()
    }
}

/// Every occurrence of every phrase, minus matches strictly inside a longer
/// match ("australian dollar" hides the bare "dollar"). Sorted by position.
pub(crate) fn find_spans(tokens: &[String], phrases: &[(Vec<String>, usize)]) -> Vec<Span> {
    let mut found = Vec::new();
    for (phrase, id) in phrases {
        if phrase.is_empty() || phrase.len() > tokens.len() {
            continue;
        }
        for start in 0..=tokens.len() - phrase.len() {
            let window = &tokens[start..start + phrase.len()];
            if window.iter().zip(phrase).all(|(t, p)| t == p) {
                found.push(Span {
                    start,
                    end: start + phrase.len(),
                    id: *id,
                });
            }
        }
    }

    let mut kept: Vec<Span> = found
        .iter()
        .filter(|s| !found.iter().any(|o| o.shadows(s)))
        .copied()
        .collect();
    kept.sort();
    kept.dedup();
    kept
}

/// Negator within the 1..=3 tokens before `start`.
pub(crate) fn is_negated(tokens: &[String], start: usize) -> bool {
    (1..=3).any(|k| start >= k && is_negator(tokens[start - k].as_str()))
}

// Contractions are split by the tokenizer ("isn't" → "isn", "t").
fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "without"
            | "isn"
            | "wasn"
            | "aren"
            | "didn"
            | "doesn"
            | "don"
            | "unlikely"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(list: &[(&str, usize)]) -> Vec<(Vec<String>, usize)> {
        list.iter().map(|(p, id)| (tokenize(p), *id)).collect()
    }

    #[test]
    fn sentences_keep_abbreviations_and_decimals() {
        let s = split_sentences("U.S. dollar gains 0.5% on data. Yen slides! What next?");
        assert_eq!(s, vec!["USA dollar gains 0.5% on data", "Yen slides", "What next"]);
    }

    #[test]
    fn longer_match_shadows_contained_one() {
        let toks = tokenize("The Australian dollar rallies while the dollar slips");
        let spans = find_spans(&toks, &phrases(&[("dollar", 0), ("australian dollar", 1)]));
        assert_eq!(
            spans,
            vec![
                Span { start: 1, end: 3, id: 1 },
                Span { start: 6, end: 7, id: 0 },
            ]
        );
    }

    #[test]
    fn negation_window_is_three_tokens() {
        let toks = tokenize("the bank did not signal any further rate hike");
        // "rate" sits at index 7; "not" at 3 is out of reach.
        assert!(!is_negated(&toks, 7));
        let toks = tokenize("there is no rate hike");
        assert!(is_negated(&toks, 3));
        let toks = tokenize("the ECB isn't cutting");
        assert!(is_negated(&toks, 4));
    }
}
