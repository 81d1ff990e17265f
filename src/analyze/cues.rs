//! # Directional cues
//!
//! Phrases that push a currency up or down, each with a signed weight and a
//! short label used in the supporting reasons ("hawkish: rate hike").
//!
//! - Loads from JSON (`{"cues": [{"label", "phrase", "weight"}]}`).
//! - Falls back to the built-in `default_seed()` when the file is missing or invalid.
//! - Weights are clamped to [-1, 1]; empty phrases are dropped.

use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_CUES_PATH: &str = "config/impact_cues.json";
pub const ENV_CUES_PATH: &str = "IMPACT_CUES_PATH";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cue {
    pub label: String,
    pub phrase: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CueSet {
    #[serde(default)]
    pub cues: Vec<Cue>,
}

impl Default for CueSet {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl CueSet {
    /// Load from a JSON file; falls back to `default_seed()` on any error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|s| serde_json::from_str::<CueSet>(&s).map_err(anyhow::Error::from));
        match parsed {
            Ok(set) => set.cleaned(),
            Err(e) => {
                tracing::debug!(error = %e, path = %path.display(), "cue table not loaded, using seed");
                Self::default_seed()
            }
        }
    }

    /// `$IMPACT_CUES_PATH`, else `config/impact_cues.json`, else the seed.
    pub fn load_default() -> Self {
        let path = std::env::var(ENV_CUES_PATH).unwrap_or_else(|_| DEFAULT_CUES_PATH.to_string());
        Self::load_from_file(path)
    }

    fn cleaned(self) -> Self {
        let cues = self
            .cues
            .into_iter()
            .filter_map(|c| {
                let phrase = c.phrase.trim().to_lowercase();
                if phrase.is_empty() || !c.weight.is_finite() {
                    return None;
                }
                Some(Cue {
                    label: c.label.trim().to_string(),
                    phrase,
                    weight: c.weight.clamp(-1.0, 1.0),
                })
            })
            .collect();
        Self { cues }
    }

    /// Built-in seed covering policy tone, data surprises, and price action.
    pub fn default_seed() -> Self {
        let mut cues = Vec::new();
        for (label, list) in [
            (
                "hawkish",
                &[
                    ("rate hike", 0.5),
                    ("rate hikes", 0.5),
                    ("raises rates", 0.5),
                    ("raised rates", 0.5),
                    ("hikes rates", 0.5),
                    ("hiked rates", 0.5),
                    ("hawkish", 0.4),
                    ("tightening", 0.35),
                    ("higher for longer", 0.3),
                ][..],
            ),
            (
                "dovish",
                &[
                    ("rate cut", -0.5),
                    ("rate cuts", -0.5),
                    ("cuts rates", -0.5),
                    ("cut rates", -0.5),
                    ("lowers rates", -0.5),
                    ("dovish", -0.4),
                    ("easing", -0.35),
                    ("stimulus", -0.3),
                ][..],
            ),
            (
                "strong data",
                &[
                    ("beats expectations", 0.3),
                    ("better than expected", 0.3),
                    ("stronger than expected", 0.3),
                    ("hotter than expected", 0.3),
                    ("inflation rises", 0.25),
                    ("strong", 0.2),
                    ("robust", 0.2),
                ][..],
            ),
            (
                "weak data",
                &[
                    ("misses expectations", -0.3),
                    ("worse than expected", -0.3),
                    ("weaker than expected", -0.3),
                    ("unemployment rises", -0.25),
                    ("recession", -0.4),
                    ("contraction", -0.3),
                    ("slowdown", -0.25),
                    ("weak", -0.2),
                ][..],
            ),
            (
                "price action",
                &[
                    ("surges", 0.25),
                    ("rallies", 0.2),
                    ("jumps", 0.2),
                    ("strengthens", 0.2),
                    ("gains", 0.15),
                    ("climbs", 0.15),
                    ("plunges", -0.3),
                    ("slumps", -0.25),
                    ("tumbles", -0.25),
                    ("slides", -0.2),
                    ("weakens", -0.2),
                    ("falls", -0.15),
                    ("drops", -0.15),
                ][..],
            ),
        ] {
            for (phrase, weight) in list {
                cues.push(Cue {
                    label: label.to_string(),
                    phrase: phrase.to_string(),
                    weight: *weight,
                });
            }
        }
        Self { cues }
    }
}
