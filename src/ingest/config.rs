// src/ingest/config.rs
//! News source configuration.
//!
//! TOML shape (JSON uses the same object layout):
//! ```toml
//! max_items_per_source = 10
//! timeout_secs = 10
//!
//! [[sources]]
//! name = "FXStreet"
//! url = "https://www.fxstreet.com/rss/news"
//! ```
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_PATH: &str = "NEWS_SOURCES_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/news_sources.toml";
pub const DEFAULT_JSON_PATH: &str = "config/news_sources.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewsConfig {
    #[serde(default)]
    pub sources: Vec<FeedSource>,
    /// 0 disables the cap.
    #[serde(default = "default_max_items")]
    pub max_items_per_source: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_items() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl NewsConfig {
    /// Built-in forex desks used when no config file is present.
    pub fn default_seed() -> Self {
        let sources = [
            ("ForexLive", "https://www.forexlive.com/feed/news"),
            ("FXStreet", "https://www.fxstreet.com/rss/news"),
            ("Investing.com", "https://www.investing.com/rss/news_1.rss"),
        ]
        .into_iter()
        .map(|(name, url)| FeedSource {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect();
        Self {
            sources,
            max_items_per_source: default_max_items(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Load from an explicit path. Supports TOML or JSON.
pub fn load_sources_from(path: &Path) -> Result<NewsConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading news sources from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sources(&content, ext.as_str())
}

/// Load using env var + fallbacks:
/// 1) $NEWS_SOURCES_PATH
/// 2) config/news_sources.toml
/// 3) config/news_sources.json
/// 4) built-in seed
pub fn load_sources_default() -> Result<NewsConfig> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sources_from(&pb);
        }
        return Err(anyhow!("{ENV_PATH} points to non-existent path"));
    }
    let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
    if toml_p.exists() {
        return load_sources_from(&toml_p);
    }
    let json_p = PathBuf::from(DEFAULT_JSON_PATH);
    if json_p.exists() {
        return load_sources_from(&json_p);
    }
    Ok(NewsConfig::default_seed())
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<NewsConfig> {
    let parsed = if hint_ext == "json" {
        serde_json::from_str::<NewsConfig>(s)
            .map_err(anyhow::Error::from)
            .or_else(|_| toml::from_str::<NewsConfig>(s).map_err(anyhow::Error::from))
    } else {
        toml::from_str::<NewsConfig>(s)
            .map_err(anyhow::Error::from)
            .or_else(|_| serde_json::from_str::<NewsConfig>(s).map_err(anyhow::Error::from))
    };
    let cfg = parsed.map_err(|_| anyhow!("unsupported news sources format"))?;
    Ok(clean(cfg))
}

fn clean(mut cfg: NewsConfig) -> NewsConfig {
    let mut seen = HashSet::new();
    cfg.sources = cfg
        .sources
        .into_iter()
        .filter_map(|s| {
            let name = s.name.trim().to_string();
            let url = s.url.trim().to_string();
            if name.is_empty() || url.is_empty() || !seen.insert(name.to_ascii_lowercase()) {
                return None;
            }
            Some(FeedSource { name, url })
        })
        .collect();
    cfg
}
