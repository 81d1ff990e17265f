// src/article.rs
//! Article normalizer: raw feed item → immutable `Article`.

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    OffsetDateTime, UtcOffset,
};

pub const TITLE_MAX_CHARS: usize = 300;
pub const CONTENT_MAX_CHARS: usize = 1500;
pub const UNTITLED: &str = "(untitled)";

/// Unvalidated fields as they come out of a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    /// Unique identifier of the article.
    pub link: String,
    pub source_name: String,
    /// RFC 3339 (UTC) when the feed carried a parseable date.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

impl Article {
    /// Returns `None` only when the item has no usable link.
    pub fn from_raw(raw: RawArticle, source_name: &str) -> Option<Article> {
        let link = raw.link.as_deref().map(str::trim).unwrap_or_default();
        if link.is_empty() {
            return None;
        }

        let mut title = normalize_text(raw.title.as_deref().unwrap_or_default(), TITLE_MAX_CHARS);
        if title.is_empty() {
            title = UNTITLED.to_string();
        }

        Some(Article {
            title,
            link: link.to_string(),
            source_name: source_name.trim().to_string(),
            published_at: raw.pub_date.as_deref().and_then(parse_published_at),
            content: normalize_text(
                raw.content.as_deref().unwrap_or_default(),
                CONTENT_MAX_CHARS,
            ),
        })
    }

    /// Title and content joined for scoring.
    pub fn text(&self) -> String {
        if self.content.is_empty() {
            self.title.clone()
        } else {
            format!("{}. {}", self.title, self.content)
        }
    }
}

/// Accepts RSS-style RFC 2822 or RFC 3339 and re-emits RFC 3339 in UTC.
pub fn parse_published_at(ts: &str) -> Option<String> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }
    let dt = OffsetDateTime::parse(ts, &Rfc2822)
        .or_else(|_| OffsetDateTime::parse(ts, &Rfc3339))
        .ok()?;
    dt.to_offset(UtcOffset::UTC).format(&Rfc3339).ok()
}

/// Decode entities, strip tags, fold smart quotes, collapse whitespace, cap length.
pub fn normalize_text(s: &str, max_chars: usize) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").expect("static regex"));
    out = re_tags.replace_all(&out, " ").to_string();

    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > max_chars {
        out = out.chars().take(max_chars).collect::<String>().trim_end().to_string();
    }
    out
}
