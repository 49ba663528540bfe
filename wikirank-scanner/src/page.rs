use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

const ARTICLE_PREFIX: &str = "/wiki/";

/// Identifier of an article page, e.g. `/wiki/Graph_theory`.
///
/// Equality, hashing and ordering use the lower-cased key only, so two ids
/// that differ by case are the same vertex. The spelling first seen is kept
/// for fetching, since the remote site is case-sensitive past the first letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PageId {
    key: String,
    raw: String,
}

impl PageId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        Self {
            key: canonicalize(raw),
            raw: raw.to_string(),
        }
    }

    /// Builds a seed id from whatever a user typed: a full article URL, a
    /// relative `/wiki/...` path, or a bare title such as `Graph theory`.
    /// Whitespace inside the title becomes `_`, as the site spells it.
    pub fn from_seed(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ScanError::InvalidUrl("seed page is empty".to_string()));
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw)
                .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", raw, e)))?;
            let path = url.path();
            if !path.starts_with(ARTICLE_PREFIX) || path.len() == ARTICLE_PREFIX.len() {
                return Err(ScanError::InvalidUrl(format!(
                    "{} is not an article URL",
                    raw
                )));
            }
            return Ok(Self::new(path));
        }

        let title = raw.strip_prefix(ARTICLE_PREFIX).unwrap_or(raw).trim();
        if title.is_empty() {
            return Err(ScanError::InvalidUrl(format!("{} has no article title", raw)));
        }

        Ok(Self::new(format!(
            "{}{}",
            ARTICLE_PREFIX,
            title.replace(char::is_whitespace, "_")
        )))
    }

    /// Whether the id can be written as one token of an edge-list line.
    pub fn is_single_token(&self) -> bool {
        !self.raw.is_empty() && !self.raw.contains(char::is_whitespace)
    }

    /// Canonical (lower-cased) key.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Spelling as discovered, used when requesting the page.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Article title without the `/wiki/` prefix, in its discovered spelling.
    pub fn title(&self) -> &str {
        self.raw.strip_prefix(ARTICLE_PREFIX).unwrap_or(&self.raw)
    }
}

/// Case-folds a raw page path into its map/set key.
pub fn canonicalize(raw: &str) -> String {
    raw.to_lowercase()
}

impl PartialEq for PageId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PageId {}

impl Hash for PageId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for PageId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PageId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl From<PageId> for String {
    fn from(page: PageId) -> Self {
        page.raw
    }
}

impl From<&str> for PageId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PageId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
