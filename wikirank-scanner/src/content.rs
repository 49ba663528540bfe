use crate::page::PageId;
use crate::source::{ContentMatcher, HttpSource};
use tracing::{debug, warn};

/// Checks keywords against a page's raw wikitext.
///
/// Matching is case-insensitive substring containment, scoped to a single
/// line: the page matches when some line contains every keyword once
/// punctuation has been replaced with whitespace.
#[derive(Debug, Clone)]
pub struct WikiContentMatcher {
    source: HttpSource,
}

impl WikiContentMatcher {
    pub fn new(source: HttpSource) -> Self {
        Self { source }
    }
}

impl ContentMatcher for WikiContentMatcher {
    async fn matches_all(&self, page: &PageId, keywords: &[String]) -> bool {
        let url = match self.source.raw_text_url(page) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping content of {}: {}", page, e);
                return false;
            }
        };

        match self.source.fetch_text(url).await {
            Ok(text) => {
                let matched = text_matches_all(&text, keywords);
                debug!("{} matches keywords: {}", page, matched);
                matched
            }
            Err(e) => {
                warn!("Content fetch failed for {}: {}", page, e);
                false
            }
        }
    }
}

pub fn text_matches_all(text: &str, keywords: &[String]) -> bool {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    text.lines()
        .map(normalize_line)
        .any(|line| keywords.iter().all(|k| line.contains(k.as_str())))
}

fn normalize_line(line: &str) -> String {
    line.chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}
