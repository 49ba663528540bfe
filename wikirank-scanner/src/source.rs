use crate::error::{Result, ScanError};
use crate::page::PageId;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Yields the in-text article links of a page.
///
/// Implementations never fail: a page that cannot be fetched or parsed has no
/// links. Duplicates are collapsed and order of first appearance is kept.
pub trait LinkExtractor {
    fn links(&self, page: &PageId) -> impl Future<Output = Vec<PageId>> + Send;
}

/// Decides whether a page's text contains every keyword.
///
/// Implementations never fail: an unreachable page does not match.
pub trait ContentMatcher {
    fn matches_all(
        &self,
        page: &PageId,
        keywords: &[String],
    ) -> impl Future<Output = bool> + Send;
}

impl<T: LinkExtractor> LinkExtractor for Arc<T> {
    fn links(&self, page: &PageId) -> impl Future<Output = Vec<PageId>> + Send {
        (**self).links(page)
    }
}

impl<T: ContentMatcher> ContentMatcher for Arc<T> {
    fn matches_all(
        &self,
        page: &PageId,
        keywords: &[String],
    ) -> impl Future<Output = bool> + Send {
        (**self).matches_all(page, keywords)
    }
}

/// Shared HTTP plumbing for the wiki collaborators.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ScanError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let client = Client::builder()
            .user_agent("wikirank/0.1 (https://github.com/trapdoorsec/wikirank)")
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Rendered article URL, e.g. `https://en.wikipedia.org/wiki/Tennis`.
    pub fn article_url(&self, page: &PageId) -> Result<Url> {
        self.base_url
            .join(page.raw())
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", page, e)))
    }

    /// Raw wikitext URL, e.g. `.../w/index.php?title=Tennis&action=raw`.
    pub fn raw_text_url(&self, page: &PageId) -> Result<Url> {
        let mut url = self
            .base_url
            .join("/w/index.php")
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", page, e)))?;
        url.query_pairs_mut()
            .append_pair("title", page.title())
            .append_pair("action", "raw");
        Ok(url)
    }

    pub async fn fetch_text(&self, url: Url) -> Result<String> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
