use crate::edge_list::EdgeList;
use crate::error::{Result, ScanError};
use crate::page::PageId;
use crate::source::{ContentMatcher, LinkExtractor};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Called once per expanded page with the counters as they stood before it.
pub type ProgressCallback = Arc<dyn Fn(&CrawlStats, &PageId) + Send + Sync>;

/// Fixed-interval politeness pause between page requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    pub every: usize,
    pub pause: Duration,
}

impl Default for Throttle {
    fn default() -> Self {
        Self {
            every: 200,
            pause: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: PageId,
    pub keywords: Vec<String>,
    /// Vertex budget: the most keyword-matching pages ever admitted.
    pub max_pages: usize,
    pub output: PathBuf,
}

impl CrawlConfig {
    fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(ScanError::InvalidConfig(
                "vertex budget must be at least 1".to_string(),
            ));
        }
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ScanError::InvalidConfig(
                "at least one keyword is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages_admitted: usize,
    pub pages_rejected: usize,
    pub pages_requested: usize,
    pub queued: usize,
    pub edges: usize,
}

/// Bounded breadth-first crawler.
///
/// Only pages that contain every keyword are ever queued. Once `max_pages`
/// pages have been admitted no unseen page is fetched again, but the queue
/// keeps draining so links between already admitted pages are still recorded.
/// The resulting graph therefore never points at a page that was not crawled.
pub struct GraphCrawler<L, C> {
    seed: PageId,
    keywords: Vec<String>,
    max_pages: usize,
    output: PathBuf,
    link_extractor: L,
    content_matcher: C,
    throttle: Throttle,
    progress_callback: Option<ProgressCallback>,

    frontier: VecDeque<PageId>,
    visited_useful: HashSet<PageId>,
    visited_useless: HashSet<PageId>,
    edges: EdgeList,
    num_crawled: usize,
    pages_requested: usize,
    seeded: bool,
}

impl<L: LinkExtractor, C: ContentMatcher> GraphCrawler<L, C> {
    pub fn new(config: CrawlConfig, link_extractor: L, content_matcher: C) -> Result<Self> {
        config.validate()?;
        let keywords = config
            .keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Ok(Self {
            seed: config.seed,
            keywords,
            max_pages: config.max_pages,
            output: config.output,
            link_extractor,
            content_matcher,
            throttle: Throttle::default(),
            progress_callback: None,
            frontier: VecDeque::new(),
            visited_useful: HashSet::new(),
            visited_useless: HashSet::new(),
            edges: EdgeList::new(config.max_pages),
            num_crawled: 0,
            pages_requested: 0,
            seeded: false,
        })
    }

    /// Replaces the default pause schedule. `every` must be at least 1.
    pub fn with_throttle(mut self, throttle: Throttle) -> Result<Self> {
        if throttle.every == 0 {
            return Err(ScanError::InvalidConfig(
                "throttle interval must be at least 1 request".to_string(),
            ));
        }
        self.throttle = throttle;
        Ok(self)
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Runs the crawl until the frontier drains, then writes the edge list
    /// to the configured output.
    pub async fn crawl(&mut self) -> Result<CrawlStats> {
        info!(
            "Starting crawl from {} (budget {} pages, keywords {:?})",
            self.seed, self.max_pages, self.keywords
        );

        while self.crawl_next().await {}

        self.edges.write_to_file(&self.output)?;

        let stats = self.stats();
        info!(
            "Crawl complete. Admitted {} pages, wrote {} edges to {}",
            stats.pages_admitted,
            stats.edges,
            self.output.display()
        );
        Ok(stats)
    }

    /// Expands exactly one frontier page. Returns whether work remains.
    ///
    /// The first call also classifies the seed.
    pub async fn crawl_next(&mut self) -> bool {
        self.seed_frontier().await;

        let Some(from_page) = self.frontier.pop_front() else {
            return false;
        };

        if let Some(ref callback) = self.progress_callback {
            callback(&self.stats(), &from_page);
        }

        self.before_request().await;
        let links = self.link_extractor.links(&from_page).await;
        debug!("Expanding {} ({} candidate links)", from_page, links.len());

        for link in links {
            if link == from_page {
                continue;
            }

            if self.visited_useful.contains(&link) {
                self.edges.push(from_page.clone(), link);
            } else if self.visited_useless.contains(&link) {
                trace!("  -> {} known irrelevant", link);
            } else if self.num_crawled < self.max_pages {
                self.before_request().await;
                if self.content_matcher.matches_all(&link, &self.keywords).await {
                    debug!("  -> {} admitted ({}/{})", link, self.num_crawled + 1, self.max_pages);
                    self.frontier.push_back(link.clone());
                    self.visited_useful.insert(link.clone());
                    self.edges.push(from_page.clone(), link);
                    self.num_crawled += 1;
                } else {
                    trace!("  -> {} rejected", link);
                    self.visited_useless.insert(link);
                }
            } else {
                trace!("  -> {} ignored, budget spent", link);
            }
        }

        !self.frontier.is_empty()
    }

    async fn seed_frontier(&mut self) {
        if self.seeded {
            return;
        }
        self.seeded = true;

        let seed = self.seed.clone();
        self.before_request().await;
        if self.content_matcher.matches_all(&seed, &self.keywords).await {
            self.frontier.push_back(seed.clone());
            self.num_crawled += 1;
        } else {
            info!("Seed {} does not contain all keywords; nothing to expand", seed);
        }
        // Known even when it does not match, so links back to it become edges.
        self.visited_useful.insert(seed);
    }

    async fn before_request(&mut self) {
        if self.pages_requested > 0 && self.pages_requested % self.throttle.every == 0 {
            info!(
                "{} pages requested, pausing {:?}",
                self.pages_requested, self.throttle.pause
            );
            tokio::time::sleep(self.throttle.pause).await;
        }
        self.pages_requested += 1;
    }

    pub fn stats(&self) -> CrawlStats {
        CrawlStats {
            pages_admitted: self.num_crawled,
            pages_rejected: self.visited_useless.len(),
            pages_requested: self.pages_requested,
            queued: self.frontier.len(),
            edges: self.edges.len(),
        }
    }

    pub fn edges(&self) -> &EdgeList {
        &self.edges
    }

    pub fn num_crawled(&self) -> usize {
        self.num_crawled
    }

    pub fn is_useful(&self, page: &PageId) -> bool {
        self.visited_useful.contains(page)
    }

    pub fn is_useless(&self, page: &PageId) -> bool {
        self.visited_useless.contains(page)
    }
}
