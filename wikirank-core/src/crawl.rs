use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use wikirank_scanner::source::DEFAULT_BASE_URL;
use wikirank_scanner::{
    CrawlConfig, CrawlStats, GraphCrawler, HttpSource, PageId, ProgressCallback,
    WikiContentMatcher, WikiLinkExtractor,
};

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub seed: PageId,
    pub keywords: Vec<String>,
    pub max_pages: usize,
    pub output: PathBuf,
    pub base_url: String,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl CrawlOptions {
    pub fn new(seed: PageId, keywords: Vec<String>, max_pages: usize, output: PathBuf) -> Self {
        Self {
            seed,
            keywords,
            max_pages,
            output,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: wikirank_scanner::source::DEFAULT_TIMEOUT_SECS,
            show_progress_bars: false,
        }
    }
}

/// What a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub seed: PageId,
    pub output: PathBuf,
    pub stats: CrawlStats,
}

/// Execute a crawl against the live site and write its edge list.
pub async fn execute_crawl(options: CrawlOptions) -> Result<CrawlSummary> {
    let CrawlOptions {
        seed,
        keywords,
        max_pages,
        output,
        base_url,
        timeout_secs,
        show_progress_bars,
    } = options;

    let source = HttpSource::with_timeout(&base_url, timeout_secs)?;
    let config = CrawlConfig {
        seed: seed.clone(),
        keywords,
        max_pages,
        output: output.clone(),
    };

    let mut crawler = GraphCrawler::new(
        config,
        WikiLinkExtractor::new(source.clone()),
        WikiContentMatcher::new(source),
    )?;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Starting crawl...");
        let pb = Arc::new(pb);

        let pb_clone = pb.clone();
        let callback: ProgressCallback = Arc::new(move |stats: &CrawlStats, page: &PageId| {
            pb_clone.set_message(format!(
                "{}/{} pages admitted, {} queued, {} edges | {}",
                stats.pages_admitted, max_pages, stats.queued, stats.edges, page
            ));
            pb_clone.tick();
        });
        crawler = crawler.with_progress_callback(callback);
        Some(pb)
    } else {
        None
    };

    let result = crawler.crawl().await;

    if let Some(ref pb) = progress_bar {
        match result {
            Ok(ref stats) => pb.finish_with_message(format!(
                "Crawl complete! {} pages admitted, {} edges",
                stats.pages_admitted, stats.edges
            )),
            Err(_) => pb.abandon_with_message("Crawl failed"),
        }
    }

    Ok(CrawlSummary {
        seed,
        output,
        stats: result?,
    })
}

/// Generate a short human-readable summary of a finished crawl
pub fn generate_crawl_summary(summary: &CrawlSummary) -> String {
    let stats = &summary.stats;
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Seed page: {}\n", summary.seed));
    report.push_str(&format!("  Pages admitted: {}\n", stats.pages_admitted));
    report.push_str(&format!("  Pages rejected: {}\n", stats.pages_rejected));
    report.push_str(&format!("  Page requests: {}\n", stats.pages_requested));
    report.push_str(&format!("  Edges written: {}\n", stats.edges));
    report.push_str(&format!("  Edge list: {}\n", summary.output.display()));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report
}
