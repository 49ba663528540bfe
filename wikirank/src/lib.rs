// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{expand_path, load_seed, parse_format, parse_keywords};

// Re-export orchestration from wikirank-core
pub use wikirank_core::crawl::{CrawlOptions, CrawlSummary, execute_crawl, generate_crawl_summary};
pub use wikirank_core::{RankOptions, execute_rank};
