pub mod content;
pub mod crawler;
pub mod edge_list;
pub mod error;
pub mod links;
pub mod page;
pub mod source;

pub use content::WikiContentMatcher;
pub use crawler::{CrawlConfig, CrawlStats, GraphCrawler, ProgressCallback, Throttle};
pub use edge_list::{Edge, EdgeList};
pub use error::ScanError;
pub use links::WikiLinkExtractor;
pub use page::PageId;
pub use source::{ContentMatcher, HttpSource, LinkExtractor};
