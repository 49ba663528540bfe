//! wikirank core - turns a crawled edge list into a ranked link graph.
//!
//! The crawl itself lives in `wikirank-scanner`; this crate loads its output
//! into a [`graph::Graph`], ranks it with [`rank::PageRankEngine`] and
//! renders the results.

use colored::Colorize;

pub mod crawl;
pub mod error;
pub mod graph;
pub mod query;
pub mod rank;
pub mod report;

pub use error::RankError;
pub use graph::Graph;
pub use query::{Metric, RankedPage};
pub use rank::PageRankEngine;
pub use report::{RankOptions, RankReport, ReportFormat, execute_rank};

pub fn print_banner() {
    println!(
        "{}",
        r#"
          _ _    _                 _
__      _(_) | _(_)_ __ __ _ _ __ | | __
\ \ /\ / / | |/ / | '__/ _` | '_ \| |/ /
 \ V  V /| |   <| | | | (_| | | | |   <
  \_/\_/ |_|_|\_\_|_|  \__,_|_| |_|_|\_\
"#
        .bright_cyan()
        .bold()
    );
    println!(
        "  {} {}\n",
        "keyword-bounded crawls, ranked".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
