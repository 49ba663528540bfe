use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;
use wikirank_core::crawl::{CrawlOptions, execute_crawl, generate_crawl_summary};
use wikirank_core::{RankOptions, ReportFormat, execute_rank};
use wikirank_scanner::PageId;

// Helper functions for the command handlers

/// Split keyword arguments on commas, lower-case them and drop duplicates
/// while keeping their order. A quoted phrase stays one keyword, with runs of
/// inner whitespace collapsed to a single space.
pub fn parse_keywords<S: AsRef<str>>(values: &[S]) -> Result<Vec<String>, String> {
    let mut keywords: Vec<String> = Vec::new();
    for value in values {
        for word in value
            .as_ref()
            .split(',')
            .map(|w| w.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
            .filter(|w| !w.is_empty())
        {
            if !keywords.contains(&word) {
                keywords.push(word);
            }
        }
    }

    if keywords.is_empty() {
        return Err("At least one keyword must be provided".to_string());
    }
    Ok(keywords)
}

/// Expand a leading `~` to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Turn a user-supplied seed into an article id
pub fn load_seed(raw: &str) -> Result<PageId, String> {
    PageId::from_seed(raw).map_err(|e| format!("Invalid seed page: {}", e))
}

pub fn parse_format(raw: &str) -> Result<ReportFormat, String> {
    ReportFormat::from_str(raw).ok_or_else(|| format!("Unknown report format '{}'", raw))
}

/// Build crawl options from `crawl` subcommand arguments
pub fn crawl_options_from_args(args: &ArgMatches, quiet: bool) -> Result<CrawlOptions, String> {
    let seed = load_seed(args.get_one::<String>("seed").unwrap())?;
    let raw_keywords: Vec<&String> = args
        .get_many::<String>("keywords")
        .map(|values| values.collect())
        .unwrap_or_default();
    let keywords = parse_keywords(&raw_keywords)?;
    let max_pages = *args.get_one::<usize>("max-pages").unwrap_or(&100);
    if max_pages == 0 {
        return Err("--max-pages must be at least 1".to_string());
    }
    let output = expand_path(args.get_one::<String>("output").unwrap());

    let mut options = CrawlOptions::new(seed, keywords, max_pages, output);
    if let Some(base_url) = args.get_one::<String>("base-url") {
        options.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        options.timeout_secs = *timeout;
    }
    options.show_progress_bars = !quiet;
    Ok(options)
}

/// Build rank options from `rank` subcommand arguments
pub fn rank_options_from_args(args: &ArgMatches) -> Result<RankOptions, String> {
    let mut options = RankOptions::new(expand_path(args.get_one::<String>("input").unwrap()));
    if let Some(eps) = args.get_one::<f64>("eps") {
        options.eps = *eps;
    }
    if let Some(top) = args.get_one::<usize>("top") {
        options.top = *top;
    }
    if let Some(format) = args.get_one::<String>("format") {
        options.format = parse_format(format)?;
    }
    options.output = args.get_one::<String>("output").map(|p| expand_path(p));
    Ok(options)
}

pub async fn handle_crawl(sub_matches: &ArgMatches, quiet: bool) {
    let options = match crawl_options_from_args(sub_matches, quiet) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };
    debug!("Crawl options: base {}, timeout {}s", options.base_url, options.timeout_secs);

    if !quiet {
        println!(
            "\n{} Crawling from {}",
            "→".blue().bold(),
            options.seed.to_string().bright_white()
        );
        println!("Keywords: {}", options.keywords.join(", ").cyan());
        println!("Max pages: {}", options.max_pages);
        println!("Output: {}\n", options.output.display());
    }

    let summary = match execute_crawl(options).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{} Crawl failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    if !quiet {
        println!("\n{} Crawl complete!\n", "✓".green().bold());
        print!("{}", generate_crawl_summary(&summary));
    }
}

pub fn handle_rank(sub_matches: &ArgMatches, quiet: bool) {
    let options = match rank_options_from_args(sub_matches) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let (report, rendered) = match execute_rank(&options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{} Ranking failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    match options.output {
        Some(ref path) => {
            if !quiet {
                println!(
                    "{} Ranked {} pages in {} iterations",
                    "✓".green().bold(),
                    report.summary.vertices,
                    report.summary.iterations
                );
                println!(
                    "{} Report saved to: {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => print!("{}", rendered),
    }
}
