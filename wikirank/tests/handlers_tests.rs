use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wikirank::handlers::*;
use wikirank::{RankOptions, execute_rank};
use wikirank_core::ReportFormat;

#[test]
fn test_parse_keywords_splits_and_lowercases() {
    let keywords = parse_keywords(&["Tennis,Racket", "  GRASS  court "]).unwrap();
    assert_eq!(keywords, vec!["tennis", "racket", "grass court"]);
}

#[test]
fn test_parse_keywords_keeps_phrases_whole() {
    assert_eq!(parse_keywords(&["grand slam"]).unwrap(), vec!["grand slam"]);
    assert_eq!(
        parse_keywords(&["Grand Slam, clay court"]).unwrap(),
        vec!["grand slam", "clay court"]
    );
}

#[test]
fn test_parse_keywords_drops_duplicates() {
    let keywords = parse_keywords(&["tennis", "Tennis", "ball, tennis"]).unwrap();
    assert_eq!(keywords, vec!["tennis", "ball"]);
}

#[test]
fn test_parse_keywords_empty() {
    let result = parse_keywords(&[" ", ",,"]);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("keyword"));

    let none: [&str; 0] = [];
    assert!(parse_keywords(&none).is_err());
}

#[test]
fn test_expand_path_plain() {
    assert_eq!(expand_path("out/graph.txt"), PathBuf::from("out/graph.txt"));
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path("~/graph.txt");
    assert!(!expanded.to_string_lossy().starts_with('~') || std::env::var("HOME").is_err());
    assert!(expanded.ends_with("graph.txt"));
}

#[test]
fn test_load_seed_forms() {
    let from_title = load_seed("Graph theory").unwrap();
    assert_eq!(from_title.raw(), "/wiki/Graph_theory");

    let from_path = load_seed("/wiki/PageRank").unwrap();
    assert_eq!(from_path.raw(), "/wiki/PageRank");

    let from_url = load_seed("https://en.wikipedia.org/wiki/Tennis").unwrap();
    assert_eq!(from_url.raw(), "/wiki/Tennis");
    assert_eq!(from_url.as_str(), "/wiki/tennis");
}

#[test]
fn test_load_seed_invalid() {
    let result = load_seed("   ");
    assert!(result.is_err());
    assert!(result.unwrap_err().starts_with("Invalid seed page"));

    assert!(load_seed("https://en.wikipedia.org/w/index.php").is_err());
}

#[test]
fn test_parse_format() {
    assert_eq!(parse_format("markdown").unwrap(), ReportFormat::Markdown);
    assert_eq!(parse_format("JSON").unwrap(), ReportFormat::Json);
    assert!(parse_format("html").unwrap_err().contains("html"));
}

#[test]
fn test_rank_to_file_from_parsed_arguments() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = dir.path().join("graph.txt");
    fs::write(&input, "3\n/wiki/Tennis /wiki/Racket\n/wiki/Racket /wiki/Tennis\n")?;
    let output = dir.path().join("report.md");

    let mut options = RankOptions::new(expand_path(input.to_str().unwrap()));
    options.format = parse_format("markdown")?;
    options.top = 2;
    options.output = Some(expand_path(output.to_str().unwrap()));

    let (report, rendered) = execute_rank(&options)?;

    assert_eq!(report.summary.vertices, 2);
    assert_eq!(fs::read_to_string(&output)?, rendered);
    assert!(rendered.contains("`/wiki/tennis`"));
    Ok(())
}

#[test]
fn test_rank_missing_input_reports_error() {
    let dir = TempDir::new().unwrap();
    let options = RankOptions::new(dir.path().join("absent.txt"));

    let err = execute_rank(&options).unwrap_err();
    assert!(err.to_string().contains("absent.txt"));
}
