// Report generation from a ranked graph

use crate::error::Result;
use crate::query::{Metric, RankedPage};
use crate::rank::PageRankEngine;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSummary {
    pub vertices: usize,
    pub edges: usize,
    pub iterations: usize,
    pub eps: f64,
    pub rank_mass: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRanking {
    pub metric: Metric,
    pub entries: Vec<RankedPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
    pub source: String,
    pub summary: GraphSummary,
    pub rankings: Vec<MetricRanking>,
}

impl RankReport {
    /// Collects the top `top` vertices of every metric. Metrics with fewer
    /// candidates than `top` list all of them.
    pub fn build(engine: &PageRankEngine, source: &str, top: usize) -> Result<Self> {
        let mut rankings = Vec::new();
        for metric in Metric::ALL {
            let k = top.min(engine.candidates(metric).len());
            rankings.push(MetricRanking {
                metric,
                entries: engine.top_k_scored(metric, k)?,
            });
        }

        Ok(Self {
            source: source.to_string(),
            summary: GraphSummary {
                vertices: engine.num_vertices(),
                edges: engine.num_edges(),
                iterations: engine.num_iterations(),
                eps: engine.eps(),
                rank_mass: engine.rank_mass(),
            },
            rankings,
        })
    }

    pub fn ranking(&self, metric: Metric) -> Option<&MetricRanking> {
        self.rankings.iter().find(|r| r.metric == metric)
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        Ok(match format {
            ReportFormat::Text => generate_text_report(self),
            ReportFormat::Json => generate_json_report(self)?,
            ReportFormat::Csv => generate_csv_report(self),
            ReportFormat::Markdown => generate_markdown_report(self),
        })
    }
}

/// Options for ranking a stored edge list
#[derive(Debug, Clone)]
pub struct RankOptions {
    pub input: PathBuf,
    pub eps: f64,
    pub top: usize,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
}

impl RankOptions {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            eps: DEFAULT_EPSILON,
            top: DEFAULT_TOP,
            format: ReportFormat::Text,
            output: None,
        }
    }
}

pub const DEFAULT_EPSILON: f64 = 0.0001;
pub const DEFAULT_TOP: usize = 10;

/// Load the edge list, rank it and render the report. The rendered text is
/// also written to `output` when one is set.
pub fn execute_rank(options: &RankOptions) -> Result<(RankReport, String)> {
    let engine = PageRankEngine::from_path(&options.input, options.eps)?;
    let report = RankReport::build(&engine, &options.input.display().to_string(), options.top)?;
    let rendered = report.render(options.format)?;

    if let Some(ref path) = options.output {
        save_report(&rendered, path)?;
        info!("Report saved to {}", path.display());
    }

    Ok((report, rendered))
}

fn metric_title(metric: Metric) -> &'static str {
    match metric {
        Metric::PageRank => "PageRank",
        Metric::InDegree => "In-degree",
        Metric::OutDegree => "Out-degree",
    }
}

fn format_score(metric: Metric, score: f64) -> String {
    match metric {
        Metric::PageRank => format!("{:.6}", score),
        Metric::InDegree | Metric::OutDegree => format!("{}", score as usize),
    }
}

pub fn generate_text_report(data: &RankReport) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                          WIKIRANK GRAPH REPORT\n");
    report.push_str(RULE);
    report.push('\n');

    report.push_str(&format!("Source:       {}\n", data.source));
    report.push_str(&format!("Vertices:     {}\n", data.summary.vertices));
    report.push_str(&format!("Edges:        {}\n", data.summary.edges));
    report.push_str(&format!(
        "Iterations:   {} (eps {:e})\n",
        data.summary.iterations, data.summary.eps
    ));
    report.push_str(&format!("Rank mass:    {:.6}\n", data.summary.rank_mass));
    report.push('\n');

    for ranking in &data.rankings {
        report.push_str(RULE);
        report.push_str(&format!(
            "TOP {} BY {}\n",
            ranking.entries.len(),
            metric_title(ranking.metric).to_uppercase()
        ));
        report.push_str(RULE);
        report.push('\n');

        if ranking.entries.is_empty() {
            report.push_str("  (empty)\n\n");
            continue;
        }

        for (idx, entry) in ranking.entries.iter().enumerate() {
            report.push_str(&format!(
                "  {:>3}. {:>10}  {}\n",
                idx + 1,
                format_score(ranking.metric, entry.score),
                entry.page
            ));
        }
        report.push('\n');
    }

    report.push_str(RULE);
    report.push_str("\nGenerated by wikirank\n\n");

    report
}

pub fn generate_json_report(data: &RankReport) -> std::result::Result<String, serde_json::Error> {
    let rankings: serde_json::Map<String, serde_json::Value> = data
        .rankings
        .iter()
        .map(|r| (r.metric.as_str().to_string(), serde_json::json!(r.entries)))
        .collect();

    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "wikirank",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "source": data.source,
            "summary": data.summary,
            "rankings": rankings
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_csv_report(data: &RankReport) -> String {
    let mut report = String::from("metric,position,page,score\n");
    for ranking in &data.rankings {
        for (idx, entry) in ranking.entries.iter().enumerate() {
            report.push_str(&format!(
                "{},{},{},{}\n",
                ranking.metric,
                idx + 1,
                csv_field(&entry.page.to_string()),
                entry.score
            ));
        }
    }
    report
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn generate_markdown_report(data: &RankReport) -> String {
    let mut report = String::from("# wikirank graph report\n\n");

    report.push_str(&format!("- **Source:** `{}`\n", data.source));
    report.push_str(&format!("- **Vertices:** {}\n", data.summary.vertices));
    report.push_str(&format!("- **Edges:** {}\n", data.summary.edges));
    report.push_str(&format!(
        "- **Iterations:** {} (eps `{:e}`)\n",
        data.summary.iterations, data.summary.eps
    ));
    report.push_str(&format!("- **Rank mass:** {:.6}\n\n", data.summary.rank_mass));

    for ranking in &data.rankings {
        report.push_str(&format!("## {}\n\n", metric_title(ranking.metric)));
        if ranking.entries.is_empty() {
            report.push_str("_No candidates._\n\n");
            continue;
        }
        report.push_str("| # | Page | Score |\n|---|------|-------|\n");
        for (idx, entry) in ranking.entries.iter().enumerate() {
            report.push_str(&format!(
                "| {} | `{}` | {} |\n",
                idx + 1,
                entry.page,
                format_score(ranking.metric, entry.score)
            ));
        }
        report.push('\n');
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
