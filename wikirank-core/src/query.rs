// Top-K queries over rank and degree

use crate::error::{RankError, Result};
use crate::rank::PageRankEngine;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use wikirank_scanner::PageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    PageRank,
    InDegree,
    OutDegree,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::PageRank, Metric::InDegree, Metric::OutDegree];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::PageRank => "pagerank",
            Metric::InDegree => "in_degree",
            Metric::OutDegree => "out_degree",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pagerank" | "page_rank" | "rank" => Ok(Metric::PageRank),
            "in_degree" | "indegree" | "in" => Ok(Metric::InDegree),
            "out_degree" | "outdegree" | "out" => Ok(Metric::OutDegree),
            _ => Err(RankError::UnknownName {
                kind: "metric",
                value: s.to_string(),
            }),
        }
    }
}

/// A vertex with its score under one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPage {
    pub page: PageId,
    pub score: f64,
}

impl PageRankEngine {
    /// Candidate vertices for a metric.
    ///
    /// PageRank ranks every vertex. In-degree ranks the vertices that have
    /// out-links and out-degree ranks the vertices that have in-links, which
    /// is how the ranking domains have always been defined for this format.
    pub fn candidates(&self, metric: Metric) -> Vec<&PageId> {
        let graph = self.graph();
        let mut candidates: Vec<&PageId> = match metric {
            Metric::PageRank => graph.vertices().iter().collect(),
            Metric::InDegree => graph.sources().collect(),
            Metric::OutDegree => graph.targets().collect(),
        };
        candidates.sort();
        candidates
    }

    pub fn score(&self, metric: Metric, page: &PageId) -> f64 {
        match metric {
            Metric::PageRank => self.rank(page).unwrap_or(0.0),
            Metric::InDegree => self.graph().in_degree(page) as f64,
            Metric::OutDegree => self.graph().out_degree(page) as f64,
        }
    }

    /// The `k` highest scoring candidates, best first. Order among equal
    /// scores is unspecified.
    pub fn top_k_scored(&self, metric: Metric, k: usize) -> Result<Vec<RankedPage>> {
        let candidates = self.candidates(metric);
        if k > candidates.len() {
            return Err(RankError::OutOfRange {
                requested: k,
                available: candidates.len(),
            });
        }

        let mut scored: Vec<RankedPage> = candidates
            .into_iter()
            .map(|page| RankedPage {
                score: self.score(metric, page),
                page: page.clone(),
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    pub fn top_k(&self, metric: Metric, k: usize) -> Result<Vec<PageId>> {
        Ok(self
            .top_k_scored(metric, k)?
            .into_iter()
            .map(|ranked| ranked.page)
            .collect())
    }
}
