// Directed link graph built from a crawl's edge list

use crate::error::Result;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::debug;
use wikirank_scanner::{EdgeList, PageId};

/// Forward and backward adjacency over a fixed edge list.
///
/// Parallel edges are kept in both directions, so a link listed twice counts
/// twice toward degrees and rank transfer. Vertices are stored in sorted
/// order, which makes every traversal over them deterministic.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<PageId>,
    index: HashMap<PageId, usize>,
    out_links: HashMap<PageId, Vec<PageId>>,
    in_links: HashMap<PageId, Vec<PageId>>,
    num_edges: usize,
}

impl Graph {
    pub fn from_edge_list(list: &EdgeList) -> Self {
        let mut out_links: HashMap<PageId, Vec<PageId>> = HashMap::new();
        let mut in_links: HashMap<PageId, Vec<PageId>> = HashMap::new();
        let mut vertex_set = BTreeSet::new();

        for edge in list.iter() {
            out_links
                .entry(edge.from.clone())
                .or_default()
                .push(edge.to.clone());
            in_links
                .entry(edge.to.clone())
                .or_default()
                .push(edge.from.clone());
            vertex_set.insert(edge.from.clone());
            vertex_set.insert(edge.to.clone());
        }

        let vertices: Vec<PageId> = vertex_set.into_iter().collect();
        let index = vertices
            .iter()
            .enumerate()
            .map(|(i, page)| (page.clone(), i))
            .collect();

        debug!(
            "Built graph with {} vertices and {} edges",
            vertices.len(),
            list.len()
        );

        Self {
            vertices,
            index,
            out_links,
            in_links,
            num_edges: list.len(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let list = EdgeList::read_from_file(path)?;
        Ok(Self::from_edge_list(&list))
    }

    /// All vertices, sorted by canonical id.
    pub fn vertices(&self) -> &[PageId] {
        &self.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn index_of(&self, page: &PageId) -> Option<usize> {
        self.index.get(page).copied()
    }

    pub fn contains(&self, page: &PageId) -> bool {
        self.index.contains_key(page)
    }

    pub fn out_links(&self, page: &PageId) -> &[PageId] {
        self.out_links.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn in_links(&self, page: &PageId) -> &[PageId] {
        self.in_links.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn out_degree(&self, page: &PageId) -> usize {
        self.out_links(page).len()
    }

    pub fn in_degree(&self, page: &PageId) -> usize {
        self.in_links(page).len()
    }

    /// Vertices with at least one outgoing edge.
    pub fn sources(&self) -> impl Iterator<Item = &PageId> {
        self.out_links.keys()
    }

    /// Vertices with at least one incoming edge.
    pub fn targets(&self) -> impl Iterator<Item = &PageId> {
        self.in_links.keys()
    }

    /// Out-neighbours of every vertex as vertex indices, duplicates kept.
    pub fn out_index_lists(&self) -> Vec<Vec<usize>> {
        self.vertices
            .iter()
            .map(|page| {
                self.out_links(page)
                    .iter()
                    .filter_map(|to| self.index_of(to))
                    .collect()
            })
            .collect()
    }
}
