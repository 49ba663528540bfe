use crate::error::{Result, ScanError};
use crate::page::PageId;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Directed link `from -> to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: PageId,
    pub to: PageId,
}

impl Edge {
    pub fn new(from: PageId, to: PageId) -> Self {
        Self { from, to }
    }
}

/// Ordered edges produced by a crawl, plus the header written above them.
///
/// On disk the first line is the header (the crawl's vertex budget) and every
/// following line is one `from to` pair in emission order. Readers skip the
/// header; its value is informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeList {
    pub header: usize,
    pub edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new(header: usize) -> Self {
        Self {
            header,
            edges: Vec::new(),
        }
    }

    pub fn push(&mut self, from: PageId, to: PageId) {
        self.edges.push(Edge::new(from, to));
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Writes the persisted format. An id containing whitespace could not be
    /// read back, so it fails the write with `InvalidData`.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", self.header)?;
        for edge in &self.edges {
            if let Some(page) = [&edge.from, &edge.to]
                .into_iter()
                .find(|p| !p.is_single_token())
            {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "page id {:?} cannot be written as an edge-list token",
                        page.raw()
                    ),
                ));
            }
            writeln!(writer, "{} {}", edge.from, edge.to)?;
        }
        writer.flush()
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let io_err = |source| ScanError::EdgeListIo {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        self.write(BufWriter::new(file)).map_err(io_err)
    }

    /// Parses the persisted format. Each edge line is lower-cased and split on
    /// a single space; anything other than two non-empty tokens is rejected.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?.trim().parse().unwrap_or(0),
            None => return Ok(Self::default()),
        };

        let mut list = Self::new(header);
        for (idx, line) in lines.enumerate() {
            let line = line?.to_lowercase();
            let mut tokens = line.split(' ');
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(from), Some(to), None) if !from.is_empty() && !to.is_empty() => {
                    list.push(PageId::new(from), PageId::new(to));
                }
                _ => {
                    return Err(ScanError::MalformedLine {
                        // header is line 1
                        line: idx + 2,
                        content: line,
                    });
                }
            }
        }
        Ok(list)
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| ScanError::EdgeListIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(BufReader::new(file))
    }
}
