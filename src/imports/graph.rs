//! Import graph recorded during expansion.
//!
//! Uses petgraph to keep "who imports whom", so tooling can show where a
//! fragment file is pulled in from.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A node of the import graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportSource {
    /// The root text handed to the loader without a file path.
    Inline,
    /// A file on disk.
    File(PathBuf),
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportSource::Inline => write!(f, "<inline>"),
            ImportSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One resolved directive: `from` imports `to` on `line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdge {
    pub from: ImportSource,
    pub to: PathBuf,
    pub line: usize,
}

/// Directed graph of resolved imports.
#[derive(Debug, Default)]
pub struct ImportGraph {
    graph: DiGraph<ImportSource, usize>,
    index: HashMap<ImportSource, NodeIndex>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning the existing one if already present.
    pub fn add_source(&mut self, source: ImportSource) -> NodeIndex {
        if let Some(&idx) = self.index.get(&source) {
            return idx;
        }
        let idx = self.graph.add_node(source.clone());
        self.index.insert(source, idx);
        idx
    }

    /// Record that `from` imports the file `to` on `line`.
    pub fn add_import(&mut self, from: ImportSource, to: &Path, line: usize) {
        let from = self.add_source(from);
        let to = self.add_source(ImportSource::File(to.to_path_buf()));
        self.graph.add_edge(from, to, line);
    }

    pub fn source_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn import_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Files directly imported by `source`, in directive order.
    pub fn imports_of(&self, source: &ImportSource) -> Vec<&Path> {
        let mut found = self.neighbors(source, Direction::Outgoing);
        found.sort_by_key(|(line, _)| *line);
        found
            .into_iter()
            .filter_map(|(_, node)| match node {
                ImportSource::File(path) => Some(path.as_path()),
                ImportSource::Inline => None,
            })
            .collect()
    }

    /// Sources that import `path` directly.
    pub fn importers_of(&self, path: &Path) -> Vec<&ImportSource> {
        let source = ImportSource::File(path.to_path_buf());
        self.neighbors(&source, Direction::Incoming)
            .into_iter()
            .map(|(_, node)| node)
            .collect()
    }

    /// Every edge, in insertion order.
    pub fn edges(&self) -> Vec<ImportEdge> {
        self.graph
            .edge_references()
            .filter_map(|edge| {
                let from = self.graph[edge.source()].clone();
                match &self.graph[edge.target()] {
                    ImportSource::File(to) => Some(ImportEdge {
                        from,
                        to: to.clone(),
                        line: *edge.weight(),
                    }),
                    ImportSource::Inline => None,
                }
            })
            .collect()
    }

    fn neighbors(&self, source: &ImportSource, dir: Direction) -> Vec<(usize, &ImportSource)> {
        let Some(&idx) = self.index.get(source) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, dir)
            .map(|edge| {
                let other = match dir {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (*edge.weight(), &self.graph[other])
            })
            .collect()
    }
}
