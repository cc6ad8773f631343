//! Recursive import expansion.
//!
//! Walks inclusion directives depth-first and returns the Flattened Text
//! Set: the root text first, then every imported file's content in
//! declaration order, deduplicated by exact text.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::directive;
use super::graph::{ImportGraph, ImportSource};
use super::resolver::resolve;
use crate::config::LoaderOptions;
use crate::context::BuildContext;
use crate::error::{LoaderError, Result};

/// Result of expanding one root document.
#[derive(Debug)]
pub struct Expansion {
    /// Ordered, textually unique contents, root first.
    pub contents: Vec<String>,
    /// Resolved imports, for reporting.
    pub graph: ImportGraph,
}

impl Expansion {
    /// The text handed to the GraphQL parser.
    pub fn joined(&self) -> String {
        self.contents.join("\n")
    }
}

/// Expand `text`, resolving its imports relative to `base_dir`.
pub fn expand<C: BuildContext + ?Sized>(
    base_dir: &Path,
    text: &str,
    options: &LoaderOptions,
    ctx: &mut C,
) -> Result<Vec<String>> {
    expand_with_graph(base_dir, text, options, ctx).map(|expansion| expansion.contents)
}

/// Like [`expand`], also returning the import graph.
pub fn expand_with_graph<C: BuildContext + ?Sized>(
    base_dir: &Path,
    text: &str,
    options: &LoaderOptions,
    ctx: &mut C,
) -> Result<Expansion> {
    let mut expander = Expander::new(options, ctx);
    expander.visit(ImportSource::Inline, base_dir, text, 0)?;
    Ok(expander.finish())
}

/// Read `path` and expand it. The root file itself is on the active chain,
/// so a file importing its importer is reported as a cycle.
pub fn expand_file<C: BuildContext + ?Sized>(
    path: &Path,
    options: &LoaderOptions,
    ctx: &mut C,
) -> Result<Expansion> {
    let text = fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))?;
    let path = canonical(path.to_path_buf());
    let base_dir = parent_dir(&path);

    let mut expander = Expander::new(options, ctx);
    expander.visited.insert(path.clone());
    expander.chain.push(path.clone());
    expander.visit(ImportSource::File(path), &base_dir, &text, 0)?;
    Ok(expander.finish())
}

struct Expander<'a, C: BuildContext + ?Sized> {
    options: &'a LoaderOptions,
    ctx: &'a mut C,
    /// Files currently being expanded, outermost first.
    chain: Vec<PathBuf>,
    /// Files already expanded; their content is in `contents`.
    visited: HashSet<PathBuf>,
    graph: ImportGraph,
    contents: Vec<String>,
}

impl<'a, C: BuildContext + ?Sized> Expander<'a, C> {
    fn new(options: &'a LoaderOptions, ctx: &'a mut C) -> Self {
        Self {
            options,
            ctx,
            chain: Vec::new(),
            visited: HashSet::new(),
            graph: ImportGraph::new(),
            contents: Vec::new(),
        }
    }

    fn visit(
        &mut self,
        source: ImportSource,
        base_dir: &Path,
        text: &str,
        depth: usize,
    ) -> Result<()> {
        self.graph.add_source(source.clone());
        self.contents.push(text.to_string());

        for found in directive::scan(text) {
            let Some(resolved) = resolve(base_dir, &found.path, &self.options.extensions) else {
                debug!(
                    import = %found.path,
                    from = %source,
                    line = found.line,
                    "import not found, skipping"
                );
                continue;
            };
            let path = canonical(resolved);

            if self.chain.contains(&path) {
                let mut chain = self.chain.clone();
                chain.push(path.clone());
                return Err(LoaderError::CyclicImport { path, chain });
            }

            self.graph.add_import(source.clone(), &path, found.line);
            if !self.visited.insert(path.clone()) {
                trace!(path = %path.display(), "already expanded");
                continue;
            }

            if depth + 1 > self.options.max_import_depth {
                return Err(LoaderError::ImportDepthExceeded {
                    path,
                    limit: self.options.max_import_depth,
                });
            }

            self.ctx.register_dependency(&path);
            let content = fs::read_to_string(&path).map_err(|e| LoaderError::io(&path, e))?;
            debug!(path = %path.display(), depth = depth + 1, "expanding import");

            self.chain.push(path.clone());
            let dir = parent_dir(&path);
            self.visit(ImportSource::File(path), &dir, &content, depth + 1)?;
            self.chain.pop();
        }

        Ok(())
    }

    fn finish(self) -> Expansion {
        Expansion {
            contents: dedup(self.contents),
            graph: self.graph,
        }
    }
}

/// Keep the first occurrence of every distinct text.
fn dedup(contents: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    contents
        .into_iter()
        .filter(|content| seen.insert(content.clone()))
        .collect()
}

fn canonical(path: PathBuf) -> PathBuf {
    fs::canonicalize(&path).unwrap_or(path)
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
