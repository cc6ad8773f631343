//! Directory builder: compiles every GraphQL document under a root.
//!
//! Walks the tree respecting .gitignore, runs the loader on each
//! `.graphql`/`.gql` file in parallel and writes the generated module next
//! to it.

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::LoaderOptions;
use crate::context::DependencyRecorder;
use crate::error::{LoaderError, Result};
use crate::loader::compile_file;

/// Extensions treated as GraphQL documents when walking a tree.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["graphql", "gql"];

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Module written to `output`.
    Written {
        output: PathBuf,
        operations: usize,
        dependencies: Vec<PathBuf>,
    },
    /// No operations (e.g. a fragment-only file); nothing written.
    Skipped,
    Failed(LoaderError),
}

/// Per-file results of a directory build, sorted by path.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl BuildReport {
    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Written { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &LoaderError)> {
        self.files.iter().filter_map(|(path, outcome)| match outcome {
            FileOutcome::Failed(err) => Some((path.as_path(), err)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|(_, o)| pred(o)).count()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found {} documents (written: {}, skipped: {}, failed: {})",
            self.files.len(),
            self.written(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Is `path` a GraphQL document by extension?
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// All GraphQL documents under `root`, sorted.
pub fn find_documents(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| is_document(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Compile every document under `root`, writing `<file>.<out_ext>` beside each.
pub fn build_dir(root: &Path, options: &LoaderOptions, out_ext: &str) -> BuildReport {
    let files = find_documents(root);
    info!(root = %root.display(), documents = files.len(), "building");

    let mut outcomes: Vec<(PathBuf, FileOutcome)> = files
        .par_iter()
        .map(|path| {
            let outcome = match build_file(path, options, out_ext) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "build failed");
                    FileOutcome::Failed(err)
                }
            };
            (path.clone(), outcome)
        })
        .collect();
    outcomes.sort_by(|a, b| a.0.cmp(&b.0));

    BuildReport { files: outcomes }
}

fn build_file(path: &Path, options: &LoaderOptions, out_ext: &str) -> Result<FileOutcome> {
    let mut ctx = DependencyRecorder::new();
    let compilation = compile_file(path, &mut ctx, options)?;
    if compilation.plan.operations.is_empty() {
        return Ok(FileOutcome::Skipped);
    }

    let output = output_path(path, out_ext);
    fs::write(&output, compilation.render()).map_err(|e| LoaderError::io(&output, e))?;
    Ok(FileOutcome::Written {
        output,
        operations: compilation.plan.operations.len(),
        dependencies: ctx.dependencies().to_vec(),
    })
}

/// `queries/user.graphql` + `js` -> `queries/user.graphql.js`.
pub fn output_path(path: &Path, out_ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(out_ext.trim_start_matches('.'));
    PathBuf::from(name)
}
