//! The host build tool, as seen by the loader.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Capabilities the loader needs from the bundler invoking it.
pub trait BuildContext {
    /// Declare the generated output a pure function of its inputs.
    fn mark_cacheable(&mut self);

    /// Report a file the output depends on, so edits to it trigger a rebuild.
    fn register_dependency(&mut self, path: &Path);
}

/// A `BuildContext` that just remembers what it was told.
///
/// Used by the CLI and the directory builder, where there is no bundler.
#[derive(Debug, Default, Clone)]
pub struct DependencyRecorder {
    cacheable: bool,
    dependencies: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl DependencyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cacheable(&self) -> bool {
        self.cacheable
    }

    /// Registered dependencies, in registration order, without repeats.
    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }
}

impl BuildContext for DependencyRecorder {
    fn mark_cacheable(&mut self) {
        self.cacheable = true;
    }

    fn register_dependency(&mut self, path: &Path) {
        if self.seen.insert(path.to_path_buf()) {
            self.dependencies.push(path.to_path_buf());
        }
    }
}
