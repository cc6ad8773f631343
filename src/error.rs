//! Error types for the loader pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Everything that can abort a loader invocation.
///
/// Unresolvable import targets are not errors: the expander skips them.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The flattened document is not valid GraphQL.
    #[error("GraphQL parse error:\n{message}")]
    Parse { message: String },

    /// A file imports itself, directly or through other files.
    #[error("cyclic import of {}: {}", path.display(), format_chain(chain))]
    CyclicImport { path: PathBuf, chain: Vec<PathBuf> },

    /// Import nesting went past the configured limit.
    #[error("import depth limit of {limit} exceeded at {}", path.display())]
    ImportDepthExceeded { path: PathBuf, limit: usize },

    /// A fragment spread names a fragment that is not defined anywhere.
    #[error("operation `{operation}` spreads unknown fragment `{fragment}`")]
    DanglingFragmentReference { operation: String, fragment: String },

    /// A fragment spreads itself, directly or through other fragments.
    #[error("operation `{operation}` has cyclic fragments: {}", chain.join(" -> "))]
    CyclicFragment { operation: String, chain: Vec<String> },

    /// An operation without a name cannot be exported.
    #[error("anonymous {kind} cannot be exported; give the operation a name")]
    AnonymousOperation { kind: String },
}

impl LoaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
