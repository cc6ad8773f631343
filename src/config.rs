//! Loader options, loadable from `gqlimport.toml`.
//!
//! ```toml
//! extensions = [".gql", ".graphql"]
//! string = false
//! debug = false
//! url = "/graphql"
//! request = "gqlimport/request"
//! max_import_depth = 64
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{LoaderError, Result};

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "gqlimport.toml";

/// Options recognised by the loader. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Fallback suffixes tried, in order, when an import path does not exist as written.
    pub extensions: Vec<String>,
    /// Emit raw document text instead of callables.
    pub string: bool,
    /// Embed each operation's fragment closure in the generated module.
    pub debug: bool,
    /// Endpoint passed to the request transport.
    pub url: String,
    /// Module specifier of the request transport used by generated callables.
    ///
    /// Not shipped with this crate. The module must export a function
    /// `(url, data, options)` where `data` is `{ operationName, query, variables }`;
    /// generated callables return whatever it returns. Unused in `string` mode.
    pub request: String,
    /// Maximum import nesting before expansion is aborted.
    pub max_import_depth: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            extensions: vec![".gql".to_string(), ".graphql".to_string()],
            string: false,
            debug: false,
            url: "/graphql".to_string(),
            request: "gqlimport/request".to_string(),
            max_import_depth: 64,
        }
    }
}

impl LoaderOptions {
    /// Load options from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(LoaderError::io(path, e)),
        };
        Self::from_toml(&content)
            .map_err(|e| LoaderError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse options from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
