//! CLI module for gqlimport.
//!
//! Commands:
//! - Single file: compile, flatten, deps, operations
//! - Project: build

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{LoaderOptions, CONFIG_FILE_NAME};
use crate::error::Result;

#[derive(Parser)]
#[command(name = "gqlimport")]
#[command(about = "Resolve #import directives in GraphQL documents and generate request modules")]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Config file (default: <root>/gqlimport.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags overriding config file values.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct OptionOverrides {
    /// Export document text instead of request functions
    #[arg(long, overrides_with = "no_string")]
    pub string: bool,

    /// Export request functions even if the config sets `string`
    #[arg(long, overrides_with = "string")]
    pub no_string: bool,

    /// Embed each operation's fragment closure
    #[arg(long, overrides_with = "no_debug")]
    pub debug: bool,

    /// Leave debug data out even if the config sets `debug`
    #[arg(long, overrides_with = "debug")]
    pub no_debug: bool,

    /// Request endpoint
    #[arg(long)]
    pub url: Option<String>,

    /// Module specifier of the request transport
    #[arg(long)]
    pub request: Option<String>,

    /// Extension tried on extension-less imports (repeatable, in order)
    #[arg(long = "ext")]
    pub extensions: Vec<String>,
}

impl OptionOverrides {
    pub fn apply(&self, mut options: LoaderOptions) -> LoaderOptions {
        if self.string || self.no_string {
            options.string = self.string;
        }
        if self.debug || self.no_debug {
            options.debug = self.debug;
        }
        if let Some(url) = &self.url {
            options.url = url.clone();
        }
        if let Some(request) = &self.request {
            options.request = request.clone();
        }
        if !self.extensions.is_empty() {
            options.extensions = self.extensions.clone();
        }
        options
    }
}

#[derive(Subcommand)]
pub enum Commands {
    // ─── Single file ──────────────────────────────────────────────
    /// Generate the module for one document
    Compile {
        /// GraphQL document
        file: PathBuf,

        /// Write the module here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the module plan as JSON instead of JavaScript
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: OptionOverrides,
    },

    /// Print the document with all imports inlined
    Flatten {
        file: PathBuf,

        #[command(flatten)]
        overrides: OptionOverrides,
    },

    /// Show the import graph of a document
    Deps {
        file: PathBuf,

        #[command(flatten)]
        overrides: OptionOverrides,
    },

    /// List operations with their fragment closures (JSON)
    Operations {
        file: PathBuf,

        #[command(flatten)]
        overrides: OptionOverrides,
    },

    // ─── Project ──────────────────────────────────────────────────
    /// Compile every .graphql/.gql file under --root
    Build {
        /// Extension appended to each generated module
        #[arg(long, default_value = "js")]
        out_ext: String,

        #[command(flatten)]
        overrides: OptionOverrides,
    },
}

impl Commands {
    pub fn overrides(&self) -> &OptionOverrides {
        match self {
            Commands::Compile { overrides, .. }
            | Commands::Flatten { overrides, .. }
            | Commands::Deps { overrides, .. }
            | Commands::Operations { overrides, .. }
            | Commands::Build { overrides, .. } => overrides,
        }
    }
}

impl Cli {
    /// Config file values with command-line overrides applied.
    pub fn options(&self) -> Result<LoaderOptions> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| self.root.join(CONFIG_FILE_NAME));
        let options = LoaderOptions::load(&path)?;
        Ok(self.command.overrides().apply(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "gqlimport",
            "compile",
            "a.graphql",
            "--debug",
            "--url",
            "/api",
            "--ext",
            ".graphql",
        ]);
        let options = cli.command.overrides().apply(LoaderOptions::default());
        assert!(options.debug);
        assert!(!options.string);
        assert_eq!(options.url, "/api");
        assert_eq!(options.extensions, vec![".graphql"]);
        assert_eq!(options.request, "gqlimport/request");
    }

    #[test]
    fn test_global_root() {
        let cli = Cli::parse_from(["gqlimport", "build", "--root", "queries"]);
        assert_eq!(cli.root, PathBuf::from("queries"));
        assert!(matches!(cli.command, Commands::Build { .. }));
    }

    #[test]
    fn test_negated_flags_override_config() {
        let config = LoaderOptions {
            string: true,
            debug: true,
            ..LoaderOptions::default()
        };

        let cli = Cli::parse_from(["gqlimport", "compile", "a.graphql", "--no-debug"]);
        let options = cli.command.overrides().apply(config.clone());
        assert!(!options.debug);
        assert!(options.string);

        let cli = Cli::parse_from(["gqlimport", "build", "--no-string", "--no-debug"]);
        let options = cli.command.overrides().apply(config.clone());
        assert!(!options.string);
        assert!(!options.debug);

        // last flag wins
        let cli = Cli::parse_from(["gqlimport", "compile", "a.graphql", "--no-debug", "--debug"]);
        let options = cli.command.overrides().apply(LoaderOptions::default());
        assert!(options.debug);

        let cli = Cli::parse_from(["gqlimport", "compile", "a.graphql"]);
        assert_eq!(cli.command.overrides().apply(config.clone()), config);
    }
}
