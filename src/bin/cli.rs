//! gqlimport CLI - GraphQL import resolution and module generation.
//!
//! Usage:
//!   gqlimport compile <file>        # Generate the module for one document
//!   gqlimport flatten <file>        # Document with imports inlined
//!   gqlimport deps <file>           # Import graph
//!   gqlimport operations <file>     # Operations + fragment closures
//!   gqlimport build                 # Compile every document under --root

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

use gqlimport::cli::{Cli, Commands};
use gqlimport::imports::expand_file;
use gqlimport::{build_dir, compile_file, DependencyRecorder, ImportSource, LoaderOptions};

fn main() {
    // Logs go to stderr; stdout carries generated output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = cli.options()?;
    let root = cli.root.canonicalize().unwrap_or_else(|_| cli.root.clone());

    match &cli.command {
        Commands::Compile { file, out, json, .. } => {
            let file = resolve_input(&root, file);
            let mut ctx = DependencyRecorder::new();
            let compilation = compile_file(&file, &mut ctx, &options)?;

            for dep in ctx.dependencies() {
                info!(dependency = %dep.display(), "registered dependency");
            }

            let output = if *json {
                serde_json::to_string_pretty(&compilation.plan)?
            } else {
                compilation.render()
            };

            match out {
                Some(out) => {
                    std::fs::write(out, output)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    info!(out = %out.display(), "module written");
                }
                None => print!("{}", output),
            }
        }

        Commands::Flatten { file, .. } => {
            let file = resolve_input(&root, file);
            let expansion = expand_file(&file, &options, &mut DependencyRecorder::new())?;
            println!("{}", expansion.joined());
        }

        Commands::Deps { file, .. } => {
            let file = resolve_input(&root, file);
            let mut ctx = DependencyRecorder::new();
            let expansion = expand_file(&file, &options, &mut ctx)?;
            let graph = &expansion.graph;

            println!("{}", file.display());
            print_imports(graph, &ImportSource::File(file.canonicalize()?), 1);
            println!();
            println!("Files:   {}", graph.source_count());
            println!("Imports: {}", graph.import_count());
            println!("Tracked: {}", ctx.dependencies().len());
        }

        Commands::Operations { file, .. } => {
            let file = resolve_input(&root, file);
            let options = LoaderOptions {
                debug: true,
                ..options.clone()
            };
            let compilation = compile_file(&file, &mut DependencyRecorder::new(), &options)?;
            let operations: Vec<_> = compilation
                .plan
                .operations
                .iter()
                .map(|op| {
                    json!({
                        "name": op.name,
                        "kind": op.kind,
                        "closure": op.closure,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&operations)?);
        }

        Commands::Build { out_ext, .. } => {
            let report = build_dir(&root, &options, out_ext);
            for (path, err) in report.failures() {
                eprintln!("✗ {}: {}", path.display(), err);
            }
            println!("{}", report);
            if report.failed() > 0 {
                bail!("{} document(s) failed to build", report.failed());
            }
        }
    }

    Ok(())
}

/// Relative input paths are taken from --root.
fn resolve_input(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}

fn print_imports(graph: &gqlimport::ImportGraph, source: &ImportSource, depth: usize) {
    for path in graph.imports_of(source) {
        println!("{}{}", "  ".repeat(depth), path.display());
        print_imports(graph, &ImportSource::File(path.to_path_buf()), depth + 1);
    }
}
