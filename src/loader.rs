//! The loader pipeline: expand imports, parse, collect, emit.

use std::path::Path;
use tracing::info;

use crate::config::LoaderOptions;
use crate::context::BuildContext;
use crate::emit::{plan, render, ModulePlan};
use crate::error::Result;
use crate::imports::{expand_file, expand_with_graph, Expansion};
use crate::operations::{collect, parse};

/// Intermediate results of one invocation.
#[derive(Debug)]
pub struct Compilation {
    pub expansion: Expansion,
    pub plan: ModulePlan,
}

impl Compilation {
    /// The generated module source.
    pub fn render(&self) -> String {
        render(&self.plan)
    }
}

/// Transform `source`, whose imports resolve relative to `base_dir`, into
/// module source.
pub fn load<C: BuildContext + ?Sized>(
    source: &str,
    base_dir: &Path,
    ctx: &mut C,
    options: &LoaderOptions,
) -> Result<String> {
    ctx.mark_cacheable();
    let expansion = expand_with_graph(base_dir, source, options, ctx)?;
    finish(expansion, options).map(|compilation| compilation.render())
}

/// Read `path` and transform it.
pub fn load_file<C: BuildContext + ?Sized>(
    path: &Path,
    ctx: &mut C,
    options: &LoaderOptions,
) -> Result<String> {
    compile_file(path, ctx, options).map(|compilation| compilation.render())
}

/// Like [`load_file`], keeping the intermediate results.
pub fn compile_file<C: BuildContext + ?Sized>(
    path: &Path,
    ctx: &mut C,
    options: &LoaderOptions,
) -> Result<Compilation> {
    ctx.mark_cacheable();
    let expansion = expand_file(path, options, ctx)?;
    let compilation = finish(expansion, options)?;
    info!(
        file = %path.display(),
        documents = compilation.expansion.contents.len(),
        operations = compilation.plan.operations.len(),
        "compiled"
    );
    Ok(compilation)
}

fn finish(expansion: Expansion, options: &LoaderOptions) -> Result<Compilation> {
    let document = parse(&expansion.joined())?;
    let collected = collect(&document)?;
    let plan = plan(&collected, options)?;
    Ok(Compilation { expansion, plan })
}
