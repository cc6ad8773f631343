//! Module generation: a typed plan, then one rendering step.

pub mod codegen;
pub mod plan;

pub use codegen::render;
pub use plan::{plan, ExportMode, ExportShape, ModulePlan, PrintedOperation};

use crate::config::LoaderOptions;
use crate::error::Result;
use crate::operations::CollectedIndex;

/// Plan and render in one go.
pub fn emit(collected: &CollectedIndex, options: &LoaderOptions) -> Result<String> {
    Ok(render(&plan(collected, options)?))
}
