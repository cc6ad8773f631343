//! Typed description of the module to generate.

use apollo_compiler::ast::Definition;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LoaderOptions;
use crate::error::Result;
use crate::operations::{closure, print, CollectedIndex, OperationKind};

/// One exported operation, printed with its fragment closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintedOperation {
    pub name: String,
    pub kind: OperationKind,
    /// Fragments first, then the operation, as one GraphQL document.
    pub text: String,
    /// Each closure definition printed on its own; only in debug mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closure: Option<Vec<String>>,
}

/// What each export is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// The printed document text.
    String,
    /// A function calling the request transport.
    Callable,
}

/// Whether the module exports one operation directly or a name-keyed map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportShape {
    Single,
    Map,
}

/// Everything the code generator needs, independent of output syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePlan {
    pub mode: ExportMode,
    pub url: String,
    pub request: String,
    pub debug: bool,
    /// Queries then mutations, in document order.
    pub operations: Vec<PrintedOperation>,
}

impl ModulePlan {
    /// Exactly one operation is exported directly; anything else is a map.
    pub fn shape(&self) -> ExportShape {
        if self.operations.len() == 1 {
            ExportShape::Single
        } else {
            ExportShape::Map
        }
    }

    pub fn get(&self, name: &str) -> Option<&PrintedOperation> {
        self.operations.iter().find(|op| op.name == name)
    }
}

/// Print every query and mutation of `collected` with its fragment closure.
pub fn plan(collected: &CollectedIndex, options: &LoaderOptions) -> Result<ModulePlan> {
    let mut operations = Vec::new();

    for operation in collected.operations() {
        let mut definitions: Vec<Definition> = closure(&operation, &collected.fragments)?
            .into_iter()
            .map(Into::into)
            .collect();
        definitions.push(operation.definition.clone().into());

        debug!(
            operation = %operation.name,
            kind = %operation.kind,
            fragments = definitions.len() - 1,
            "printing operation"
        );

        let debug_closure = options.debug.then(|| {
            definitions
                .iter()
                .map(|definition| print(std::slice::from_ref(definition)).trim_end().to_string())
                .collect()
        });

        operations.push(PrintedOperation {
            name: operation.name,
            kind: operation.kind,
            text: print(&definitions),
            closure: debug_closure,
        });
    }

    Ok(ModulePlan {
        mode: if options.string {
            ExportMode::String
        } else {
            ExportMode::Callable
        },
        url: options.url.clone(),
        request: options.request.clone(),
        debug: options.debug,
        operations,
    })
}
