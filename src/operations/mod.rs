//! Operation extraction: parsed documents in, named operations with their
//! fragment closures out.

pub mod collector;
pub mod fragments;

use apollo_compiler::ast::{Definition, Document};

pub use collector::{
    collect, parse, CollectedIndex, FragmentIndex, Operation, OperationIndex, OperationKind,
};
pub use fragments::{closure, dependencies};

/// Print definitions back to canonical GraphQL text, as one document.
pub fn print(definitions: &[Definition]) -> String {
    let mut document = Document::new();
    document.definitions.extend(definitions.iter().cloned());
    document.to_string()
}
