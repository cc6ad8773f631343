//! Parses the flattened text and buckets its top-level definitions.

use apollo_compiler::ast::{Definition, Document, FragmentDefinition, OperationDefinition, OperationType};
use apollo_compiler::Node;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::{LoaderError, Result};

/// Name used for the flattened document in parser diagnostics.
const DOCUMENT_NAME: &str = "document.graphql";

/// Fragments by name.
pub type FragmentIndex = IndexMap<String, Node<FragmentDefinition>>;

/// Operations by name.
pub type OperationIndex = IndexMap<String, Node<OperationDefinition>>;

/// The kinds of operation the loader exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
        }
    }
}

/// A named query or mutation, tagged with its kind.
#[derive(Debug, Clone)]
pub struct Operation {
    pub name: String,
    pub kind: OperationKind,
    pub definition: Node<OperationDefinition>,
}

/// Top-level definitions of a document, bucketed by kind.
///
/// Maps keep first-insertion order; a later definition with the same name
/// replaces the earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct CollectedIndex {
    pub fragments: FragmentIndex,
    pub queries: OperationIndex,
    pub mutations: OperationIndex,
}

impl CollectedIndex {
    /// Queries then mutations. A mutation sharing a query's name takes
    /// that query's slot.
    pub fn operations(&self) -> Vec<Operation> {
        let mut merged: IndexMap<&str, Operation> = IndexMap::new();
        let tagged = self
            .queries
            .iter()
            .map(|entry| (entry, OperationKind::Query))
            .chain(
                self.mutations
                    .iter()
                    .map(|entry| (entry, OperationKind::Mutation)),
            );
        for ((name, definition), kind) in tagged {
            merged.insert(
                name.as_str(),
                Operation {
                    name: name.clone(),
                    kind,
                    definition: definition.clone(),
                },
            );
        }
        merged.into_values().collect()
    }

    pub fn operation_count(&self) -> usize {
        self.operations().len()
    }
}

/// Parse GraphQL text into a syntax tree. Any syntax error aborts.
pub fn parse(text: &str) -> Result<Document> {
    Document::parse(text, DOCUMENT_NAME).map_err(|e| LoaderError::Parse {
        message: e.errors.to_string(),
    })
}

/// Bucket the top-level definitions of `document`.
///
/// Subscriptions are skipped with a warning. Anonymous operations are an
/// error since they have no export name.
pub fn collect(document: &Document) -> Result<CollectedIndex> {
    let mut index = CollectedIndex::default();

    for definition in &document.definitions {
        match definition {
            Definition::FragmentDefinition(fragment) => {
                index
                    .fragments
                    .insert(fragment.name.to_string(), fragment.clone());
            }
            Definition::OperationDefinition(operation) => {
                let Some(name) = &operation.name else {
                    return Err(LoaderError::AnonymousOperation {
                        kind: operation_type_name(operation.operation_type).to_string(),
                    });
                };
                match operation.operation_type {
                    OperationType::Query => {
                        index.queries.insert(name.to_string(), operation.clone());
                    }
                    OperationType::Mutation => {
                        index.mutations.insert(name.to_string(), operation.clone());
                    }
                    OperationType::Subscription => {
                        warn!(operation = %name, "subscriptions are not exported, skipping");
                    }
                }
            }
            _ => {}
        }
    }

    Ok(index)
}

fn operation_type_name(ty: OperationType) -> &'static str {
    match ty {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
    }
}
