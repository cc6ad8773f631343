//! Fragment dependencies of an operation.

use apollo_compiler::ast::{FragmentDefinition, Selection};
use apollo_compiler::Node;
use std::collections::HashSet;

use super::collector::{FragmentIndex, Operation};
use crate::error::{LoaderError, Result};

/// Every fragment reachable from `operation`, in discovery order.
///
/// Depth-first: a spread yields its fragment, then that fragment's own
/// spreads, before the next sibling. A fragment spread from two places is
/// listed twice.
pub fn dependencies(
    operation: &Operation,
    fragments: &FragmentIndex,
) -> Result<Vec<Node<FragmentDefinition>>> {
    let mut walk = Walk::new(operation, fragments, None);
    walk.selections(&operation.definition.selection_set)?;
    Ok(walk.found)
}

/// [`dependencies`] with each fragment kept once, at its first position.
///
/// A fragment is descended into only on its first spread, so shared
/// sub-fragments cost one visit each.
pub fn closure(
    operation: &Operation,
    fragments: &FragmentIndex,
) -> Result<Vec<Node<FragmentDefinition>>> {
    let mut walk = Walk::new(operation, fragments, Some(HashSet::new()));
    walk.selections(&operation.definition.selection_set)?;
    Ok(walk.found)
}

struct Walk<'a> {
    operation: &'a str,
    fragments: &'a FragmentIndex,
    /// Fragments being descended into, outermost first.
    active: Vec<String>,
    /// Names already expanded; `None` keeps every occurrence.
    expanded: Option<HashSet<String>>,
    found: Vec<Node<FragmentDefinition>>,
}

impl<'a> Walk<'a> {
    fn new(
        operation: &'a Operation,
        fragments: &'a FragmentIndex,
        expanded: Option<HashSet<String>>,
    ) -> Self {
        Self {
            operation: &operation.name,
            fragments,
            active: Vec::new(),
            expanded,
            found: Vec::new(),
        }
    }

    fn selections(&mut self, set: &[Selection]) -> Result<()> {
        for selection in set {
            match selection {
                Selection::Field(field) => self.selections(&field.selection_set)?,
                Selection::InlineFragment(inline) => self.selections(&inline.selection_set)?,
                Selection::FragmentSpread(spread) => {
                    let name = spread.fragment_name.as_str();
                    let fragments = self.fragments;
                    let fragment = fragments.get(name).ok_or_else(|| {
                        LoaderError::DanglingFragmentReference {
                            operation: self.operation.to_string(),
                            fragment: name.to_string(),
                        }
                    })?;

                    if self.active.iter().any(|active| active == name) {
                        let mut chain = self.active.clone();
                        chain.push(name.to_string());
                        return Err(LoaderError::CyclicFragment {
                            operation: self.operation.to_string(),
                            chain,
                        });
                    }

                    if let Some(expanded) = &mut self.expanded {
                        if !expanded.insert(name.to_string()) {
                            continue;
                        }
                    }

                    self.found.push(fragment.clone());
                    self.active.push(name.to_string());
                    self.selections(&fragment.selection_set)?;
                    self.active.pop();
                }
            }
        }
        Ok(())
    }
}
