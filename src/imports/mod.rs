//! Import resolution: turns a document and its `#import` directives into
//! one flattened, deduplicated set of texts.

pub mod directive;
pub mod expander;
pub mod graph;
pub mod resolver;

pub use directive::{scan, ImportDirective};
pub use expander::{expand, expand_file, expand_with_graph, Expansion};
pub use graph::{ImportEdge, ImportGraph, ImportSource};
pub use resolver::resolve;
