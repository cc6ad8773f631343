//! # gqlimport
//!
//! A preprocessor for GraphQL documents consumed by a module bundler.
//!
//! Documents may pull in other documents with `#import` directives. The
//! loader inlines them, parses the result, pairs every query and mutation
//! with the fragments it needs, and generates a JavaScript module with one
//! request function per operation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gqlimport::{load_file, DependencyRecorder, LoaderOptions};
//! use std::path::Path;
//!
//! let mut ctx = DependencyRecorder::new();
//! let module = load_file(Path::new("queries/user.graphql"), &mut ctx, &LoaderOptions::default())?;
//! // ctx.dependencies() lists every imported file
//! # Ok::<(), gqlimport::LoaderError>(())
//! ```

pub mod builder;
pub mod cli;
pub mod config;
pub mod context;
pub mod emit;
pub mod error;
pub mod imports;
pub mod loader;
pub mod operations;

// Re-exports for convenience
pub use error::{LoaderError, Result};

pub use config::LoaderOptions;
pub use context::{BuildContext, DependencyRecorder};

// Pipeline
pub use builder::{build_dir, BuildReport, FileOutcome};
pub use emit::{emit, ExportMode, ExportShape, ModulePlan, PrintedOperation};
pub use imports::{expand, expand_file, resolve, Expansion, ImportGraph, ImportSource};
pub use loader::{compile_file, load, load_file, Compilation};
pub use operations::{collect, dependencies, parse, CollectedIndex, Operation, OperationKind};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_scenario_import_then_collect() {
        let dir = TempDir::new().unwrap();
        let root_text = "#import \"b.graphql\"\nquery A { id }";
        let a = write(dir.path(), "a.graphql", root_text);
        write(dir.path(), "b.graphql", "fragment F on T { x }");

        let mut ctx = DependencyRecorder::new();
        let expansion = expand_file(&a, &LoaderOptions::default(), &mut ctx).unwrap();
        assert_eq!(
            expansion.contents,
            vec![root_text.to_string(), "fragment F on T { x }".to_string()]
        );

        let collected = collect(&parse(&expansion.joined()).unwrap()).unwrap();
        assert!(collected.fragments.contains_key("F"));
        assert!(collected.queries.contains_key("A"));
    }

    #[test]
    fn test_scenario_two_operations_export_map() {
        let dir = TempDir::new().unwrap();
        let mut ctx = DependencyRecorder::new();
        let module = load(
            "query A { id }\nquery B { name }",
            dir.path(),
            &mut ctx,
            &LoaderOptions::default(),
        )
        .unwrap();

        assert!(ctx.is_cacheable());
        assert!(module.contains("module.exports = {\n"));
        assert!(module.contains("  \"A\": wrap(\"A\", \"query\""));
        assert!(module.contains("  \"B\": wrap(\"B\", \"query\""));
        assert!(module.contains("  _raw: ["));
        assert!(module.contains("  _debug: false\n"));
    }

    #[test]
    fn test_scenario_transitive_fragment_closure() {
        let dir = TempDir::new().unwrap();
        let source = r#"
query Q { user { ...F1 } }
fragment F1 on User { id ...F2 }
fragment F2 on User { name }
"#;
        let collected = collect(&parse(source).unwrap()).unwrap();
        let ops = collected.operations();
        let deps = dependencies(&ops[0], &collected.fragments).unwrap();
        let names: Vec<String> = deps.iter().map(|f| f.name.to_string()).collect();
        assert_eq!(names, vec!["F1", "F2"]);

        let module = load(
            source,
            dir.path(),
            &mut DependencyRecorder::new(),
            &LoaderOptions::default(),
        )
        .unwrap();
        assert!(module.contains("fragment F2 on User"));
    }

    #[test]
    fn test_scenario_extension_probing() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "shared.graphql", "fragment S on T { s }");
        let found = resolve(
            dir.path(),
            "shared",
            &[".gql".to_string(), ".graphql".to_string()],
        );
        assert_eq!(found, Some(dir.path().join("shared.graphql")));
    }

    #[test]
    fn test_scenario_missing_import_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        let root = "#import \"missing.graphql\"\nquery A { id }";
        let mut ctx = DependencyRecorder::new();
        let contents = expand(dir.path(), root, &LoaderOptions::default(), &mut ctx).unwrap();
        assert_eq!(contents, vec![root.to_string()]);

        let module = load(root, dir.path(), &mut ctx, &LoaderOptions::default()).unwrap();
        assert!(module.contains("module.exports = wrap(\"A\", \"query\""));
        assert!(ctx.dependencies().is_empty());
    }

    #[test]
    fn test_single_operation_exports_callable() {
        let dir = TempDir::new().unwrap();
        let module = load(
            "mutation Save { save }",
            dir.path(),
            &mut DependencyRecorder::new(),
            &LoaderOptions::default(),
        )
        .unwrap();
        assert!(module.contains("module.exports = wrap(\"Save\", \"mutation\""));
        assert!(!module.contains("_raw"));
    }

    #[test]
    fn test_string_mode() {
        let dir = TempDir::new().unwrap();
        let options = LoaderOptions {
            string: true,
            ..LoaderOptions::default()
        };
        let single = load("query A { id }", dir.path(), &mut DependencyRecorder::new(), &options)
            .unwrap();
        assert!(single.starts_with("module.exports = \"query A"));

        let multi = load(
            "query A { id }\nquery B { id }",
            dir.path(),
            &mut DependencyRecorder::new(),
            &options,
        )
        .unwrap();
        assert!(multi.starts_with("module.exports = {\"A\":\"query A"));
        assert!(!multi.contains("require("));
    }

    #[test]
    fn test_debug_mode_embeds_closure() {
        let dir = TempDir::new().unwrap();
        let options = LoaderOptions {
            debug: true,
            ..LoaderOptions::default()
        };
        let module = load(
            "query A { ...F }\nquery B { id }\nfragment F on T { x }",
            dir.path(),
            &mut DependencyRecorder::new(),
            &options,
        )
        .unwrap();
        assert!(module.contains("  _debug: {\"A\":[\"fragment F on T"));
    }

    #[test]
    fn test_parse_failure_aborts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.graphql", "fragment F on T {");
        let err = load(
            "#import \"bad\"\nquery A { ...F }",
            dir.path(),
            &mut DependencyRecorder::new(),
            &LoaderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoaderError::Parse { .. }));
    }

    #[test]
    fn test_dangling_fragment_aborts_module() {
        let dir = TempDir::new().unwrap();
        let err = load(
            "query A { id }\nquery B { ...Nope }",
            dir.path(),
            &mut DependencyRecorder::new(),
            &LoaderOptions::default(),
        )
        .unwrap_err();
        match err {
            LoaderError::DanglingFragmentReference { operation, fragment } => {
                assert_eq!(operation, "B");
                assert_eq!(fragment, "Nope");
            }
            other => panic!("expected DanglingFragmentReference, got {other:?}"),
        }
    }

    #[test]
    fn test_load_file_registers_nested_dependencies() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("frags")).unwrap();
        write(dir.path(), "frags/name.gql", "fragment Name on User { name }");
        write(
            dir.path(),
            "frags/user.graphql",
            "#import \"name\"\nfragment User on User { id ...Name }",
        );
        let root = write(
            dir.path(),
            "query.graphql",
            "#import \"./frags/user\"\nquery Me { me { ...User } }",
        );

        let mut ctx = DependencyRecorder::new();
        let compilation = compile_file(&root, &mut ctx, &LoaderOptions::default()).unwrap();
        assert_eq!(ctx.dependencies().len(), 2);
        assert!(ctx.dependencies()[0].ends_with("frags/user.graphql"));
        assert!(ctx.dependencies()[1].ends_with("frags/name.gql"));

        let me = compilation.plan.get("Me").unwrap();
        assert!(me.text.contains("fragment User on User"));
        assert!(me.text.contains("fragment Name on User"));
        assert_eq!(compilation.plan.shape(), ExportShape::Single);
    }
}
