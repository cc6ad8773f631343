//! Inclusion directive detection.
//!
//! A directive is a line that, once trimmed, starts with `#`, then one of
//! `import`, `include` or `require`, then a quoted path:
//!
//! ```graphql
//! # import "./fragments/user.graphql"
//! #include 'shared'
//! ```

use regex::Regex;
use std::sync::LazyLock;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^#\s*(import|include|require)\s*['"](.+?)['"]"#)
        .expect("directive pattern is valid")
});

/// One inclusion directive found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    /// The keyword used (`import`, `include` or `require`).
    pub keyword: String,
    /// The referenced path, exactly as written.
    pub path: String,
    /// Line number (1-indexed).
    pub line: usize,
}

/// Match a single line against the directive pattern.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let caps = DIRECTIVE.captures(line.trim())?;
    let keyword = caps.get(1)?.as_str();
    let path = caps.get(2)?.as_str();
    Some((keyword, path))
}

/// All directives in `text`, in line order.
pub fn scan(text: &str) -> Vec<ImportDirective> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            parse_line(line).map(|(keyword, path)| ImportDirective {
                keyword: keyword.to_string(),
                path: path.to_string(),
                line: idx + 1,
            })
        })
        .collect()
}
