//! File resolution for import paths, with extension probing.

use std::path::{Path, PathBuf};

/// Locate `relative` under `base_dir`.
///
/// The literal path wins if it is a file; otherwise each extension in
/// `extensions` is appended in order and the first existing file is returned.
/// `None` means "skip this import".
pub fn resolve(base_dir: &Path, relative: &str, extensions: &[String]) -> Option<PathBuf> {
    let literal = base_dir.join(relative);
    if literal.is_file() {
        return Some(literal);
    }

    extensions
        .iter()
        .map(|ext| base_dir.join(format!("{relative}{ext}")))
        .find(|candidate| candidate.is_file())
}
