use std::iter::repeat;
use std::path::{Path, PathBuf};

pub fn find_first_subpath<P: AsRef<Path>, F: Fn(&Path) -> bool>(
    root: impl AsRef<Path>,
    subpaths: &[P],
    search: F,
) -> Option<PathBuf> {
    subpaths
        .iter()
        .zip(repeat(root.as_ref()))
        .map(|(b, a)| a.join(b))
        .find(|it: &PathBuf| search(&it))
}

/// Joins `file` onto each root and returns the first candidate accepted by `search`.
pub fn find_in_roots<R: AsRef<Path>, F: Fn(&Path) -> bool>(
    roots: &[R],
    file: impl AsRef<Path>,
    search: F,
) -> Option<PathBuf> {
    roots
        .iter()
        .map(|root| root.as_ref().join(file.as_ref()))
        .find(|it: &PathBuf| search(&it))
}

/// Trimmed copy of `value`, or `None` when nothing is left.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
