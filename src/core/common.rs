//! Path arithmetic shared across the core module.
//!
//! Paths here are forward-slash strings relative to the repository root; the
//! empty string is the root itself. No filesystem access happens anywhere in
//! the resolver, so these helpers operate on plain strings rather than
//! `std::path`.

/// Returns the parent of `path`, or `None` for the root.
///
/// `"a/b/c"` -> `"a/b"`, `"a"` -> `""`, `""` -> `None`.
pub fn parent_dir(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    match path.rfind('/') {
        Some(idx) => Some(&path[..idx]),
        None => Some(""),
    }
}

/// Returns the directory portion of a file path (root if there is no slash).
pub fn dir_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Iterates `path` and then each of its ancestors up to and including the root.
pub fn self_and_ancestors(path: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(path);
    std::iter::from_fn(move || {
        let current = next?;
        next = parent_dir(current);
        Some(current)
    })
}

/// True if `ancestor` is a strict ancestor directory of `path`.
///
/// The root is an ancestor of everything but itself; `"a"` is an ancestor of
/// `"a/b"` but not of `"ab"`.
pub fn is_strict_ancestor(ancestor: &str, path: &str) -> bool {
    if ancestor == path {
        return false;
    }
    if ancestor.is_empty() {
        return true;
    }
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("a/b/c"), Some("a/b"));
        assert_eq!(parent_dir("a/b"), Some("a"));
        assert_eq!(parent_dir("a"), Some(""));
        assert_eq!(parent_dir(""), None);
    }

    #[test]
    fn test_dir_of() {
        assert_eq!(dir_of("kubernetes.go"), "");
        assert_eq!(dir_of("a/test.go"), "a");
        assert_eq!(dir_of("a/d/test.go"), "a/d");
    }

    #[test]
    fn test_self_and_ancestors() {
        let chain: Vec<_> = self_and_ancestors("a/d/test.go").collect();
        assert_eq!(chain, vec!["a/d/test.go", "a/d", "a", ""]);

        let chain: Vec<_> = self_and_ancestors("").collect();
        assert_eq!(chain, vec![""]);
    }

    #[test]
    fn test_is_strict_ancestor() {
        assert!(is_strict_ancestor("", "a"));
        assert!(is_strict_ancestor("a", "a/b"));
        assert!(is_strict_ancestor("a", "a/b/c"));
        assert!(!is_strict_ancestor("a", "a"));
        assert!(!is_strict_ancestor("a", "ab"));
        assert!(!is_strict_ancestor("a/b", "a"));
        assert!(!is_strict_ancestor("", ""));
    }
}
