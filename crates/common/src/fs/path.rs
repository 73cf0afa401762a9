//! Pure helpers over absolute, `/`-delimited paths.
//!
//! The engine never normalizes `.` or `..`; callers hand it already-clean
//! absolute paths. These functions only split, compare, and prefix paths.

/// Split a path into `(parent, base)`.
///
/// `"/"` splits to `("", "")`, a single-segment path to `("/", name)`,
/// anything deeper to the prefix before the last separator and the
/// trailing segment. One trailing separator is dropped first.
pub fn split(path: &str) -> (&str, &str) {
    let path = path.strip_suffix('/').unwrap_or(path);
    match path.rfind('/') {
        None => ("", path),
        Some(0) => ("/", &path[1..]),
        Some(i) => (&path[..i], &path[i + 1..]),
    }
}

/// Parent of `path`, with the root mapped back to itself.
pub fn parent_of(path: &str) -> &str {
    let (parent, _) = split(path);
    if parent.is_empty() {
        "/"
    } else {
        parent
    }
}

/// True iff `candidate` sits strictly below `ancestor`.
pub fn is_descendant(candidate: &str, ancestor: &str) -> bool {
    if ancestor == "/" {
        return candidate.len() > 1 && candidate.starts_with('/');
    }
    match candidate.strip_prefix(ancestor) {
        Some(rest) => rest.len() > 1 && rest.starts_with('/'),
        None => false,
    }
}

/// The string prefix shared by every strict descendant of `path`.
pub fn child_prefix(path: &str) -> String {
    if path == "/" {
        "/".to_string()
    } else {
        format!("{}/", path)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_split() {
        let cases = [
            ("/", "", ""),
            ("/file", "/", "file"),
            ("/dir/", "/", "dir"),
            ("/a/b/c", "/a/b", "c"),
            ("/a/b/c/", "/a/b", "c"),
            ("/a/b", "/a", "b"),
            ("/a/b/c/d/e", "/a/b/c/d", "e"),
        ];
        for (path, parent, base) in cases {
            assert_eq!(split(path), (parent, base), "split({:?})", path);
        }
    }

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of("/"), "/");
        assert_eq!(parent_of("/file"), "/");
        assert_eq!(parent_of("/a/b"), "/a");
        assert_eq!(parent_of("/a/b/c"), "/a/b");
    }

    #[test]
    fn test_is_descendant() {
        assert!(is_descendant("/a", "/"));
        assert!(is_descendant("/a/b", "/"));
        assert!(is_descendant("/a/b", "/a"));
        assert!(is_descendant("/a/b/c", "/a"));

        // A path is not its own descendant
        assert!(!is_descendant("/", "/"));
        assert!(!is_descendant("/a", "/a"));

        // Shared name prefix is not ancestry
        assert!(!is_descendant("/ab", "/a"));
        assert!(!is_descendant("/a", "/a/b"));
    }

    #[test]
    fn test_child_prefix() {
        assert_eq!(child_prefix("/"), "/");
        assert_eq!(child_prefix("/a"), "/a/");
        assert_eq!(child_prefix("/a/b"), "/a/b/");
    }
}
