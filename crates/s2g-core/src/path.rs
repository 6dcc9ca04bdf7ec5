//! Project root detection and path stripping.

use std::fmt;

/// Path prefix stripped from every file path to make it renderer-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(String);

impl ProjectRoot {
    /// Create a root from a prefix; trailing separators are dropped.
    ///
    /// Returns `None` for an empty prefix. `/` is kept as the filesystem root,
    /// which turns absolute paths into relative ones.
    #[must_use]
    pub fn new(prefix: &str) -> Option<Self> {
        if prefix.is_empty() {
            return None;
        }
        Some(Self(prefix.trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strip this root, and the separators right after it, from `path`.
    ///
    /// Only matches on a component boundary. Paths outside the root, and the
    /// root itself, come back unchanged.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        let Some(rest) = path.strip_prefix(self.0.as_str()) else {
            return path;
        };
        if !rest.starts_with('/') {
            return path;
        }
        let rest = rest.trim_start_matches('/');
        if rest.is_empty() { path } else { rest }
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// How file paths are made relative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StripMode {
    /// Emit paths as recorded.
    #[default]
    None,
    /// Strip the same prefix from every source.
    Prefix(ProjectRoot),
    /// Strip each source's own root, taken from its first `cwd` hint.
    Auto,
}

impl StripMode {
    /// Resolve the root to use for one source.
    ///
    /// `first_cwd` is only consulted in [`StripMode::Auto`].
    pub fn root_for_source(&self, first_cwd: Option<&str>) -> Option<ProjectRoot> {
        match self {
            Self::None => None,
            Self::Prefix(root) => Some(root.clone()),
            Self::Auto => first_cwd.and_then(ProjectRoot::new),
        }
    }
}

/// Normalizes paths drawn from a single source.
#[derive(Debug, Clone, Default)]
pub struct PathNormalizer {
    root: Option<ProjectRoot>,
}

impl PathNormalizer {
    pub const fn new(root: Option<ProjectRoot>) -> Self {
        Self { root }
    }

    pub const fn root(&self) -> Option<&ProjectRoot> {
        self.root.as_ref()
    }

    /// Normalize a path. Never fails; paths that can't be stripped pass through.
    pub fn normalize<'a>(&self, path: &'a str) -> &'a str {
        match &self.root {
            Some(root) => root.strip(path),
            None => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(prefix: &str) -> ProjectRoot {
        ProjectRoot::new(prefix).unwrap()
    }

    #[test]
    fn test_strip_inside_root() {
        let root = root("/home/u/proj");
        assert_eq!(root.strip("/home/u/proj/a.py"), "a.py");
        assert_eq!(root.strip("/home/u/proj/src/lib.rs"), "src/lib.rs");
    }

    #[test]
    fn test_trailing_separator_on_prefix_is_ignored() {
        let root = root("/home/u/proj/");
        assert_eq!(root.as_str(), "/home/u/proj");
        assert_eq!(root.strip("/home/u/proj/a.py"), "a.py");
    }

    #[test]
    fn test_repeated_separators_after_root_are_stripped() {
        assert_eq!(root("/home/u/proj").strip("/home/u/proj//a.py"), "a.py");
    }

    #[test]
    fn test_outside_root_passes_through() {
        let root = root("/home/u/proj");
        assert_eq!(root.strip("/etc/hosts"), "/etc/hosts");
        assert_eq!(root.strip("relative/a.py"), "relative/a.py");
    }

    #[test]
    fn test_sibling_with_shared_prefix_is_not_stripped() {
        let root = root("/home/u/proj");
        assert_eq!(root.strip("/home/u/project2/a.py"), "/home/u/project2/a.py");
    }

    #[test]
    fn test_root_itself_is_not_emptied() {
        let root = root("/home/u/proj");
        assert_eq!(root.strip("/home/u/proj"), "/home/u/proj");
        assert_eq!(root.strip("/home/u/proj/"), "/home/u/proj/");
    }

    #[test]
    fn test_filesystem_root_makes_paths_relative() {
        let root = root("/");
        assert_eq!(root.to_string(), "/");
        assert_eq!(root.strip("/home/u/a.py"), "home/u/a.py");
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        assert!(ProjectRoot::new("").is_none());
    }

    #[test]
    fn test_strip_is_idempotent() {
        let root = root("/home/u/proj");
        for path in ["/home/u/proj/a.py", "/other/b.py", "c.py", "/home/u/proj/home/u/proj/d.py"] {
            let once = root.strip(path);
            let twice = root.strip(once);
            if once == path {
                assert_eq!(twice, once);
            } else {
                assert!(!once.starts_with('/'), "stripped path should be relative: {once}");
                assert_eq!(twice, once, "re-stripping {once} should be a no-op");
            }
        }
    }

    #[test]
    fn test_root_for_source() {
        assert_eq!(StripMode::None.root_for_source(Some("/a")), None);
        assert_eq!(
            StripMode::Prefix(root("/x")).root_for_source(Some("/a")),
            Some(root("/x"))
        );
        assert_eq!(StripMode::Auto.root_for_source(Some("/a/")), Some(root("/a")));
        assert_eq!(StripMode::Auto.root_for_source(None), None);
        assert_eq!(StripMode::Auto.root_for_source(Some("")), None);
    }

    #[test]
    fn test_normalizer_without_root_passes_through() {
        let normalizer = PathNormalizer::default();
        assert!(normalizer.root().is_none());
        assert_eq!(normalizer.normalize("/home/u/proj/a.py"), "/home/u/proj/a.py");
    }
}
