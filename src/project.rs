//! Project references and repo-relative path handling
//!
//! Every path crossing the engine boundary is repository-root-relative,
//! forward-slash separated, with no leading `./` and no trailing `/`. The
//! helpers here establish and test that invariant.

use serde::Serialize;

/// A project in the monorepo.
///
/// `dependencies` holds the directories of the projects this project
/// references directly; transitive dependencies are not listed and are not
/// followed by the change detector.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize)]
pub struct ProjectRef {
    /// Project identifier, as spelled in its manifest file name.
    pub name: String,
    /// Project directory relative to the repository root.
    pub relative_path: String,
    /// Directories of directly referenced projects.
    pub dependencies: Vec<String>,
    /// Whether this is a test project.
    pub is_test: bool,
    /// Whether this project produces a package.
    pub is_packable: bool,
}

impl ProjectRef {
    /// Create a project reference with a normalized directory path.
    ///
    /// The project starts packable, not a test, with no dependencies.
    pub fn new(name: &str, relative_path: &str) -> Self {
        ProjectRef {
            name: name.to_string(),
            relative_path: normalize_path(relative_path),
            dependencies: Vec::new(),
            is_test: false,
            is_packable: true,
        }
    }

    /// The lowercased project name, used as tag suffix and matching key.
    pub fn slug(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Normalize a path to the engine's canonical form: forward slashes, no
/// leading `./`, no trailing `/`, `.` and `..` segments collapsed.
pub(crate) fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Resolve `reference` against the directory `base`, normalizing the result.
pub(crate) fn resolve_relative(base: &str, reference: &str) -> String {
    if base.is_empty() {
        normalize_path(reference)
    } else {
        normalize_path(&format!("{base}/{reference}"))
    }
}

/// Whether `path` equals `dir` or sits below it.
///
/// Comparison appends an implied `/` to the directory so that sibling
/// projects sharing a name prefix (`src/Core` vs `src/CoreTests`) never
/// match each other. The empty directory denotes the repository root and
/// contains every path.
pub(crate) fn path_under(path: &str, dir: &str) -> bool {
    if dir.is_empty() {
        return true;
    }
    match path.strip_prefix(dir) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// The final path segment, used as a dependency's display name.
pub(crate) fn last_segment(dir: &str) -> &str {
    dir.rsplit('/').next().unwrap_or(dir)
}
