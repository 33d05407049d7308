use std::{cmp::Ordering, fmt};

use super::{strip_prefix_ignore_case, Semantic};

/// The scope of a version tag.
///
/// A tag either applies to the whole repository or to a single project,
/// identified by its lowercased name (the slug).
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TagScope {
    /// The tag sets the baseline for every project.
    Global,
    /// The tag refines the baseline of one project.
    Project(String),
}

/// The VersionTag data structure represents a git tag containing a
/// semantic version number, global or scoped to a project.
///
/// Two shapes are recognised, given a tag prefix such as `v`:
///
/// - global: `<prefix><major>.<minor>[.<patch>]`
/// - project-scoped: `<prefix><major>.<minor>[.<patch>]-<slug>`
#[derive(Debug, Clone)]
pub struct VersionTag {
    pub(crate) name: String,
    pub(crate) commit: String,
    pub(crate) prefix: String,
    pub(crate) semantic: Semantic,
    pub(crate) scope: TagScope,
}

impl PartialEq for VersionTag {
    fn eq(&self, other: &Self) -> bool {
        self.semantic == other.semantic
    }
}

impl Eq for VersionTag {}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semantic.cmp(&other.semantic)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.semantic)?;
        if let TagScope::Project(slug) = &self.scope {
            write!(f, "-{slug}")?;
        }
        Ok(())
    }
}

impl VersionTag {
    /// Parse a tag name into a version tag.
    ///
    /// The name must start with `prefix` (compared ignoring ASCII case);
    /// tags without the prefix are not version tags and yield `None`. The
    /// remainder is split once on the first `-`: the left side must parse
    /// as a version number, the right side (when present) is the project
    /// slug, folded to lowercase. A leading `refs/tags/` is tolerated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use monosv::{TagScope, VersionTag};
    ///
    /// let tag = VersionTag::parse("v1.2.3-core", "0fe1a2", "v").unwrap();
    ///
    /// assert_eq!(1, tag.version().major());
    /// assert_eq!(TagScope::Project("core".to_string()), *tag.scope());
    /// ```
    pub fn parse(name: &str, commit: &str, prefix: &str) -> Option<Self> {
        let text = name.strip_prefix("refs/tags/").unwrap_or(name);
        let Some(rest) = strip_prefix_ignore_case(text, prefix) else {
            log::trace!("tag `{name}` does not carry the prefix `{prefix}`");
            return None;
        };

        let (version_text, scope) = match rest.split_once('-') {
            Some((_, slug)) if slug.is_empty() => {
                log::trace!("tag `{name}` has an empty project slug");
                return None;
            }
            Some((version, slug)) => (version, TagScope::Project(slug.to_lowercase())),
            None => (rest, TagScope::Global),
        };

        let Some(semantic) = Semantic::parse(version_text) else {
            log::warn!("tag `{name}` carries the prefix but no version number, ignoring");
            return None;
        };

        Some(VersionTag {
            name: text.to_string(),
            commit: commit.to_string(),
            prefix: prefix.to_string(),
            semantic,
            scope,
        })
    }

    /// The tag name as found in the repository.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The commit the tag resolves to.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Provide a reference to the semantic version
    pub fn version(&self) -> &Semantic {
        &self.semantic
    }

    /// The scope of the tag.
    pub fn scope(&self) -> &TagScope {
        &self.scope
    }

    /// The project slug for a project-scoped tag.
    pub fn project_slug(&self) -> Option<&str> {
        match &self.scope {
            TagScope::Project(slug) => Some(slug),
            TagScope::Global => None,
        }
    }

    pub(crate) fn is_global(&self) -> bool {
        self.scope == TagScope::Global
    }
}
