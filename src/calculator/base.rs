use std::fmt;

use crate::version::{Semantic, VersionTag};

/// Where the base version came from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum BaseOrigin {
    /// A global tag.
    Global,
    /// A project-scoped tag within the current global series.
    Project,
    /// No global tag exists; the default base was synthesized.
    Fallback,
}

impl fmt::Display for BaseOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseOrigin::Global => write!(f, "global tag"),
            BaseOrigin::Project => write!(f, "project tag"),
            BaseOrigin::Fallback => write!(f, "default"),
        }
    }
}

/// The version a decision starts from, before the change-driven bump.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct BaseVersion {
    pub(crate) semantic: Semantic,
    pub(crate) commit: Option<String>,
    pub(crate) origin: BaseOrigin,
}

/// Combine the selected tags into the effective base for a project.
///
/// A project-scoped tag is a refinement within the current global series:
/// it is chosen only when its major and minor equal the global's. A stale
/// project tag from an earlier series must not hold the project back, so
/// the global tag advances the baseline otherwise. Without any global tag
/// the base is `0.1.0` with no commit.
pub(crate) fn resolve(global: Option<VersionTag>, project: Option<VersionTag>) -> BaseVersion {
    let (global_version, global_commit, global_origin) = match &global {
        Some(tag) => (
            *tag.version(),
            Some(tag.commit().to_string()),
            BaseOrigin::Global,
        ),
        None => (Semantic::new(0, 1, 0), None, BaseOrigin::Fallback),
    };

    if let Some(tag) = project {
        if tag.version().same_series(&global_version) {
            log::debug!(
                "base from project tag `{}` within the {}.{} series",
                tag.name(),
                global_version.major(),
                global_version.minor()
            );
            return BaseVersion {
                semantic: *tag.version(),
                commit: Some(tag.commit().to_string()),
                origin: BaseOrigin::Project,
            };
        }
        log::debug!(
            "project tag `{}` is outside the current series, using the global base",
            tag.name()
        );
    }

    BaseVersion {
        semantic: global_version,
        commit: global_commit,
        origin: global_origin,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn tag(name: &str, commit: &str) -> VersionTag {
        VersionTag::parse(name, commit, "v").expect("valid tag")
    }

    #[test]
    fn project_tag_in_series_is_chosen() {
        let base = resolve(Some(tag("v1.0.0", "g")), Some(tag("v1.0.3-core", "p")));

        assert_eq!(Semantic::new(1, 0, 3), base.semantic);
        assert_eq!(Some("p".to_string()), base.commit);
        assert_eq!(BaseOrigin::Project, base.origin);
    }

    #[rstest]
    #[case::older_series("v1.2.9-core")]
    #[case::newer_series("v2.1.0-core")]
    fn project_tag_outside_series_is_ignored(#[case] project: &str) {
        let base = resolve(Some(tag("v2.0.0", "g")), Some(tag(project, "p")));

        assert_eq!(Semantic::new(2, 0, 0), base.semantic);
        assert_eq!(Some("g".to_string()), base.commit);
        assert_eq!(BaseOrigin::Global, base.origin);
    }

    #[test]
    fn global_tag_alone_is_the_base() {
        let base = resolve(Some(tag("v1.4.2", "g")), None);

        assert_eq!(Semantic::new(1, 4, 2), base.semantic);
        assert_eq!(BaseOrigin::Global, base.origin);
    }

    #[test]
    fn no_tags_synthesize_the_default() {
        let base = resolve(None, None);

        assert_eq!(Semantic::new(0, 1, 0), base.semantic);
        assert_eq!(None, base.commit);
        assert_eq!(BaseOrigin::Fallback, base.origin);
    }

    #[test]
    fn project_tag_can_refine_the_default_series() {
        let base = resolve(None, Some(tag("v0.1.4-core", "p")));

        assert_eq!(Semantic::new(0, 1, 4), base.semantic);
        assert_eq!(BaseOrigin::Project, base.origin);
    }
}
