//! Selection of the latest applicable tags
//!
//! Candidates are ordered by `(major, minor, patch)` descending; ties keep
//! the first tag encountered in enumeration order. On a release branch the
//! candidate set is narrowed to the branch's series before selection.

use crate::version::{Semantic, VersionTag};

/// The latest global tag, optionally restricted to a series.
pub(crate) fn latest_global(tags: &[VersionTag], series: Option<&Semantic>) -> Option<VersionTag> {
    let selected = pick_latest(tags.iter().filter(|tag| tag.is_global()), series);
    log::debug!("latest global tag: {:?}", selected.map(|t| t.name()));
    selected.cloned()
}

/// The latest tag scoped to `slug`, optionally restricted to a series.
pub(crate) fn latest_project(
    tags: &[VersionTag],
    slug: &str,
    series: Option<&Semantic>,
) -> Option<VersionTag> {
    let selected = pick_latest(
        tags.iter().filter(|tag| tag.project_slug() == Some(slug)),
        series,
    );
    log::debug!("latest `{slug}` tag: {:?}", selected.map(|t| t.name()));
    selected.cloned()
}

fn pick_latest<'a>(
    candidates: impl Iterator<Item = &'a VersionTag>,
    series: Option<&Semantic>,
) -> Option<&'a VersionTag> {
    let mut best: Option<&VersionTag> = None;
    for candidate in candidates {
        if let Some(series) = series {
            if !series.same_series(candidate.version()) {
                continue;
            }
        }
        // Strictly greater replaces, so the first encountered wins ties.
        match best {
            Some(current) if candidate.version() <= current.version() => {}
            _ => best = Some(candidate),
        }
    }
    best
}
