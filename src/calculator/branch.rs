use std::fmt;

use regex::Regex;

use crate::version::{strip_prefix_ignore_case, Semantic};

/// The kind of branch a version is calculated on.
///
/// The kind selects the composition rule: trunk branches bump the patch in
/// place, release branches lock the series to the branch name, and feature
/// branches append a pre-release suffix. Every branch name classifies to
/// exactly one kind; anything unrecognised is a feature branch.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum BranchKind {
    /// `main` or `master`, any case.
    Main,
    /// `release/…`, `release-…` or a bare `v<major>.<minor>[.<patch>]`.
    Release,
    /// Everything else.
    #[default]
    Feature,
}

impl BranchKind {
    /// Classify a branch name.
    pub fn classify(name: &str) -> BranchKind {
        let lower = name.to_lowercase();
        if lower == "main" || lower == "master" {
            return BranchKind::Main;
        }
        if lower.starts_with("release/") || lower.starts_with("release-") {
            return BranchKind::Release;
        }
        let re = Regex::new(r"^v\d+\.\d+(\.\d+)?$").unwrap();
        if re.is_match(&lower) {
            return BranchKind::Release;
        }
        BranchKind::Feature
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchKind::Main => write!(f, "main"),
            BranchKind::Release => write!(f, "release"),
            BranchKind::Feature => write!(f, "feature"),
        }
    }
}

/// Extract the release version from a release branch name.
///
/// Strips the `release/` or `release-` marker, then the tag prefix, and
/// parses the remainder. `release/v2.0` with prefix `v` yields `2.0.0`.
/// Returns `None` when no version can be read; the composer falls back to
/// the base version's series in that case.
pub(crate) fn release_version(name: &str, prefix: &str) -> Option<Semantic> {
    let rest = strip_prefix_ignore_case(name, "release/")
        .or_else(|| strip_prefix_ignore_case(name, "release-"))
        .unwrap_or(name);
    let rest = strip_prefix_ignore_case(rest, prefix).unwrap_or(rest);
    let version = Semantic::parse(rest);
    log::debug!("release version from branch `{name}`: {version:?}");
    version
}
