//! Composition of the final version string
//!
//! Applies the branch-kind rules to the base version and the change flag.
//! The composer is total: it never fails on a branch name, falling back to
//! the base's series when a release branch carries no parseable version.

use crate::calculator::branch::BranchKind;
use crate::version::Semantic;

const FALLBACK_HASH: &str = "0000000";

/// Produce the version string for one decision.
pub(crate) fn compose(
    kind: BranchKind,
    branch_name: &str,
    head: &str,
    base: &Semantic,
    release: Option<&Semantic>,
    changed: bool,
) -> String {
    match kind {
        BranchKind::Main => {
            let mut version = *base;
            if changed {
                version.increment_patch();
            }
            version.to_string()
        }
        BranchKind::Release => {
            // Major and minor are locked to the branch series; the patch
            // continues from the base.
            let series = release.unwrap_or(base);
            let mut version = Semantic::new(series.major(), series.minor(), base.patch());
            if changed {
                version.increment_patch();
            }
            version.to_string()
        }
        BranchKind::Feature => {
            if !changed {
                return base.to_string();
            }
            format!("{base}-{}.{}", branch_slug(branch_name), short_hash(head))
        }
    }
}

/// The branch name with `/` and `_` replaced by `-`, lowercased.
fn branch_slug(branch_name: &str) -> String {
    branch_name.to_lowercase().replace(['/', '_'], "-")
}

/// The first seven hex characters of the head commit id.
fn short_hash(head: &str) -> &str {
    if head.len() >= 7
        && head.is_char_boundary(7)
        && head[..7].chars().all(|c| c.is_ascii_hexdigit())
    {
        &head[..7]
    } else {
        FALLBACK_HASH
    }
}
