//! Change detection since the base tag
//!
//! Decides whether a project has changed between the base tag's commit and
//! the branch tip. Four rules are evaluated in order and the first match
//! decides:
//!
//! 1. a changed path under the project directory,
//! 2. a changed path under a direct dependency's directory,
//! 3. a project-scoped tag created on a direct dependency after the base,
//! 4. a change to the project's `packages.lock.json`.
//!
//! Transitive dependencies are never followed: a dependent picks up an
//! indirect change on its own decision, through rule 3 or rule 2.

use crate::calculator::base::BaseVersion;
use crate::calculator::selector;
use crate::project::{last_segment, path_under};
use crate::version::VersionTag;
use crate::{Error, ProjectRef, RepoSource};

const LOCK_FILE: &str = "packages.lock.json";
const SAMPLE_PATHS: usize = 3;

/// Whether the project changed, and the rule that decided it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct ChangeReport {
    pub(crate) changed: bool,
    pub(crate) rationale: String,
}

impl ChangeReport {
    fn changed(rationale: String) -> Self {
        ChangeReport {
            changed: true,
            rationale,
        }
    }
}

/// Evaluate the change rules for one project.
///
/// Adapter failures on the diff abort the decision. A failed ancestry test
/// for a single dependency is logged and that dependency is treated as
/// unchanged.
pub(crate) fn detect(
    repo: &dyn RepoSource,
    tags: &[VersionTag],
    project: &ProjectRef,
    base: &BaseVersion,
    head: &str,
) -> Result<ChangeReport, Error> {
    let Some(base_commit) = &base.commit else {
        log::debug!("`{}` has no base commit, treating as changed", project.name);
        return Ok(ChangeReport::changed("no base".to_string()));
    };

    let diff = repo.diff_paths(base_commit, head)?;
    let dir = &project.relative_path;

    // Rule 1: files under the project directory.
    let own: Vec<&str> = diff
        .iter()
        .map(|change| change.path.as_str())
        .filter(|path| path_under(path, dir))
        .collect();
    if !own.is_empty() {
        log::debug!("`{}` changed directly: {} path(s)", project.name, own.len());
        return Ok(ChangeReport::changed(format!(
            "project files changed: {}",
            sample(&own)
        )));
    }

    // Rule 2: files under a direct dependency's directory.
    for dep_dir in &project.dependencies {
        let touched: Vec<&str> = diff
            .iter()
            .map(|change| change.path.as_str())
            .filter(|path| path_under(path, dep_dir))
            .collect();
        if !touched.is_empty() {
            let dep = last_segment(dep_dir);
            log::debug!("dependency `{dep}` of `{}` changed", project.name);
            return Ok(ChangeReport::changed(format!(
                "dependency {dep} changed: {}",
                sample(&touched)
            )));
        }
    }

    // Rule 3: a dependency re-tagged after the base.
    for dep_dir in &project.dependencies {
        let dep = last_segment(dep_dir);
        let slug = dep.to_lowercase();
        let Some(tag) = selector::latest_project(tags, &slug, None) else {
            continue;
        };
        if tag.commit() == base_commit {
            continue;
        }
        match repo.is_ancestor(base_commit, tag.commit()) {
            Ok(true) => {
                log::debug!(
                    "dependency `{dep}` was versioned after the base: `{}`",
                    tag.name()
                );
                return Ok(ChangeReport::changed(format!(
                    "Dependency {dep} was versioned: {}",
                    tag.name()
                )));
            }
            Ok(false) => {}
            Err(e) => {
                // A broken ancestry test must not fail the whole decision.
                log::warn!("ancestry test for dependency `{dep}` failed: {e}");
            }
        }
    }

    // Rule 4: the package lock file.
    let lock_path = if dir.is_empty() {
        LOCK_FILE.to_string()
    } else {
        format!("{dir}/{LOCK_FILE}")
    };
    if diff.iter().any(|change| change.path == lock_path) {
        log::debug!("lock file of `{}` changed", project.name);
        return Ok(ChangeReport::changed(format!(
            "package lock changed: {lock_path}"
        )));
    }

    Ok(ChangeReport {
        changed: false,
        rationale: format!("no changes since {}", base.semantic),
    })
}

fn sample(paths: &[&str]) -> String {
    let shown = paths
        .iter()
        .take(SAMPLE_PATHS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if paths.len() > SAMPLE_PATHS {
        format!("{shown} (+{} more)", paths.len() - SAMPLE_PATHS)
    } else {
        shown
    }
}
