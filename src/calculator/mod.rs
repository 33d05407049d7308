//! The version-decision pipeline
//!
//! Builds up the data needed to decide a project's version: branch kind,
//! applicable tags, effective base, and the change signal, then composes
//! the final version string. The calculator holds no state beyond a single
//! decision; each project is decided in its own call.

mod base;
mod branch;
mod changes;
mod compose;
mod config;
mod selector;

pub use self::branch::BranchKind;
pub use self::config::CalculatorConfig;

use crate::version::VersionTag;
use crate::{Error, ProjectRef, RepoSource};

/// The outcome of a version decision for one project.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Decision {
    /// The computed version string.
    pub version: String,
    /// Whether the project changed since its base version.
    pub changed: bool,
    /// Which rule produced the outcome, in one line.
    pub rationale: String,
}

/// Calculator
///
/// Decides the version of one project on the current branch at the current
/// commit.
#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalculatorConfig,
    project: String,
    decision: Decision,
}

impl Calculator {
    /// Run the decision pipeline.
    ///
    /// The skip and force short-circuits are evaluated before any
    /// repository access: a skipped project makes no adapter calls at all.
    pub(crate) fn init(
        config: CalculatorConfig,
        repo: &dyn RepoSource,
        project: &ProjectRef,
    ) -> Result<Self, Error> {
        if (project.is_test && config.skip_tests)
            || (!project.is_packable && config.skip_non_packable)
        {
            log::info!("`{}` is skipped by policy", project.name);
            return Ok(Calculator {
                config,
                project: project.name.clone(),
                decision: Decision {
                    version: String::from("1.0.0"),
                    changed: false,
                    rationale: String::from("skipped"),
                },
            });
        }

        if let Some(version) = &config.force_version {
            log::info!("`{}` version is forced to {version}", project.name);
            return Ok(Calculator {
                project: project.name.clone(),
                decision: Decision {
                    version: version.clone(),
                    changed: true,
                    rationale: String::from("forced"),
                },
                config,
            });
        }

        let branch = repo.current_branch()?;
        let kind = BranchKind::classify(&branch.name);
        let release = match kind {
            BranchKind::Release => branch::release_version(&branch.name, &config.prefix),
            _ => None,
        };
        log::debug!("`{}` on {kind} branch `{}`", project.name, branch.name);

        let tags: Vec<VersionTag> = repo
            .tags()?
            .iter()
            .filter_map(|entry| VersionTag::parse(&entry.name, &entry.target, &config.prefix))
            .collect();
        log::debug!("{} version tags carry the `{}` prefix", tags.len(), config.prefix);

        let series = release.as_ref();
        let global = selector::latest_global(&tags, series);
        let project_tag = selector::latest_project(&tags, &project.slug(), series);
        let base = base::resolve(global, project_tag);

        let change = changes::detect(repo, &tags, project, &base, &branch.tip)?;

        let version = compose::compose(
            kind,
            &branch.name,
            &branch.tip,
            &base.semantic,
            release.as_ref(),
            change.changed,
        );

        let mut rationale = change.rationale;
        if config.debug {
            rationale.push_str(&format!("; base {} ({})", base.semantic, base.origin));
        }
        if config.extra_debug {
            rationale.push_str(&format!(
                "; branch {} ({kind}); {} version tags",
                branch.name,
                tags.len()
            ));
        }

        Ok(Calculator {
            config,
            project: project.name.clone(),
            decision: Decision {
                version,
                changed: change.changed,
                rationale,
            },
        })
    }

    /// The decision for the project.
    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    /// The name of the decided project.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// ### Report the result of the calculation
    ///
    /// The version string alone, or with the rationale appended when the
    /// config asks for debug output.
    pub fn report(&self) -> String {
        if self.config.debug || self.config.extra_debug {
            format!("{} ({})", self.decision.version, self.decision.rationale)
        } else {
            self.decision.version.clone()
        }
    }
}
