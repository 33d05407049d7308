#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! Per-project semantic versions for monorepos
//!
//! Computes a semantic version for each project in a monorepo from the
//! repository's tags and history, without committing version numbers to
//! source. A project's base version comes from the latest applicable
//! global tag (`v1.2.3`) or project-scoped tag (`v1.2.4-core`); the
//! project is bumped when its own files, a direct dependency's files, its
//! package lock, or a dependency's tag moved since that base. Branch kind
//! shapes the result: trunk and release branches bump the patch, feature
//! branches append a `-<branch>.<hash>` suffix.
//!
//! ## Usage
//!
//! Add the dependency to Cargo.toml
//!
//! ```toml
//! [dependencies]
//! monosv = "0.4.2"
//! ```
//!
//! ```no_run
//! # use std::path::Path;
//! use monosv::{CalculatorConfig, GitRepoSource, discover_projects};
//!
//! # fn main() -> Result<(), monosv::Error> {
//! let repo = GitRepoSource::open(Path::new("."))?;
//!
//! for project in discover_projects(Path::new("."), &repo)? {
//!     let calculator = CalculatorConfig::new()
//!         .set_prefix("v")
//!         .build_calculator(&repo, &project)?;
//!     let decision = calculator.decision();
//!     println!("{} {} {}", project.name, decision.version, decision.changed);
//! }
//! # Ok(())
//! # }
//! ```

mod calculator;
mod discovery;
mod error;
pub mod output;
mod project;
mod repository;
#[cfg(test)]
mod test_utils;
mod version;

pub use calculator::{BranchKind, Calculator, CalculatorConfig, Decision};
pub use discovery::discover_projects;
pub use error::Error;
pub use project::ProjectRef;
pub use repository::{BranchInfo, ChangeKind, GitRepoSource, PathChange, RepoSource, TagEntry};
pub use version::{Semantic, TagScope, VersionTag};
