//! Error types for monosv

use proc_exit::{Code, Exit};
use thiserror::Error;

/// The error type for monosv.
///
/// Only adapter-level failures are errors: a repository that cannot be
/// opened or read, or a commit that history refers to but that cannot be
/// found. Malformed tag names and unrecognised branch names are not errors;
/// they degrade to "not a version tag" and `Feature` respectively.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// The repository cannot be opened or read.
    #[error("repository unavailable: {0}")]
    RepoUnavailable(String),
    /// A commit referenced by a tag or by history is missing.
    #[error("unknown commit `{0}`")]
    UnknownCommit(String),
    /// No project with the requested name exists in the repository.
    #[error("no project named `{0}` found in the repository")]
    UnknownProject(String),
    /// Error passed up from git2
    #[error(transparent)]
    Git2(#[from] git2::Error),
    /// Error passed up from the filesystem
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Report serialization failed
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<Error> for Exit {
    fn from(err: Error) -> Self {
        Exit::new(Code::FAILURE).with_message(err.to_string())
    }
}
