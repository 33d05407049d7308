//! Read-only view over the version-controlled repository
//!
//! The decision engine consumes the repository through the narrow
//! [`RepoSource`] trait: current branch, tag enumeration, tree-to-tree
//! diffs, blob reads and ancestry tests. [`GitRepoSource`] implements the
//! trait over git2. Annotated and lightweight tags are treated uniformly by
//! peeling to the eventual commit.

use std::cell::RefCell;
use std::path::Path;

use git2::{Delta, ObjectType, Oid, Repository};

use crate::Error;

/// The current branch name and its tip commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    /// Short branch name, e.g. `main` or `feature/data-improvements`.
    pub name: String,
    /// Commit id of the branch tip.
    pub tip: String,
}

/// A tag name and the commit it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// Tag name without the `refs/tags/` prefix.
    pub name: String,
    /// Commit id the tag points at, after peeling annotated tags.
    pub target: String,
}

/// How a path changed between two commit trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The path was added.
    Added,
    /// The path content was modified.
    Modified,
    /// The path was deleted.
    Deleted,
    /// The path was renamed; the entry is keyed on the new path.
    Renamed,
}

/// One changed path in a diff between two commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathChange {
    /// Repository-root-relative path, forward slashes.
    pub path: String,
    /// The kind of change.
    pub kind: ChangeKind,
}

/// Read-only repository operations the decision engine requires.
///
/// All paths returned are repository-root-relative with forward slashes and
/// no leading `./`. Implementations may cache the tag enumeration for the
/// lifetime of the handle; the engine traverses it at most once per
/// decision.
pub trait RepoSource {
    /// The current branch and its tip commit.
    fn current_branch(&self) -> Result<BranchInfo, Error>;

    /// All tags with their target commits.
    fn tags(&self) -> Result<Vec<TagEntry>, Error>;

    /// Paths changed between the trees of two commits.
    fn diff_paths(&self, from: &str, to: &str) -> Result<Vec<PathChange>, Error>;

    /// The contents of `path` at `commit`, or `None` when the path does not
    /// exist in that commit.
    fn read_blob(&self, commit: &str, path: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Whether `ancestor` is an ancestor of `descendant`. A commit counts
    /// as its own ancestor.
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, Error>;
}

/// Git-backed implementation of [`RepoSource`].
pub struct GitRepoSource {
    inner: Repository,
    tag_cache: RefCell<Option<Vec<TagEntry>>>,
}

impl GitRepoSource {
    /// Open the repository at `path`.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let inner = Repository::open(path)
            .map_err(|e| Error::RepoUnavailable(e.message().to_string()))?;
        Ok(GitRepoSource {
            inner,
            tag_cache: RefCell::new(None),
        })
    }

    /// The repository work tree, absent for bare repositories.
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    fn find_commit(&self, id: &str) -> Result<git2::Commit<'_>, Error> {
        let oid = Oid::from_str(id).map_err(|_| Error::UnknownCommit(id.to_string()))?;
        self.inner
            .find_commit(oid)
            .map_err(|_| Error::UnknownCommit(id.to_string()))
    }
}

impl RepoSource for GitRepoSource {
    fn current_branch(&self) -> Result<BranchInfo, Error> {
        let head = self
            .inner
            .head()
            .map_err(|e| Error::RepoUnavailable(e.message().to_string()))?;
        let name = head.shorthand().unwrap_or("HEAD").to_string();
        let tip = head.peel_to_commit()?.id().to_string();
        log::debug!("current branch is `{name}` at {tip}");
        Ok(BranchInfo { name, tip })
    }

    fn tags(&self) -> Result<Vec<TagEntry>, Error> {
        if let Some(cached) = self.tag_cache.borrow().as_ref() {
            return Ok(cached.clone());
        }

        let mut raw = Vec::new();
        self.inner.tag_foreach(|oid, name| {
            raw.push((oid, String::from_utf8_lossy(name).into_owned()));
            true
        })?;

        let mut entries = Vec::with_capacity(raw.len());
        for (oid, name) in raw {
            let Ok(object) = self.inner.find_object(oid, None) else {
                log::warn!("tag `{name}` references a missing object, skipping");
                continue;
            };
            // Lightweight tags point at the commit directly; annotated tags
            // peel to it.
            let Ok(target) = object.peel(ObjectType::Commit) else {
                log::trace!("tag `{name}` does not resolve to a commit, skipping");
                continue;
            };
            let name = name.trim_start_matches("refs/tags/").to_string();
            entries.push(TagEntry {
                name,
                target: target.id().to_string(),
            });
        }

        log::debug!("enumerated {} tags", entries.len());
        *self.tag_cache.borrow_mut() = Some(entries.clone());
        Ok(entries)
    }

    fn diff_paths(&self, from: &str, to: &str) -> Result<Vec<PathChange>, Error> {
        let from_tree = self.find_commit(from)?.tree()?;
        let to_tree = self.find_commit(to)?.tree()?;

        let mut diff = self
            .inner
            .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), None)?;
        // Pair up adds and deletes so a rename yields one entry keyed on
        // the new path.
        diff.find_similar(None)?;

        let mut changes = Vec::new();
        for delta in diff.deltas() {
            let kind = match delta.status() {
                Delta::Added => ChangeKind::Added,
                Delta::Deleted => ChangeKind::Deleted,
                Delta::Renamed => ChangeKind::Renamed,
                Delta::Unmodified => continue,
                _ => ChangeKind::Modified,
            };
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path());
            let Some(path) = path else { continue };
            changes.push(PathChange {
                path: path.to_string_lossy().replace('\\', "/"),
                kind,
            });
        }

        log::debug!("{} paths changed between {from} and {to}", changes.len());
        Ok(changes)
    }

    fn read_blob(&self, commit: &str, path: &str) -> Result<Option<Vec<u8>>, Error> {
        let commit = self.find_commit(commit)?;
        let tree = commit.tree()?;
        match tree.get_path(Path::new(path)) {
            Ok(entry) => {
                let object = entry.to_object(&self.inner)?;
                Ok(object.as_blob().map(|blob| blob.content().to_vec()))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, Error> {
        let ancestor_id = self.find_commit(ancestor)?.id();
        let descendant_id = self.find_commit(descendant)?.id();
        if ancestor_id == descendant_id {
            return Ok(true);
        }
        Ok(self.inner.graph_descendant_of(descendant_id, ancestor_id)?)
    }
}
