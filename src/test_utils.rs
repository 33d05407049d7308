//! Shared helpers for unit tests.

pub(crate) mod fake {
    use std::cell::Cell;
    use std::collections::{HashMap, HashSet};

    use crate::repository::{BranchInfo, ChangeKind, PathChange, TagEntry};
    use crate::{Error, RepoSource};

    /// In-memory repository double.
    ///
    /// Every trait call increments `calls`, so tests can assert that a
    /// short-circuited decision never touched the repository.
    pub(crate) struct FakeRepo {
        pub branch: BranchInfo,
        pub tags: Vec<TagEntry>,
        pub diffs: HashMap<(String, String), Vec<PathChange>>,
        pub ancestry: HashSet<(String, String)>,
        pub fail_ancestry: bool,
        pub calls: Cell<u32>,
    }

    impl FakeRepo {
        pub(crate) fn new(branch: &str, tip: &str) -> Self {
            FakeRepo {
                branch: BranchInfo {
                    name: branch.to_string(),
                    tip: tip.to_string(),
                },
                tags: Vec::new(),
                diffs: HashMap::new(),
                ancestry: HashSet::new(),
                fail_ancestry: false,
                calls: Cell::new(0),
            }
        }

        pub(crate) fn with_tag(mut self, name: &str, commit: &str) -> Self {
            self.tags.push(TagEntry {
                name: name.to_string(),
                target: commit.to_string(),
            });
            self
        }

        pub(crate) fn with_diff(mut self, from: &str, to: &str, paths: &[&str]) -> Self {
            let changes = paths
                .iter()
                .map(|path| PathChange {
                    path: (*path).to_string(),
                    kind: ChangeKind::Modified,
                })
                .collect();
            self.diffs
                .insert((from.to_string(), to.to_string()), changes);
            self
        }

        pub(crate) fn with_ancestry(mut self, ancestor: &str, descendant: &str) -> Self {
            self.ancestry
                .insert((ancestor.to_string(), descendant.to_string()));
            self
        }

        fn count(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    impl RepoSource for FakeRepo {
        fn current_branch(&self) -> Result<BranchInfo, Error> {
            self.count();
            Ok(self.branch.clone())
        }

        fn tags(&self) -> Result<Vec<TagEntry>, Error> {
            self.count();
            Ok(self.tags.clone())
        }

        fn diff_paths(&self, from: &str, to: &str) -> Result<Vec<PathChange>, Error> {
            self.count();
            Ok(self
                .diffs
                .get(&(from.to_string(), to.to_string()))
                .cloned()
                .unwrap_or_default())
        }

        fn read_blob(&self, _commit: &str, _path: &str) -> Result<Option<Vec<u8>>, Error> {
            self.count();
            Ok(None)
        }

        fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, Error> {
            self.count();
            if self.fail_ancestry {
                return Err(Error::UnknownCommit(ancestor.to_string()));
            }
            Ok(ancestor == descendant
                || self
                    .ancestry
                    .contains(&(ancestor.to_string(), descendant.to_string())))
        }
    }
}

pub(crate) mod git {
    use std::fs;
    use std::path::Path;

    use git2::{build::CheckoutBuilder, ObjectType, Oid, Repository, Signature};
    use tempfile::TempDir;

    /// A throwaway git repository in a temporary directory.
    pub(crate) struct TestRepo {
        dir: TempDir,
        repo: Repository,
    }

    impl TestRepo {
        pub(crate) fn init() -> Self {
            let dir = tempfile::tempdir().expect("failed to create temp dir");
            let repo = Repository::init(dir.path()).expect("failed to initialise repo");
            TestRepo { dir, repo }
        }

        pub(crate) fn path(&self) -> &Path {
            self.dir.path()
        }

        pub(crate) fn repo(&self) -> &Repository {
            &self.repo
        }

        /// Write `content` to `relative_path`, stage it and commit.
        /// Returns the commit id as hex.
        pub(crate) fn commit_file(
            &self,
            relative_path: &str,
            content: &str,
            message: &str,
        ) -> String {
            let file_path = self.dir.path().join(relative_path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).expect("failed to create parent dirs");
            }
            fs::write(&file_path, content).expect("failed to write file");

            add_and_commit(&self.repo, Path::new(relative_path), message).to_string()
        }

        pub(crate) fn tag(&self, name: &str) {
            tag(&self.repo, name);
        }

        pub(crate) fn tag_annotated(&self, name: &str, message: &str) {
            let commit = find_last_commit(&self.repo);
            let signature = Signature::now("tester", "tester@example.net").unwrap();
            self.repo
                .tag(name, commit.as_object(), &signature, message, false)
                .expect("failed to create annotated tag");
        }

        pub(crate) fn branch_and_checkout(&self, name: &str) {
            let commit = find_last_commit(&self.repo);
            self.repo
                .branch(name, &commit, false)
                .expect("failed to create branch");
            self.repo
                .set_head(&format!("refs/heads/{name}"))
                .expect("failed to set head");
            self.repo
                .checkout_head(Some(CheckoutBuilder::new().force()))
                .expect("failed to checkout");
        }
    }

    pub(crate) fn tag(repo: &Repository, name: &str) {
        let commit = find_last_commit(repo);
        repo.tag_lightweight(name, commit.as_object(), false)
            .expect("failed to create tag");
    }

    fn find_last_commit(repo: &Repository) -> git2::Commit<'_> {
        let obj = repo
            .head()
            .and_then(|head| head.resolve())
            .and_then(|head| head.peel(ObjectType::Commit))
            .expect("failed to find last commit");
        obj.into_commit().ok().expect("head is not a commit")
    }

    fn add_and_commit(repo: &Repository, path: &Path, message: &str) -> Oid {
        let mut index = repo.index().expect("failed to open index");
        index.add_path(path).expect("failed to add path");
        index.write().expect("failed to write index");
        let tree_oid = index.write_tree().expect("failed to write tree");
        let tree = repo.find_tree(tree_oid).expect("failed to find tree");

        let signature = Signature::now("tester", "tester@example.net").unwrap();
        let parent = repo
            .head()
            .ok()
            .and_then(|head| head.peel(ObjectType::Commit).ok())
            .and_then(|obj| obj.into_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )
        .expect("failed to commit")
    }
}
