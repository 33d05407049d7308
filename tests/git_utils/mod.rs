//! Build throwaway monorepos for the end-to-end scenarios.

use std::fs;
use std::path::Path;

use git2::{build::CheckoutBuilder, IndexAddOption, ObjectType, Repository, Signature};
use tempfile::TempDir;

/// A git repository holding a small monorepo, in a temporary directory.
pub struct MonoRepo {
    dir: TempDir,
    repo: Repository,
}

impl MonoRepo {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let repo = Repository::init(dir.path()).expect("failed to initialise repo");
        MonoRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a project manifest and a starter source file, without
    /// committing. `references` names sibling project directories under
    /// `src/`.
    pub fn write_project(&self, name: &str, references: &[&str]) {
        let mut items = String::new();
        for reference in references {
            items.push_str(&format!(
                "    <ProjectReference Include=\"..\\{reference}\\{reference}.csproj\" />\n"
            ));
        }
        let manifest = format!(
            "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <ItemGroup>\n{items}  </ItemGroup>\n</Project>\n"
        );
        self.write_file(&format!("src/{name}/{name}.csproj"), &manifest);
        self.write_file(
            &format!("src/{name}/{name}Models.cs"),
            &format!("namespace {name};\n\npublic class {name}Models {{ }}\n"),
        );
    }

    /// Write a test project manifest.
    pub fn write_test_project(&self, name: &str) {
        let manifest = "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n    <IsTestProject>true</IsTestProject>\n  </PropertyGroup>\n</Project>\n";
        self.write_file(&format!("src/{name}/{name}.csproj"), manifest);
    }

    pub fn write_file(&self, relative_path: &str, content: &str) {
        let file_path = self.dir.path().join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        fs::write(file_path, content).expect("failed to write file");
    }

    /// Stage everything and commit. Returns the commit id as hex.
    pub fn commit_all(&self, message: &str) -> String {
        let mut index = self.repo.index().expect("failed to open index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("failed to stage");
        index.write().expect("failed to write index");
        let tree_oid = index.write_tree().expect("failed to write tree");
        let tree = self.repo.find_tree(tree_oid).expect("failed to find tree");

        let signature = Signature::now("tester", "tester@example.net").unwrap();
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel(ObjectType::Commit).ok())
            .and_then(|obj| obj.into_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .expect("failed to commit")
            .to_string()
    }

    pub fn tag(&self, name: &str) {
        let commit = self.head_commit();
        self.repo
            .tag_lightweight(name, commit.as_object(), false)
            .expect("failed to create tag");
    }

    pub fn branch_and_checkout(&self, name: &str) {
        let commit = self.head_commit();
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

    pub fn head(&self) -> String {
        self.head_commit().id().to_string()
    }

    fn head_commit(&self) -> git2::Commit<'_> {
        let obj = self
            .repo
            .head()
            .and_then(|head| head.peel(ObjectType::Commit))
            .expect("failed to find head commit");
        obj.into_commit().ok().expect("head is not a commit")
    }
}
