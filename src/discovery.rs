//! Project discovery in the repository work tree
//!
//! Walks the work tree for `*.csproj` manifests and builds a [`ProjectRef`]
//! per project: direct dependencies from `ProjectReference` entries, the
//! packable and test flags from the manifest properties. Manifest contents
//! are read from the HEAD commit so an uncommitted edit does not move a
//! version decision; projects not yet committed fall back to the work tree.

use std::fs;
use std::path::Path;

use regex::Regex;
use walkdir::WalkDir;

use crate::project::{normalize_path, resolve_relative};
use crate::{Error, ProjectRef, RepoSource};

const MANIFEST_EXTENSION: &str = "csproj";

/// Discover the projects under `root`.
///
/// Returns the projects sorted by directory path. A repository with no
/// project manifests yields an empty list, not an error.
pub fn discover_projects(root: &Path, repo: &dyn RepoSource) -> Result<Vec<ProjectRef>, Error> {
    let head = repo.current_branch()?.tip;

    let mut projects = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
    {
        let entry = entry.map_err(|e| Error::RepoUnavailable(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some(MANIFEST_EXTENSION) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();
        let manifest_path = normalize_path(&relative);

        let content = match repo.read_blob(&head, &manifest_path) {
            Ok(Some(bytes)) => bytes,
            _ => {
                log::debug!("`{manifest_path}` not in HEAD, reading the work tree");
                fs::read(entry.path())?
            }
        };
        let content = String::from_utf8_lossy(&content);

        projects.push(parse_manifest(&manifest_path, &content));
    }

    projects.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::info!("discovered {} projects", projects.len());
    Ok(projects)
}

fn parse_manifest(manifest_path: &str, content: &str) -> ProjectRef {
    let name = Path::new(manifest_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = match manifest_path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    };

    let mut project = ProjectRef::new(&name, &dir);
    project.dependencies = dependencies(&dir, content);
    project.is_packable = is_packable(content);
    project.is_test = is_test(content);
    log::debug!(
        "project `{}` at `{}`: {} dependencies, packable={}, test={}",
        project.name,
        project.relative_path,
        project.dependencies.len(),
        project.is_packable,
        project.is_test
    );
    project
}

/// Directories of directly referenced projects.
fn dependencies(dir: &str, content: &str) -> Vec<String> {
    let re = Regex::new(r#"(?i)<ProjectReference[^>]*Include\s*=\s*"([^"]+)""#).unwrap();
    let mut dirs = Vec::new();
    for captures in re.captures_iter(content) {
        let reference = resolve_relative(dir, &captures[1]);
        let dep_dir = match reference.rsplit_once('/') {
            Some((dir, _file)) => dir.to_string(),
            None => String::new(),
        };
        if !dirs.contains(&dep_dir) {
            dirs.push(dep_dir);
        }
    }
    dirs
}

fn is_packable(content: &str) -> bool {
    let re = Regex::new(r"(?i)<IsPackable>\s*false\s*</IsPackable>").unwrap();
    !re.is_match(content)
}

fn is_test(content: &str) -> bool {
    let property = Regex::new(r"(?i)<IsTestProject>\s*true\s*</IsTestProject>").unwrap();
    let test_sdk = Regex::new(r#"(?i)<PackageReference[^>]*Include\s*=\s*"Microsoft\.NET\.Test\.Sdk""#)
        .unwrap();
    property.is_match(content) || test_sdk.is_match(content)
}
