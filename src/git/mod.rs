//! Repository context via `git2`
//!
//! The publish steps shell out to the `git` CLI so that credential helpers
//! and proxy variables behave exactly as in a terminal. Read-only questions
//! asked before publishing (where is the work tree, which branch is checked
//! out, does the tag already exist) are answered in-process here.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use tracing::debug;

use crate::error::{PodPublishError, Result};

/// Read-only view of the repository that holds the podspec
pub struct RepoContext {
    repo: Repository,
}

impl RepoContext {
    /// Discover the repository containing `path` (a file or a directory)
    pub fn discover(path: &Path) -> Result<Self> {
        let start = match path.parent() {
            Some(parent) if path.is_file() && !parent.as_os_str().is_empty() => parent,
            Some(_) if path.is_file() => Path::new("."),
            _ => path,
        };

        let repo = Repository::discover(start)?;
        debug!(path = %repo.path().display(), "discovered repository");
        Ok(RepoContext { repo })
    }

    /// Root of the work tree; every publish command runs here
    pub fn work_dir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| PodPublishError::config("Bare repositories cannot be published from"))
    }

    /// Short name of the checked-out branch, `None` on a detached HEAD
    /// or an unborn branch without commits.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Ok(None);
        }

        Ok(head.shorthand().map(str::to_string))
    }

    pub fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) if e.code() == ErrorCode::InvalidSpec => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn has_remote(&self, remote_name: &str) -> Result<bool> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().any(|name| name == remote_name))
    }
}
