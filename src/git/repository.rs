use git2::{DiffOptions, IndexAddOption, Repository};
use std::io::Write;
use std::path::Path;

use crate::error::{GcaError, Result};
use crate::git::{ChangeSet, DiffSource, DiffStats, GitOperations};

/// Read side of the version-control boundary, backed by libgit2.
///
/// Opened at a user-supplied path; `Repository::discover` walks up to the
/// containing repository, so any path inside a working tree is accepted.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository containing `path`.
    ///
    /// # Errors
    /// [`GcaError::NotARepository`] when `path` does not exist or no git
    /// metadata is found above it.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|_| GcaError::NotARepository(path.display().to_string()))?;
        Ok(Self { repo })
    }

    /// Render a git2 diff as unified patch text.
    fn diff_to_string(&self, diff: &git2::Diff) -> Result<String> {
        let mut output = Vec::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            let origin = line.origin();

            // Line markers (+, -, space) are not part of line.content().
            match origin {
                '+' | '-' | ' ' => {
                    let _ = output.write_all(&[origin as u8]);
                }
                _ => {}
            }

            let _ = output.write_all(line.content());
            true
        })?;
        Ok(String::from_utf8_lossy(&output).to_string())
    }

    /// Diff of HEAD tree vs index (`git diff --cached`).
    fn staged_diff(&self) -> Result<String> {
        let index = self.repo.index()?;

        // Unborn branch: diff the empty tree against the index.
        if self.is_unborn()? {
            let mut opts = DiffOptions::new();
            let diff = self
                .repo
                .diff_tree_to_index(None, Some(&index), Some(&mut opts))?;
            return self.diff_to_string(&diff);
        }

        let head = self.repo.head()?;
        let head_tree = head.peel_to_tree()?;

        let mut opts = DiffOptions::new();
        let diff =
            self.repo
                .diff_tree_to_index(Some(&head_tree), Some(&index), Some(&mut opts))?;

        self.diff_to_string(&diff)
    }

    /// Diff of index vs workdir (`git diff` without `--cached`).
    fn unstaged_diff(&self) -> Result<String> {
        let index = self.repo.index()?;

        let mut opts = DiffOptions::new();
        let diff = self
            .repo
            .diff_index_to_workdir(Some(&index), Some(&mut opts))?;

        self.diff_to_string(&diff)
    }

    /// Whether HEAD points at an unborn branch (repository without commits).
    fn is_unborn(&self) -> Result<bool> {
        match self.repo.head() {
            Ok(_) => Ok(false),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    /// Working directory of the repository. Bare repositories are rejected
    /// (there is no tree to diff or commit from).
    fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| GcaError::InvalidInput("bare repository has no working tree".into()))
    }
}

impl GitOperations for GitRepository {
    fn detect_changes(&self) -> Result<ChangeSet> {
        let staged = self.staged_diff()?;
        if !staged.trim().is_empty() {
            return Ok(ChangeSet {
                diff: staged,
                source: DiffSource::Staged,
            });
        }

        let unstaged = self.unstaged_diff()?;
        if unstaged.trim().is_empty() {
            return Ok(ChangeSet::empty());
        }

        Ok(ChangeSet {
            diff: unstaged,
            source: DiffSource::Unstaged,
        })
    }

    fn diff_stats(&self, diff: &str) -> Result<DiffStats> {
        crate::git::diff::parse_diff_stats(diff)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        if self.is_unborn()? {
            return Ok(None);
        }

        let head = self.repo.head()?;

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            // Detached HEAD.
            Ok(None)
        }
    }

    fn has_staged_changes(&self) -> Result<bool> {
        let diff = self.staged_diff()?;
        Ok(!diff.trim().is_empty())
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        // add_all does not record deletions of tracked files.
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        if !self.has_staged_changes()? {
            return Err(GcaError::NothingToCommit);
        }
        crate::git::commit::commit_changes(self.workdir()?, message)
    }
}
