pub mod commit;
pub mod diff;
pub mod repository;

use crate::error::Result;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Which side of the index the detected diff came from.
///
/// The staged diff is preferred; the unstaged diff is the fallback when the
/// index is clean, matching `git diff --cached || git diff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSource {
    Staged,
    Unstaged,
}

/// Result of inspecting a repository's working tree.
///
/// An empty diff is not an error; it means there is nothing to describe and
/// the session reports "no changes" instead of calling the model.
#[derive(Debug, Clone)]
pub struct ChangeSet {
    /// Unified diff text. May be empty.
    pub diff: String,
    /// Where the diff came from. Meaningless when `diff` is empty.
    pub source: DiffSource,
}

impl ChangeSet {
    pub fn empty() -> Self {
        Self {
            diff: String::new(),
            source: DiffSource::Staged,
        }
    }

    /// Change-present flag: whitespace-only diffs count as no changes.
    pub fn has_changes(&self) -> bool {
        !self.diff.trim().is_empty()
    }
}

/// Narrow interface over the version-control boundary.
///
/// Everything the session needs from git goes through this trait so tests
/// can substitute a fake without touching a real repository. The main
/// implementation is [`GitRepository`](repository::GitRepository).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait GitOperations {
    /// Detects working-tree changes: the staged diff when the index has
    /// content, otherwise the unstaged diff. Read-only.
    fn detect_changes(&self) -> Result<ChangeSet>;

    /// Parses file list and +/- line counts out of diff text.
    fn diff_stats(&self, diff: &str) -> Result<DiffStats>;

    /// Current branch name, `None` on a detached HEAD or unborn branch.
    fn current_branch(&self) -> Result<Option<String>>;

    /// Whether the index currently holds staged changes.
    fn has_staged_changes(&self) -> Result<bool>;

    /// Stages every working-tree change (tracked and untracked).
    fn stage_all(&self) -> Result<()>;

    /// Commits the staged changes with `message`.
    ///
    /// # Errors
    /// - [`GcaError::NothingToCommit`] when the index is empty
    /// - [`GcaError::CommitFailed`] on any other non-zero git exit
    ///
    /// [`GcaError::NothingToCommit`]: crate::error::GcaError::NothingToCommit
    /// [`GcaError::CommitFailed`]: crate::error::GcaError::CommitFailed
    fn commit(&self, message: &str) -> Result<()>;
}

/// Diff statistics used for the preview line and as prompt context.
#[derive(Debug, Clone)]
pub struct DiffStats {
    pub files_changed: Vec<String>,
    pub insertions: usize,
    pub deletions: usize,
}
