use std::path::Path;
use std::process::Command;

use crate::error::{GcaError, Result};

/// Run `git commit` in `workdir` with the given message.
///
/// The git CLI is used instead of libgit2 so that:
/// - GPG signing (commit.gpgsign, user.signingkey) keeps working
/// - git hooks (pre-commit, commit-msg, ...) keep running
/// - every git config setting is honored
pub fn commit_changes(workdir: &Path, message: &str) -> Result<()> {
    let output = Command::new("git")
        .current_dir(workdir)
        .args(["commit", "-m", message])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let error_msg = if stderr.trim().is_empty() {
            // Some git errors go to stdout instead of stderr.
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(GcaError::CommitFailed(error_msg));
    }

    Ok(())
}
