//! Completion-provider abstractions and shared types.
//!
//! The only required method is [`CompletionProvider::send_prompt`]; the
//! commit-message convenience method builds the prompt pair via
//! [`prompt`] and cleans the response.

/// Commit message parsing (summary/body split).
pub mod message;
/// Prompt-building utilities for the commit flow.
pub mod prompt;
/// Built-in provider implementations and factory helpers.
pub mod provider;

use async_trait::async_trait;

use crate::error::Result;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Context passed to commit-message generation.
///
/// Enriches prompt construction with git metadata and accumulated
/// regeneration feedback.
#[derive(Debug, Clone, Default)]
pub struct CommitContext {
    /// Changed file paths, used as additional model context.
    pub files_changed: Vec<String>,
    /// Inserted lines in the diff.
    pub insertions: usize,
    /// Deleted lines in the diff.
    pub deletions: usize,
    /// Current branch name, if available.
    pub branch_name: Option<String>,
    /// Feedback collected from previous regenerate actions.
    pub user_feedback: Vec<String>,
}

/// Unified interface implemented by completion providers.
///
/// Implementations handle authentication and HTTP error mapping inside
/// `send_prompt`; they perform NO retries. A failed call is surfaced to the
/// session, where generating again is an explicit user action.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a pre-built `(system, user)` prompt pair and returns the raw
    /// generated text.
    async fn send_prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Convenience: builds the commit prompt for `diff` and delegates to
    /// [`send_prompt`](Self::send_prompt), stripping any markdown code
    /// fences the model wrapped around the message.
    async fn generate_commit_message(
        &self,
        diff: &str,
        context: Option<CommitContext>,
    ) -> Result<String> {
        let ctx = context.unwrap_or_default();
        let (system, user) = crate::llm::prompt::build_commit_prompt_split(diff, &ctx);
        tracing::debug!(
            "Commit prompt split - system ({} chars), user ({} chars)",
            system.len(),
            user.len()
        );
        let response = self.send_prompt(&system, &user).await?;
        Ok(crate::llm::provider::base::clean_commit_response(&response))
    }

    /// Provider name, for logs and error messages.
    fn name(&self) -> &str;

    /// Validates provider configuration (key present, etc.) without a
    /// network round trip.
    fn validate(&self) -> Result<()>;
}
