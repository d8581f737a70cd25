use crate::error::{GcaError, Result};

/// Recognized conventional-commit types, in prompt order.
pub const COMMIT_TYPES: &[&str] = &[
    "feat", "fix", "refactor", "docs", "style", "test", "chore",
];

/// A commit message split into its summary line and optional body.
///
/// Produced by [`CommitMessage::parse`] from raw model output, edited
/// freely by the user, and consumed once by the commit step via
/// [`full_message`](CommitMessage::full_message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// First non-empty line of the generated text.
    pub summary: String,
    /// Remaining non-empty lines, `None` when there are none.
    pub body: Option<String>,
}

impl CommitMessage {
    /// Parse raw generated text into summary and body.
    ///
    /// The first non-empty line becomes the summary. No repair is attempted
    /// when it does not match the `<type>: <text>` shape; the text is kept
    /// as-is for the user to edit. Remaining non-empty lines become the body.
    ///
    /// # Errors
    /// [`GcaError::EmptyResponse`] when the text is blank or whitespace-only.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(GcaError::EmptyResponse);
        }

        let mut lines = raw.lines().map(str::trim);

        let summary = lines
            .by_ref()
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or(GcaError::EmptyResponse)?;

        let body_lines: Vec<&str> = lines.filter(|line| !line.is_empty()).collect();
        let body = if body_lines.is_empty() {
            None
        } else {
            Some(body_lines.join("\n"))
        };

        Ok(Self { summary, body })
    }

    /// The message as handed to the commit step: summary, then a blank line
    /// and the body when one exists.
    pub fn full_message(&self) -> String {
        match &self.body {
            Some(body) => format!("{}\n\n{}", self.summary, body),
            None => self.summary.clone(),
        }
    }

    /// Whether the summary matches `<type>: <text>` or `<type>(<scope>): <text>`
    /// for one of [`COMMIT_TYPES`].
    ///
    /// Display hint only. A failed check never blocks the flow; the user
    /// decides whether to edit.
    pub fn has_conventional_shape(&self) -> bool {
        let Some((head, rest)) = self.summary.split_once(':') else {
            return false;
        };
        if rest.trim().is_empty() {
            return false;
        }

        let ty = match head.split_once('(') {
            Some((ty, scope)) => {
                if !scope.ends_with(')') || scope.len() < 2 {
                    return false;
                }
                ty
            }
            None => head,
        };

        COMMIT_TYPES.contains(&ty.trim())
    }
}
