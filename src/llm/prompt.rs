use crate::llm::CommitContext;

/// Static system directives (cacheable) for commit-message generation.
///
/// The type vocabulary below must stay in sync with [`COMMIT_TYPES`].
const COMMIT_SYSTEM_PROMPT: &str = r#"You are an expert software engineer and technical writer.
Your task is to generate a clear, concise, and meaningful Git commit message based on the provided git diff.

Follow these strict rules:
1. Read the diff carefully and identify what was changed, added, removed, or refactored.
2. Summarize the purpose of the change, not just what was modified.
3. Use present tense (e.g., add, fix, update, remove) in the message.
4. Keep the first line (the commit title) under 72 characters.
5. If there are multiple logical changes, summarize them in short, separate sentences in the commit body (one per line).
6. Do NOT include bullet points, asterisks, markdown formatting, or code blocks.
7. Do NOT include backticks or quotation marks around filenames.
8. The message must follow this format exactly:

<type>: <short summary>

<optional longer description or multiple lines, one per logical change>

Where <type> can be one of:
feat: for a new feature
fix: for a bug fix
refactor: for code restructuring
docs: for documentation updates
style: for code style or formatting changes
test: for adding or updating tests
chore: for build, dependency, or config updates

Output ONLY the commit message, no explanation."#;

/// Format accumulated regeneration feedback.
fn format_feedbacks(feedbacks: &[String]) -> String {
    if feedbacks.is_empty() {
        return String::new();
    }
    let mut result = String::from("\n\n## User Requirements:\n");
    for (i, fb) in feedbacks.iter().enumerate() {
        result.push_str(&format!("{}. {}\n", i + 1, fb));
    }
    result
}

/// Build the commit prompt as a `(system_prompt, user_message)` pair.
///
/// - system: static instructions (grammar, rules, type vocabulary)
/// - user: dynamic content (diff verbatim + context + feedback)
///
/// Deterministic: the same diff and context always produce the same pair.
pub fn build_commit_prompt_split(diff: &str, context: &CommitContext) -> (String, String) {
    let system = COMMIT_SYSTEM_PROMPT.to_string();

    let branch_info = context
        .branch_name
        .as_ref()
        .map(|b| format!("\nBranch: {}", b))
        .unwrap_or_default();

    let user = format!(
        "## Diff:\n```\n{}\n```\n\n## Context:\nFiles: {}\nChanges: +{} -{}{}{}",
        diff,
        context.files_changed.join(", "),
        context.insertions,
        context.deletions,
        branch_info,
        format_feedbacks(&context.user_feedback)
    );

    (system, user)
}
