//! Terminal shell driving the session state machine.
//!
//! The shell owns the session state and performs all IO: prompt rendering,
//! repository access, the completion call, and the commit. Each loop turn
//! handles one state, produces at most one [`SessionEvent`], and applies it.
//! The generation and commit cores take trait objects so tests can drive
//! them with fakes.

use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::{GcaError, Result};
use crate::git::repository::GitRepository;
use crate::git::{ChangeSet, DiffSource, GitOperations};
use crate::llm::message::CommitMessage;
use crate::llm::provider::create_provider;
use crate::llm::{CommitContext, CompletionProvider};
use crate::session::state::{SessionEvent, SessionState};
use crate::ui;
use crate::ui::Console;

/// Startup options carried over from the command line.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Pre-fill for the repository path prompt.
    pub initial_path: Option<PathBuf>,
    /// Provider name overriding `llm.default_provider`.
    pub provider_override: Option<String>,
}

/// Run the interactive session until the user quits.
pub async fn run(config: &AppConfig, options: &SessionOptions) -> Result<()> {
    let console = Console::new(config.ui.colored);

    // Early key check. A missing key must not block inspection, so this is
    // only a warning; every generate action re-resolves the provider and
    // surfaces the Auth error itself.
    let startup_check =
        create_provider(config, options.provider_override.as_deref()).and_then(|p| p.validate());
    if let Err(e) = startup_check {
        console.warning(&format!("Message generation unavailable: {}", e));
        if let Some(suggestion) = e.suggestion() {
            console.info(&suggestion);
        }
    }

    let mut state = SessionState::Idle;
    let mut last_path = options
        .initial_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    loop {
        state = match state {
            SessionState::Idle => match prompt_for_path(&last_path)? {
                Some(path) => {
                    last_path = path.display().to_string();
                    SessionState::Idle.apply(SessionEvent::PathSubmitted { path })
                }
                None => return Ok(()),
            },

            SessionState::Inspecting { path } => {
                console.step("1/4", &format!("Inspecting {}", path.display()));
                let event = match GitRepository::open(&path).and_then(|r| r.detect_changes()) {
                    Ok(changes) => {
                        if changes.has_changes() && changes.source == DiffSource::Unstaged {
                            console.info("Index is clean; describing unstaged changes.");
                        }
                        inspection_event(changes)
                    }
                    Err(e) => {
                        render_error(&e, &console);
                        SessionEvent::InspectFailed
                    }
                };
                SessionState::Inspecting { path }.apply(event)
            }

            SessionState::NoChanges { path } => {
                console.info("No changes detected in this repository.");
                let event = match ui::select(
                    "What next?",
                    &["Detect changes again", "Choose another repository", "Quit"],
                )? {
                    0 => SessionEvent::RetryDetect,
                    1 => SessionEvent::Reset,
                    _ => return Ok(()),
                };
                SessionState::NoChanges { path }.apply(event)
            }

            SessionState::Ready { path, diff } => {
                if config.commit.show_diff_preview {
                    let stats = crate::git::diff::parse_diff_stats(&diff)?;
                    println!("\n{}", console.diff_stats(&stats));
                }
                let event = match ui::select(
                    "What next?",
                    &[
                        "Generate commit message",
                        "Detect changes again",
                        "Choose another repository",
                        "Quit",
                    ],
                )? {
                    0 => SessionEvent::GenerateRequested,
                    1 => SessionEvent::RetryDetect,
                    2 => SessionEvent::Reset,
                    _ => return Ok(()),
                };
                SessionState::Ready { path, diff }.apply(event)
            }

            SessionState::Generating {
                path,
                diff,
                feedbacks,
            } => {
                console.step("2/4", "Generating commit message...");
                let event = match generate_at(config, options, &path, &diff, &feedbacks).await {
                    Ok(draft) => SessionEvent::GenerationSucceeded { draft },
                    Err(e) => {
                        render_error(&e, &console);
                        SessionEvent::GenerationFailed
                    }
                };
                SessionState::Generating {
                    path,
                    diff,
                    feedbacks,
                }
                .apply(event)
            }

            SessionState::Reviewing {
                path,
                diff,
                draft,
                feedbacks,
            } => {
                display_draft(&draft, &console);
                console.step("3/4", "Choose next action...");

                let event = match ui::select(
                    "What next?",
                    &[
                        "Commit this message",
                        "Edit message",
                        "Regenerate",
                        "Regenerate with feedback",
                        "Start over",
                        "Quit",
                    ],
                )? {
                    0 => {
                        // The explicit confirmation gate: nothing reaches the
                        // commit step without it.
                        if !config.commit.confirm_before_commit || ui::confirm_commit()? {
                            Some(SessionEvent::CommitConfirmed)
                        } else {
                            None
                        }
                    }
                    1 => match ui::edit_message(&draft) {
                        Ok(Some(new_draft)) => Some(SessionEvent::DraftEdited { draft: new_draft }),
                        Ok(None) => {
                            console.warning("Edit cancelled.");
                            None
                        }
                        Err(e) => {
                            render_error(&e, &console);
                            None
                        }
                    },
                    2 => Some(SessionEvent::RegenerateRequested { feedback: None }),
                    3 => {
                        let feedback = ui::optional_input("Feedback for the next attempt")?;
                        if feedback.is_none() {
                            console.warning("No feedback provided, regenerating as-is.");
                        }
                        Some(SessionEvent::RegenerateRequested { feedback })
                    }
                    4 => Some(SessionEvent::Reset),
                    _ => return Ok(()),
                };

                let state = SessionState::Reviewing {
                    path,
                    diff,
                    draft,
                    feedbacks,
                };
                match event {
                    Some(event) => state.apply(event),
                    None => state,
                }
            }

            SessionState::Committing {
                path,
                diff,
                draft,
                feedbacks,
            } => {
                console.step("4/4", "Creating commit...");
                let event = match commit_at(&path, &draft, config.commit.stage_all) {
                    Ok(()) => {
                        println!();
                        console.success("Commit created successfully!");
                        SessionEvent::CommitSucceeded
                    }
                    Err(e) => {
                        render_error(&e, &console);
                        SessionEvent::CommitFailed
                    }
                };
                SessionState::Committing {
                    path,
                    diff,
                    draft,
                    feedbacks,
                }
                .apply(event)
            }
        };
    }
}

/// Map a detected [`ChangeSet`] onto the event it produces: a non-empty
/// diff moves towards Ready, an empty one towards NoChanges (and never
/// towards the completion client).
pub fn inspection_event(changes: ChangeSet) -> SessionEvent {
    if changes.has_changes() {
        SessionEvent::ChangesDetected { diff: changes.diff }
    } else {
        SessionEvent::NothingToDetect
    }
}

/// Generate a draft for `diff`, building context from git metadata and
/// parsing the response. Pure orchestration over trait objects; the shell
/// and the tests share it.
pub async fn generate_draft(
    repo: &dyn GitOperations,
    provider: &dyn CompletionProvider,
    diff: &str,
    feedbacks: &[String],
) -> Result<CommitMessage> {
    let stats = repo.diff_stats(diff)?;
    let context = CommitContext {
        files_changed: stats.files_changed,
        insertions: stats.insertions,
        deletions: stats.deletions,
        branch_name: repo.current_branch()?,
        user_feedback: feedbacks.to_vec(),
    };

    let raw = provider.generate_commit_message(diff, Some(context)).await?;
    CommitMessage::parse(&raw)
}

/// Execute the confirmed commit: optionally stage the whole tree, then
/// commit the full message. Shared by the shell and the tests.
pub fn execute_commit(
    repo: &dyn GitOperations,
    draft: &CommitMessage,
    stage_all: bool,
) -> Result<()> {
    if stage_all {
        repo.stage_all()?;
    }
    repo.commit(&draft.full_message())
}

/// Resolve the provider and repository for the given path and generate.
async fn generate_at(
    config: &AppConfig,
    options: &SessionOptions,
    path: &Path,
    diff: &str,
    feedbacks: &[String],
) -> Result<CommitMessage> {
    let provider = create_provider(config, options.provider_override.as_deref())?;
    let repo = GitRepository::open(path)?;

    let spinner = ui::Spinner::new("Contacting the completion API...");
    let result = generate_draft(&repo, provider.as_ref(), diff, feedbacks).await;
    spinner.finish_and_clear();

    result
}

/// Open the repository at `path` and run the commit step.
fn commit_at(path: &Path, draft: &CommitMessage, stage_all: bool) -> Result<()> {
    let repo = GitRepository::open(path)?;
    execute_commit(&repo, draft, stage_all)
}

/// Path prompt shown in Idle. `None` means the user chose to quit.
fn prompt_for_path(last_path: &str) -> Result<Option<PathBuf>> {
    println!();
    match ui::select("What next?", &["Inspect a repository", "Quit"])? {
        0 => {
            let path = ui::input("Repository path", Some(last_path))?;
            Ok(Some(PathBuf::from(path.trim())))
        }
        _ => Ok(None),
    }
}

/// Show the draft with a shape hint when it is not conventional.
fn display_draft(draft: &CommitMessage, console: &Console) {
    println!();
    console.info("Commit message:");
    println!("{}", console.highlight(&draft.full_message()));

    if !draft.has_conventional_shape() {
        console.warning(
            "Summary does not match '<type>: <summary>'. Edit it if you want the conventional shape.",
        );
    }
}

fn render_error(err: &GcaError, console: &Console) {
    console.error(&err.to_string());
    if let Some(suggestion) = err.suggestion() {
        console.info(&suggestion);
    }
}
