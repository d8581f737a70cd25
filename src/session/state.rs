//! Session state machine
//!
//! Purely functional state machine over the interactive session. IO
//! (prompts, git access, the completion call) lives in [`shell`](super::shell);
//! transitions here are side-effect free and easy to test.
//!
//! # State transition diagram
//! ```text
//! Idle ──path──> Inspecting ──changes──> Ready ──generate──> Generating
//!   ^                │    └──nothing──> NoChanges              │
//!   │                └──failure──> Idle      │                 │ success
//!   │                      ^─────re-detect───┘                 v
//!   │                                                      Reviewing <─┐
//!   │                               (failure returns to Ready)  │      │ edit /
//!   │                                                   confirm │      │ commit failure
//!   │                                                           v      │
//!   └──────────────────── success ───────────────────────── Committing ┘
//! ```
//!
//! No transition reaches the completion endpoint or the commit primitive
//! without an explicit user event driving it.

use std::path::PathBuf;

use crate::llm::message::CommitMessage;

/// Session state.
///
/// Each variant corresponds to a user-visible stage. Variants carry exactly
/// the data later stages need: the inspected path, the detected diff, the
/// current draft, and feedback accumulated across regenerations.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Waiting for a repository path.
    Idle,
    /// A path was submitted; the working tree is being inspected.
    Inspecting {
        /// Repository path under inspection.
        path: PathBuf,
    },
    /// Inspection found a clean working tree. Terminal for this cycle; the
    /// user may re-detect or pick another repository.
    NoChanges {
        /// Inspected repository path.
        path: PathBuf,
    },
    /// Changes were detected; generation may be requested.
    Ready {
        /// Inspected repository path.
        path: PathBuf,
        /// Detected diff text (non-empty).
        diff: String,
    },
    /// A completion request is in flight.
    Generating {
        /// Inspected repository path.
        path: PathBuf,
        /// Diff being described.
        diff: String,
        /// Feedback collected from previous regenerate actions.
        feedbacks: Vec<String>,
    },
    /// A draft message is shown for edit/approval.
    Reviewing {
        /// Inspected repository path.
        path: PathBuf,
        /// Diff the draft describes.
        diff: String,
        /// Current draft, possibly user-edited.
        draft: CommitMessage,
        /// Feedback history carried into future regenerations.
        feedbacks: Vec<String>,
    },
    /// The user confirmed the draft; the commit is being executed.
    Committing {
        /// Inspected repository path.
        path: PathBuf,
        /// Diff the draft describes (kept so a failed commit returns to
        /// Reviewing intact).
        diff: String,
        /// Confirmed message.
        draft: CommitMessage,
        /// Feedback history (restored on commit failure).
        feedbacks: Vec<String>,
    },
}

/// Events driving the session state machine.
///
/// Every event is triggered either by an explicit user action or by the
/// completion of the IO that a previous user action started.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// User submitted a repository path.
    PathSubmitted { path: PathBuf },
    /// Inspection found a non-empty diff.
    ChangesDetected { diff: String },
    /// Inspection found a clean working tree.
    NothingToDetect,
    /// Inspection failed (e.g. not a repository). The error was shown.
    InspectFailed,
    /// User asked to inspect the same repository again.
    RetryDetect,
    /// User requested message generation.
    GenerateRequested,
    /// The completion call produced a parseable draft.
    GenerationSucceeded { draft: CommitMessage },
    /// The completion call failed. The error was shown.
    GenerationFailed,
    /// User edited the draft.
    DraftEdited { draft: CommitMessage },
    /// User asked for a fresh generation, optionally with feedback.
    RegenerateRequested { feedback: Option<String> },
    /// User explicitly confirmed the draft for commit.
    CommitConfirmed,
    /// The commit was created.
    CommitSucceeded,
    /// The commit failed. The error was shown.
    CommitFailed,
    /// Abandon the current cycle and return to the path prompt.
    Reset,
}

impl SessionState {
    /// Short state name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Inspecting { .. } => "Inspecting",
            SessionState::NoChanges { .. } => "NoChanges",
            SessionState::Ready { .. } => "Ready",
            SessionState::Generating { .. } => "Generating",
            SessionState::Reviewing { .. } => "Reviewing",
            SessionState::Committing { .. } => "Committing",
        }
    }

    /// Apply an event (pure function).
    ///
    /// Invalid `(state, event)` pairs log an error and leave the state
    /// unchanged; the loop keeps running and the user retries.
    pub fn apply(self, event: SessionEvent) -> SessionState {
        use SessionEvent as E;
        use SessionState as S;

        match (self, event) {
            (S::Idle, E::PathSubmitted { path }) => S::Inspecting { path },

            (S::Inspecting { path }, E::ChangesDetected { diff }) => S::Ready { path, diff },
            (S::Inspecting { path }, E::NothingToDetect) => S::NoChanges { path },
            (S::Inspecting { .. }, E::InspectFailed) => S::Idle,

            (S::NoChanges { path }, E::RetryDetect) => S::Inspecting { path },
            (S::Ready { path, .. }, E::RetryDetect) => S::Inspecting { path },

            (S::Ready { path, diff }, E::GenerateRequested) => S::Generating {
                path,
                diff,
                feedbacks: Vec::new(),
            },

            (S::Generating { path, diff, feedbacks }, E::GenerationSucceeded { draft }) => {
                S::Reviewing {
                    path,
                    diff,
                    draft,
                    feedbacks,
                }
            }
            // Failure falls back to Ready; the user may generate again.
            (S::Generating { path, diff, .. }, E::GenerationFailed) => S::Ready { path, diff },

            (
                S::Reviewing {
                    path, diff, feedbacks, ..
                },
                E::DraftEdited { draft },
            ) => S::Reviewing {
                path,
                diff,
                draft,
                feedbacks,
            },

            (
                S::Reviewing {
                    path,
                    diff,
                    mut feedbacks,
                    ..
                },
                E::RegenerateRequested { feedback },
            ) => {
                if let Some(fb) = feedback {
                    feedbacks.push(fb);
                }
                S::Generating {
                    path,
                    diff,
                    feedbacks,
                }
            }

            (
                S::Reviewing {
                    path,
                    diff,
                    draft,
                    feedbacks,
                },
                E::CommitConfirmed,
            ) => S::Committing {
                path,
                diff,
                draft,
                feedbacks,
            },

            (S::Committing { .. }, E::CommitSucceeded) => S::Idle,
            (
                S::Committing {
                    path,
                    diff,
                    draft,
                    feedbacks,
                },
                E::CommitFailed,
            ) => S::Reviewing {
                path,
                diff,
                draft,
                feedbacks,
            },

            (_, E::Reset) => S::Idle,

            (state, event) => {
                tracing::error!(
                    "invalid session transition: {:?} while in {}",
                    event,
                    state.name()
                );
                state
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft(summary: &str) -> CommitMessage {
        CommitMessage {
            summary: summary.to_string(),
            body: None,
        }
    }

    fn path() -> PathBuf {
        PathBuf::from("/tmp/repo")
    }

    // === happy path ===

    #[test]
    fn test_full_cycle_to_committed() {
        let state = SessionState::Idle
            .apply(SessionEvent::PathSubmitted { path: path() })
            .apply(SessionEvent::ChangesDetected {
                diff: "+fn main() {}".to_string(),
            })
            .apply(SessionEvent::GenerateRequested)
            .apply(SessionEvent::GenerationSucceeded {
                draft: draft("feat: add main"),
            })
            .apply(SessionEvent::CommitConfirmed)
            .apply(SessionEvent::CommitSucceeded);

        assert_eq!(state, SessionState::Idle);
    }

    // === inspection ===

    #[test]
    fn test_path_submitted_starts_inspection() {
        let state = SessionState::Idle.apply(SessionEvent::PathSubmitted { path: path() });
        assert!(matches!(state, SessionState::Inspecting { .. }));
    }

    #[test]
    fn test_clean_tree_goes_to_no_changes() {
        let state = SessionState::Inspecting { path: path() }.apply(SessionEvent::NothingToDetect);
        assert!(matches!(state, SessionState::NoChanges { .. }));
    }

    #[test]
    fn test_inspect_failure_returns_to_idle() {
        let state = SessionState::Inspecting { path: path() }.apply(SessionEvent::InspectFailed);
        assert_eq!(state, SessionState::Idle);
    }

    #[test]
    fn test_no_changes_allows_retry() {
        let state = SessionState::NoChanges { path: path() }.apply(SessionEvent::RetryDetect);
        assert!(matches!(state, SessionState::Inspecting { .. }));
    }

    #[test]
    fn test_ready_allows_re_detect() {
        let state = SessionState::Ready {
            path: path(),
            diff: "+x".to_string(),
        }
        .apply(SessionEvent::RetryDetect);
        assert!(matches!(state, SessionState::Inspecting { .. }));
    }

    // === generation ===

    #[test]
    fn test_generate_requested_carries_diff() {
        let state = SessionState::Ready {
            path: path(),
            diff: "+line".to_string(),
        }
        .apply(SessionEvent::GenerateRequested);

        assert!(matches!(state, SessionState::Generating { ref diff, ref feedbacks, .. }
            if diff == "+line" && feedbacks.is_empty()));
    }

    #[test]
    fn test_generation_failure_returns_to_ready_with_diff() {
        let state = SessionState::Generating {
            path: path(),
            diff: "+line".to_string(),
            feedbacks: vec![],
        }
        .apply(SessionEvent::GenerationFailed);

        assert!(matches!(state, SessionState::Ready { ref diff, .. } if diff == "+line"));
    }

    #[test]
    fn test_generation_success_preserves_feedbacks() {
        let feedbacks = vec!["shorter".to_string(), "mention tests".to_string()];
        let state = SessionState::Generating {
            path: path(),
            diff: "+line".to_string(),
            feedbacks: feedbacks.clone(),
        }
        .apply(SessionEvent::GenerationSucceeded {
            draft: draft("feat: x"),
        });

        if let SessionState::Reviewing { feedbacks: f, .. } = state {
            assert_eq!(f, feedbacks);
        } else {
            panic!("Expected Reviewing");
        }
    }

    // === reviewing ===

    #[test]
    fn test_edit_replaces_draft_only() {
        let state = SessionState::Reviewing {
            path: path(),
            diff: "+line".to_string(),
            draft: draft("feat: original"),
            feedbacks: vec!["fb".to_string()],
        }
        .apply(SessionEvent::DraftEdited {
            draft: draft("feat: edited"),
        });

        if let SessionState::Reviewing {
            draft, feedbacks, ..
        } = state
        {
            assert_eq!(draft.summary, "feat: edited");
            assert_eq!(feedbacks, vec!["fb".to_string()]);
        } else {
            panic!("Expected Reviewing");
        }
    }

    #[test]
    fn test_regenerate_accumulates_feedback() {
        let state = SessionState::Reviewing {
            path: path(),
            diff: "+line".to_string(),
            draft: draft("feat: x"),
            feedbacks: vec!["first".to_string()],
        }
        .apply(SessionEvent::RegenerateRequested {
            feedback: Some("second".to_string()),
        });

        if let SessionState::Generating { feedbacks, .. } = state {
            assert_eq!(feedbacks, vec!["first".to_string(), "second".to_string()]);
        } else {
            panic!("Expected Generating");
        }
    }

    #[test]
    fn test_regenerate_without_feedback() {
        let state = SessionState::Reviewing {
            path: path(),
            diff: "+line".to_string(),
            draft: draft("feat: x"),
            feedbacks: vec![],
        }
        .apply(SessionEvent::RegenerateRequested { feedback: None });

        if let SessionState::Generating { feedbacks, .. } = state {
            assert!(feedbacks.is_empty());
        } else {
            panic!("Expected Generating");
        }
    }

    // === committing ===

    #[test]
    fn test_commit_failure_restores_reviewing() {
        let state = SessionState::Committing {
            path: path(),
            diff: "+line".to_string(),
            draft: draft("feat: x"),
            feedbacks: vec!["fb".to_string()],
        }
        .apply(SessionEvent::CommitFailed);

        if let SessionState::Reviewing {
            draft,
            diff,
            feedbacks,
            ..
        } = state
        {
            assert_eq!(draft.summary, "feat: x");
            assert_eq!(diff, "+line");
            assert_eq!(feedbacks, vec!["fb".to_string()]);
        } else {
            panic!("Expected Reviewing");
        }
    }

    // === defensive handling ===

    #[test]
    fn test_invalid_event_leaves_state_unchanged() {
        let state = SessionState::Ready {
            path: path(),
            diff: "+line".to_string(),
        };
        let after = state.clone().apply(SessionEvent::CommitSucceeded);
        assert_eq!(after, state);
    }

    #[test]
    fn test_generate_from_no_changes_is_rejected() {
        // The clean-tree state must never start a completion call.
        let state = SessionState::NoChanges { path: path() };
        let after = state.clone().apply(SessionEvent::GenerateRequested);
        assert_eq!(after, state);
    }

    #[test]
    fn test_reset_from_any_state() {
        let states = vec![
            SessionState::Inspecting { path: path() },
            SessionState::NoChanges { path: path() },
            SessionState::Ready {
                path: path(),
                diff: "+x".to_string(),
            },
            SessionState::Reviewing {
                path: path(),
                diff: "+x".to_string(),
                draft: draft("feat: x"),
                feedbacks: vec![],
            },
        ];

        for state in states {
            assert_eq!(state.apply(SessionEvent::Reset), SessionState::Idle);
        }
    }
}
