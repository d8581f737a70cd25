//! # gca-rs
//!
//! AI-assisted Git commit message generator with an interactive review
//! session.
//!
//! ## What it does
//! - **Change detection**: reads the staged diff of a chosen repository,
//!   falling back to the unstaged diff when the index is clean
//! - **Commit message generation**: asks a Groq-hosted model for a
//!   Conventional-Commits-shaped message describing the diff
//! - **Review loop**: the generated message is shown for editing,
//!   regeneration (optionally with feedback), or explicit commit approval
//! - **Commit**: stages the working tree and commits through the `git` CLI
//!   so hooks and signing keep working
//!
//! ## Quick start
//! ```bash
//! cargo install gca-rs
//!
//! export GROQ_API_KEY=gsk_...
//! gca-rs            # interactive session in the current repository
//! gca-rs ~/code/app # pre-fill another repository path
//! ```
//!
//! ## Library use
//! ```ignore
//! use std::path::Path;
//!
//! use gca_rs::git::{GitOperations, repository::GitRepository};
//! use gca_rs::llm::CompletionProvider;
//! use gca_rs::llm::provider::groq::GroqProvider;
//! use gca_rs::config::{NetworkConfig, ProviderConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let repo = GitRepository::open(Path::new("."))?;
//! let changes = repo.detect_changes()?;
//!
//! let config = ProviderConfig {
//!     api_key: Some("gsk_...".to_string()),
//!     ..Default::default()
//! };
//! let provider = GroqProvider::new(&config, "groq", &NetworkConfig::default())?;
//!
//! let message = provider.generate_commit_message(&changes.diff, None).await?;
//! println!("Generated: {}", message);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core modules
//! - [`git`] - version-control boundary (inspection, staging, commit)
//! - [`llm`] - prompt construction, message parsing, completion providers
//! - [`session`] - interactive state machine and terminal shell
//! - [`config`] - configuration management
//! - [`error`] - unified error type
//! - [`ui`] - terminal output helpers
//!
//! ## Configuration
//! `~/.config/gca/config.toml` (or the platform equivalent), overridable
//! with `GCA__*` environment variables. The API key is read from
//! `GROQ_API_KEY` first:
//! ```toml
//! [llm]
//! default_provider = "groq"
//!
//! [llm.providers.groq]
//! api_key = "gsk_..."
//! model = "llama-3.3-70b-versatile"
//!
//! [commit]
//! stage_all = true
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod session;
pub mod ui;
