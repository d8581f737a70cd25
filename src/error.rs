use thiserror::Error;

pub type Result<T> = std::result::Result<T, GcaError>;

#[derive(Error, Debug)]
pub enum GcaError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Nothing to commit: no staged changes")]
    NothingToCommit,

    #[error("Commit failed: {0}")]
    CommitFailed(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited by the completion API: {message}")]
    RateLimited {
        /// Seconds to wait, when the API sent a parseable Retry-After header.
        retry_after: Option<u64>,
        message: String,
    },

    #[error("Completion API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parsing error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("UI error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for errors that fit no other variant.
    #[error("{0}")]
    Other(String),
}

impl GcaError {
    /// Returns a recovery hint for the error, if one exists.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            GcaError::NotARepository(path) => Some(format!(
                "'{}' has no .git directory. Check the path or run 'git init' first",
                path
            )),
            GcaError::NothingToCommit => {
                Some("Make some changes (or run 'git add <files>') and detect again".to_string())
            }
            GcaError::Auth(_) => Some(
                "Set GROQ_API_KEY, or add 'api_key = \"gsk_...\"' to [llm.providers.groq] \
                 in ~/.config/gca/config.toml"
                    .to_string(),
            ),
            GcaError::RateLimited { retry_after, .. } => Some(match retry_after {
                Some(secs) => format!("Wait {} second(s) before generating again", secs),
                None => "Wait a moment and generate again".to_string(),
            }),
            GcaError::Network(_) => Some(
                "Check your network connection, proxy settings, or the configured endpoint"
                    .to_string(),
            ),
            GcaError::Api { status, .. } if *status >= 500 => Some(
                "The API service is temporarily unavailable. Generate again in a few moments"
                    .to_string(),
            ),
            GcaError::EmptyResponse => {
                Some("Generate again; the model produced no usable text".to_string())
            }
            GcaError::Config(msg) if msg.contains("not found in config") => Some(
                "Check [llm.providers] in ~/.config/gca/config.toml; the default provider is 'groq'"
                    .to_string(),
            ),
            _ => None,
        }
    }
}
