use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level application configuration, loaded from `~/.config/gca/config.toml`.
///
/// # Example
/// ```toml
/// [llm]
/// default_provider = "groq"
///
/// [llm.providers.groq]
/// api_key = "gsk_..."
/// model = "llama-3.3-70b-versatile"
///
/// [commit]
/// stage_all = true
///
/// [ui]
/// colored = true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LLMConfig,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub ui: UIConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Completion-provider selection and per-provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LLMConfig {
    /// Provider name to use; must be a key of `providers` (or one of the
    /// built-in styles, see the provider factory).
    pub default_provider: String,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Configuration for a single completion provider.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Wire format to speak: "groq" | "openai". Defaults to the provider name.
    #[serde(default)]
    pub api_style: Option<String>,

    /// Custom API base URL or full endpoint (the chat-completions suffix is
    /// appended when missing).
    pub endpoint: Option<String>,

    /// API key. The environment variable takes precedence (GROQ_API_KEY).
    pub api_key: Option<String>,

    /// Model identifier. Empty string means the provider default.
    #[serde(default)]
    pub model: String,

    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0-1.0).
    pub temperature: Option<f32>,
}

/// Commit behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommitConfig {
    /// Stage the whole working tree before committing, so a message generated
    /// from unstaged changes stays committable.
    #[serde(default = "default_true")]
    pub stage_all: bool,

    /// Show the diff stats line after detecting changes.
    #[serde(default = "default_true")]
    pub show_diff_preview: bool,

    /// Ask for a final confirmation before running the commit.
    #[serde(default = "default_true")]
    pub confirm_before_commit: bool,
}

/// Terminal output behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UIConfig {
    #[serde(default = "default_true")]
    pub colored: bool,

    #[serde(default)]
    pub verbose: bool,
}

/// HTTP timeouts for the completion call. There is no retry machinery: a
/// failed request is surfaced and the user decides whether to generate again.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

fn default_true() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    120
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            default_provider: "groq".to_string(),
            providers: HashMap::new(),
        }
    }
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            stage_all: true,
            show_diff_preview: true,
            confirm_before_commit: true,
        }
    }
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            colored: true,
            verbose: false,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}
