pub mod base;
pub mod groq;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::Client;

use crate::config::{AppConfig, NetworkConfig, ProviderConfig};
use crate::error::{GcaError, Result};
use crate::llm::CompletionProvider;

/// Global HTTP client (shared connection pool).
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// First-initialization error, kept so later calls fail the same way
/// instead of retrying construction.
static HTTP_CLIENT_ERROR: OnceLock<String> = OnceLock::new();

/// Get or create the process-wide HTTP client.
///
/// The first caller's `NetworkConfig` decides the timeouts.
pub(crate) fn create_http_client(network_config: &NetworkConfig) -> Result<Client> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }

    if let Some(err_msg) = HTTP_CLIENT_ERROR.get() {
        return Err(GcaError::Other(format!(
            "HTTP client initialization failed earlier: {}",
            err_msg
        )));
    }

    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    match Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(network_config.request_timeout))
        .connect_timeout(Duration::from_secs(network_config.connect_timeout))
        .build()
    {
        Ok(client) => {
            let _ = HTTP_CLIENT.set(client.clone());
            Ok(client)
        }
        Err(e) => {
            let err_msg = e.to_string();
            let _ = HTTP_CLIENT_ERROR.set(err_msg.clone());
            Err(GcaError::Other(format!(
                "Failed to create HTTP client: {}",
                err_msg
            )))
        }
    }
}

/// Create the completion provider selected by config (or the override).
///
/// The built-in `groq` provider works without a `[llm.providers.groq]` table
/// as long as `GROQ_API_KEY` is set; any other name must have a table entry.
pub fn create_provider(
    config: &AppConfig,
    provider_name: Option<&str>,
) -> Result<Arc<dyn CompletionProvider>> {
    let name = provider_name.unwrap_or(&config.llm.default_provider);

    let provider_config = match config.llm.providers.get(name) {
        Some(cfg) => cfg.clone(),
        None if name == "groq" => ProviderConfig::default(),
        None => {
            return Err(GcaError::Config(format!(
                "Provider '{}' not found in config",
                name
            )));
        }
    };

    // api_style picks the wire format; the provider name is the fallback so
    // a plain [llm.providers.groq] table needs no explicit style.
    let api_style = provider_config.api_style.as_deref().unwrap_or(name);

    match api_style {
        "groq" => {
            let provider = groq::GroqProvider::new(&provider_config, name, &config.network)?;
            Ok(Arc::new(provider))
        }
        _ => Err(GcaError::Config(format!(
            "Unsupported api_style '{}' for provider '{}'",
            api_style, name
        ))),
    }
}
