pub mod schema;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::Result;
pub use schema::*;

/// Load the application configuration.
///
/// Precedence, highest first:
/// 1. Environment variables (`GCA__*`, double underscore for nesting)
///    - e.g. `GCA__LLM__DEFAULT_PROVIDER=groq`
///    - e.g. `GCA__UI__COLORED=false`
/// 2. Config file (`~/.config/gca/config.toml`)
/// 3. Built-in defaults
///
/// The provider API key is a special case: `GROQ_API_KEY` overrides the
/// config file value at provider construction time, so the secret can stay
/// out of the file entirely.
pub fn load_config() -> Result<AppConfig> {
    let mut builder = Config::builder();

    builder = builder
        .set_default("llm.default_provider", "groq")?
        .set_default("commit.stage_all", true)?
        .set_default("commit.show_diff_preview", true)?
        .set_default("commit.confirm_before_commit", true)?
        .set_default("ui.colored", true)?
        .set_default("ui.verbose", false)?
        .set_default("network.request_timeout", 120)?
        .set_default("network.connect_timeout", 10)?;

    if let Some(config_path) = get_config_path()
        && config_path.exists()
    {
        builder = builder.add_source(File::from(config_path));
    }

    // Double underscore as nesting separator avoids clashing with single
    // underscores inside field names.
    builder = builder.add_source(
        Environment::with_prefix("GCA")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

/// Path of the config file (`~/.config/gca/config.toml` on Linux).
fn get_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gca").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Config directory, for messages that point users at the file.
pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gca").map(|dirs| dirs.config_dir().to_path_buf())
}
