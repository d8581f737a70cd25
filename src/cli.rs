use std::path::PathBuf;

use clap::{Parser, builder::styling};

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Startup options. Everything else happens inside the interactive session.
#[derive(Parser)]
#[command(name = "gca-rs")]
#[command(author, version, about = "AI-assisted Git commit message generator", long_about = None)]
#[command(styles = STYLES)]
pub struct Cli {
    /// Repository path to pre-fill in the session prompt
    pub path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the configured completion provider
    #[arg(short, long)]
    pub provider: Option<String>,
}
