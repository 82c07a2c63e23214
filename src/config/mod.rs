pub mod toml_config;

pub use toml_config::{EditorConfig, FormatSettings};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "car-editor")]
#[command(about = "View and edit vehicle records stored as text, JSON or XML")]
pub struct CliConfig {
    /// File to load (.txt, .json or .xml); prompted for when omitted
    pub input: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}
