use crate::formats::DEFAULT_MARKER;
use crate::utils::error::{EditorError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_single_line, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Settings read from the optional TOML configuration file.
///
/// ```toml
/// [storage]
/// default_input = "${HOME}/cars.json"
///
/// [formats]
/// text_marker = "Car"
/// json_pretty = false
///
/// [logging]
/// level = "info"
/// json = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub storage: StorageSettings,
    pub formats: FormatSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// File loaded at start-up when no path is given on the command line.
    pub default_input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Line written before each record in text files.
    pub text_marker: String,
    pub json_pretty: bool,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            text_marker: DEFAULT_MARKER.to_string(),
            json_pretty: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl EditorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EditorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| EditorError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replace `${VAR_NAME}` placeholders with environment values. Unknown
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| EditorError::config(format!("invalid placeholder pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for EditorConfig {
    fn validate(&self) -> Result<()> {
        if let Some(input) = &self.storage.default_input {
            validate_path("storage.default_input", input)?;
        }

        validate_non_empty_string("formats.text_marker", &self.formats.text_marker)?;
        validate_single_line("formats.text_marker", &self.formats.text_marker)?;

        validate_one_of("logging.level", &self.logging.level, LOG_LEVELS)?;

        Ok(())
    }
}
