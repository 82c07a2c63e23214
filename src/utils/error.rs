use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unsupported file format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("Failed to decode {format} data: {message}")]
    DecodeError { format: &'static str, message: String },

    #[error("Failed to encode {format} data: {message}")]
    EncodeError { format: &'static str, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid input for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

/// Coarse classification of an [`EditorError`], used to pick diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    UnsupportedFormat,
    Decode,
    Encode,
    Io,
    InvalidInput,
    Config,
}

impl EditorError {
    pub fn decode(format: &'static str, message: impl Into<String>) -> Self {
        Self::DecodeError {
            format,
            message: message.into(),
        }
    }

    pub fn encode(format: &'static str, message: impl Into<String>) -> Self {
        Self::EncodeError {
            format,
            message: message.into(),
        }
    }

    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::DecodeError { .. } => ErrorKind::Decode,
            Self::EncodeError { .. } => ErrorKind::Encode,
            Self::IoError(_) => ErrorKind::Io,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::ConfigError { .. } => ErrorKind::Config,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("The file '{}' does not exist.", path.display())
            }
            Self::UnsupportedFormat { extension } if extension.is_empty() => {
                "The file has no extension, so its format is unknown.".to_string()
            }
            Self::UnsupportedFormat { extension } => {
                format!("Files with extension '{}' are not supported.", extension)
            }
            Self::DecodeError { format, message } => {
                format!("The file is not valid {}: {}", format, message)
            }
            Self::EncodeError { format, message } => {
                format!("Could not produce {} output: {}", format, message)
            }
            Self::IoError(e) => format!("A file system error occurred: {}", e),
            Self::InvalidInput { field, value, .. } => {
                format!("'{}' is not a valid {}.", value, field)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::FileNotFound => "Check the path, or start with an empty list and save.",
            ErrorKind::UnsupportedFormat => "Use a path ending in .txt, .json or .xml.",
            ErrorKind::Decode => "Make sure the file was saved by this tool in the matching format.",
            ErrorKind::Encode => "Check the record values and try again.",
            ErrorKind::Io => "Check permissions and free disk space for the target directory.",
            ErrorKind::InvalidInput => "Enter a number; the field was left unchanged.",
            ErrorKind::Config => "Fix the configuration file and restart.",
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
