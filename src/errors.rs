use std::path::PathBuf;

use thiserror::Error;

/// Top-level error returned by a pipeline run. Each variant names the stage that failed.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("Write failed: {0}")]
    Write(#[from] WriteError),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::Scan(ScanError::InvalidRoot { .. }) => 3,
            AppError::Write(_) => 4,
            _ => 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Project root '{}' {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },
    #[error("Cannot read source file '{}': {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Language setup error: {0}")]
    Language(String),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to serialize methods: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to replace '{}': {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}
