//! Error types for subfix.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubfixError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Transcript errors
    #[error("Transcript parse error: {0}")]
    TranscriptParse(#[from] serde_json::Error),

    #[error("Transcript has no segments")]
    EmptyTranscript,

    // Refiner errors
    #[error("Missing API key: set {env_var}")]
    MissingApiKey { env_var: String },

    #[error("Refiner request failed: {message}")]
    RefineRequest { message: String },

    #[error("Refiner returned an unusable reply: {message}")]
    RefineReply { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SubfixError>;
