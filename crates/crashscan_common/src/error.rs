//! Error types for crashscan.
//!
//! Every variant here is a configuration-time failure. Analysis itself
//! (detect, parse, classify, symbolize) never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid signature pattern '{pattern}': {source}")]
    InvalidSignature {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Signature pattern '{pattern}' has {groups} capture groups (at most one allowed)")]
    TooManyCaptureGroups { pattern: String, groups: usize },

    #[error("Signature pattern '{pattern}' has an empty label")]
    EmptyLabel { pattern: String },

    #[error("Unknown target system: {0}")]
    UnknownTarget(String),

    #[error("Target already registered: {0}")]
    DuplicateTarget(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ScanError {
    /// Stable process exit code for this error
    pub fn code(&self) -> i32 {
        match self {
            ScanError::InvalidSignature { .. } => 65,
            ScanError::TooManyCaptureGroups { .. } => 65,
            ScanError::EmptyLabel { .. } => 65,
            ScanError::UnknownTarget(_) => 66,
            ScanError::DuplicateTarget(_) => 66,
            ScanError::Config(_) => 78,
            ScanError::Io(_) => 74,
            ScanError::Toml(_) => 78,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
