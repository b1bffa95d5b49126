use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for pod-publish operations
#[derive(Error, Debug)]
pub enum PodPublishError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed version: {0}")]
    MalformedVersion(String),

    #[error("Version assignment not found in {}", .0.display())]
    VersionNotFound(PathBuf),

    #[error("Podspec error: {0}")]
    Podspec(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in pod-publish
pub type Result<T> = std::result::Result<T, PodPublishError>;

impl PodPublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PodPublishError::Config(msg.into())
    }

    /// Create a malformed version error with context
    pub fn malformed_version(msg: impl Into<String>) -> Self {
        PodPublishError::MalformedVersion(msg.into())
    }

    /// Create a podspec error with context
    pub fn podspec(msg: impl Into<String>) -> Self {
        PodPublishError::Podspec(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        PodPublishError::Command(msg.into())
    }
}
