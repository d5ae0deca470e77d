use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("OMERE executable not found: {0}")]
    ExecutableNotFound(PathBuf),

    #[error("Failed to start OMERE: {0}")]
    Launch(std::io::Error),

    #[error("Failed to initialize screen automation: {0}")]
    Backend(String),

    #[error("Failed to load reference image '{name}': {reason}")]
    Template { name: String, reason: String },

    #[error("Missing or unreadable reference images: {}", .0.join(", "))]
    MissingTemplates(Vec<String>),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Job list {0} contains no input files")]
    EmptyJobList(PathBuf),

    #[error("Stopped by user")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, AutomationError>;
