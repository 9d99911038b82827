//! @ai:module:intent Define error types for harness generation
//! @ai:module:layer domain
//! @ai:module:public_api GenerateError, WorkspaceError, DependencyError, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Failures while provisioning the working directory
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Invalid benchmark identifier '{0}': must be a single, non-empty path component")]
    InvalidIdentifier(String),

    #[error("Failed to create directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// @ai:intent Failures while placing a binary dependency next to the project
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("Dependency '{name}' not found at its source location {location}")]
    SourceMissing { name: String, location: PathBuf },

    #[error("Failed to copy dependency '{name}' from {from} to {to}: {source}")]
    Copy {
        name: String,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// @ai:intent Unified error type for a generation call
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error("Failed to write artifact {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unresolved placeholders in {artifact}: {}", .placeholders.join(", "))]
    UnresolvedPlaceholders {
        artifact: String,
        placeholders: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
