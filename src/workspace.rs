//! @ai:module:intent Provision a clean working directory per benchmark identifier
//! @ai:module:layer infrastructure
//! @ai:module:public_api DirectoryManager, DirectoryOps, StdDirectoryOps, RetryPolicy, GenerationResult
//! @ai:module:stateless true

use crate::error::WorkspaceError;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// @ai:intent Outcome of preparing (and generating into) a benchmark directory
#[derive(Debug)]
pub struct GenerationResult {
    directory: PathBuf,
    fresh: bool,
    cause: Option<io::Error>,
}

impl GenerationResult {
    /// @ai:intent Directory was created or cleared for this call
    /// @ai:effects pure
    pub fn fresh(directory: PathBuf) -> Self {
        Self {
            directory,
            fresh: true,
            cause: None,
        }
    }

    /// @ai:intent Directory is usable but may still hold files from an earlier run
    /// @ai:effects pure
    pub fn stale(directory: PathBuf, cause: io::Error) -> Self {
        Self {
            directory,
            fresh: false,
            cause: Some(cause),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// @ai:intent Last deletion error when the directory could not be cleared
    /// @ai:effects pure
    pub fn cause(&self) -> Option<&io::Error> {
        self.cause.as_ref()
    }
}

/// @ai:intent Retry budget for clearing a directory another process may still hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    500
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// @ai:intent Filesystem operations used while preparing a directory
pub trait DirectoryOps: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn remove_all(&self, path: &Path) -> io::Result<()>;

    fn create_all(&self, path: &Path) -> io::Result<()>;

    /// @ai:intent Wait between deletion attempts
    /// @ai:effects time
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// @ai:intent Real filesystem
pub struct StdDirectoryOps;

impl DirectoryOps for StdDirectoryOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn create_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// @ai:intent Resolves and provisions `<root>/<identifier>` directories
pub struct DirectoryManager<O: DirectoryOps = StdDirectoryOps> {
    root: PathBuf,
    retry: RetryPolicy,
    ops: O,
}

impl DirectoryManager<StdDirectoryOps> {
    /// @ai:intent Create a manager over the real filesystem
    /// @ai:effects pure
    pub fn new(root: impl Into<PathBuf>, retry: RetryPolicy) -> Self {
        Self::with_ops(root, retry, StdDirectoryOps)
    }
}

impl<O: DirectoryOps> DirectoryManager<O> {
    /// @ai:intent Create a manager with custom filesystem operations
    /// @ai:effects pure
    pub fn with_ops(root: impl Into<PathBuf>, retry: RetryPolicy, ops: O) -> Self {
        Self {
            root: root.into(),
            retry,
            ops,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// @ai:intent Directory a benchmark identifier maps to
    /// @ai:pre identifier is a single normal path component
    /// @ai:effects pure
    pub fn resolve(&self, identifier: &str) -> Result<PathBuf, WorkspaceError> {
        let mut components = Path::new(identifier).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == identifier => {
                Ok(self.root.join(identifier))
            }
            _ => Err(WorkspaceError::InvalidIdentifier(identifier.to_string())),
        }
    }

    /// @ai:intent Provide a fresh directory, or the stale one with the last deletion error
    /// @ai:post Ok result always names an existing directory
    /// @ai:effects fs:write, time
    pub fn prepare(&self, identifier: &str) -> Result<GenerationResult, WorkspaceError> {
        let path = self.resolve(identifier)?;

        if !self.ops.exists(&path) {
            self.create(&path)?;
            return Ok(GenerationResult::fresh(path));
        }

        let mut last_error = None;
        for attempt in 1..=self.retry.max_attempts.max(1) {
            if attempt > 1 {
                if !self.ops.exists(&path) {
                    break;
                }
                self.ops.pause(self.retry.delay());
            }

            tracing::debug!(
                "Clearing {} (attempt {}/{})",
                path.display(),
                attempt,
                self.retry.max_attempts
            );

            match self.ops.remove_all(&path) {
                Ok(()) => {
                    self.create(&path)?;
                    return Ok(GenerationResult::fresh(path));
                }
                Err(e) => {
                    tracing::debug!("Failed to remove {}: {}", path.display(), e);
                    last_error = Some(e);
                }
            }
        }

        if !self.ops.exists(&path) {
            // Removed by someone else
            self.create(&path)?;
            return Ok(GenerationResult::fresh(path));
        }

        let cause = last_error
            .unwrap_or_else(|| io::Error::other("directory could not be cleared"));
        tracing::warn!(
            "Directory {} could not be cleared, reusing it: {}",
            path.display(),
            cause
        );
        Ok(GenerationResult::stale(path, cause))
    }

    /// @ai:effects fs:write
    fn create(&self, path: &Path) -> Result<(), WorkspaceError> {
        self.ops
            .create_all(path)
            .map_err(|source| WorkspaceError::Create {
                path: path.to_path_buf(),
                source,
            })
    }
}
