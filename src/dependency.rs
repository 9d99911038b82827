//! @ai:module:intent Place binaries the generated build references next to the project directory
//! @ai:module:layer infrastructure
//! @ai:module:public_api DependencyResolver, Placement
//! @ai:module:stateless true

use crate::descriptor::BinaryDescriptor;
use crate::error::DependencyError;
use std::path::{Path, PathBuf};

/// @ai:intent What the resolver did for one binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Base-runtime binary, never placed
    Skipped,
    AlreadyPresent(PathBuf),
    Copied { from: PathBuf, to: PathBuf },
}

/// @ai:intent Ensures referenced binaries exist where the generated build looks for them
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    base_runtime_file: String,
}

impl DependencyResolver {
    /// @ai:intent Create a resolver that exempts the given base-runtime file name
    /// @ai:effects pure
    pub fn new(base_runtime_file: impl Into<String>) -> Self {
        Self {
            base_runtime_file: base_runtime_file.into(),
        }
    }

    pub fn base_runtime_file(&self) -> &str {
        &self.base_runtime_file
    }

    /// @ai:intent Location the generated build's `..\<file>` reference resolves to
    /// @ai:effects pure
    pub fn expected_location(binary: &BinaryDescriptor, output_dir: &Path) -> PathBuf {
        match output_dir.parent() {
            Some(parent) => parent.join(&binary.file_name),
            None => output_dir.join("..").join(&binary.file_name),
        }
    }

    /// @ai:intent Copy the binary next to the project directory unless it is already there
    /// @ai:post Ok(Copied | AlreadyPresent) means the expected location holds a file
    /// @ai:effects fs:read, fs:write
    pub fn ensure_present(
        &self,
        binary: &BinaryDescriptor,
        output_dir: &Path,
    ) -> Result<Placement, DependencyError> {
        if binary.is_base_runtime(&self.base_runtime_file) {
            return Ok(Placement::Skipped);
        }

        let expected = Self::expected_location(binary, output_dir);
        if expected.is_file() {
            return Ok(Placement::AlreadyPresent(expected));
        }

        tracing::info!(
            "// Dependency {} is expected at {} but was found at {}",
            binary.name,
            expected.display(),
            binary.location.display()
        );

        if !binary.location.is_file() {
            let err = DependencyError::SourceMissing {
                name: binary.name.clone(),
                location: binary.location.clone(),
            };
            tracing::error!("{}", err);
            return Err(err);
        }

        match std::fs::copy(&binary.location, &expected) {
            Ok(_) => Ok(Placement::Copied {
                from: binary.location.clone(),
                to: expected,
            }),
            Err(source) => {
                let err = DependencyError::Copy {
                    name: binary.name.clone(),
                    from: binary.location.clone(),
                    to: expected,
                    source,
                };
                tracing::error!("{}", err);
                Err(err)
            }
        }
    }
}
