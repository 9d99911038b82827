//! @ai:module:intent Load benchmark descriptors from TOML or JSON files
//! @ai:module:layer infrastructure
//! @ai:module:public_api DescriptorLoader, DescriptorLoaderTrait
//! @ai:module:stateless true

use crate::descriptor::BenchmarkDescriptor;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Trait for loading benchmark descriptors
pub trait DescriptorLoaderTrait: Send + Sync {
    /// @ai:intent Load a single descriptor file
    fn load_file(&self, path: &Path) -> Result<BenchmarkDescriptor>;

    /// @ai:intent Load every descriptor under a directory
    fn load_all(&self, dir: &Path) -> Result<Vec<BenchmarkDescriptor>>;

    /// @ai:intent Load descriptors from a file or directory, keeping only the given identifiers
    fn load_filtered(
        &self,
        path: &Path,
        only: Option<&[String]>,
    ) -> Result<Vec<BenchmarkDescriptor>>;
}

/// @ai:intent Reads descriptors written by the discovery step
pub struct DescriptorLoader;

impl DescriptorLoader {
    /// @ai:intent Create a new descriptor loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Whether a path looks like a descriptor file
    /// @ai:effects pure
    fn is_descriptor_file(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext == "toml" || ext == "json")
            .unwrap_or(false)
    }

    /// @ai:intent Find all descriptor files in directory
    /// @ai:effects fs:read
    fn find_descriptor_files(dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && Self::is_descriptor_file(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}

impl Default for DescriptorLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorLoaderTrait for DescriptorLoader {
    /// @ai:intent Parse a descriptor, choosing the format by extension
    /// @ai:pre path points to a .toml or .json file
    /// @ai:effects fs:read
    fn load_file(&self, path: &Path) -> Result<BenchmarkDescriptor> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read descriptor file: {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse descriptor file: {}", path.display())),
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse descriptor file: {}", path.display())),
            _ => bail!("Unsupported descriptor format: {}", path.display()),
        }
    }

    /// @ai:intent Load all descriptors, skipping invalid files
    /// @ai:effects fs:read
    fn load_all(&self, dir: &Path) -> Result<Vec<BenchmarkDescriptor>> {
        let files = Self::find_descriptor_files(dir);
        let mut descriptors = Vec::with_capacity(files.len());

        for path in files {
            match self.load_file(&path) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => {
                    tracing::warn!("Skipping invalid descriptor file {}: {:#}", path.display(), e);
                }
            }
        }

        descriptors.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(descriptors)
    }

    /// @ai:intent Load from file or directory and apply the identifier filter
    /// @ai:effects fs:read
    fn load_filtered(
        &self,
        path: &Path,
        only: Option<&[String]>,
    ) -> Result<Vec<BenchmarkDescriptor>> {
        let descriptors = if path.is_dir() {
            self.load_all(path)?
        } else {
            vec![self.load_file(path)?]
        };

        Ok(descriptors
            .into_iter()
            .filter(|d| {
                only.map(|ids| ids.iter().any(|id| id == &d.identifier))
                    .unwrap_or(true)
            })
            .collect())
    }
}
