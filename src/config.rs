//! @ai:module:intent Configuration structs for the harness generator
//! @ai:module:layer infrastructure
//! @ai:module:public_api GeneratorConfig, OutputConfig, DependencyConfig, TemplateConfig
//! @ai:module:stateless true

use crate::descriptor::BinaryDescriptor;
use crate::host::HostProfile;
use crate::workspace::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the harness generator
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde(default)]
    pub dependencies: DependencyConfig,
    #[serde(default)]
    pub host: HostProfile,
    #[serde(default)]
    pub templates: TemplateConfig,
}

/// @ai:intent Where generated projects are written
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

/// @ai:intent Binaries the generated build depends on
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyConfig {
    /// File name of the always-present standard library binary
    #[serde(default = "default_base_runtime_file")]
    pub base_runtime_file: String,
    /// Binary that provides the benchmark attributes and runner the harness links against
    #[serde(default = "default_annotation_binary")]
    pub annotation_binary: BinaryDescriptor,
}

/// @ai:intent Template rendering behavior
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Fail generation when a rendered artifact still contains placeholder markers
    #[serde(default)]
    pub strict: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            base_runtime_file: default_base_runtime_file(),
            annotation_binary: default_annotation_binary(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_base_runtime_file() -> String {
    "mscorlib.dll".to_string()
}

fn default_annotation_binary() -> BinaryDescriptor {
    BinaryDescriptor {
        name: "BenchHarness.Runtime".to_string(),
        file_name: "BenchHarness.Runtime.dll".to_string(),
        location: PathBuf::from("lib/BenchHarness.Runtime.dll"),
    }
}

impl GeneratorConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
