//! @ai:module:intent Run configuration carried by a benchmark descriptor
//! @ai:module:layer domain
//! @ai:module:public_api RunConfiguration, RunMode, Platform, Framework, JitMode
//! @ai:module:stateless true

use crate::host::HostEnvironment;
use serde::{Deserialize, Serialize};

/// @ai:intent How the generated harness measures the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Throughput,
    SingleRun,
}

impl RunMode {
    /// @ai:intent Convert mode to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Throughput => "Throughput",
            RunMode::SingleRun => "SingleRun",
        }
    }
}

/// @ai:intent Target processor architecture of the generated build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Host,
    AnyCpu,
    X86,
    X64,
}

impl Platform {
    /// @ai:intent Convert platform to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Host => "Host",
            Platform::AnyCpu => "AnyCpu",
            Platform::X86 => "X86",
            Platform::X64 => "X64",
        }
    }

    /// @ai:intent Value of the <PlatformTarget> element in the build descriptor
    /// @ai:effects pure
    pub fn to_build_fragment(&self, host: &dyn HostEnvironment) -> &'static str {
        match self {
            Platform::Host if host.is_64bit() => "x64",
            Platform::Host => "x86",
            Platform::AnyCpu => "AnyCPU",
            Platform::X86 => "x86",
            Platform::X64 => "x64",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Runtime framework version the generated build targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Framework {
    #[default]
    #[serde(rename = "host")]
    Host,
    #[serde(rename = "v4.0")]
    V40,
    #[serde(rename = "v4.5")]
    V45,
    #[serde(rename = "v4.5.1")]
    V451,
    #[serde(rename = "v4.5.2")]
    V452,
    #[serde(rename = "v4.6")]
    V46,
}

impl Framework {
    /// @ai:intent Convert framework to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Host => "Host",
            Framework::V40 => "V40",
            Framework::V45 => "V45",
            Framework::V451 => "V451",
            Framework::V452 => "V452",
            Framework::V46 => "V46",
        }
    }

    /// @ai:intent Value of the <TargetFrameworkVersion> element in the build descriptor
    /// @ai:effects pure
    pub fn to_build_fragment(&self, host: &dyn HostEnvironment) -> String {
        match self {
            Framework::Host => host.framework_version().to_string(),
            Framework::V40 => "v4.0".to_string(),
            Framework::V45 => "v4.5".to_string(),
            Framework::V451 => "v4.5.1".to_string(),
            Framework::V452 => "v4.5.2".to_string(),
            Framework::V46 => "v4.6".to_string(),
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Just-in-time compiler selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JitMode {
    /// Whatever the host runtime uses by default
    #[default]
    Host,
    LegacyJit,
    RyuJit,
}

impl JitMode {
    /// @ai:intent Convert JIT mode to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            JitMode::Host => "Host",
            JitMode::LegacyJit => "LegacyJit",
            JitMode::RyuJit => "RyuJit",
        }
    }
}

impl std::fmt::Display for JitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Run configuration for one benchmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfiguration {
    #[serde(default)]
    pub mode: RunMode,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub framework: Framework,
    #[serde(default)]
    pub jit: JitMode,
    #[serde(default = "default_warmup_iterations")]
    pub warmup_iterations: u32,
    #[serde(default = "default_target_iterations")]
    pub target_iterations: u32,
    #[serde(default = "default_process_count")]
    pub process_count: u32,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            platform: Platform::default(),
            framework: Framework::default(),
            jit: JitMode::default(),
            warmup_iterations: default_warmup_iterations(),
            target_iterations: default_target_iterations(),
            process_count: default_process_count(),
        }
    }
}

fn default_warmup_iterations() -> u32 {
    5
}

fn default_target_iterations() -> u32 {
    10
}

fn default_process_count() -> u32 {
    3
}

impl RunConfiguration {
    /// @ai:intent Encode the configuration as the argument string the harness parses at startup
    /// @ai:effects pure
    pub fn encode(&self) -> String {
        format!(
            "-m={} -p={} -f={} -j={} -w={} -t={} -pc={}",
            self.mode.as_str(),
            self.platform.as_str(),
            self.framework.as_str(),
            self.jit.as_str(),
            self.warmup_iterations,
            self.target_iterations,
            self.process_count
        )
    }
}
