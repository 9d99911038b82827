//! @ai:module:intent Describe the host environment the generated build targets by default
//! @ai:module:layer infrastructure
//! @ai:module:public_api HostEnvironment, HostProfile
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Capabilities of the host runtime consulted when a run configuration says "host"
pub trait HostEnvironment: Send + Sync {
    /// @ai:intent Whether the host already runs the modern JIT when nothing is selected
    fn uses_modern_jit_by_default(&self) -> bool;

    /// @ai:intent Whether the host is a 64-bit platform
    fn is_64bit(&self) -> bool;

    /// @ai:intent Framework version string used when the run configuration selects the host
    fn framework_version(&self) -> &str;
}

/// @ai:intent Host description loaded from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProfile {
    #[serde(default = "default_modern_jit")]
    pub modern_jit_by_default: bool,
    #[serde(default = "default_is_64bit")]
    pub is_64bit: bool,
    #[serde(default = "default_framework_version")]
    pub framework_version: String,
}

impl Default for HostProfile {
    fn default() -> Self {
        Self {
            modern_jit_by_default: default_modern_jit(),
            is_64bit: default_is_64bit(),
            framework_version: default_framework_version(),
        }
    }
}

fn default_modern_jit() -> bool {
    default_is_64bit()
}

/// @ai:intent Detect pointer width of the machine running the generator
/// @ai:effects pure
fn default_is_64bit() -> bool {
    cfg!(target_pointer_width = "64")
}

fn default_framework_version() -> String {
    "v4.6".to_string()
}

impl HostEnvironment for HostProfile {
    fn uses_modern_jit_by_default(&self) -> bool {
        self.modern_jit_by_default
    }

    fn is_64bit(&self) -> bool {
        self.is_64bit
    }

    fn framework_version(&self) -> &str {
        &self.framework_version
    }
}
