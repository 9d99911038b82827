//! @ai:module:intent Render the runtime configuration file of the harness
//! @ai:module:layer domain
//! @ai:module:public_api RuntimeConfigGenerator, use_legacy_jit
//! @ai:module:stateless true

use crate::descriptor::{BenchmarkDescriptor, JitMode};
use crate::generator::{Artifact, ArtifactGenerator};
use crate::host::HostEnvironment;
use crate::template::{TemplateContext, TemplateEngine, TemplateName};
use std::sync::Arc;

pub const RUNTIME_CONFIG_FILE: &str = "app.config";

/// @ai:intent Whether the generated process should run on the legacy JIT
/// @ai:effects pure
pub fn use_legacy_jit(jit: JitMode, host: &dyn HostEnvironment) -> bool {
    match jit {
        JitMode::RyuJit => false,
        JitMode::LegacyJit => true,
        JitMode::Host => !host.uses_modern_jit_by_default(),
    }
}

/// @ai:intent Generates app.config
pub struct RuntimeConfigGenerator {
    engine: TemplateEngine,
    host: Arc<dyn HostEnvironment>,
}

impl RuntimeConfigGenerator {
    /// @ai:intent Create a generator that consults the given host for default JIT behavior
    /// @ai:effects pure
    pub fn new(host: Arc<dyn HostEnvironment>) -> Self {
        Self {
            engine: TemplateEngine::new(),
            host,
        }
    }
}

impl ArtifactGenerator for RuntimeConfigGenerator {
    fn file_name(&self) -> &'static str {
        RUNTIME_CONFIG_FILE
    }

    fn render(&self, descriptor: &BenchmarkDescriptor) -> Artifact {
        let jit = descriptor.run.jit;
        let legacy = use_legacy_jit(jit, self.host.as_ref());

        let content = if jit == JitMode::Host {
            self.engine
                .render(TemplateName::RuntimeConfigEmpty, &TemplateContext::new())
        } else {
            let context =
                TemplateContext::new().with("USE_LEGACY_JIT", if legacy { "1" } else { "0" });
            self.engine.render(TemplateName::RuntimeConfig, &context)
        };

        Artifact::new(RUNTIME_CONFIG_FILE, content)
    }
}
