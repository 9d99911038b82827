//! @ai:module:intent Render the script that builds the generated harness
//! @ai:module:layer domain
//! @ai:module:public_api BuildScriptGenerator

use crate::descriptor::BenchmarkDescriptor;
use crate::generator::{Artifact, ArtifactGenerator};
use crate::template::{TemplateContext, TemplateEngine, TemplateName};

pub const BUILD_SCRIPT_FILE: &str = "BuildBenchmark.bat";

/// @ai:intent Generates BuildBenchmark.bat from static content
pub struct BuildScriptGenerator {
    engine: TemplateEngine,
}

impl BuildScriptGenerator {
    pub fn new() -> Self {
        Self {
            engine: TemplateEngine::new(),
        }
    }
}

impl Default for BuildScriptGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactGenerator for BuildScriptGenerator {
    fn file_name(&self) -> &'static str {
        BUILD_SCRIPT_FILE
    }

    fn render(&self, _descriptor: &BenchmarkDescriptor) -> Artifact {
        let content = self
            .engine
            .render(TemplateName::BuildScript, &TemplateContext::new());
        Artifact::new(BUILD_SCRIPT_FILE, content).executable()
    }
}
