//! @ai:module:intent Render the build descriptor (project file) of the harness
//! @ai:module:layer domain
//! @ai:module:public_api BuildDescriptorGenerator
//! @ai:module:stateless true

use crate::descriptor::{BenchmarkDescriptor, BinaryDescriptor};
use crate::generator::{Artifact, ArtifactGenerator};
use crate::host::HostEnvironment;
use crate::template::{TemplateContext, TemplateEngine, TemplateName};
use std::sync::Arc;

pub const BUILD_DESCRIPTOR_FILE: &str = "Program.csproj";

/// @ai:intent Generates Program.csproj and names the binaries it references
pub struct BuildDescriptorGenerator {
    engine: TemplateEngine,
    host: Arc<dyn HostEnvironment>,
    base_runtime_file: String,
    annotation_binary: BinaryDescriptor,
}

impl BuildDescriptorGenerator {
    /// @ai:intent Create a generator for the given host and dependency settings
    /// @ai:effects pure
    pub fn new(
        host: Arc<dyn HostEnvironment>,
        base_runtime_file: impl Into<String>,
        annotation_binary: BinaryDescriptor,
    ) -> Self {
        Self {
            engine: TemplateEngine::new(),
            host,
            base_runtime_file: base_runtime_file.into(),
            annotation_binary,
        }
    }

    /// @ai:intent Reference entry for a binary; empty for the base runtime
    /// @ai:effects pure
    pub fn reference_fragment(&self, binary: &BinaryDescriptor) -> String {
        if binary.is_base_runtime(&self.base_runtime_file) {
            return String::new();
        }

        let context = TemplateContext::new()
            .with("REFERENCE_NAME", binary.name.as_str())
            .with("REFERENCE_FILE", binary.file_name.as_str());
        self.engine
            .render(TemplateName::BuildReference, &context)
            .trim_end()
            .to_string()
    }

    /// @ai:intent Binaries that must sit next to the project: annotation, owner type, return type
    /// @ai:effects pure
    pub fn dependencies<'a>(
        &'a self,
        descriptor: &'a BenchmarkDescriptor,
    ) -> [&'a BinaryDescriptor; 3] {
        [
            &self.annotation_binary,
            &descriptor.target.owner.binary,
            &descriptor.target.return_type.binary,
        ]
    }

    /// @ai:intent Build the substitution context for Program.csproj
    /// @ai:effects pure
    pub fn context(&self, descriptor: &BenchmarkDescriptor) -> TemplateContext {
        let owner = &descriptor.target.owner.binary;
        let returned = &descriptor.target.return_type.binary;

        let owner_reference = if owner
            .file_name
            .eq_ignore_ascii_case(&self.annotation_binary.file_name)
        {
            String::new()
        } else {
            self.reference_fragment(owner)
        };

        // Skip a second entry for the same file
        let return_reference = if returned.file_name.eq_ignore_ascii_case(&owner.file_name)
            || returned
                .file_name
                .eq_ignore_ascii_case(&self.annotation_binary.file_name)
        {
            String::new()
        } else {
            self.reference_fragment(returned)
        };

        TemplateContext::new()
            .with(
                "TARGET_FRAMEWORK",
                descriptor.run.framework.to_build_fragment(self.host.as_ref()),
            )
            .with(
                "PLATFORM",
                descriptor.run.platform.to_build_fragment(self.host.as_ref()),
            )
            .with("ANNOTATION_BINARY_NAME", self.annotation_binary.name.as_str())
            .with(
                "ANNOTATION_BINARY_FILE",
                self.annotation_binary.file_name.as_str(),
            )
            .with("TARGET_TYPE_REFERENCE", owner_reference)
            .with("TARGET_RETURN_TYPE_REFERENCE", return_reference)
    }
}

impl ArtifactGenerator for BuildDescriptorGenerator {
    fn file_name(&self) -> &'static str {
        BUILD_DESCRIPTOR_FILE
    }

    fn render(&self, descriptor: &BenchmarkDescriptor) -> Artifact {
        let content = self
            .engine
            .render(TemplateName::BuildDescriptor, &self.context(descriptor));
        Artifact::new(BUILD_DESCRIPTOR_FILE, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Framework, Platform};
    use crate::generator::test_support::{annotation_binary, descriptor, returning};
    use crate::host::HostProfile;
    use crate::template::unresolved_placeholders;
    use pretty_assertions::assert_eq;

    fn generator() -> BuildDescriptorGenerator {
        let host = HostProfile {
            is_64bit: true,
            framework_version: "v4.6".to_string(),
            ..Default::default()
        };
        BuildDescriptorGenerator::new(Arc::new(host), "mscorlib.dll", annotation_binary())
    }

    #[test]
    fn test_reference_fragment_for_user_binary() {
        let d = descriptor("MyBench");
        let fragment = generator().reference_fragment(&d.target.owner.binary);
        assert_eq!(
            fragment,
            concat!(
                "    <Reference Include=\"Samples\">\n",
                "      <HintPath>..\\Samples.dll</HintPath>\n",
                "    </Reference>"
            )
        );
    }

    #[test]
    fn test_base_runtime_has_empty_reference() {
        let d = descriptor("MyBench");
        assert!(generator()
            .reference_fragment(&d.target.return_type.binary)
            .is_empty());
    }

    #[test]
    fn test_render_fills_platform_and_framework() {
        let mut d = descriptor("MyBench");
        d.run.platform = Platform::X86;
        d.run.framework = Framework::V45;

        let content = generator().render(&d).content;
        assert!(content.contains("<PlatformTarget>x86</PlatformTarget>"));
        assert!(content.contains("<TargetFrameworkVersion>v4.5</TargetFrameworkVersion>"));
        assert!(content.contains("<HintPath>..\\Samples.dll</HintPath>"));
        assert!(content.contains("<HintPath>..\\BenchHarness.Runtime.dll</HintPath>"));
        assert!(!content.contains("mscorlib"));
        assert!(unresolved_placeholders(&content).is_empty());
    }

    #[test]
    fn test_host_selectors_resolve_through_host() {
        let content = generator().render(&descriptor("MyBench")).content;
        assert!(content.contains("<PlatformTarget>x64</PlatformTarget>"));
        assert!(content.contains("<TargetFrameworkVersion>v4.6</TargetFrameworkVersion>"));
    }

    #[test]
    fn test_shared_binary_referenced_once() {
        let mut d = descriptor("MyBench");
        d.target.return_type = returning("Result", "Samples");
        d.target.return_type.binary = d.target.owner.binary.clone();

        let content = generator().render(&d).content;
        assert_eq!(content.matches("<HintPath>..\\Samples.dll</HintPath>").count(), 1);
    }

    #[test]
    fn test_dependencies_order() {
        let g = generator();
        let d = descriptor("MyBench");
        let dependencies = g.dependencies(&d);
        let names: Vec<_> = dependencies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["BenchHarness.Runtime", "Samples", "mscorlib"]);
    }
}
