//! @ai:module:intent Benchmark harness project generator library
//! @ai:module:layer application
//! @ai:module:public_api config, dependency, descriptor, error, generator, host, template, workspace

pub mod config;
pub mod dependency;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod host;
pub mod template;
pub mod workspace;

pub use config::GeneratorConfig;
pub use dependency::{DependencyResolver, Placement};
pub use descriptor::{BenchmarkDescriptor, DescriptorLoader, DescriptorLoaderTrait};
pub use error::{DependencyError, GenerateError, WorkspaceError};
pub use generator::{list_artifacts, Artifact, ArtifactGenerator, HarnessGenerator};
pub use host::{HostEnvironment, HostProfile};
pub use template::{TemplateContext, TemplateEngine, TemplateName};
pub use workspace::{DirectoryManager, DirectoryOps, GenerationResult, RetryPolicy, StdDirectoryOps};
