//! @ai:module:intent Benchmark descriptor model and loading
//! @ai:module:layer domain
//! @ai:module:public_api BenchmarkDescriptor, TargetDescriptor, TypeDescriptor, BinaryDescriptor, ParameterDescriptor, ParameterValue, RunConfiguration, DescriptorLoader

pub mod loader;
pub mod run;
pub mod target;

pub use loader::{DescriptorLoader, DescriptorLoaderTrait};
pub use run::{Framework, JitMode, Platform, RunConfiguration, RunMode};
pub use target::{
    BenchmarkDescriptor, BinaryDescriptor, ParameterDescriptor, ParameterValue, TargetDescriptor,
    TypeDescriptor,
};
