//! @ai:module:intent Generate the four harness artifacts into a prepared directory
//! @ai:module:layer application
//! @ai:module:public_api HarnessGenerator, Artifact, ArtifactGenerator, list_artifacts

pub mod build_descriptor;
pub mod build_script;
pub mod entry_point;
pub mod runtime_config;

pub use build_descriptor::{BuildDescriptorGenerator, BUILD_DESCRIPTOR_FILE};
pub use build_script::{BuildScriptGenerator, BUILD_SCRIPT_FILE};
pub use entry_point::{EntryPointGenerator, ENTRY_POINT_FILE};
pub use runtime_config::{use_legacy_jit, RuntimeConfigGenerator, RUNTIME_CONFIG_FILE};

use crate::config::GeneratorConfig;
use crate::dependency::DependencyResolver;
use crate::descriptor::BenchmarkDescriptor;
use crate::error::{GenerateError, Result};
use crate::host::HostEnvironment;
use crate::template::unresolved_placeholders;
use crate::workspace::{DirectoryManager, DirectoryOps, GenerationResult, StdDirectoryOps};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// @ai:intent One rendered file of the generated project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub content: String,
    pub executable: bool,
}

impl Artifact {
    /// @ai:effects pure
    pub fn new(file_name: &'static str, content: String) -> Self {
        Self {
            file_name,
            content,
            executable: false,
        }
    }

    /// @ai:intent Mark the artifact as a script to be written with the executable bit
    /// @ai:effects pure
    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }
}

/// @ai:intent Maps a descriptor to exactly one artifact
pub trait ArtifactGenerator: Send + Sync {
    /// @ai:intent Name of the file this generator produces
    fn file_name(&self) -> &'static str;

    /// @ai:intent Render the artifact without touching the filesystem
    fn render(&self, descriptor: &BenchmarkDescriptor) -> Artifact;
}

/// @ai:intent Write an artifact into a directory, replacing any existing file
/// @ai:effects fs:write
pub fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<PathBuf> {
    let path = dir.join(artifact.file_name);
    let write_error = |source| GenerateError::Write {
        path: path.clone(),
        source,
    };

    std::fs::write(&path, &artifact.content).map_err(write_error)?;
    if artifact.executable {
        mark_executable(&path).map_err(write_error)?;
    }

    Ok(path)
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// @ai:intent Files directly inside a generated directory, sorted by name
/// @ai:effects fs:read
pub fn list_artifacts(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

/// @ai:intent Prepares the benchmark directory and runs the four generators in order
pub struct HarnessGenerator<O: DirectoryOps = StdDirectoryOps> {
    directories: DirectoryManager<O>,
    resolver: DependencyResolver,
    entry_point: EntryPointGenerator,
    build_descriptor: BuildDescriptorGenerator,
    build_script: BuildScriptGenerator,
    runtime_config: RuntimeConfigGenerator,
    strict: bool,
}

impl HarnessGenerator<StdDirectoryOps> {
    /// @ai:intent Create a generator from configuration, using the configured host profile
    /// @ai:effects pure
    pub fn new(config: &GeneratorConfig) -> Self {
        Self::with_host(config, Arc::new(config.host.clone()))
    }

    /// @ai:intent Create a generator with an explicit host environment
    /// @ai:effects pure
    pub fn with_host(config: &GeneratorConfig, host: Arc<dyn HostEnvironment>) -> Self {
        Self::with_directory_ops(config, host, StdDirectoryOps)
    }
}

impl<O: DirectoryOps> HarnessGenerator<O> {
    /// @ai:intent Create a generator whose directory preparation goes through custom ops
    /// @ai:effects pure
    pub fn with_directory_ops(
        config: &GeneratorConfig,
        host: Arc<dyn HostEnvironment>,
        ops: O,
    ) -> Self {
        let dependencies = &config.dependencies;
        Self {
            directories: DirectoryManager::with_ops(
                config.output.root.clone(),
                config.retry.clone(),
                ops,
            ),
            resolver: DependencyResolver::new(dependencies.base_runtime_file.clone()),
            entry_point: EntryPointGenerator::new(),
            build_descriptor: BuildDescriptorGenerator::new(
                host.clone(),
                dependencies.base_runtime_file.clone(),
                dependencies.annotation_binary.clone(),
            ),
            build_script: BuildScriptGenerator::new(),
            runtime_config: RuntimeConfigGenerator::new(host),
            strict: config.templates.strict,
        }
    }

    pub fn root(&self) -> &Path {
        self.directories.root()
    }

    /// @ai:intent Generators in the order their artifacts are written
    /// @ai:effects pure
    fn generators(&self) -> [&dyn ArtifactGenerator; 4] {
        [
            &self.entry_point as &dyn ArtifactGenerator,
            &self.build_descriptor,
            &self.build_script,
            &self.runtime_config,
        ]
    }

    /// @ai:intent Report placeholders that survived rendering; fatal only in strict mode
    /// @ai:effects pure
    fn check(&self, descriptor: &BenchmarkDescriptor, artifact: &Artifact) -> Result<()> {
        let leftovers = unresolved_placeholders(&artifact.content);
        if leftovers.is_empty() {
            return Ok(());
        }

        if self.strict {
            return Err(GenerateError::UnresolvedPlaceholders {
                artifact: artifact.file_name.to_string(),
                placeholders: leftovers,
            });
        }

        tracing::warn!(
            "{}: {} still contains placeholders: {}",
            descriptor.identifier,
            artifact.file_name,
            leftovers.join(", ")
        );
        Ok(())
    }

    /// @ai:intent Render all four artifacts in write order without touching the filesystem
    /// @ai:effects pure
    pub fn render_all(&self, descriptor: &BenchmarkDescriptor) -> Result<Vec<Artifact>> {
        self.generators()
            .iter()
            .map(|generator| {
                let artifact = generator.render(descriptor);
                self.check(descriptor, &artifact)?;
                Ok(artifact)
            })
            .collect()
    }

    /// @ai:intent Render, check and write one artifact
    /// @ai:effects fs:write
    fn emit(
        &self,
        generator: &dyn ArtifactGenerator,
        descriptor: &BenchmarkDescriptor,
        dir: &Path,
    ) -> Result<PathBuf> {
        let artifact = generator.render(descriptor);
        self.check(descriptor, &artifact)?;
        write_artifact(dir, &artifact)
    }

    /// @ai:intent Generate the harness project for one descriptor
    /// @ai:post Ok result's directory holds Program.cs, Program.csproj, BuildBenchmark.bat, app.config
    /// @ai:effects fs:read, fs:write, time
    pub fn generate(&self, descriptor: &BenchmarkDescriptor) -> Result<GenerationResult> {
        let result = self.directories.prepare(&descriptor.identifier)?;
        let dir = result.directory();

        self.emit(&self.entry_point, descriptor, dir)?;

        self.emit(&self.build_descriptor, descriptor, dir)?;
        for binary in self.build_descriptor.dependencies(descriptor) {
            self.resolver.ensure_present(binary, dir)?;
        }

        self.emit(&self.build_script, descriptor, dir)?;
        self.emit(&self.runtime_config, descriptor, dir)?;

        tracing::info!(
            "Generated {} in {}{}",
            descriptor.identifier,
            dir.display(),
            if result.is_fresh() { "" } else { " (stale directory reused)" }
        );
        Ok(result)
    }

    /// @ai:intent Generate every descriptor in order, stopping at the first fatal error
    /// @ai:effects fs:read, fs:write, time
    pub fn generate_all(
        &self,
        descriptors: &[BenchmarkDescriptor],
    ) -> Result<Vec<GenerationResult>> {
        descriptors.iter().map(|d| self.generate(d)).collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::descriptor::{
        BenchmarkDescriptor, BinaryDescriptor, RunConfiguration, TargetDescriptor, TypeDescriptor,
    };
    use std::path::PathBuf;

    pub fn mscorlib() -> BinaryDescriptor {
        BinaryDescriptor {
            name: "mscorlib".to_string(),
            file_name: "mscorlib.dll".to_string(),
            location: PathBuf::from("/runtime/mscorlib.dll"),
        }
    }

    pub fn annotation_binary() -> BinaryDescriptor {
        BinaryDescriptor {
            name: "BenchHarness.Runtime".to_string(),
            file_name: "BenchHarness.Runtime.dll".to_string(),
            location: PathBuf::from("/build/BenchHarness.Runtime.dll"),
        }
    }

    pub fn returning(name: &str, namespace: &str) -> TypeDescriptor {
        TypeDescriptor {
            name: name.to_string(),
            namespace: namespace.to_string(),
            binary: mscorlib(),
        }
    }

    /// Void-returning target with no setup and no parameters
    pub fn descriptor(identifier: &str) -> BenchmarkDescriptor {
        BenchmarkDescriptor {
            identifier: identifier.to_string(),
            target: TargetDescriptor {
                owner: TypeDescriptor {
                    name: "StringBenchmarks".to_string(),
                    namespace: "Samples".to_string(),
                    binary: BinaryDescriptor {
                        name: "Samples".to_string(),
                        file_name: "Samples.dll".to_string(),
                        location: PathBuf::from("/build/Samples.dll"),
                    },
                },
                method: "Concat".to_string(),
                return_type: returning("Void", "System"),
                operations_per_invoke: 1,
                setup_method: None,
                additional_logic: String::new(),
            },
            parameters: Vec::new(),
            run: RunConfiguration::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{annotation_binary, descriptor};
    use super::*;
    use crate::descriptor::BinaryDescriptor;
    use crate::error::DependencyError;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Root for generated projects plus a build directory holding the source binaries
    struct Fixture {
        root: TempDir,
        build: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let build = TempDir::new().unwrap();
            std::fs::write(build.path().join("Samples.dll"), b"samples").unwrap();
            std::fs::write(build.path().join("BenchHarness.Runtime.dll"), b"runtime").unwrap();
            Self {
                root: TempDir::new().unwrap(),
                build,
            }
        }

        fn config(&self) -> GeneratorConfig {
            let mut config = GeneratorConfig::default();
            config.output.root = self.root.path().to_path_buf();
            config.retry.delay_ms = 0;
            config.dependencies.annotation_binary = BinaryDescriptor {
                location: self.build.path().join("BenchHarness.Runtime.dll"),
                ..annotation_binary()
            };
            config
        }

        fn descriptor(&self, identifier: &str) -> BenchmarkDescriptor {
            let mut d = descriptor(identifier);
            d.target.owner.binary.location = self.build.path().join("Samples.dll");
            d
        }
    }

    fn file_names(dir: &Path) -> Vec<String> {
        list_artifacts(dir)
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_generate_void_benchmark_end_to_end() {
        let fixture = Fixture::new();
        let generator = HarnessGenerator::new(&fixture.config());

        let result = generator.generate(&fixture.descriptor("MyBench")).unwrap();
        assert!(result.is_fresh());
        assert_eq!(result.directory(), fixture.root.path().join("MyBench"));
        assert_eq!(
            file_names(result.directory()),
            vec!["BuildBenchmark.bat", "Program.cs", "Program.csproj", "app.config"]
        );

        let source = std::fs::read_to_string(result.directory().join("Program.cs")).unwrap();
        assert!(source.contains("private Action targetDelegate;"));
        assert!(source.contains("private void Idle() { }"));
        assert!(!source.contains("resultHolder"));
    }

    #[test]
    fn test_generate_copies_dependencies_beside_project() {
        let fixture = Fixture::new();
        let generator = HarnessGenerator::new(&fixture.config());
        generator.generate(&fixture.descriptor("MyBench")).unwrap();

        let root = fixture.root.path();
        assert_eq!(std::fs::read(root.join("Samples.dll")).unwrap(), b"samples");
        assert_eq!(
            std::fs::read(root.join("BenchHarness.Runtime.dll")).unwrap(),
            b"runtime"
        );
        assert!(!root.join("mscorlib.dll").exists());
    }

    #[test]
    fn test_regenerate_clears_previous_run() {
        let fixture = Fixture::new();
        let generator = HarnessGenerator::new(&fixture.config());

        let first = generator.generate(&fixture.descriptor("MyBench")).unwrap();
        std::fs::write(first.directory().join("stale.obj"), b"old").unwrap();

        let second = generator.generate(&fixture.descriptor("MyBench")).unwrap();
        assert!(second.is_fresh());
        assert_eq!(file_names(second.directory()).len(), 4);
    }

    #[test]
    fn test_missing_dependency_aborts_generation() {
        let fixture = Fixture::new();
        let generator = HarnessGenerator::new(&fixture.config());

        let mut d = fixture.descriptor("MyBench");
        d.target.owner.binary.location = fixture.build.path().join("Missing.dll");
        d.target.owner.binary.file_name = "Missing.dll".to_string();

        let err = generator.generate(&d).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Dependency(DependencyError::SourceMissing { .. })
        ));
        // Written before the failing step
        assert!(fixture.root.path().join("MyBench").join("Program.csproj").exists());
        assert!(!fixture.root.path().join("MyBench").join("app.config").exists());
    }

    #[test]
    fn test_render_all_has_no_leftover_placeholders() {
        let fixture = Fixture::new();
        let generator = HarnessGenerator::new(&fixture.config());

        let mut d = fixture.descriptor("Rendered");
        d.target.setup_method = Some("Setup".to_string());
        d.run.jit = crate::descriptor::JitMode::RyuJit;

        let artifacts = generator.render_all(&d).unwrap();
        let names: Vec<_> = artifacts.iter().map(|a| a.file_name).collect();
        assert_eq!(
            names,
            vec!["Program.cs", "Program.csproj", "BuildBenchmark.bat", "app.config"]
        );
        for artifact in &artifacts {
            assert!(
                unresolved_placeholders(&artifact.content).is_empty(),
                "{} has leftovers",
                artifact.file_name
            );
        }
        assert!(!fixture.root.path().join("Rendered").exists());
    }

    #[test]
    fn test_strict_mode_rejects_leftover_markers() {
        let fixture = Fixture::new();
        let mut config = fixture.config();
        config.templates.strict = true;
        let generator = HarnessGenerator::new(&config);

        let mut d = fixture.descriptor("Strict");
        d.target.additional_logic = "// {{UNKNOWN}}".to_string();

        let err = generator.render_all(&d).unwrap_err();
        match err {
            GenerateError::UnresolvedPlaceholders { placeholders, .. } => {
                assert_eq!(placeholders, vec!["UNKNOWN".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }

        config.templates.strict = false;
        assert!(HarnessGenerator::new(&config).render_all(&d).is_ok());
    }

    #[test]
    fn test_invalid_identifier_is_rejected() {
        let fixture = Fixture::new();
        let generator = HarnessGenerator::new(&fixture.config());

        let err = generator.generate(&fixture.descriptor("../escape")).unwrap_err();
        assert!(matches!(err, GenerateError::Workspace(_)));
    }

    #[test]
    fn test_generate_all_uses_one_directory_per_identifier() {
        let fixture = Fixture::new();
        let generator = HarnessGenerator::new(&fixture.config());

        let results = generator
            .generate_all(&[fixture.descriptor("A"), fixture.descriptor("B")])
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_ne!(results[0].directory(), results[1].directory());
    }

    /// Real filesystem, except that directories can never be removed
    struct UndeletableOps;

    impl DirectoryOps for UndeletableOps {
        fn exists(&self, path: &Path) -> bool {
            path.exists()
        }

        fn remove_all(&self, _path: &Path) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "in use by another process",
            ))
        }

        fn create_all(&self, path: &Path) -> std::io::Result<()> {
            std::fs::create_dir_all(path)
        }

        fn pause(&self, _duration: std::time::Duration) {}
    }

    #[test]
    fn test_generate_into_locked_directory_reuses_it() {
        let fixture = Fixture::new();
        let config = fixture.config();
        let first = HarnessGenerator::new(&config)
            .generate(&fixture.descriptor("MyBench"))
            .unwrap();
        std::fs::write(first.directory().join("stale.obj"), b"old").unwrap();
        std::fs::write(first.directory().join("Program.cs"), b"old").unwrap();

        let host = Arc::new(config.host.clone());
        let generator = HarnessGenerator::with_directory_ops(&config, host, UndeletableOps);
        let result = generator.generate(&fixture.descriptor("MyBench")).unwrap();

        assert!(!result.is_fresh());
        assert_eq!(
            result.cause().unwrap().kind(),
            std::io::ErrorKind::PermissionDenied
        );
        assert_eq!(
            file_names(result.directory()),
            vec![
                "BuildBenchmark.bat",
                "Program.cs",
                "Program.csproj",
                "app.config",
                "stale.obj"
            ]
        );
        let source = std::fs::read_to_string(result.directory().join("Program.cs")).unwrap();
        assert!(source.contains("private Action targetDelegate;"));
    }

    #[cfg(unix)]
    #[test]
    fn test_build_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let fixture = Fixture::new();
        let generator = HarnessGenerator::new(&fixture.config());
        let result = generator.generate(&fixture.descriptor("MyBench")).unwrap();

        let mode = std::fs::metadata(result.directory().join("BuildBenchmark.bat"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
