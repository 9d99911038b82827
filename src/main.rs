//! @ai:module:intent CLI for the benchmark harness generator
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use bench_harness::{
    config::GeneratorConfig,
    descriptor::{DescriptorLoader, DescriptorLoaderTrait},
    generator::{list_artifacts, HarnessGenerator},
    template::unresolved_placeholders,
    workspace::GenerationResult,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bench-harness")]
#[command(about = "Generate buildable benchmark harness projects from benchmark descriptors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate harness projects
    Generate {
        /// Descriptor file, or directory of descriptor files
        #[arg(short, long)]
        descriptor: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output root (overrides the configuration)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Only generate these identifiers (comma-separated)
        #[arg(long)]
        only: Option<String>,

        /// Fail when rendered artifacts still contain placeholders
        #[arg(long)]
        strict: bool,
    },

    /// Print rendered artifacts without writing anything
    Render {
        /// Descriptor file
        #[arg(short, long)]
        descriptor: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only print this artifact (e.g. Program.cs)
        #[arg(short, long)]
        artifact: Option<String>,
    },

    /// Load descriptors and check their renders for leftover placeholders
    Validate {
        /// Descriptor file, or directory of descriptor files
        #[arg(short, long)]
        descriptor: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "bench-harness.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bench_harness=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            descriptor,
            config,
            root,
            only,
            strict,
        } => generate(GenerateArgs {
            descriptor,
            config,
            root,
            only,
            strict,
        }),
        Commands::Render {
            descriptor,
            config,
            artifact,
        } => render(descriptor, config, artifact),
        Commands::Validate { descriptor, config } => validate(descriptor, config),
        Commands::Init { output } => init_config(output),
    }
}

struct GenerateArgs {
    descriptor: PathBuf,
    config: Option<PathBuf>,
    root: Option<PathBuf>,
    only: Option<String>,
    strict: bool,
}

/// @ai:intent Generate harness projects for every selected descriptor
/// @ai:effects fs:read, fs:write
fn generate(args: GenerateArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;
    if let Some(root) = args.root {
        config.output.root = root;
    }
    config.templates.strict |= args.strict;

    let only = parse_list(args.only);
    let descriptors = DescriptorLoader::new().load_filtered(&args.descriptor, only.as_deref())?;

    if descriptors.is_empty() {
        tracing::warn!("No descriptors found at {}", args.descriptor.display());
        return Ok(());
    }

    tracing::info!(
        "Generating {} harness project(s) into {}",
        descriptors.len(),
        config.output.root.display()
    );

    std::fs::create_dir_all(&config.output.root).with_context(|| {
        format!(
            "Failed to create output root {}",
            config.output.root.display()
        )
    })?;

    let generator = HarnessGenerator::new(&config);
    let results = generator.generate_all(&descriptors)?;

    print_summary(&results);
    Ok(())
}

/// @ai:intent Print rendered artifacts to stdout
/// @ai:effects fs:read, io
fn render(descriptor: PathBuf, config: Option<PathBuf>, artifact: Option<String>) -> Result<()> {
    let config = load_or_default_config(config)?;
    let descriptor = DescriptorLoader::new().load_file(&descriptor)?;
    let generator = HarnessGenerator::new(&config);

    let artifacts = generator.render_all(&descriptor)?;
    let selected: Vec<_> = artifacts
        .iter()
        .filter(|a| {
            artifact
                .as_deref()
                .map(|name| a.file_name.eq_ignore_ascii_case(name))
                .unwrap_or(true)
        })
        .collect();

    if selected.is_empty() {
        anyhow::bail!(
            "Unknown artifact '{}'. Expected one of: {}",
            artifact.unwrap_or_default(),
            artifacts
                .iter()
                .map(|a| a.file_name)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    for a in selected {
        println!("==> {} <==", a.file_name);
        println!("{}", a.content);
    }
    Ok(())
}

/// @ai:intent Load descriptors and report artifacts with leftover placeholders
/// @ai:effects fs:read
fn validate(descriptor: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let mut config = load_or_default_config(config)?;
    config.templates.strict = false;

    let descriptors = DescriptorLoader::new().load_filtered(&descriptor, None)?;
    let generator = HarnessGenerator::new(&config);
    let mut problems = 0;

    for d in &descriptors {
        for artifact in generator.render_all(d)? {
            let leftovers = unresolved_placeholders(&artifact.content);
            if !leftovers.is_empty() {
                problems += 1;
                println!(
                    "  - {} / {}: {}",
                    d.identifier,
                    artifact.file_name,
                    leftovers.join(", ")
                );
            }
        }
    }

    if problems > 0 {
        anyhow::bail!("{} artifact(s) contain unresolved placeholders", problems);
    }

    println!("Descriptor validation passed!");
    println!("Total descriptors: {}", descriptors.len());
    for d in &descriptors {
        println!("  - {} ({}.{})", d.identifier, d.target.owner.full_name(), d.target.method);
    }
    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = GeneratorConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<GeneratorConfig> {
    match path {
        Some(p) => GeneratorConfig::load(&p)
            .with_context(|| format!("Failed to load configuration {}", p.display())),
        None => {
            let default_path = PathBuf::from("bench-harness.toml");

            if default_path.exists() {
                GeneratorConfig::load(&default_path)
            } else {
                Ok(GeneratorConfig::default())
            }
        }
    }
}

/// @ai:intent Split a comma-separated CLI list
/// @ai:effects pure
fn parse_list(value: Option<String>) -> Option<Vec<String>> {
    value.map(|s| {
        s.split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    })
}

/// @ai:intent Print generation summary to console
/// @ai:effects fs:read, io
fn print_summary(results: &[GenerationResult]) {
    println!();
    println!("Generated Harness Projects");
    println!("==========================");
    println!();
    println!("{:<40} {:>6} {:>7}", "Directory", "Files", "Fresh");
    println!("{}", "-".repeat(55));

    for result in results {
        println!(
            "{:<40} {:>6} {:>7}",
            result.directory().display(),
            list_artifacts(result.directory()).len(),
            if result.is_fresh() { "yes" } else { "no" }
        );
    }

    let stale: Vec<_> = results.iter().filter(|r| !r.is_fresh()).collect();
    if !stale.is_empty() {
        println!();
        println!("Warnings:");
        for result in stale {
            println!(
                "  {} was not cleared ({}); it may contain files from an earlier run",
                result.directory().display(),
                result
                    .cause()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown cause".to_string())
            );
        }
    }
    println!();
}
