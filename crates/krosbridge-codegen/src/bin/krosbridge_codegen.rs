//! Generate krosbridge Kotlin bindings from JSON schema manifests.
//!
//! Usage:
//!   cargo run -p krosbridge-codegen -- \
//!     --manifest schemas.json \
//!     --output build/generated/kotlin \
//!     --package-prefix com.example.robot
//!
//! Enable logging with RUST_LOG:
//!   RUST_LOG=krosbridge_codegen=debug cargo run -p krosbridge-codegen -- ...

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use krosbridge_codegen::{Builder, GeneratorConfig, SchemaManifest};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Schema manifest to generate from (repeatable)
    #[arg(short, long = "manifest", required = true)]
    manifests: Vec<PathBuf>,

    /// Root directory of the generated package tree
    #[arg(short, long)]
    output: PathBuf,

    /// Package prepended to every generated namespace
    #[arg(short, long, default_value = "")]
    package_prefix: String,

    /// Rewrite inline nested types even when their file already exists
    #[arg(long)]
    overwrite_existing: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().compact())
        .init();

    let mut schemas = Vec::new();
    for path in &args.manifests {
        let manifest = SchemaManifest::from_path(path)
            .with_context(|| format!("Failed to load manifest {:?}", path))?;
        tracing::info!("Loaded {} schemas from {:?}", manifest.schemas.len(), path);
        schemas.extend(manifest.schemas);
    }

    let mut generator = GeneratorConfig::builder()
        .package_prefix(args.package_prefix)
        .output_dir(&args.output)
        .skip_existing(!args.overwrite_existing)
        .build()
        .context("Failed to prepare output directory")?;

    let report = generator
        .generate_all(&schemas)
        .context("Code generation failed")?;

    println!(
        "Wrote {} files to {:?} ({} classes already present)",
        report.written.len(),
        args.output,
        report.skipped.len()
    );
    Ok(())
}
