// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! hdds-cdr-gen - schema files to Rust
//!
//! # Usage
//!
//! ```bash
//! # Render a schema! table to stdout
//! hdds-cdr-gen generate sensors.yaml
//!
//! # Expanded items for include!() from build.rs output
//! hdds-cdr-gen generate sensors.yaml --mode expanded --out src/sensors.rs
//!
//! # Report every problem in a schema file
//! hdds-cdr-gen check sensors.yaml
//!
//! # Identity, lifetime and field layout of each type
//! hdds-cdr-gen describe sensors.yaml
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use hdds_cdr_gen::Mode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hdds-cdr-gen")]
#[command(about = "Schema checker and code generator for hdds-cdr")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); falls back to HDDS_CDR_LOG, then RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust source from a schema file
    Generate {
        /// Input schema YAML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Output flavour
        #[arg(long, value_enum, default_value_t = Mode::Table)]
        mode: Mode,
    },

    /// Validate a schema file and report every problem
    Check {
        /// Input schema YAML file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print identity, lifetime and field layout of each type
    Describe {
        /// Input schema YAML file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_env("HDDS_CDR_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate { input, out, mode } => cmd_generate(&input, out.as_deref(), mode),
        Commands::Check { input } => cmd_check(&input),
        Commands::Describe { input } => cmd_describe(&input),
    }
}

fn cmd_generate(input: &Path, out: Option<&Path>, mode: Mode) -> anyhow::Result<()> {
    let code = hdds_cdr_gen::generate_file(input, mode)?;

    match out {
        Some(path) => {
            std::fs::write(path, &code)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("[OK] Generated {} ({} bytes)", path.display(), code.len());
        }
        None => print!("{code}"),
    }
    Ok(())
}

fn cmd_check(input: &Path) -> anyhow::Result<()> {
    let errors = hdds_cdr_gen::check_file(input)?;

    if errors.is_empty() {
        println!("[OK] Schema is valid: {}", input.display());
        return Ok(());
    }

    eprintln!("[ERROR] Schema is invalid: {}", input.display());
    eprintln!();
    for (idx, err) in errors.iter().enumerate() {
        eprintln!("  {}. {}", idx + 1, err);
    }
    eprintln!();
    anyhow::bail!("Validation failed with {} error(s)", errors.len());
}

fn cmd_describe(input: &Path) -> anyhow::Result<()> {
    let compiled = hdds_cdr_gen::compile_file(input)?;
    print!("{}", hdds_cdr_gen::describe(&compiled));
    Ok(())
}
