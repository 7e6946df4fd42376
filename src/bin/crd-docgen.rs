//! CRD Doc Generator CLI
//!
//! Command-line interface for rendering CRD schemas as commented YAML docs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use crd_docgen::{generate, render_file, FileStatus, GenerateOptions, DEFAULT_WRAP};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crd-docgen")]
#[command(about = "Render Kubernetes CRD schemas as commented YAML reference docs")]
#[command(version)]
struct Cli {
    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every overlay in a directory against the CRD of the same name
    Generate {
        /// Directory of configuration overlays
        #[arg(long)]
        config_dir: PathBuf,

        /// Directory of CRD manifests
        #[arg(long)]
        crd_dir: PathBuf,

        /// Output directory (created if missing)
        #[arg(long)]
        out_dir: PathBuf,

        /// Comment wrap column
        #[arg(long, default_value_t = DEFAULT_WRAP)]
        wrap: usize,

        /// Print a JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Fail if any overlay was skipped
        #[arg(long)]
        strict: bool,
    },

    /// Render a single CRD
    Render {
        /// CRD manifest
        crd: PathBuf,

        /// Configuration overlay
        #[arg(long)]
        config: Option<PathBuf>,

        /// Version to render (overrides the overlay's _version)
        #[arg(long)]
        crd_version: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Comment wrap column
        #[arg(long, default_value_t = DEFAULT_WRAP)]
        wrap: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let result = match cli.command {
        Commands::Generate {
            config_dir,
            crd_dir,
            out_dir,
            wrap,
            json,
            strict,
        } => run_generate(
            GenerateOptions::new(config_dir, crd_dir, out_dir).wrap(wrap),
            json,
            strict,
        ),

        Commands::Render {
            crd,
            config,
            crd_version,
            output,
            wrap,
        } => run_render(&crd, config.as_deref(), crd_version.as_deref(), output, wrap),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_generate(options: GenerateOptions, json: bool, strict: bool) -> Result<(), u8> {
    let report = generate(&options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if json {
        let output = serde_json::to_string_pretty(&report).map_err(|e| {
            eprintln!("Error serializing report: {}", e);
            2u8
        })?;
        println!("{}", output);
    } else {
        for result in &report.results {
            let icon = match result.status {
                FileStatus::Written => "\x1b[32m✓\x1b[0m",
                FileStatus::Skipped => "\x1b[33m⚠\x1b[0m",
            };
            match &result.message {
                Some(msg) => println!("  {} {} ({})", icon, result.config.display(), msg),
                None => println!("  {} {}", icon, result.output.display()),
            }
        }
        println!(
            "{} files processed: {} written, {} skipped",
            report.files_processed, report.written, report.skipped
        );
    }

    if strict && !report.is_complete() {
        return Err(1);
    }
    Ok(())
}

fn run_render(
    crd: &Path,
    config: Option<&Path>,
    version: Option<&str>,
    output: Option<PathBuf>,
    wrap: usize,
) -> Result<(), u8> {
    let doc = render_file(crd, config, version, wrap).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &doc).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => print!("{}", doc),
    }

    Ok(())
}
