//! Batch generation - one rendered doc per configuration overlay.
//!
//! For every overlay in the config directory:
//! - the CRD with the same file name is loaded from the CRD directory
//! - the requested version(s) are rendered
//! - the result is written under the same file name in the output directory
//!
//! A missing version skips that file; anything else aborts the run.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::config::DocConfig;
use crate::document::{render, resolve_versions, write_document};
use crate::error::DocGenError;
use crate::loader::{collect_config_files, load_config, load_crd, sibling_path};
use crate::types::DEFAULT_WRAP;
use crate::writer::Writer;

/// Directories and formatting for a batch run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory of configuration overlays (`*.yaml`, `*.yml`).
    pub config_dir: PathBuf,
    /// Directory holding the CRD manifests, named like the overlays.
    pub crd_dir: PathBuf,
    /// Output directory, created if missing.
    pub out_dir: PathBuf,
    /// Comment wrap column.
    pub wrap: usize,
}

impl GenerateOptions {
    pub fn new(
        config_dir: impl Into<PathBuf>,
        crd_dir: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config_dir: config_dir.into(),
            crd_dir: crd_dir.into(),
            out_dir: out_dir.into(),
            wrap: DEFAULT_WRAP,
        }
    }

    pub fn wrap(mut self, wrap: usize) -> Self {
        self.wrap = wrap;
        self
    }
}

/// Outcome for one overlay file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Written,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub config: PathBuf,
    pub crd: PathBuf,
    pub output: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub files_processed: usize,
    pub written: usize,
    pub skipped: usize,
    pub results: Vec<FileResult>,
}

impl GenerateReport {
    /// Returns true if every overlay produced output.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }
}

/// Render every overlay in `options.config_dir`.
///
/// # Errors
///
/// Returns the first non-recoverable error: a missing or unparsable overlay
/// or CRD, or a failure creating or writing output.
pub fn generate(options: &GenerateOptions) -> Result<GenerateReport, DocGenError> {
    std::fs::create_dir_all(&options.out_dir).map_err(|source| DocGenError::WriteError {
        path: options.out_dir.clone(),
        source,
    })?;

    let files = collect_config_files(&options.config_dir)?;
    let mut results = Vec::with_capacity(files.len());

    for config_file in &files {
        results.push(generate_file(config_file, options)?);
    }

    let written = results
        .iter()
        .filter(|r| r.status == FileStatus::Written)
        .count();

    Ok(GenerateReport {
        files_processed: files.len(),
        written,
        skipped: files.len() - written,
        results,
    })
}

fn generate_file(config_file: &Path, options: &GenerateOptions) -> Result<FileResult, DocGenError> {
    info!(config = %config_file.display(), "processing");

    let config = DocConfig::root(load_config(config_file)?);
    let crd_file = sibling_path(config_file, &options.crd_dir);
    let output_file = sibling_path(config_file, &options.out_dir);
    info!(source = %crd_file.display(), target = %output_file.display(), "rendering CRD");

    let crd = load_crd(&crd_file)?;

    let mut result = FileResult {
        config: config_file.to_path_buf(),
        crd: crd_file,
        output: output_file,
        status: FileStatus::Skipped,
        versions: Vec::new(),
        message: None,
    };

    // Resolve versions and schemas up front so a skipped file leaves no output.
    if let Err(e) = resolve_versions(&crd.spec, &config, None) {
        if !e.is_recoverable() {
            return Err(e);
        }
        error!(config = %config_file.display(), "{}, skipping", e);
        result.message = Some(e.to_string());
        return Ok(result);
    }

    let file = File::create(&result.output).map_err(|source| DocGenError::WriteError {
        path: result.output.clone(),
        source,
    })?;
    let mut out = Writer::with_wrap(BufWriter::new(file), options.wrap);

    match write_document(&mut out, &crd.spec, &config, None) {
        Ok(versions) => {
            info!(versions = %versions.join(", "), "written");
            result.status = FileStatus::Written;
            result.versions = versions;
            Ok(result)
        }
        Err(DocGenError::Io(source)) => Err(DocGenError::WriteError {
            path: result.output,
            source,
        }),
        Err(e) if e.is_recoverable() => {
            error!(config = %config_file.display(), "{}, skipping", e);
            result.message = Some(e.to_string());
            Ok(result)
        }
        Err(e) => Err(e),
    }
}

/// Render a single CRD file with an optional overlay file.
///
/// # Errors
///
/// Returns loading errors for either file and the errors of
/// [`write_document`]; a missing version is an error here.
pub fn render_file(
    crd_file: &Path,
    config_file: Option<&Path>,
    version_override: Option<&str>,
    wrap: usize,
) -> Result<String, DocGenError> {
    let raw = match config_file {
        Some(path) => load_config(path)?,
        None => serde_json::Value::Object(serde_json::Map::new()),
    };
    let config = DocConfig::root(raw);
    let crd = load_crd(crd_file)?;
    render(&crd.spec, &config, version_override, wrap)
}
