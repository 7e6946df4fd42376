//! Loading CRDs and configuration overlays from YAML.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DocGenError;
use crate::types::CustomResourceDefinition;

/// Load and deserialize a YAML file.
///
/// # Errors
///
/// Returns `DocGenError::FileNotFound` if the file doesn't exist,
/// or `DocGenError::InvalidYaml` if it doesn't parse into `T`.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, DocGenError> {
    let content = read_file(path)?;
    parse_yaml(&content, path)
}

fn read_file(path: &Path) -> Result<String, DocGenError> {
    if !path.exists() {
        return Err(DocGenError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|source| DocGenError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_yaml<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, DocGenError> {
    serde_yaml::from_str(content).map_err(|source| DocGenError::InvalidYaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a CRD manifest from a file path.
pub fn load_crd(path: &Path) -> Result<CustomResourceDefinition, DocGenError> {
    load_yaml(path)
}

/// Load a CRD manifest from a YAML string.
pub fn load_crd_str(content: &str) -> Result<CustomResourceDefinition, DocGenError> {
    parse_yaml(content, Path::new("<string>"))
}

/// Load a configuration overlay. A file with no content yields an empty mapping.
pub fn load_config(path: &Path) -> Result<Value, DocGenError> {
    let content = read_file(path)?;
    parse_config(&content, path)
}

/// Load a configuration overlay from a YAML string.
pub fn load_config_str(content: &str) -> Result<Value, DocGenError> {
    parse_config(content, Path::new("<string>"))
}

fn parse_config(content: &str, path: &Path) -> Result<Value, DocGenError> {
    let blank = content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
    if blank {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    match parse_yaml(content, path)? {
        Value::Null => Ok(Value::Object(serde_json::Map::new())),
        other => Ok(other),
    }
}

/// Configuration overlays in `dir`, sorted by name. Not recursive.
///
/// # Errors
///
/// Returns `DocGenError::FileNotFound` if `dir` doesn't exist, or
/// `DocGenError::ReadError` if it can't be listed.
pub fn collect_config_files(dir: &Path) -> Result<Vec<PathBuf>, DocGenError> {
    if !dir.is_dir() {
        return Err(DocGenError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| DocGenError::ReadError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_yaml(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Path of the file named like `config_file` inside `dir`.
///
/// Overlays, CRD sources and rendered docs share a file name.
pub fn sibling_path(config_file: &Path, dir: &Path) -> PathBuf {
    match config_file.file_name() {
        Some(name) => dir.join(name),
        None => dir.to_path_buf(),
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
