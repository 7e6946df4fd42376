//! Error types for CRD documentation generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading inputs or rendering documentation.
#[derive(Debug, Error)]
pub enum DocGenError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // Parse errors (exit code 2)
    #[error("invalid YAML in {path}: {source}")]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // Schema / config errors (exit code 2)
    #[error("version \"{version}\" not found in CRD (available: {})", available.join(", "))]
    VersionNotFound {
        version: String,
        available: Vec<String>,
    },

    #[error("no version selected: set _version in the config or mark a storage version")]
    NoVersionSelected,

    #[error("version \"{version}\" has no openAPIV3Schema")]
    MissingSchema { version: String },

    #[error("invalid config at {path}: {message}")]
    InvalidConfig { path: String, message: String },
}

impl DocGenError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DocGenError::FileNotFound { .. }
            | DocGenError::ReadError { .. }
            | DocGenError::WriteError { .. }
            | DocGenError::Io(_) => 3,
            _ => 2,
        }
    }

    /// True for errors that skip a single document instead of aborting a run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DocGenError::VersionNotFound { .. }
                | DocGenError::NoVersionSelected
                | DocGenError::MissingSchema { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let err = DocGenError::FileNotFound {
            path: PathBuf::from("crd.yaml"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = DocGenError::VersionNotFound {
            version: "v2".into(),
            available: vec!["v1".into()],
        };
        assert_eq!(err.exit_code(), 2);

        let err = DocGenError::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn version_not_found_display() {
        let err = DocGenError::VersionNotFound {
            version: "v1beta1".into(),
            available: vec!["v1alpha1".into(), "v1".into()],
        };
        assert_eq!(
            err.to_string(),
            "version \"v1beta1\" not found in CRD (available: v1alpha1, v1)"
        );
    }

    #[test]
    fn only_version_errors_are_recoverable() {
        assert!(DocGenError::NoVersionSelected.is_recoverable());
        assert!(DocGenError::MissingSchema {
            version: "v1".into()
        }
        .is_recoverable());
        assert!(!DocGenError::FileNotFound {
            path: PathBuf::from("x.yaml")
        }
        .is_recoverable());
    }
}
