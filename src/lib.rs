//! CRD Doc Generator
//!
//! Renders the OpenAPI v3 schema of a Kubernetes `CustomResourceDefinition`
//! as a commented YAML stub, for use as reference documentation.
//!
//! # Example
//!
//! ```
//! use crd_docgen::{load_config_str, load_crd_str, render, DocConfig, DEFAULT_WRAP};
//!
//! let crd = load_crd_str(r#"
//! spec:
//!   group: apps
//!   names: { kind: Deployment }
//!   versions:
//!     - name: v1
//!       schema:
//!         openAPIV3Schema:
//!           type: object
//!           properties:
//!             kind: { type: string }
//!             replicas:
//!               type: integer
//!               description: Number of desired pods.
//! "#).unwrap();
//!
//! let config = DocConfig::root(load_config_str("_version: v1").unwrap());
//! let doc = render(&crd.spec, &config, None, DEFAULT_WRAP).unwrap();
//!
//! assert_eq!(doc, "---
//! apiVersion: apps/v1
//! kind: Deployment
//!
//! ## Number of desired pods.
//! replicas: <integer>
//! ");
//! ```
//!
//! # Overlay Directives
//!
//! | Key | Effect |
//! |-----|--------|
//! | `_delete: true` or `null` | Drop the field and everything below it |
//! | `_hideDescription: true` | Drop the field's comment |
//! | `_hideChildDescriptions: true` | Drop comments for all descendants |
//! | `_maxDepth: n` | Drop descendants `n` or more levels down |
//! | `_version` | Version or list of versions to render |
//!
//! `apiVersion`, `kind` and `status` at the root are always dropped, whatever
//! the overlay declares for them.

mod config;
mod document;
mod error;
mod generate;
mod loader;
mod types;
mod walker;
mod writer;

pub use config::{
    DocConfig, ALWAYS_DELETED, DELETE, HIDE_CHILD_DESCRIPTIONS, HIDE_DESCRIPTION, MAX_DEPTH,
    VERSION,
};
pub use document::{render, resolve_versions, select_versions, write_document, write_version};
pub use error::DocGenError;
pub use generate::{
    generate, render_file, FileResult, FileStatus, GenerateOptions, GenerateReport,
};
pub use loader::{
    collect_config_files, load_config, load_config_str, load_crd, load_crd_str, load_yaml,
    sibling_path,
};
pub use types::{
    CrdNames, CrdSpec, CrdVersion, CrdVersionSchema, CustomResourceDefinition, NodeKind,
    SchemaNode, DEFAULT_WRAP,
};
pub use walker::write_properties;
pub use writer::{word_wrap, Indented, Writer};
