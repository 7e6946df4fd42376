//! Configuration overlay: per-field rules for what to hide or drop.
//!
//! An overlay is a nested mapping keyed by schema property name. Keys that
//! start with an underscore are directives for the field they sit in:
//!
//! | Key | Effect |
//! |-----|--------|
//! | `_delete: true` | Drop the field and its subtree |
//! | `_hideDescription: true` | Drop this field's description comment |
//! | `_hideChildDescriptions: true` | Drop descriptions of every descendant |
//! | `_maxDepth: n` | Drop descendants more than `n - 1` levels below |
//! | `_version` | (root only) CRD version(s) to render |
//!
//! A `null` entry (`replicas:` with no value) also deletes the field.

use serde_json::{json, Map, Value};

use crate::error::DocGenError;
use crate::types::json_type_name;

pub const DELETE: &str = "_delete";
pub const HIDE_DESCRIPTION: &str = "_hideDescription";
pub const HIDE_CHILD_DESCRIPTIONS: &str = "_hideChildDescriptions";
pub const MAX_DEPTH: &str = "_maxDepth";
pub const VERSION: &str = "_version";

/// Root fields that never appear in rendered output.
pub const ALWAYS_DELETED: &[&str] = &["apiVersion", "kind", "status"];

/// Rules in effect at one position of the schema tree.
///
/// Children are derived with [`DocConfig::child`]; the parent is never
/// mutated, so sibling subtrees cannot leak state into each other.
#[derive(Debug, Clone, PartialEq)]
pub struct DocConfig {
    raw: Value,
    hide_all_descriptions: bool,
    remaining_depth: Option<i64>,
}

impl DocConfig {
    /// Wrap a raw overlay document with no inherited state.
    pub fn new(raw: Value) -> Self {
        Self {
            raw,
            hide_all_descriptions: false,
            remaining_depth: None,
        }
    }

    /// Build the root node for a document, seeding deletion of CRD boilerplate.
    ///
    /// The seeded entries replace anything the overlay declares for those fields.
    pub fn root(raw: Value) -> Self {
        let mut map = match raw {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for field in ALWAYS_DELETED {
            map.insert(field.to_string(), json!({ DELETE: true }));
        }
        Self::new(Value::Object(map))
    }

    /// Rules for the property `field` beneath this node.
    pub fn child(&self, field: &str) -> DocConfig {
        let raw = match self.raw.get(field) {
            Some(Value::Null) => json!({ DELETE: true }),
            Some(entry @ Value::Object(_)) => entry.clone(),
            _ => Value::Object(Map::new()),
        };

        let remaining_depth = match self.max_depth() {
            Some(depth) => Some(depth.saturating_sub(1)),
            None => self.remaining_depth.map(|depth| depth.saturating_sub(1)),
        };

        DocConfig {
            raw,
            hide_all_descriptions: self.hide_all_descriptions
                || self.flag(HIDE_CHILD_DESCRIPTIONS),
            remaining_depth,
        }
    }

    /// Whether this field is dropped, explicitly or by an exhausted depth limit.
    pub fn is_deleted(&self) -> bool {
        self.flag(DELETE) || self.remaining_depth.is_some_and(|depth| depth < 1)
    }

    /// Whether this field's description comment is suppressed.
    pub fn hides_description(&self) -> bool {
        self.flag(HIDE_DESCRIPTION) || self.hide_all_descriptions
    }

    /// Versions requested by `_version`, which may be a string or a list.
    pub fn versions(&self) -> Result<Vec<String>, DocGenError> {
        match self.raw.get(VERSION) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(DocGenError::InvalidConfig {
                        path: format!("/{}/{}", VERSION, i),
                        message: format!("expected string, got {}", json_type_name(other)),
                    }),
                })
                .collect(),
            Some(other) => Err(DocGenError::InvalidConfig {
                path: format!("/{}", VERSION),
                message: format!(
                    "expected string or list of strings, got {}",
                    json_type_name(other)
                ),
            }),
        }
    }

    fn flag(&self, key: &str) -> bool {
        self.raw.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn max_depth(&self) -> Option<i64> {
        self.raw.get(MAX_DEPTH).and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}
