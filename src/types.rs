//! Core types for CRD documentation generation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default comment wrap column.
pub const DEFAULT_WRAP: usize = 64;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One OpenAPI v3 schema fragment, restricted to what CRD docs need.
///
/// Keys other than `type`, `description`, `properties` and `items` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared properties, in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
}

/// How a schema node is rendered, decided by its declared `type`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind<'a> {
    /// `type: object`. `None` properties means an opaque `<object>` leaf.
    Object(Option<&'a IndexMap<String, SchemaNode>>),
    /// `type: array`. `None` items means an opaque `<array>` leaf.
    Array(Option<&'a SchemaNode>),
    /// Any other type token, or none at all.
    Scalar(Option<&'a str>),
}

impl SchemaNode {
    /// Classify this node by its declared `type`.
    pub fn kind(&self) -> NodeKind<'_> {
        match self.kind.as_deref() {
            Some("object") => NodeKind::Object(self.properties.as_ref()),
            Some("array") => NodeKind::Array(self.items.as_deref()),
            other => NodeKind::Scalar(other),
        }
    }

    /// Placeholder printed for a leaf of this node's kind, e.g. `<string>`.
    pub fn placeholder(&self) -> String {
        match self.kind() {
            NodeKind::Object(_) => "<object>".to_string(),
            NodeKind::Array(_) => "<array>".to_string(),
            NodeKind::Scalar(ty) => format!("<{}>", ty.unwrap_or_default()),
        }
    }
}

/// The parts of a `CustomResourceDefinition` manifest used for rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomResourceDefinition {
    pub spec: CrdSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrdSpec {
    pub group: String,
    pub names: CrdNames,
    #[serde(default)]
    pub versions: Vec<CrdVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrdNames {
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrdVersion {
    pub name: String,
    #[serde(default)]
    pub served: bool,
    #[serde(default)]
    pub storage: bool,
    #[serde(default)]
    pub schema: Option<CrdVersionSchema>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrdVersionSchema {
    #[serde(rename = "openAPIV3Schema")]
    pub open_api_v3_schema: SchemaNode,
}

impl CrdSpec {
    /// Find a version entry by name.
    pub fn version(&self, name: &str) -> Option<&CrdVersion> {
        self.versions.iter().find(|v| v.name == name)
    }

    /// The version flagged `storage: true`. Failing that, the only served
    /// version, or the only version if there is just one.
    pub fn default_version(&self) -> Option<&CrdVersion> {
        if let Some(storage) = self.versions.iter().find(|v| v.storage) {
            return Some(storage);
        }
        let mut served = self.versions.iter().filter(|v| v.served);
        match (served.next(), served.next()) {
            (Some(only), None) => Some(only),
            _ => match self.versions.as_slice() {
                [only] => Some(only),
                _ => None,
            },
        }
    }

    /// Names of all declared versions.
    pub fn version_names(&self) -> Vec<String> {
        self.versions.iter().map(|v| v.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn kind_follows_declared_type() {
        let obj = node(json!({"type": "object", "properties": {"a": {"type": "string"}}}));
        assert!(matches!(obj.kind(), NodeKind::Object(Some(props)) if props.len() == 1));

        let arr = node(json!({"type": "array", "items": {"type": "string"}}));
        assert!(matches!(arr.kind(), NodeKind::Array(Some(_))));

        let scalar = node(json!({"type": "integer"}));
        assert_eq!(scalar.kind(), NodeKind::Scalar(Some("integer")));
    }

    #[test]
    fn opaque_leaves() {
        assert_eq!(node(json!({"type": "object"})).kind(), NodeKind::Object(None));
        assert_eq!(node(json!({"type": "array"})).kind(), NodeKind::Array(None));
    }

    #[test]
    fn untyped_node_is_scalar_without_token() {
        let n = node(json!({"x-kubernetes-int-or-string": true}));
        assert_eq!(n.kind(), NodeKind::Scalar(None));
        assert_eq!(n.placeholder(), "<>");
    }

    #[test]
    fn properties_keep_document_order() {
        let n = node(json!({
            "type": "object",
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "string"},
                "mid": {"type": "string"}
            }
        }));
        let names: Vec<_> = n.properties.unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn default_version_prefers_storage() {
        let spec: CrdSpec = serde_json::from_value(json!({
            "group": "example.com",
            "names": {"kind": "Widget"},
            "versions": [
                {"name": "v1alpha1", "served": true},
                {"name": "v1", "served": true, "storage": true}
            ]
        }))
        .unwrap();
        assert_eq!(spec.default_version().unwrap().name, "v1");
        assert_eq!(spec.version_names(), vec!["v1alpha1", "v1"]);
    }

    #[test]
    fn default_version_single_entry() {
        let spec: CrdSpec = serde_json::from_value(json!({
            "group": "example.com",
            "names": {"kind": "Widget"},
            "versions": [{"name": "v1"}]
        }))
        .unwrap();
        assert_eq!(spec.default_version().unwrap().name, "v1");
    }

    #[test]
    fn default_version_single_served() {
        let spec: CrdSpec = serde_json::from_value(json!({
            "group": "example.com",
            "names": {"kind": "Widget"},
            "versions": [
                {"name": "v1alpha1", "served": false},
                {"name": "v1beta1", "served": true}
            ]
        }))
        .unwrap();
        assert_eq!(spec.default_version().unwrap().name, "v1beta1");
    }

    #[test]
    fn default_version_ambiguous() {
        let spec: CrdSpec = serde_json::from_value(json!({
            "group": "example.com",
            "names": {"kind": "Widget"},
            "versions": [{"name": "v1"}, {"name": "v2"}]
        }))
        .unwrap();
        assert!(spec.default_version().is_none());
    }
}
