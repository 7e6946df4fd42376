//! Schema walker - renders a schema tree as commented YAML stub lines.
//!
//! The schema and the configuration overlay are walked in lockstep: every
//! property resolves its own [`DocConfig`] from the parent's, and that config
//! decides whether the property is drawn and whether its description shows.

use std::io::{self, Write};

use indexmap::IndexMap;

use crate::config::DocConfig;
use crate::types::{NodeKind, SchemaNode};
use crate::writer::Writer;

/// Render every property of `schema` at the writer's current depth.
///
/// Nodes without `properties` render nothing.
pub fn write_properties<W: Write>(
    out: &mut Writer<W>,
    schema: &SchemaNode,
    config: &DocConfig,
) -> io::Result<()> {
    match &schema.properties {
        Some(properties) => write_property_map(out, properties, config),
        None => Ok(()),
    }
}

fn write_property_map<W: Write>(
    out: &mut Writer<W>,
    properties: &IndexMap<String, SchemaNode>,
    config: &DocConfig,
) -> io::Result<()> {
    for (name, prop) in properties {
        let child_config = config.child(name);
        match prop.kind() {
            NodeKind::Object(props) => write_object(out, name, prop, props, &child_config)?,
            NodeKind::Array(items) => write_array(out, name, prop, items, &child_config)?,
            NodeKind::Scalar(_) => write_scalar(out, name, prop, &child_config)?,
        }
    }
    Ok(())
}

fn key_header<W: Write>(
    out: &mut Writer<W>,
    schema: &SchemaNode,
    config: &DocConfig,
) -> io::Result<()> {
    let Some(description) = &schema.description else {
        return Ok(());
    };
    if config.hides_description() {
        return Ok(());
    }
    out.line("")?;
    out.comment(description)
}

fn write_scalar<W: Write>(
    out: &mut Writer<W>,
    name: &str,
    schema: &SchemaNode,
    config: &DocConfig,
) -> io::Result<()> {
    if config.is_deleted() {
        return Ok(());
    }

    key_header(out, schema, config)?;
    out.line(&format!("{}: {}", name, schema.placeholder()))
}

fn write_object<W: Write>(
    out: &mut Writer<W>,
    name: &str,
    schema: &SchemaNode,
    properties: Option<&IndexMap<String, SchemaNode>>,
    config: &DocConfig,
) -> io::Result<()> {
    if config.is_deleted() {
        return Ok(());
    }

    key_header(out, schema, config)?;

    let Some(properties) = properties else {
        return out.line(&format!("{}: <object>", name));
    };

    out.line(&format!("{}:", name))?;
    let mut nested = out.indent();
    write_property_map(&mut nested, properties, config)
}

fn write_array<W: Write>(
    out: &mut Writer<W>,
    name: &str,
    schema: &SchemaNode,
    items: Option<&SchemaNode>,
    config: &DocConfig,
) -> io::Result<()> {
    if config.is_deleted() {
        return Ok(());
    }

    key_header(out, schema, config)?;

    let Some(items) = items else {
        return out.line(&format!("{}: <array>", name));
    };

    out.line(&format!("{}:", name))?;
    // Items share the array field's config; the list adds no overlay level.
    let mut item = out.indent_array();
    match items.kind() {
        NodeKind::Object(Some(properties)) => write_property_map(&mut item, properties, config),
        _ => item.line(&items.placeholder()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn render(schema: Value, config: Value) -> String {
        let schema: SchemaNode = serde_json::from_value(schema).unwrap();
        let mut out = Writer::new(Vec::new());
        write_properties(&mut out, &schema, &DocConfig::new(config)).unwrap();
        assert_eq!(out.depth(), 0);
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn scalar_with_description() {
        let out = render(
            json!({"properties": {"replicas": {"type": "integer", "description": "Number of desired pods."}}}),
            json!({}),
        );
        assert_eq!(out, "\n# Number of desired pods.\nreplicas: <integer>\n");
    }

    #[test]
    fn scalar_without_description_has_no_blank_line() {
        let out = render(
            json!({"properties": {"paused": {"type": "boolean"}}}),
            json!({}),
        );
        assert_eq!(out, "paused: <boolean>\n");
    }

    #[test]
    fn untyped_property_renders_empty_placeholder() {
        let out = render(
            json!({"properties": {"port": {"x-kubernetes-int-or-string": true}}}),
            json!({}),
        );
        assert_eq!(out, "port: <>\n");
    }

    #[test]
    fn nested_object_indents_one_level() {
        let out = render(
            json!({
                "properties": {
                    "spec": {
                        "type": "object",
                        "properties": {
                            "replicas": {"type": "integer"},
                            "selector": {"type": "object"}
                        }
                    }
                }
            }),
            json!({}),
        );
        assert_eq!(out, "spec:\n  replicas: <integer>\n  selector: <object>\n");
    }

    #[test]
    fn opaque_array() {
        let out = render(
            json!({"properties": {"finalizers": {"type": "array"}}}),
            json!({}),
        );
        assert_eq!(out, "finalizers: <array>\n");
    }

    #[test]
    fn array_of_objects_uses_list_marker() {
        let out = render(
            json!({
                "properties": {
                    "containers": {
                        "type": "array",
                        "description": "Containers in the pod.",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": {"type": "string", "description": "Container name."},
                                "image": {"type": "string", "description": "Image to run."}
                            }
                        }
                    }
                }
            }),
            json!({}),
        );
        assert_eq!(
            out,
            "\n# Containers in the pod.\ncontainers:\n\n  - # Container name.\n    name: <string>\n\n    # Image to run.\n    image: <string>\n"
        );
    }

    #[test]
    fn array_of_scalars() {
        let out = render(
            json!({"properties": {"args": {"type": "array", "items": {"type": "string"}}}}),
            json!({}),
        );
        assert_eq!(out, "args:\n  - <string>\n");
    }

    #[test]
    fn array_items_share_field_config() {
        let out = render(
            json!({
                "properties": {
                    "ports": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": {"type": "string"},
                                "port": {"type": "integer"}
                            }
                        }
                    }
                }
            }),
            json!({"ports": {"name": {"_delete": true}}}),
        );
        assert_eq!(out, "ports:\n  - port: <integer>\n");
    }

    #[test]
    fn deleted_field_drops_subtree() {
        let out = render(
            json!({
                "properties": {
                    "spec": {
                        "type": "object",
                        "description": "Spec.",
                        "properties": {"replicas": {"type": "integer", "description": "Count."}}
                    },
                    "paused": {"type": "boolean"}
                }
            }),
            json!({"spec": {"_delete": true, "replicas": {"_hideDescription": false}}}),
        );
        assert_eq!(out, "paused: <boolean>\n");
    }

    #[test]
    fn hidden_description_keeps_field() {
        let out = render(
            json!({"properties": {"replicas": {"type": "integer", "description": "Count."}}}),
            json!({"replicas": {"_hideDescription": true}}),
        );
        assert_eq!(out, "replicas: <integer>\n");
    }

    #[test]
    fn hide_child_descriptions_applies_below_only() {
        let out = render(
            json!({
                "properties": {
                    "spec": {
                        "type": "object",
                        "description": "Spec.",
                        "properties": {
                            "template": {
                                "type": "object",
                                "description": "Template.",
                                "properties": {"name": {"type": "string", "description": "Name."}}
                            }
                        }
                    }
                }
            }),
            json!({"spec": {"_hideChildDescriptions": true, "template": {"name": {"_hideDescription": false}}}}),
        );
        assert_eq!(out, "\n# Spec.\nspec:\n  template:\n    name: <string>\n");
    }

    #[test]
    fn max_depth_prunes_grandchildren() {
        let out = render(
            json!({
                "properties": {
                    "spec": {
                        "type": "object",
                        "properties": {
                            "template": {
                                "type": "object",
                                "properties": {"metadata": {"type": "object"}}
                            },
                            "replicas": {"type": "integer"}
                        }
                    }
                }
            }),
            json!({"spec": {"_maxDepth": 2}}),
        );
        assert_eq!(out, "spec:\n  template:\n  replicas: <integer>\n");
    }

    #[test]
    fn schema_without_properties_renders_nothing() {
        assert_eq!(render(json!({"type": "object"}), json!({})), "");
    }

    #[test]
    fn indentation_balanced_after_skips() {
        let out = render(
            json!({
                "properties": {
                    "a": {
                        "type": "object",
                        "properties": {
                            "gone": {"type": "array", "items": {"type": "string"}},
                            "b": {"type": "string"}
                        }
                    },
                    "c": {"type": "string"}
                }
            }),
            json!({"a": {"gone": null}}),
        );
        assert_eq!(out, "a:\n  b: <string>\nc: <string>\n");
    }
}
