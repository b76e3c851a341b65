#![deny(missing_docs)]

//! # Reference Resolver
//!
//! Walks an arbitrary JSON/YAML-decoded tree and replaces every `$ref` node
//! with the dereferenced subtree, recursively. Only same-document fragment
//! references (`#/segment/segment/...`) are supported; segments traverse
//! mapping keys or sequence indices from the document root.
//!
//! Failure modes are soft: an unresolvable path leaves the original reference
//! node in place, and a reference already on the current resolution chain is
//! substituted once without re-descending, which guarantees termination on
//! self-referential and mutually-referential schemas.

use serde_json::{Map, Value};
use std::collections::HashSet;

/// Resolves every `$ref` reachable from `node`, dereferencing against `root`.
///
/// Each occurrence of a shared target yields a fresh copy; no aliasing is
/// introduced. Independent calls do not share any cache.
pub fn resolve_refs(node: &Value, root: &Value) -> Value {
    let mut chain = HashSet::new();
    resolve_node(node, root, &mut chain)
}

fn resolve_node(node: &Value, root: &Value, chain: &mut HashSet<String>) -> Value {
    match node {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_node(item, root, chain))
                .collect(),
        ),
        Value::Object(map) => {
            if let Some(ref_path) = map.get("$ref").and_then(Value::as_str) {
                return resolve_reference(ref_path, node, root, chain);
            }
            let mut out = Map::new();
            for (key, value) in map {
                // A non-string `$ref` cannot be followed; drop it.
                if key == "$ref" {
                    continue;
                }
                out.insert(key.clone(), resolve_node(value, root, chain));
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

fn resolve_reference(
    ref_path: &str,
    original: &Value,
    root: &Value,
    chain: &mut HashSet<String>,
) -> Value {
    let Some(target) = lookup_fragment(ref_path, root) else {
        // Unresolvable path: keep the marker so downstream rendering can
        // fall back to a generic display.
        return original.clone();
    };

    if !chain.insert(ref_path.to_string()) {
        // Already on the current chain: substitute the raw target once
        // without re-descending.
        return target.clone();
    }
    let resolved = resolve_node(target, root, chain);
    chain.remove(ref_path);
    resolved
}

/// Walks `root` along a `#/a/b/c` fragment. Returns `None` when any segment
/// is absent or the cursor lands on a scalar mid-path.
fn lookup_fragment<'a>(ref_path: &str, root: &'a Value) -> Option<&'a Value> {
    let mut current = root;
    let segments = ref_path
        .trim_start_matches('#')
        .split('/')
        .filter(|segment| !segment.is_empty());

    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_is_identity_without_refs() {
        let doc = json!({
            "info": { "title": "Example", "version": "1.0.0" },
            "numbers": [1, 2, 3],
            "flag": true,
            "nothing": null
        });
        assert_eq!(resolve_refs(&doc, &doc), doc);
    }

    #[test]
    fn test_resolve_inlines_sibling_target() {
        let doc = json!({
            "a": { "$ref": "#/b" },
            "b": { "type": "string" }
        });
        let resolved = resolve_refs(&doc, &doc);
        assert_eq!(
            resolved,
            json!({
                "a": { "type": "string" },
                "b": { "type": "string" }
            })
        );
    }

    #[test]
    fn test_resolve_nested_component_refs() {
        let doc = json!({
            "components": {
                "schemas": {
                    "User": {
                        "type": "object",
                        "properties": {
                            "address": { "$ref": "#/components/schemas/Address" }
                        }
                    },
                    "Address": { "type": "object", "properties": { "city": { "type": "string" } } }
                }
            }
        });
        let resolved = resolve_refs(&doc, &doc);
        assert_eq!(
            resolved["components"]["schemas"]["User"]["properties"]["address"],
            doc["components"]["schemas"]["Address"]
        );
    }

    #[test]
    fn test_resolve_follows_chained_refs() {
        let doc = json!({
            "a": { "$ref": "#/b" },
            "b": { "$ref": "#/c" },
            "c": { "type": "integer" }
        });
        let resolved = resolve_refs(&doc, &doc);
        assert_eq!(resolved["a"], json!({ "type": "integer" }));
        assert_eq!(resolved["b"], json!({ "type": "integer" }));
    }

    #[test]
    fn test_resolve_self_reference_terminates() {
        let doc = json!({
            "self": { "$ref": "#/self" }
        });
        let resolved = resolve_refs(&doc, &doc);
        // Substituted once, not re-expanded.
        assert_eq!(resolved["self"], json!({ "$ref": "#/self" }));
    }

    #[test]
    fn test_resolve_mutual_cycle_terminates() {
        let doc = json!({
            "a": { "type": "object", "properties": { "b": { "$ref": "#/b" } } },
            "b": { "type": "object", "properties": { "a": { "$ref": "#/a" } } }
        });
        let resolved = resolve_refs(&doc, &doc);
        // Expansion stops at the revisited edge: the innermost substitution
        // is the raw target, whose reference marker survives unexpanded.
        assert_eq!(
            resolved["a"]["properties"]["b"]["properties"]["a"]["properties"]["b"]["properties"]
                ["a"],
            json!({ "$ref": "#/a" })
        );
    }

    #[test]
    fn test_resolve_repeated_ref_in_siblings_expands_both() {
        let doc = json!({
            "first": { "$ref": "#/shared" },
            "second": { "$ref": "#/shared" },
            "shared": { "type": "object", "properties": { "id": { "$ref": "#/id" } } },
            "id": { "type": "integer" }
        });
        let resolved = resolve_refs(&doc, &doc);
        let expected = json!({
            "type": "object",
            "properties": { "id": { "type": "integer" } }
        });
        // The visited set is chain-scoped, so a repeat in an independent
        // branch still expands fully.
        assert_eq!(resolved["first"], expected);
        assert_eq!(resolved["second"], expected);
    }

    #[test]
    fn test_resolve_unresolvable_path_left_in_place() {
        let doc = json!({
            "a": { "$ref": "#/components/schemas/Missing" }
        });
        let resolved = resolve_refs(&doc, &doc);
        assert_eq!(resolved["a"], json!({ "$ref": "#/components/schemas/Missing" }));
    }

    #[test]
    fn test_resolve_array_index_segment() {
        let doc = json!({
            "servers": [ { "url": "https://api.example.com" } ],
            "pick": { "$ref": "#/servers/0/url" }
        });
        let resolved = resolve_refs(&doc, &doc);
        assert_eq!(resolved["pick"], json!("https://api.example.com"));
    }

    #[test]
    fn test_resolve_sequence_elements_preserve_order() {
        let doc = json!({
            "items": [ { "$ref": "#/x" }, { "literal": 1 }, { "$ref": "#/y" } ],
            "x": "first",
            "y": "last"
        });
        let resolved = resolve_refs(&doc, &doc);
        assert_eq!(resolved["items"], json!(["first", { "literal": 1 }, "last"]));
    }

    #[test]
    fn test_resolve_drops_non_string_ref_key() {
        let doc = json!({
            "a": { "$ref": 42, "kept": true }
        });
        let resolved = resolve_refs(&doc, &doc);
        assert_eq!(resolved["a"], json!({ "kept": true }));
    }

    #[test]
    fn test_resolve_subtree_against_separate_root() {
        let root = json!({
            "components": { "schemas": { "Thing": { "type": "boolean" } } }
        });
        let node = json!({ "$ref": "#/components/schemas/Thing" });
        assert_eq!(resolve_refs(&node, &root), json!({ "type": "boolean" }));
    }
}
