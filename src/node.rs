//! Read-only accessor over raw GraphQL nodes.
//!
//! Every field the hydrator touches goes through [`NodeReader`]. It checks
//! presence and coercion per key and, on failure, reports the entity path
//! plus node context. A key holding JSON `null` counts as absent, matching how
//! the platform omits fields that do not apply to a media variant.

use crate::error::{HydrateError, HydrateResult, NodeContext};
use serde_json::{Map, Value};

/// Borrowed view of one raw node, positioned at an entity path.
#[derive(Debug, Clone)]
pub struct NodeReader<'a> {
    node: &'a Map<String, Value>,
    path: String,
    context: NodeContext,
}

impl<'a> NodeReader<'a> {
    /// Wrap a root node. The context starts as the raw shortcode when the node
    /// carries one, so errors on the first fields are still traceable.
    pub fn root(value: &'a Value) -> HydrateResult<Self> {
        Ok(Self::at(value, String::new(), NodeContext::Unknown)?.identified())
    }

    /// Wrap a node found at `path`, reporting errors under `context`.
    pub fn at(value: &'a Value, path: String, context: NodeContext) -> HydrateResult<Self> {
        match value {
            Value::Object(node) => Ok(Self { node, path, context }),
            Value::Null => Err(HydrateError::MissingField {
                path: display_path(&path),
                context,
            }),
            other => Err(HydrateError::TypeCoercion {
                path: display_path(&path),
                expected: "object",
                found: describe(other),
                context,
            }),
        }
    }

    pub fn context(&self) -> &NodeContext {
        &self.context
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Switch the context to this node's raw shortcode, or failing that its
    /// raw `id`, when it carries one.
    pub fn identified(self) -> Self {
        if let Some(code) = self.node.get("shortcode").and_then(Value::as_str) {
            let context = NodeContext::Shortcode(code.to_string());
            return self.with_context(context);
        }
        let id = match self.node.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };
        match id {
            Some(id) => self.with_context(NodeContext::Id(id)),
            None => self,
        }
    }

    /// Re-anchor error reporting once the media id is known.
    pub fn with_context(mut self, context: NodeContext) -> Self {
        self.context = context;
        self
    }

    /// Full entity path of `key` below this node.
    pub fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    pub fn missing(&self, key: &str) -> HydrateError {
        HydrateError::MissingField {
            path: self.field_path(key),
            context: self.context.clone(),
        }
    }

    fn mismatch(&self, key: &str, expected: &'static str, value: &Value) -> HydrateError {
        HydrateError::TypeCoercion {
            path: self.field_path(key),
            expected,
            found: describe(value),
            context: self.context.clone(),
        }
    }

    /// Present and not null.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self.node.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Key exists at all, even when its value is `null`.
    pub fn has_key(&self, key: &str) -> bool {
        self.node.contains_key(key)
    }

    pub fn required(&self, key: &str) -> HydrateResult<&'a Value> {
        self.get(key).ok_or_else(|| self.missing(key))
    }

    pub fn required_str(&self, key: &str) -> HydrateResult<&'a str> {
        let value = self.required(key)?;
        value.as_str().ok_or_else(|| self.mismatch(key, "string", value))
    }

    pub fn optional_str(&self, key: &str) -> HydrateResult<Option<&'a str>> {
        self.get(key)
            .map(|value| value.as_str().ok_or_else(|| self.mismatch(key, "string", value)))
            .transpose()
    }

    pub fn required_i64(&self, key: &str) -> HydrateResult<i64> {
        let value = self.required(key)?;
        coerce_i64(value).ok_or_else(|| self.mismatch(key, "integer", value))
    }

    pub fn optional_i64(&self, key: &str) -> HydrateResult<Option<i64>> {
        self.get(key)
            .map(|value| coerce_i64(value).ok_or_else(|| self.mismatch(key, "integer", value)))
            .transpose()
    }

    /// Pixel sizes and similar values that cannot be negative.
    pub fn required_u32(&self, key: &str) -> HydrateResult<u32> {
        let value = self.required(key)?;
        coerce_i64(value)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| self.mismatch(key, "unsigned integer", value))
    }

    pub fn required_bool(&self, key: &str) -> HydrateResult<bool> {
        let value = self.required(key)?;
        coerce_bool(value).ok_or_else(|| self.mismatch(key, "boolean", value))
    }

    pub fn optional_bool(&self, key: &str) -> HydrateResult<Option<bool>> {
        self.get(key)
            .map(|value| coerce_bool(value).ok_or_else(|| self.mismatch(key, "boolean", value)))
            .transpose()
    }

    pub fn required_array(&self, key: &str) -> HydrateResult<&'a [Value]> {
        let value = self.required(key)?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.mismatch(key, "array", value))
    }

    pub fn optional_array(&self, key: &str) -> HydrateResult<Option<&'a [Value]>> {
        self.get(key)
            .map(|value| {
                value
                    .as_array()
                    .map(Vec::as_slice)
                    .ok_or_else(|| self.mismatch(key, "array", value))
            })
            .transpose()
    }

    /// Nested record that must exist.
    pub fn child(&self, key: &str) -> HydrateResult<NodeReader<'a>> {
        let value = self.required(key)?;
        NodeReader::at(value, self.field_path(key), self.context.clone())
    }

    pub fn optional_child(&self, key: &str) -> HydrateResult<Option<NodeReader<'a>>> {
        self.get(key)
            .map(|value| NodeReader::at(value, self.field_path(key), self.context.clone()))
            .transpose()
    }

    /// `<key>.count`, the shape every platform counter uses.
    pub fn required_count(&self, key: &str) -> HydrateResult<i64> {
        self.child(key)?.required_i64("count")
    }

    /// Nodes of a `{ edges: [{ node: {...} }] }` collection, in source order.
    ///
    /// Each node is positioned at `label[i]` below this reader. An absent
    /// collection is an error only when `required` is set; an absent or empty
    /// `edges` list always yields no nodes.
    pub fn edge_nodes(&self, key: &str, label: &str, required: bool) -> HydrateResult<Vec<NodeReader<'a>>> {
        let collection = if required {
            self.child(key)?
        } else {
            match self.optional_child(key)? {
                Some(collection) => collection,
                None => return Ok(Vec::new()),
            }
        };

        let edges = collection.optional_array("edges")?.unwrap_or_default();
        edges
            .iter()
            .enumerate()
            .map(|(index, edge)| {
                let item_path = format!("{}[{}]", label, index);
                let edge = NodeReader::at(edge, self.field_path(&item_path), self.context.clone())?;
                let node = edge.required("node")?;
                NodeReader::at(node, edge.path.clone(), self.context.clone())
            })
            .collect()
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

/// Integers arrive as JSON numbers or, for ids, as decimal strings.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

/// Short human description of a JSON value for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => {
            let shown: String = s.chars().take(40).collect();
            format!("string {:?}", shown)
        }
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_context_uses_shortcode() {
        let node = json!({"shortcode": "BxYz"});
        let reader = NodeReader::root(&node).unwrap();
        assert_eq!(reader.context(), &NodeContext::Shortcode("BxYz".into()));

        let anonymous = json!({});
        assert_eq!(NodeReader::root(&anonymous).unwrap().context(), &NodeContext::Unknown);
    }

    #[test]
    fn test_root_context_falls_back_to_raw_id() {
        let user = json!({"id": "25025320", "username": "instagram"});
        assert_eq!(
            NodeReader::root(&user).unwrap().context(),
            &NodeContext::Id("25025320".into())
        );

        let numeric = json!({"id": 7});
        assert_eq!(NodeReader::root(&numeric).unwrap().context(), &NodeContext::Id("7".into()));

        let both = json!({"id": "1", "shortcode": "BxYz"});
        assert_eq!(
            NodeReader::root(&both).unwrap().context(),
            &NodeContext::Shortcode("BxYz".into())
        );
    }

    #[test]
    fn test_root_rejects_non_object() {
        let err = NodeReader::root(&json!([1, 2])).unwrap_err();
        assert_eq!(err.category(), "type_coercion");
    }

    #[test]
    fn test_null_counts_as_absent() {
        let node = json!({"thumbnail_src": null, "video_url": "https://v"});
        let reader = NodeReader::root(&node).unwrap();
        assert!(!reader.has("thumbnail_src"));
        assert!(reader.has_key("thumbnail_src"));
        assert!(reader.has("video_url"));
        assert_eq!(reader.optional_str("thumbnail_src").unwrap(), None);
    }

    #[test]
    fn test_i64_coercion() {
        let node = json!({"a": 12, "b": "2045", "c": " 7 ", "d": 3.0, "e": "x12", "f": 1.5, "g": true});
        let reader = NodeReader::root(&node).unwrap();
        assert_eq!(reader.required_i64("a").unwrap(), 12);
        assert_eq!(reader.required_i64("b").unwrap(), 2045);
        assert_eq!(reader.required_i64("c").unwrap(), 7);
        assert_eq!(reader.required_i64("d").unwrap(), 3);
        assert!(matches!(
            reader.required_i64("e"),
            Err(HydrateError::TypeCoercion { expected: "integer", .. })
        ));
        assert!(reader.required_i64("f").is_err());
        assert!(reader.required_i64("g").is_err());
        assert_eq!(reader.optional_i64("missing").unwrap(), None);
    }

    #[test]
    fn test_u32_rejects_negative() {
        let node = json!({"height": 1350, "width": -1});
        let reader = NodeReader::root(&node).unwrap();
        assert_eq!(reader.required_u32("height").unwrap(), 1350);
        assert!(matches!(
            reader.required_u32("width"),
            Err(HydrateError::TypeCoercion { expected: "unsigned integer", .. })
        ));
    }

    #[test]
    fn test_bool_coercion() {
        let node = json!({"a": true, "b": 0, "c": 1, "d": "yes"});
        let reader = NodeReader::root(&node).unwrap();
        assert!(reader.required_bool("a").unwrap());
        assert!(!reader.required_bool("b").unwrap());
        assert!(reader.required_bool("c").unwrap());
        assert!(reader.required_bool("d").is_err());
    }

    #[test]
    fn test_missing_reports_nested_path() {
        let node = json!({"dimensions": {"width": 1080}});
        let reader = NodeReader::root(&node).unwrap();
        let err = reader.child("dimensions").unwrap().required_i64("height").unwrap_err();
        assert_eq!(err.path(), Some("dimensions.height"));
    }

    #[test]
    fn test_required_count() {
        let node = json!({"edge_media_preview_like": {"count": 31}});
        let reader = NodeReader::root(&node).unwrap();
        assert_eq!(reader.required_count("edge_media_preview_like").unwrap(), 31);
        assert_eq!(
            reader.required_count("edge_media_to_comment").unwrap_err().path(),
            Some("edge_media_to_comment")
        );
    }

    #[test]
    fn test_edge_nodes_in_source_order() {
        let node = json!({
            "edge_sidecar_to_children": {"edges": [
                {"node": {"id": "1"}},
                {"node": {"id": "2"}},
                {"node": {"id": "3"}}
            ]}
        });
        let reader = NodeReader::root(&node).unwrap();
        let nodes = reader.edge_nodes("edge_sidecar_to_children", "side_car_items", true).unwrap();
        let ids: Vec<i64> = nodes.iter().map(|n| n.required_i64("id").unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(nodes[2].path(), "side_car_items[2]");
        assert_eq!(nodes[2].field_path("display_resources"), "side_car_items[2].display_resources");
    }

    #[test]
    fn test_edge_nodes_absent_collection() {
        let node = json!({});
        let reader = NodeReader::root(&node).unwrap();
        assert!(reader.edge_nodes("edge_media_to_caption", "caption", false).unwrap().is_empty());
        assert!(reader.edge_nodes("edge_media_to_caption", "caption", true).is_err());
    }

    #[test]
    fn test_edge_without_node() {
        let node = json!({"edge_media_to_tagged_user": {"edges": [{"cursor": "x"}]}});
        let reader = NodeReader::root(&node).unwrap();
        let err = reader
            .edge_nodes("edge_media_to_tagged_user", "tagged_users", false)
            .unwrap_err();
        assert_eq!(err.path(), Some("tagged_users[0].node"));
    }

    #[test]
    fn test_describe_truncates_strings() {
        let long = "a".repeat(100);
        assert_eq!(describe(&json!(long)), format!("string {:?}", "a".repeat(40)));
        assert_eq!(describe(&json!(null)), "null");
    }
}
