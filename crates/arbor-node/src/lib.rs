//! Tree-node data model for Arbor element trees.
//!
//! An element tree arrives as a dynamically-typed `serde_json::Value` with
//! no static guarantees. Every element follows the same envelope:
//!
//! ```json
//! {"tag": "Text", "properties": {"children": "hi"}, "siblingKey": null}
//! ```
//!
//! This crate owns the envelope: the [`Node`] type used when assembling
//! trees in Rust, and the accessor functions the validation engine uses to
//! probe untyped values. It contains no validation logic; see the
//! `arbor-validation` crate for that.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope field holding the element's discriminant tag.
pub const TAG: &str = "tag";
/// Envelope field holding the element's property map.
pub const PROPERTIES: &str = "properties";
/// Envelope field holding the element's sibling key.
pub const SIBLING_KEY: &str = "siblingKey";

/// Key distinguishing an element from its siblings in a list slot.
///
/// Serializes as a bare string or number; an absent key is JSON `null`
/// (modeled as `Option<SiblingKey>` on [`Node`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiblingKey {
    /// String key, e.g. a stable item id.
    Text(String),
    /// Numeric key, e.g. a list position.
    Index(i64),
}

impl From<&str> for SiblingKey {
    fn from(s: &str) -> Self {
        SiblingKey::Text(s.to_string())
    }
}

impl From<String> for SiblingKey {
    fn from(s: String) -> Self {
        SiblingKey::Text(s)
    }
}

impl From<i64> for SiblingKey {
    fn from(n: i64) -> Self {
        SiblingKey::Index(n)
    }
}

/// One element of a tree: tag, property map, optional sibling key.
///
/// Property values may be primitives, nested element objects, or
/// (arbitrarily nested) lists of element objects. `Node` makes no claim
/// that those values conform to any element shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub tag: String,
    pub properties: Map<String, Value>,
    #[serde(rename = "siblingKey")]
    pub sibling_key: Option<SiblingKey>,
}

impl Node {
    /// Create an element with the given tag, no properties, and no
    /// sibling key.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            properties: Map::new(),
            sibling_key: None,
        }
    }

    /// Add or replace a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set the sibling key.
    pub fn with_sibling_key(mut self, key: impl Into<SiblingKey>) -> Self {
        self.sibling_key = Some(key.into());
        self
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        let mut map = Map::with_capacity(3);
        map.insert(TAG.to_string(), Value::String(node.tag));
        map.insert(PROPERTIES.to_string(), Value::Object(node.properties));
        map.insert(
            SIBLING_KEY.to_string(),
            match node.sibling_key {
                Some(SiblingKey::Text(s)) => Value::String(s),
                Some(SiblingKey::Index(n)) => Value::Number(n.into()),
                None => Value::Null,
            },
        );
        Value::Object(map)
    }
}

/// Read the discriminant tag of a candidate value, if it is an object
/// carrying a string `tag` field.
pub fn tag_of(value: &Value) -> Option<&str> {
    value.as_object()?.get(TAG)?.as_str()
}

/// Read the property map of a candidate value, if present and an object.
pub fn properties_of(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()?.get(PROPERTIES)?.as_object()
}

/// Read the sibling key of a candidate value, if the field is present.
pub fn sibling_key_of(value: &Value) -> Option<&Value> {
    value.as_object()?.get(SIBLING_KEY)
}

/// Whether a sibling-key value has an acceptable kind: string, number, or
/// `null`.
pub fn is_sibling_key(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Null)
}

/// Non-recursive envelope probe: the value is an object with exactly the
/// `tag`/`properties`/`siblingKey` keys, each of the right primitive kind.
///
/// Property contents and children are not inspected. Intended for
/// re-checking values already known to originate from this system, where a
/// full recursive pass would be wasted work.
pub fn is_element_envelope(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };
    if map.len() != 3 {
        return false;
    }
    map.get(TAG).is_some_and(Value::is_string)
        && map.get(PROPERTIES).is_some_and(Value::is_object)
        && map.get(SIBLING_KEY).is_some_and(is_sibling_key)
}
