//! Schema model and constructors
//!
//! A [`Schema`] is an immutable rule testing a candidate
//! `serde_json::Value`. Schemas are built once at startup through the
//! constructor functions in this module, shared read-only thereafter, and
//! cheap to clone (element schemas sit behind `Arc`). Construction rejects
//! malformed configurations eagerly with
//! [`SchemaError`](crate::SchemaError); validation itself never produces
//! configuration errors.
//!
//! Constructor modules, by category:
//! - `leaf`: literal and primitive-kind checks, `optional`, `nullable`
//! - `record`: discriminated element schemas (`define`)
//! - `union`: tag-dispatched and selective unions
//! - `children`: cardinality combinators for children slots
//! - `lazy`: deferred resolve-once references

mod children;
mod lazy;
mod leaf;
mod record;
mod types;
mod union;

pub use children::{list, maybe, nested_list, single, tuple};
pub use lazy::lazy;
pub use leaf::{
    boolean, integer, literal, non_empty_string, nullable, number, number_in, optional, string,
};
pub use record::{RecordBuilder, define};
pub use types::{
    BooleanSchema, LazySchema, ListSchema, LiteralSchema, MaybeSchema, NumberSchema, RecordSchema,
    SelectiveSchema, StringSchema, TaggedUnionSchema, TupleSchema, ValueProbe,
};
pub use union::{selective_union, typed_union};

use serde_json::Value;
use std::sync::Arc;

/// An immutable rule testing a candidate value.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Exact literal match
    Literal(LiteralSchema),
    /// String primitive
    String(StringSchema),
    /// Number primitive
    Number(NumberSchema),
    /// Boolean primitive
    Boolean(BooleanSchema),
    /// Also accepts "absent" (inside a record's declared property map)
    Optional(Box<Schema>),
    /// Also accepts `null`
    Nullable(Box<Schema>),
    /// Discriminated element shape
    Record(Arc<RecordSchema>),
    /// Tag-dispatched union of element shapes
    Union(TaggedUnionSchema),
    /// Runtime-shape-dispatched union
    Selective(SelectiveSchema),
    /// Array of elements (optionally arbitrarily nested)
    List(ListSchema),
    /// Fixed-length heterogeneous positions
    Tuple(TupleSchema),
    /// Boolean/null sentinels before an element
    Maybe(MaybeSchema),
    /// Deferred resolve-once reference
    Lazy(LazySchema),
}

impl Schema {
    /// Human-readable identifier for this schema, used in "one of:"
    /// alternative lists. Element schemas use their display name over the
    /// raw tag when one is set.
    pub fn describe(&self) -> String {
        match self {
            Schema::Literal(s) => format!("`{}`", s.value),
            Schema::String(s) if s.non_empty => "a non-empty string".to_string(),
            Schema::String(_) => "a string".to_string(),
            Schema::Number(s) if s.integer => "an integer".to_string(),
            Schema::Number(_) => "a number".to_string(),
            Schema::Boolean(_) => "a boolean".to_string(),
            Schema::Optional(inner) | Schema::Nullable(inner) => inner.describe(),
            Schema::Record(r) => r.describe().to_string(),
            Schema::Union(u) => format!("one of: {}", u.alternatives().join(", ")),
            Schema::Selective(s) => s
                .arms
                .iter()
                .map(|(_, schema)| schema.describe())
                .collect::<Vec<_>>()
                .join(" or "),
            Schema::List(l) => format!("a list of {}", l.item.describe()),
            Schema::Tuple(t) => format!("a tuple of {} children", t.positions.len()),
            Schema::Maybe(m) => m.inner.describe(),
            Schema::Lazy(l) => match l.resolved() {
                Some(inner) => inner.describe(),
                None => "a deferred element".to_string(),
            },
        }
    }

    /// Whether a record property declared with this schema may be absent.
    pub(crate) fn accepts_absent(&self) -> bool {
        matches!(self, Schema::Optional(_))
    }

    /// Full recursive match; see [`crate::is_valid`].
    pub fn is_valid(&self, value: &Value) -> bool {
        crate::validator::is_valid(value, self)
    }

    /// Full recursive match returning the first failure; see
    /// [`crate::assert_valid`].
    pub fn assert_valid(&self, value: &Value) -> Result<(), crate::Failure> {
        crate::validator::assert_valid(value, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_leaves() {
        assert_eq!(string().describe(), "a string");
        assert_eq!(non_empty_string().describe(), "a non-empty string");
        assert_eq!(number().describe(), "a number");
        assert_eq!(integer().describe(), "an integer");
        assert_eq!(boolean().describe(), "a boolean");
        assert_eq!(literal("start").describe(), r#"`"start"`"#);
        assert_eq!(optional(string()).describe(), "a string");
        assert_eq!(nullable(number()).describe(), "a number");
    }

    #[test]
    fn test_describe_prefers_display_name() {
        let plain = define("Txt").build().unwrap();
        assert_eq!(plain.describe(), "Txt");

        let named = define("Txt").display_name("Text").build().unwrap();
        assert_eq!(named.describe(), "Text");
    }

    #[test]
    fn test_describe_union_lists_alternatives_in_order() {
        let union = typed_union(vec![
            define("Text").build().unwrap(),
            define("Image").build().unwrap(),
        ])
        .unwrap();
        assert_eq!(union.describe(), "one of: Text, Image");
    }

    #[test]
    fn test_describe_list_and_tuple() {
        let text = define("Text").build().unwrap();
        let image = define("Image").build().unwrap();
        assert_eq!(
            list(vec![text.clone()]).unwrap().describe(),
            "a list of Text"
        );
        assert_eq!(
            tuple(vec![text, image]).unwrap().describe(),
            "a tuple of 2 children"
        );
    }

    #[test]
    fn test_describe_unresolved_lazy_does_not_force() {
        let schema = lazy(|| literal(json!(1)));
        assert_eq!(schema.describe(), "a deferred element");
        // Describing must not have resolved the reference.
        let Schema::Lazy(l) = &schema else {
            unreachable!()
        };
        assert!(l.resolved().is_none());
    }
}
