//! Leaf combinators
//!
//! Primitive checks and the two acceptance wrappers. Pure and
//! side-effect-free; each returns a new [`Schema`]. Refinements are data
//! on the schema struct (bounds, integrality, non-emptiness) rather than
//! opaque predicates, so schemas stay inspectable and comparable.

use super::types::{BooleanSchema, LiteralSchema, NumberSchema, StringSchema};
use super::Schema;
use serde_json::Value;

/// Succeeds only when the candidate deep-equals `value`.
pub fn literal(value: impl Into<Value>) -> Schema {
    Schema::Literal(LiteralSchema {
        value: value.into(),
    })
}

/// Any JSON string.
pub fn string() -> Schema {
    Schema::String(StringSchema::default())
}

/// A JSON string with at least one character.
pub fn non_empty_string() -> Schema {
    Schema::String(StringSchema { non_empty: true })
}

/// Any JSON number.
pub fn number() -> Schema {
    Schema::Number(NumberSchema::default())
}

/// A JSON number within the inclusive `[minimum, maximum]` range.
pub fn number_in(minimum: f64, maximum: f64) -> Schema {
    Schema::Number(NumberSchema {
        minimum: Some(minimum),
        maximum: Some(maximum),
        integer: false,
    })
}

/// A JSON number with no fractional part.
pub fn integer() -> Schema {
    Schema::Number(NumberSchema {
        minimum: None,
        maximum: None,
        integer: true,
    })
}

/// Any JSON boolean.
pub fn boolean() -> Schema {
    Schema::Boolean(BooleanSchema)
}

/// Also accepts "absent": a record property declared `optional` may be
/// left out of the candidate's property map entirely. A present value
/// still validates against the wrapped schema.
pub fn optional(schema: Schema) -> Schema {
    Schema::Optional(Box::new(schema))
}

/// Also accepts JSON `null` in place of the wrapped schema.
pub fn nullable(schema: Schema) -> Schema {
    Schema::Nullable(Box::new(schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_deep_equality() {
        let schema = literal(json!({"a": [1, 2]}));
        assert!(schema.is_valid(&json!({"a": [1, 2]})));
        assert!(!schema.is_valid(&json!({"a": [2, 1]})));
        assert!(!schema.is_valid(&json!({"a": [1, 2], "b": 0})));
    }

    #[test]
    fn test_string_kinds() {
        assert!(string().is_valid(&json!("")));
        assert!(string().is_valid(&json!("hi")));
        assert!(!string().is_valid(&json!(3)));

        assert!(non_empty_string().is_valid(&json!("hi")));
        assert!(!non_empty_string().is_valid(&json!("")));
    }

    #[test]
    fn test_number_refinements() {
        assert!(number().is_valid(&json!(3.5)));
        assert!(!number().is_valid(&json!("3.5")));

        let bounded = number_in(0.0, 10.0);
        assert!(bounded.is_valid(&json!(0)));
        assert!(bounded.is_valid(&json!(10)));
        assert!(!bounded.is_valid(&json!(-1)));
        assert!(!bounded.is_valid(&json!(11)));

        assert!(integer().is_valid(&json!(4)));
        assert!(!integer().is_valid(&json!(4.5)));
    }

    #[test]
    fn test_boolean() {
        assert!(boolean().is_valid(&json!(true)));
        assert!(boolean().is_valid(&json!(false)));
        assert!(!boolean().is_valid(&json!(0)));
        assert!(!boolean().is_valid(&json!(null)));
    }

    #[test]
    fn test_nullable_accepts_null_and_inner() {
        let schema = nullable(string());
        assert!(schema.is_valid(&json!(null)));
        assert!(schema.is_valid(&json!("hi")));
        assert!(!schema.is_valid(&json!(2)));
    }

    #[test]
    fn test_optional_still_checks_present_values() {
        // Absence only matters inside a record; a present value must
        // satisfy the wrapped schema.
        let schema = optional(string());
        assert!(schema.is_valid(&json!("hi")));
        assert!(!schema.is_valid(&json!(null)));
        assert!(!schema.is_valid(&json!(2)));
    }
}
