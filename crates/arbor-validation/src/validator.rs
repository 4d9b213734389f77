// Element-tree validation engine

use crate::error::{Failure, FailureKind, InstancePath};
use crate::schema::{
    ListSchema, LiteralSchema, NumberSchema, RecordSchema, Schema, SelectiveSchema, StringSchema,
    TaggedUnionSchema, TupleSchema,
};
use arbor_node as node;
use serde_json::Value;

/// Full recursive match, swallowing failure detail.
///
/// Short-circuits on the first mismatch. Never mutates the input; repeated
/// calls on an unmodified value and schema return the same result.
pub fn is_valid(value: &Value, schema: &Schema) -> bool {
    assert_valid(value, schema).is_ok()
}

/// Full recursive match, returning the first [`Failure`] encountered along
/// a deterministic traversal (element envelope first, then declared
/// properties in declaration order, then undeclared keys; arrays in index
/// order). Exactly one failure is reported per call, never an aggregate.
pub fn assert_valid(value: &Value, schema: &Schema) -> Result<(), Failure> {
    let mut context = ValidationContext::new();
    check(value, schema, &mut context)
}

/// Cheap, non-recursive envelope probe: the value is an object with
/// `tag`/`properties`/`siblingKey` of the right primitive kinds. Property
/// contents and children are not validated. Intended for re-checking
/// values already known to originate from this system.
pub fn is_valid_shape_only(value: &Value) -> bool {
    node::is_element_envelope(value)
}

/// Validation context tracks the instance path during traversal
struct ValidationContext {
    path: InstancePath,
}

impl ValidationContext {
    fn new() -> Self {
        Self {
            path: InstancePath::new(),
        }
    }

    /// Build a failure at the current path.
    fn fail(&self, kind: FailureKind, received: &Value) -> Failure {
        Failure::new(kind, self.path.clone(), received.clone())
    }

    /// Execute a function with a key segment pushed onto the path
    fn with_key<F, R>(&mut self, key: &str, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.path.push_key(key);
        let result = f(self);
        self.path.pop();
        result
    }

    /// Execute a function with an index segment pushed onto the path
    fn with_index<F, R>(&mut self, index: usize, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.path.push_index(index);
        let result = f(self);
        self.path.pop();
        result
    }
}

/// Main validation dispatcher
fn check(value: &Value, schema: &Schema, context: &mut ValidationContext) -> Result<(), Failure> {
    match schema {
        Schema::Literal(s) => check_literal(value, s, context),
        Schema::String(s) => check_string(value, s, context),
        Schema::Number(s) => check_number(value, s, context),
        Schema::Boolean(_) => check_boolean(value, context),
        // Absence is handled where the property map is walked; a present
        // value must satisfy the wrapped schema.
        Schema::Optional(inner) => check(value, inner, context),
        Schema::Nullable(inner) => {
            if value.is_null() {
                Ok(())
            } else {
                check(value, inner, context)
            }
        }
        Schema::Record(record) => check_record(value, record, context),
        Schema::Union(union) => check_union(value, union, context),
        Schema::Selective(selective) => check_selective(value, selective, context),
        Schema::List(list) => check_list(value, list, context),
        Schema::Tuple(tuple) => check_tuple(value, tuple, context),
        Schema::Maybe(maybe) => {
            // Boolean and null sentinels stand for "branch not rendered".
            if matches!(value, Value::Bool(_) | Value::Null) {
                Ok(())
            } else {
                check(value, &maybe.inner, context)
            }
        }
        Schema::Lazy(lazy) => check(value, lazy.force(), context),
    }
}

/// Validate an exact literal
fn check_literal(
    value: &Value,
    schema: &LiteralSchema,
    context: &mut ValidationContext,
) -> Result<(), Failure> {
    if *value == schema.value {
        Ok(())
    } else {
        Err(context.fail(
            FailureKind::Literal {
                expected: schema.value.clone(),
            },
            value,
        ))
    }
}

/// Validate a string value
fn check_string(
    value: &Value,
    schema: &StringSchema,
    context: &mut ValidationContext,
) -> Result<(), Failure> {
    let Some(s) = value.as_str() else {
        return Err(context.fail(kind_failure("a string"), value));
    };
    if schema.non_empty && s.is_empty() {
        return Err(context.fail(kind_failure("a non-empty string"), value));
    }
    Ok(())
}

/// Validate a number value
fn check_number(
    value: &Value,
    schema: &NumberSchema,
    context: &mut ValidationContext,
) -> Result<(), Failure> {
    let Some(n) = value.as_f64() else {
        return Err(context.fail(kind_failure("a number"), value));
    };
    if schema.integer && n.fract() != 0.0 {
        return Err(context.fail(kind_failure("an integer"), value));
    }
    if let Some(min) = schema.minimum
        && n < min
    {
        return Err(context.fail(
            FailureKind::Kind {
                expected: format!("a number of at least {min}"),
            },
            value,
        ));
    }
    if let Some(max) = schema.maximum
        && n > max
    {
        return Err(context.fail(
            FailureKind::Kind {
                expected: format!("a number of at most {max}"),
            },
            value,
        ));
    }
    Ok(())
}

/// Validate a boolean value
fn check_boolean(value: &Value, context: &mut ValidationContext) -> Result<(), Failure> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(context.fail(kind_failure("a boolean"), value))
    }
}

/// Validate one discriminated element shape
fn check_record(
    value: &Value,
    record: &RecordSchema,
    context: &mut ValidationContext,
) -> Result<(), Failure> {
    let Some(map) = value.as_object() else {
        return Err(context.fail(kind_failure("an element object"), value));
    };

    // Envelope first: tag, properties, siblingKey, no extra keys. Only
    // then descend into property contents, so a truncated envelope
    // reports its own missing field rather than a property failure.
    let Some(tag) = map.get(node::TAG) else {
        return Err(context.fail(
            FailureKind::MissingKey {
                key: node::TAG.to_string(),
            },
            value,
        ));
    };
    if tag.as_str() != Some(record.tag.as_str()) {
        return Err(context.with_key(node::TAG, |ctx| {
            ctx.fail(
                FailureKind::Literal {
                    expected: Value::String(record.tag.clone()),
                },
                tag,
            )
        }));
    }

    let Some(properties_value) = map.get(node::PROPERTIES) else {
        return Err(context.fail(
            FailureKind::MissingKey {
                key: node::PROPERTIES.to_string(),
            },
            value,
        ));
    };
    let Some(properties) = properties_value.as_object() else {
        return Err(context.with_key(node::PROPERTIES, |ctx| {
            ctx.fail(kind_failure("an object"), properties_value)
        }));
    };

    let Some(sibling_key) = map.get(node::SIBLING_KEY) else {
        return Err(context.fail(
            FailureKind::MissingKey {
                key: node::SIBLING_KEY.to_string(),
            },
            value,
        ));
    };
    if !node::is_sibling_key(sibling_key) {
        return Err(context.with_key(node::SIBLING_KEY, |ctx| {
            ctx.fail(kind_failure("a string, a number, or null"), sibling_key)
        }));
    }

    for key in map.keys() {
        if key != node::TAG && key != node::PROPERTIES && key != node::SIBLING_KEY {
            return Err(context.with_key(key, |ctx| ctx.fail(FailureKind::UnknownKey, &map[key])));
        }
    }

    // Declared properties, in declaration order. Optional-and-absent keys
    // are excluded from the exact-match requirement.
    for (key, schema) in &record.properties {
        match properties.get(key) {
            Some(property) => {
                context.with_key(node::PROPERTIES, |ctx| {
                    ctx.with_key(key, |ctx| check(property, schema, ctx))
                })?;
            }
            None if schema.accepts_absent() => {}
            None => {
                return Err(context.with_key(node::PROPERTIES, |ctx| {
                    ctx.fail(
                        FailureKind::MissingKey { key: key.clone() },
                        properties_value,
                    )
                }));
            }
        }
    }

    // No undeclared keys permitted.
    for (key, property) in properties {
        if !record.declares(key) {
            return Err(context.with_key(node::PROPERTIES, |ctx| {
                ctx.with_key(key, |ctx| ctx.fail(FailureKind::UnknownKey, property))
            }));
        }
    }

    Ok(())
}

/// Validate against a tag-dispatched union
fn check_union(
    value: &Value,
    union: &TaggedUnionSchema,
    context: &mut ValidationContext,
) -> Result<(), Failure> {
    let Some(tag) = node::tag_of(value) else {
        return Err(context.fail(
            FailureKind::OneOf {
                alternatives: union.alternatives(),
            },
            value,
        ));
    };
    match union.lookup(tag) {
        // Delegate entirely to the one matched shape.
        Some(record) => check_record(value, record, context),
        None => {
            tracing::trace!(tag, "no union candidate for tag");
            Err(context.fail(
                FailureKind::OneOf {
                    alternatives: union.alternatives(),
                },
                value,
            ))
        }
    }
}

/// Validate against a selective (shape-probed) union
fn check_selective(
    value: &Value,
    selective: &SelectiveSchema,
    context: &mut ValidationContext,
) -> Result<(), Failure> {
    for (probe, schema) in &selective.arms {
        if probe.matches(value) {
            return check(value, schema, context);
        }
    }
    Err(context.fail(
        FailureKind::OneOf {
            alternatives: selective
                .arms
                .iter()
                .map(|(_, schema)| schema.describe())
                .collect(),
        },
        value,
    ))
}

/// Validate a list (optionally nested) children slot
fn check_list(
    value: &Value,
    list: &ListSchema,
    context: &mut ValidationContext,
) -> Result<(), Failure> {
    let Some(items) = value.as_array() else {
        return Err(context.fail(kind_failure("an array"), value));
    };
    for (i, item) in items.iter().enumerate() {
        context.with_index(i, |ctx| {
            if list.nested && item.is_array() {
                check_list(item, list, ctx)
            } else {
                check(item, &list.item, ctx)
            }
        })?;
    }
    Ok(())
}

/// Validate a tuple children slot
fn check_tuple(
    value: &Value,
    tuple: &TupleSchema,
    context: &mut ValidationContext,
) -> Result<(), Failure> {
    let expected = tuple.positions.len();
    let Some(items) = value.as_array() else {
        return Err(context.fail(FailureKind::TupleLength { expected }, value));
    };
    if items.len() != expected {
        return Err(context.fail(FailureKind::TupleLength { expected }, value));
    }
    for (i, (item, schema)) in items.iter().zip(&tuple.positions).enumerate() {
        context.with_index(i, |ctx| check(item, schema, ctx))?;
    }
    Ok(())
}

fn kind_failure(expected: &str) -> FailureKind {
    FailureKind::Kind {
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        define, lazy, list, literal, maybe, non_empty_string, nullable, optional, single, string,
        typed_union,
    };
    use serde_json::json;

    fn text_schema() -> Schema {
        define("Text")
            .property("children", string())
            .build()
            .unwrap()
    }

    fn text_node(body: &str) -> Value {
        json!({"tag": "Text", "properties": {"children": body}, "siblingKey": null})
    }

    // ==================== Record envelope ====================

    #[test]
    fn test_record_accepts_minimal_node() {
        assert!(is_valid(&text_node("hi"), &text_schema()));
    }

    #[test]
    fn test_record_rejects_non_object() {
        let failure = assert_valid(&json!("Text"), &text_schema()).unwrap_err();
        assert_eq!(
            failure.to_string(),
            r#"Expected the value to be an element object, but received: "Text"."#
        );
    }

    #[test]
    fn test_record_names_missing_envelope_field() {
        let schema = text_schema();

        let failure = assert_valid(&json!({"tag": "Text"}), &schema).unwrap_err();
        assert_eq!(
            failure.to_string(),
            r#"Missing key: properties, received: {"tag":"Text"}."#
        );

        let failure =
            assert_valid(&json!({"tag": "Text", "properties": {"children": "x"}}), &schema)
                .unwrap_err();
        assert_eq!(
            failure.kind,
            FailureKind::MissingKey {
                key: "siblingKey".to_string()
            }
        );
    }

    #[test]
    fn test_record_rejects_wrong_tag_with_literal_failure() {
        let input = json!({"tag": "Bold", "properties": {"children": "x"}, "siblingKey": null});
        let failure = assert_valid(&input, &text_schema()).unwrap_err();
        assert_eq!(
            failure.to_string(),
            r#"At path: tag — Expected the value to be `"Text"`, but received: "Bold"."#
        );
    }

    #[test]
    fn test_record_rejects_bad_sibling_key() {
        let input = json!({"tag": "Text", "properties": {"children": "x"}, "siblingKey": true});
        let failure = assert_valid(&input, &text_schema()).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "At path: siblingKey — Expected the value to be a string, a number, or null, but received: true."
        );
    }

    #[test]
    fn test_record_rejects_extra_envelope_key() {
        let input = json!({
            "tag": "Text",
            "properties": {"children": "x"},
            "siblingKey": null,
            "style": "bold"
        });
        let failure = assert_valid(&input, &text_schema()).unwrap_err();
        assert_eq!(failure.to_string(), r#"Unknown key: style, received: "bold"."#);
    }

    // ==================== Record properties ====================

    #[test]
    fn test_record_reports_missing_required_property() {
        let input = json!({"tag": "Text", "properties": {}, "siblingKey": null});
        let failure = assert_valid(&input, &text_schema()).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "At path: properties — Missing key: children, received: {}."
        );
    }

    #[test]
    fn test_record_reports_undeclared_property() {
        let input = json!({
            "tag": "Text",
            "properties": {"children": "x", "colour": "red"},
            "siblingKey": null
        });
        let failure = assert_valid(&input, &text_schema()).unwrap_err();
        assert_eq!(
            failure.to_string(),
            r#"Unknown key: properties.colour, received: "red"."#
        );
    }

    #[test]
    fn test_record_optional_property_may_be_absent() {
        let schema = define("Text")
            .property("children", string())
            .property("tone", optional(non_empty_string()))
            .build()
            .unwrap();

        assert!(is_valid(&text_node("hi"), &schema));

        let with_tone = json!({
            "tag": "Text",
            "properties": {"children": "hi", "tone": "muted"},
            "siblingKey": null
        });
        assert!(is_valid(&with_tone, &schema));

        // Present but invalid still fails, with the property path.
        let bad_tone = json!({
            "tag": "Text",
            "properties": {"children": "hi", "tone": ""},
            "siblingKey": null
        });
        let failure = assert_valid(&bad_tone, &schema).unwrap_err();
        assert_eq!(failure.path.to_string(), "properties.tone");
    }

    #[test]
    fn test_record_property_failure_path_is_qualified() {
        let input = json!({"tag": "Text", "properties": {"children": 5}, "siblingKey": null});
        let failure = assert_valid(&input, &text_schema()).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "At path: properties.children — Expected the value to be a string, but received: 5."
        );
    }

    #[test]
    fn test_record_first_failure_follows_declaration_order() {
        let schema = define("Card")
            .property("title", string())
            .property("body", string())
            .build()
            .unwrap();
        let input = json!({
            "tag": "Card",
            "properties": {"body": 1, "title": 2},
            "siblingKey": null
        });
        let failure = assert_valid(&input, &schema).unwrap_err();
        assert_eq!(failure.path.to_string(), "properties.title");
    }

    // ==================== Unions ====================

    #[test]
    fn test_union_unknown_tag_lists_known_tags_in_order() {
        let union = typed_union(vec![
            text_schema(),
            define("Image").property("source", string()).build().unwrap(),
        ])
        .unwrap();

        let input = json!({"tag": "Bold", "properties": {}, "siblingKey": null});
        assert!(!is_valid(&input, &union));
        let failure = assert_valid(&input, &union).unwrap_err();
        assert_eq!(
            failure.to_string(),
            r#"Expected the value to be one of: Text, Image, but received: {"properties":{},"siblingKey":null,"tag":"Bold"}."#
        );
    }

    #[test]
    fn test_union_match_reports_against_the_one_matched_shape() {
        let union = typed_union(vec![
            text_schema(),
            define("Image").property("source", string()).build().unwrap(),
        ])
        .unwrap();

        // The tag matches Image, so the failure is Image's missing
        // property, not a union-wide dump.
        let input = json!({"tag": "Image", "properties": {}, "siblingKey": null});
        let failure = assert_valid(&input, &union).unwrap_err();
        assert_eq!(
            failure.kind,
            FailureKind::MissingKey {
                key: "source".to_string()
            }
        );
    }

    // ==================== Wrappers and leaves ====================

    #[test]
    fn test_literal_failure_message() {
        let failure = assert_valid(&json!("stop"), &literal("go")).unwrap_err();
        assert_eq!(
            failure.to_string(),
            r#"Expected the value to be `"go"`, but received: "stop"."#
        );
    }

    #[test]
    fn test_nullable_and_maybe() {
        assert!(is_valid(&json!(null), &nullable(string())));
        assert!(is_valid(&json!(false), &maybe(text_schema())));
        assert!(!is_valid(&json!(0), &maybe(text_schema())));
    }

    #[test]
    fn test_list_failure_carries_index_path() {
        let schema = list(vec![text_schema()]).unwrap();
        let input = json!([text_node("ok"), {"tag": "Text"}]);
        let failure = assert_valid(&input, &schema).unwrap_err();
        assert_eq!(failure.path.to_string(), "[1]");
    }

    #[test]
    fn test_lazy_delegates_after_resolution() {
        let schema = single(vec![lazy(text_schema)]).unwrap();
        assert!(is_valid(&text_node("hi"), &schema));
        assert!(!is_valid(&json!("hi"), &schema));
    }

    // ==================== Entry points ====================

    #[test]
    fn test_is_valid_is_idempotent() {
        let schema = text_schema();
        let good = text_node("hi");
        let bad = json!({"tag": "Text", "properties": {}, "siblingKey": null});
        for _ in 0..3 {
            assert!(is_valid(&good, &schema));
            assert!(!is_valid(&bad, &schema));
        }
    }

    #[test]
    fn test_validation_does_not_mutate_input() {
        let schema = text_schema();
        let input = text_node("hi");
        let snapshot = input.clone();
        let _ = assert_valid(&input, &schema);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_shape_only_probe_is_not_recursive() {
        let malformed_child = json!({
            "tag": "Row",
            "properties": {"children": {"tag": 42}},
            "siblingKey": null
        });
        assert!(is_valid_shape_only(&malformed_child));
        assert!(!is_valid_shape_only(&json!({"tag": "Row"})));
        assert!(!is_valid_shape_only(&json!("Row")));
    }
}
