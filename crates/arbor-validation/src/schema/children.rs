//! Children cardinality combinators
//!
//! Wrappers expressing how many element instances a children slot may
//! hold. The envelope shape (array vs. scalar vs. sentinel) is always
//! checked before the element shape, so "wrong cardinality" and "wrong
//! element shape" produce categorically different messages.

use super::types::{ListSchema, MaybeSchema, TupleSchema};
use super::{typed_union, Schema};
use crate::error::{SchemaError, SchemaResult};

/// Exactly one element satisfying one member of `set`.
///
/// A one-element set delegates to its lone member directly, so failures
/// name that one expected shape instead of a degenerate "one of:" list.
/// Larger sets dispatch as a tag union, which requires every member to be
/// a tagged element schema.
pub fn single(mut set: Vec<Schema>) -> SchemaResult<Schema> {
    match set.len() {
        0 => Err(SchemaError::EmptyCandidateSet),
        1 => Ok(set.remove(0)),
        _ => typed_union(set),
    }
}

/// An array (empty allowed) whose every item satisfies `single(set)`.
pub fn list(set: Vec<Schema>) -> SchemaResult<Schema> {
    Ok(Schema::List(ListSchema {
        item: Box::new(single(set)?),
        nested: false,
    }))
}

/// Like [`list`], but an item may itself be an array, recursively with no
/// fixed depth bound. Recursion stops when an item is not an array, at
/// which point it validates as an element.
pub fn nested_list(set: Vec<Schema>) -> SchemaResult<Schema> {
    Ok(Schema::List(ListSchema {
        item: Box::new(single(set)?),
        nested: true,
    }))
}

/// An array of exactly `positions.len()` items, position `i` validated
/// against `positions[i]`.
pub fn tuple(positions: Vec<Schema>) -> SchemaResult<Schema> {
    if positions.is_empty() {
        return Err(SchemaError::EmptyTuple);
    }
    Ok(Schema::Tuple(TupleSchema { positions }))
}

/// Accepts boolean and `null` sentinels ("this optional branch was not
/// rendered") before falling back to the wrapped element schema.
pub fn maybe(schema: Schema) -> Schema {
    Schema::Maybe(MaybeSchema {
        inner: Box::new(schema),
    })
}
