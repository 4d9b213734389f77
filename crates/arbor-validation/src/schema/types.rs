//! Schema type definitions
//!
//! One struct per rule family; each is immutable once built and carried by
//! the corresponding [`Schema`](super::Schema) variant. Construction goes
//! through the builder and combinator functions in the sibling modules,
//! which reject malformed configurations eagerly.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use super::Schema;

/// Exact-literal schema: the candidate must deep-equal the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralSchema {
    pub value: Value,
}

/// String schema, with an optional non-empty refinement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    pub non_empty: bool,
}

/// Number schema, with optional bound and integrality refinements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberSchema {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub integer: bool,
}

/// Boolean schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanSchema;

/// Discriminated element schema: a tag literal plus declared property
/// schemas.
///
/// Properties are kept in declaration order so traversal (and therefore
/// the first failure reported) is deterministic. The candidate's property
/// keys must equal the declared set once optional-and-absent keys are
/// excluded; undeclared keys are rejected.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    /// The discriminant tag this element must carry.
    pub tag: String,
    /// Friendlier name for messages, when the tag alone reads poorly.
    pub display_name: Option<String>,
    /// Declared property schemas, in declaration order.
    pub properties: Vec<(String, Schema)>,
}

impl RecordSchema {
    /// The identifier used for this element in rendered messages.
    pub fn describe(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.tag)
    }

    /// Whether a property key is declared on this element.
    pub fn declares(&self, key: &str) -> bool {
        self.properties.iter().any(|(k, _)| k == key)
    }
}

/// Tag-dispatched union: a tag-to-candidate lookup table built once at
/// construction.
///
/// Dispatch reads the candidate's tag and delegates entirely to the one
/// matching element schema. Candidates are never tried in sequence, so a
/// property mismatch inside a matched element reports against that one
/// shape rather than a conflated union-wide failure.
#[derive(Debug, Clone)]
pub struct TaggedUnionSchema {
    candidates: Vec<Arc<RecordSchema>>,
    by_tag: HashMap<String, usize>,
}

impl TaggedUnionSchema {
    /// Build the dispatch table. Callers (see
    /// [`typed_union`](super::typed_union)) have already rejected
    /// duplicate tags.
    pub(super) fn new(candidates: Vec<Arc<RecordSchema>>, by_tag: HashMap<String, usize>) -> Self {
        Self { candidates, by_tag }
    }

    /// Look up the one candidate for a tag, O(1).
    pub fn lookup(&self, tag: &str) -> Option<&Arc<RecordSchema>> {
        self.by_tag.get(tag).map(|&i| &self.candidates[i])
    }

    /// Candidate identifiers for messages, in declaration order.
    pub fn alternatives(&self) -> Vec<String> {
        self.candidates
            .iter()
            .map(|r| r.describe().to_string())
            .collect()
    }
}

/// Runtime-shape probe for selective unions.
///
/// An exhaustive set of shapes a probe can test, evaluated once per
/// candidate; each arm maps to exactly one schema. This replaces
/// open-ended duck typing with a small, enumerable decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueProbe {
    IsString,
    IsNumber,
    IsBoolean,
    IsNull,
    IsArray,
    /// An object carrying a string `tag` field.
    IsTaggedObject,
}

impl ValueProbe {
    /// Whether the candidate has the probed runtime shape.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueProbe::IsString => value.is_string(),
            ValueProbe::IsNumber => value.is_number(),
            ValueProbe::IsBoolean => value.is_boolean(),
            ValueProbe::IsNull => value.is_null(),
            ValueProbe::IsArray => value.is_array(),
            ValueProbe::IsTaggedObject => arbor_node::tag_of(value).is_some(),
        }
    }
}

/// Selective union over heterogeneous alternatives that lack a shared tag
/// field (e.g. "plain string" vs. "structured element"). Arms are tried in
/// order; the first matching probe picks the schema delegated to.
#[derive(Debug, Clone)]
pub struct SelectiveSchema {
    pub arms: Vec<(ValueProbe, Schema)>,
}

/// List cardinality: an array of elements, empty allowed.
///
/// With `nested` set, an item may itself be an array, recursively with no
/// fixed depth bound; recursion stops when an item is not an array.
#[derive(Debug, Clone)]
pub struct ListSchema {
    pub item: Box<Schema>,
    pub nested: bool,
}

/// Tuple cardinality: the array length must equal the number of positions
/// and position `i` validates against `positions[i]`.
#[derive(Debug, Clone)]
pub struct TupleSchema {
    pub positions: Vec<Schema>,
}

/// Sentinel-or-element cardinality: booleans and `null` ("this optional
/// branch was not rendered") are accepted before delegating to the
/// wrapped element schema.
#[derive(Debug, Clone)]
pub struct MaybeSchema {
    pub inner: Box<Schema>,
}

/// Deferred, resolve-once schema reference.
///
/// The thunk runs at most once, on first validation use; thereafter the
/// cached schema is delegated to directly. This is what lets two element
/// schemas reference each other without evaluating either at definition
/// time. The `OnceLock` guards the one-time transition, so first use may
/// happen concurrently from multiple threads without redundant thunk
/// invocation or a half-populated cache.
#[derive(Clone)]
pub struct LazySchema {
    cell: Arc<OnceLock<Schema>>,
    init: Arc<dyn Fn() -> Schema + Send + Sync>,
}

impl LazySchema {
    pub(super) fn new<F>(init: F) -> Self
    where
        F: Fn() -> Schema + Send + Sync + 'static,
    {
        Self {
            cell: Arc::new(OnceLock::new()),
            init: Arc::new(init),
        }
    }

    /// Resolve the reference, running the thunk on first use.
    ///
    /// The thunk must be side-effect-free and idempotent. A panicking
    /// thunk is a schema configuration bug; the panic propagates and is
    /// never converted into a validation [`Failure`](crate::Failure).
    pub fn force(&self) -> &Schema {
        self.cell.get_or_init(|| {
            tracing::trace!("resolving deferred schema");
            (self.init)()
        })
    }

    /// The cached schema, if the reference has been resolved.
    pub fn resolved(&self) -> Option<&Schema> {
        self.cell.get()
    }
}

impl fmt::Debug for LazySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySchema")
            .field("resolved", &self.cell.get().is_some())
            .finish_non_exhaustive()
    }
}
