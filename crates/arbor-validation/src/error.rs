// Error types for element-tree validation

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors in the construction of a schema.
///
/// These are programmer bugs in the schema catalog, detected eagerly when
/// the schema is built. They are a distinct type from [`Failure`] so a
/// caller can never mistake a misconfigured schema for bad input data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two union candidates share a discriminant tag, making dispatch
    /// ambiguous.
    #[error("duplicate element tag `{0}` in union")]
    DuplicateTag(String),

    /// A union candidate is not a tagged element schema.
    #[error("union candidate is not a tagged element schema: {0}")]
    UntaggedCandidate(String),

    /// The same property key was declared twice on one element.
    #[error("duplicate property key `{key}` on element `{tag}`")]
    DuplicateProperty { tag: String, key: String },

    /// A children slot was given no candidate element schemas.
    #[error("a children slot needs at least one candidate element schema")]
    EmptyCandidateSet,

    /// A tuple children slot was given no positions.
    #[error("a tuple children slot needs at least one position")]
    EmptyTuple,

    /// A selective union was given no probe arms.
    #[error("a selective union needs at least one probe arm")]
    EmptySelectiveUnion,
}

/// Result type for schema construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Structured failure kinds produced during validation
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FailureKind {
    /// Value did not deep-equal an expected literal
    Literal { expected: Value },

    /// Value was not of the expected primitive kind (or refinement)
    Kind { expected: String },

    /// Value matched none of a union's alternatives
    OneOf { alternatives: Vec<String> },

    /// A required key was absent
    MissingKey { key: String },

    /// A key was present that the schema does not declare
    UnknownKey,

    /// A tuple slot received the wrong number of positions (or not an
    /// array at all)
    TupleLength { expected: usize },
}

/// One structural validation failure: where it happened, what was
/// expected, and the offending value.
///
/// `Display` renders the one-line human message; [`crate::assert_valid`]
/// returns the first `Failure` encountered along its traversal.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct Failure {
    /// The structured failure kind
    pub kind: FailureKind,
    /// Instance path where the failure occurred (e.g., `properties.children[1]`)
    pub path: InstancePath,
    /// The offending value, echoed verbatim in the message
    pub received: Value,
}

impl Failure {
    /// Create a new failure at the given path.
    pub fn new(kind: FailureKind, path: InstancePath, received: Value) -> Self {
        Self {
            kind,
            path,
            received,
        }
    }

    /// The message for the failure kind alone, without the path prefix.
    pub fn message(&self) -> String {
        // serde_json::Value's Display is compact JSON, which is exactly
        // the verbatim echo the messages call for.
        let received = &self.received;
        match &self.kind {
            FailureKind::Literal { expected } => {
                format!("Expected the value to be `{expected}`, but received: {received}.")
            }
            FailureKind::Kind { expected } => {
                format!("Expected the value to be {expected}, but received: {received}.")
            }
            FailureKind::OneOf { alternatives } => {
                format!(
                    "Expected the value to be one of: {}, but received: {received}.",
                    alternatives.join(", ")
                )
            }
            FailureKind::MissingKey { key } => {
                format!("Missing key: {key}, received: {received}.")
            }
            FailureKind::UnknownKey => {
                format!("Unknown key: {}, received: {received}.", self.path)
            }
            FailureKind::TupleLength { expected } => {
                format!(
                    "Expected the value to be an array of length {expected}, but received: {received}."
                )
            }
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            // The unknown-key message carries its own path.
            FailureKind::UnknownKey => write!(f, "{}", self.message()),
            _ if self.path.is_empty() => write!(f, "{}", self.message()),
            _ => write!(f, "At path: {} — {}", self.path, self.message()),
        }
    }
}

/// Instance path into the candidate value (e.g., `properties.children[1]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InstancePath {
    segments: Vec<PathSegment>,
}

impl InstancePath {
    /// Create a new empty instance path
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Push a key segment onto the path
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    /// Push an index segment onto the path
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Pop the last segment from the path
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Get the segments as a slice
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the length of the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{key}")?;
                }
                // Indices attach to the preceding segment: children[1]
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// A segment in an instance path
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}
