//! Union construction: tag-dispatched and selective

use super::types::{SelectiveSchema, TaggedUnionSchema, ValueProbe};
use super::Schema;
use crate::error::{SchemaError, SchemaResult};
use std::collections::HashMap;

/// Build a tag-dispatched union over element schemas.
///
/// The tag-to-candidate table is built here, once; dispatch at validation
/// time is a single lookup, never a sequential trial of candidates. Every
/// candidate must be an element schema ([`define`](super::define)) and
/// tags must be unique, both checked eagerly.
pub fn typed_union(candidates: Vec<Schema>) -> SchemaResult<Schema> {
    if candidates.is_empty() {
        return Err(SchemaError::EmptyCandidateSet);
    }
    let mut records = Vec::with_capacity(candidates.len());
    let mut by_tag = HashMap::with_capacity(candidates.len());
    for candidate in candidates {
        let Schema::Record(record) = candidate else {
            return Err(SchemaError::UntaggedCandidate(candidate.describe()));
        };
        if by_tag.insert(record.tag.clone(), records.len()).is_some() {
            return Err(SchemaError::DuplicateTag(record.tag.clone()));
        }
        records.push(record);
    }
    Ok(Schema::Union(TaggedUnionSchema::new(records, by_tag)))
}

/// Build a selective union over alternatives that lack a shared tag field.
///
/// Arms are `(probe, schema)` pairs tried in order; the first probe
/// matching the candidate's runtime shape picks the single schema
/// delegated to. A candidate matching no probe fails with the full
/// alternative list.
pub fn selective_union(arms: Vec<(ValueProbe, Schema)>) -> SchemaResult<Schema> {
    if arms.is_empty() {
        return Err(SchemaError::EmptySelectiveUnion);
    }
    Ok(Schema::Selective(SelectiveSchema { arms }))
}
