//! Structural validation of Arbor element trees.
//!
//! Decides whether an arbitrary, dynamically-typed tree of nested records
//! (a `serde_json::Value` with no static guarantees) conforms to a catalog
//! of named element shapes. Each shape carries a discriminant tag, a fixed
//! property set, and constrained slots for nested children whose shapes
//! may recursively reference other shapes, including themselves.
//!
//! The pieces, leaves first:
//! - leaf combinators ([`schema::literal`], [`schema::string`],
//!   [`schema::optional`], ...) for primitive property checks;
//! - children cardinality combinators ([`schema::single`],
//!   [`schema::list`], [`schema::nested_list`], [`schema::tuple`],
//!   [`schema::maybe`]) expressing how many element instances a slot may
//!   hold;
//! - discriminated element schemas ([`schema::define`]) binding a tag to a
//!   property-schema map;
//! - [`schema::lazy`] references, resolved once on first use, for
//!   mutually-recursive shapes;
//! - tag-dispatched and selective unions ([`schema::typed_union`],
//!   [`schema::selective_union`]) that pick exactly one candidate without
//!   trial-and-error backtracking;
//! - the tree validator entry points [`is_valid`], [`assert_valid`], and
//!   [`is_valid_shape_only`].
//!
//! Schemas are built once at startup, immutable and shareable across
//! threads thereafter. Misconfigured schemas (duplicate tags, duplicate
//! properties, empty candidate sets) are rejected at construction with
//! [`SchemaError`]; structural mismatches in input data surface as
//! [`Failure`] values with path-qualified, human-readable messages.
//!
//! ```
//! use arbor_validation::schema::{define, single, string};
//! use serde_json::json;
//!
//! let text = define("Text").property("children", string()).build().unwrap();
//! let image = define("Image").property("source", string()).build().unwrap();
//! let row = define("Row")
//!     .property("label", string())
//!     .property("children", single(vec![text, image]).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let tree = json!({
//!     "tag": "Row",
//!     "properties": {
//!         "label": "From",
//!         "children": {"tag": "Text", "properties": {"children": "hi"}, "siblingKey": null}
//!     },
//!     "siblingKey": null
//! });
//! assert!(row.is_valid(&tree));
//! ```

pub mod error;
pub mod schema;
pub mod validator;

pub use error::{Failure, FailureKind, InstancePath, PathSegment, SchemaError, SchemaResult};
pub use schema::Schema;
pub use validator::{assert_valid, is_valid, is_valid_shape_only};
