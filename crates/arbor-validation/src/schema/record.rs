//! Discriminated element schema construction

use super::types::RecordSchema;
use super::Schema;
use crate::error::{SchemaError, SchemaResult};
use std::collections::HashSet;
use std::sync::Arc;

/// Start defining an element shape with the given discriminant tag.
///
/// ```
/// use arbor_validation::schema::{define, non_empty_string, optional, string};
///
/// let row = define("Row")
///     .property("label", non_empty_string())
///     .property("caption", optional(string()))
///     .build()
///     .unwrap();
/// assert_eq!(row.describe(), "Row");
/// ```
pub fn define(tag: impl Into<String>) -> RecordBuilder {
    RecordBuilder {
        tag: tag.into(),
        display_name: None,
        properties: Vec::new(),
    }
}

/// Builder for [`RecordSchema`]. Properties validate in declaration
/// order; duplicate keys are rejected at [`build`](RecordBuilder::build).
#[derive(Debug)]
pub struct RecordBuilder {
    tag: String,
    display_name: Option<String>,
    properties: Vec<(String, Schema)>,
}

impl RecordBuilder {
    /// Set a friendlier name for rendered messages.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Declare a property. Wrap the schema in
    /// [`optional`](super::optional) for properties that may be absent.
    pub fn property(mut self, key: impl Into<String>, schema: Schema) -> Self {
        self.properties.push((key.into(), schema));
        self
    }

    /// Finish the definition.
    pub fn build(self) -> SchemaResult<Schema> {
        let mut seen = HashSet::new();
        for (key, _) in &self.properties {
            if !seen.insert(key.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    tag: self.tag,
                    key: key.clone(),
                });
            }
        }
        Ok(Schema::Record(Arc::new(RecordSchema {
            tag: self.tag,
            display_name: self.display_name,
            properties: self.properties,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::string;

    #[test]
    fn test_define_keeps_declaration_order() {
        let schema = define("Card")
            .property("title", string())
            .property("body", string())
            .build()
            .unwrap();
        let Schema::Record(record) = schema else {
            panic!("expected Record schema");
        };
        let keys: Vec<_> = record.properties.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["title", "body"]);
        assert_eq!(record.tag, "Card");
    }

    #[test]
    fn test_duplicate_property_is_a_construction_error() {
        let result = define("Card")
            .property("title", string())
            .property("title", string())
            .build();
        assert_eq!(
            result.unwrap_err(),
            SchemaError::DuplicateProperty {
                tag: "Card".to_string(),
                key: "title".to_string(),
            }
        );
    }
}
