//! JSON Schema export.
//!
//! Every codec describes the values it accepts as a JSON Schema fragment.
//! Named shapes render as `{"$ref": "#/$defs/<name>"}` and the registry
//! collects the definitions behind those references.

use serde_json::{json, Value};

/// The `$schema` URI written into exported documents.
pub const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Conversion of a codec into a JSON Schema fragment.
pub trait ToJsonSchema {
    /// Describes the values this codec accepts.
    fn to_json_schema(&self) -> Value;
}

/// The reference a named shape renders as.
pub(crate) fn definition_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/$defs/{}", name) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_ref() {
        assert_eq!(
            definition_ref("TargetingClause"),
            json!({"$ref": "#/$defs/TargetingClause"})
        );
    }
}
