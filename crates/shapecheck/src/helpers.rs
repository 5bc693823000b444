//! # Convenience Constructors
//!
//! Thin wrappers over [`Schema`] construction for the three common setups:
//! default lenient, forced exact, forced lenient, plus the enumeration
//! helper for scalar membership.

use serde_json::Value;

use shapecheck_core::SchemaNode;

use crate::schema::Schema;

/// Wraps a definition with the lenient default.
///
/// ```
/// use serde_json::json;
/// use shapecheck::{schema, Entry, TypeTag, SchemaNode};
///
/// let status = schema(SchemaNode::object([Entry::required("status", TypeTag::Int)]));
/// assert!(status == json!({"status": 404}));
/// assert!(status == json!({"status": 404, "timestamp": 1594358256}));
/// assert!(status != json!({"status": "404"}));
/// ```
pub fn schema(definition: impl Into<SchemaNode>) -> Schema {
    Schema::new(definition)
}

/// Wraps a definition with strictness forced to exact: extra mapping keys
/// are rejected.
pub fn exact_schema(definition: impl Into<SchemaNode>) -> Schema {
    Schema::new(definition).ignoring_extra_keys(false)
}

/// Wraps a definition with strictness forced to lenient: extra mapping keys
/// are ignored.
pub fn like_schema(definition: impl Into<SchemaNode>) -> Schema {
    Schema::new(definition).ignoring_extra_keys(true)
}

/// Enumeration helper: membership over literal alternatives.
///
/// The candidate is a scalar, so there is no extra-key ambiguity; matching
/// is exact literal equality against one of `values`.
///
/// ```
/// use serde_json::json;
/// use shapecheck::one_of;
///
/// let color = one_of(["red", "blue", "green"]);
/// assert!(color == json!("red"));
/// assert!(color != json!("yellow"));
/// ```
pub fn one_of<I, V>(values: I) -> Schema
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Schema::new(SchemaNode::one_of(values))
}
