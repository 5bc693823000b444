//! # Assertion Macros
//!
//! The diagnostic-rich assertion surface. `==` on a [`crate::Schema`] can
//! only yield a boolean, so these macros route through the `Result`-returning
//! entry points and panic with the full mismatch description — path plus
//! expected-vs-actual — when validation fails.

/// Asserts that a value conforms to a schema under its current strictness.
///
/// Panics with the structural diff on mismatch.
///
/// ```
/// use serde_json::json;
/// use shapecheck::{assert_schema, schema, Entry, SchemaNode, TypeTag};
///
/// let s = schema(SchemaNode::object([Entry::required("id", TypeTag::Int)]));
/// assert_schema!(s, json!({"id": 1}));
/// ```
#[macro_export]
macro_rules! assert_schema {
    ($schema:expr, $value:expr $(,)?) => {
        match $schema.matches(&$value) {
            Ok(()) => {}
            Err(err) => panic!("schema assertion failed: {err}"),
        }
    };
}

/// Asserts that a value does *not* conform under the schema's current
/// strictness.
#[macro_export]
macro_rules! assert_not_schema {
    ($schema:expr, $value:expr $(,)?) => {
        if !$schema.differs(&$value) {
            panic!("schema assertion failed: value unexpectedly conforms");
        }
    };
}

/// Asserts conformance with extra keys rejected, regardless of the schema's
/// configured strictness. The configured strictness is untouched afterward.
#[macro_export]
macro_rules! assert_exact_schema {
    ($schema:expr, $value:expr $(,)?) => {
        match $schema.exact(&$value) {
            Ok(()) => {}
            Err(err) => panic!("exact schema assertion failed: {err}"),
        }
    };
}

/// Asserts conformance with extra keys ignored, regardless of the schema's
/// configured strictness. The configured strictness is untouched afterward.
#[macro_export]
macro_rules! assert_like_schema {
    ($schema:expr, $value:expr $(,)?) => {
        match $schema.like(&$value) {
            Ok(()) => {}
            Err(err) => panic!("like schema assertion failed: {err}"),
        }
    };
}
