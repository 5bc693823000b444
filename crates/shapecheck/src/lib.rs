//! # shapecheck — Schema-Shaped Assertions for Tests
//!
//! Assert that a runtime value (objects, arrays, scalars, nested structures)
//! conforms to a declarative shape, and choose between two strictness modes
//! without writing a custom matcher per test:
//!
//! - **exact** — mapping keys the schema does not name are rejected;
//! - **lenient** — extra keys are ignored.
//!
//! ```
//! use serde_json::json;
//! use shapecheck::{assert_schema, schema, Entry, SchemaNode, TypeTag};
//!
//! let response = schema(SchemaNode::object([
//!     Entry::required("id", TypeTag::Int),
//!     Entry::required("username", TypeTag::String),
//! ]));
//!
//! // Lenient by default: the unnamed key is tolerated.
//! assert_schema!(response, json!({"id": 1, "username": "helloworld", "ts": 1594358256}));
//!
//! // Per-call exact override; the configured strictness is restored after.
//! assert!(response.exact(&json!({"id": 1, "username": "helloworld", "ts": 0})).is_err());
//! assert!(response.ignores_extra_keys());
//! ```
//!
//! ## Entry Points
//!
//! [`Schema`] is the comparison object. Positive entry points
//! ([`Schema::validate`], [`Schema::exact`], [`Schema::like`]) propagate a
//! [`MismatchError`] with the offending path and expected-vs-actual detail;
//! negative probes ([`Schema::differs`], [`Schema::not_exact`],
//! [`Schema::not_like`]) return plain booleans and never propagate. `==` is
//! also implemented against [`serde_json::Value`], boolean-only.
//!
//! ## Crate Policy
//!
//! - One `Schema` per thread: the strictness flag is a `Cell`, so sharing
//!   is a compile error, not a race.
//! - Matching is delegated to `shapecheck-core`; this crate owns only the
//!   per-call strictness scoping and the assertion surface.

pub mod guard;
pub mod helpers;
#[macro_use]
pub mod macros;
pub mod schema;

pub use guard::StrictnessGuard;
pub use helpers::{exact_schema, like_schema, one_of, schema};
pub use schema::Schema;

// Re-export the definition vocabulary so test code needs one import line.
pub use shapecheck_core::{
    Entry, KeySchema, MismatchError, MismatchKind, Modality, SchemaError, SchemaNode, TypeTag,
};
