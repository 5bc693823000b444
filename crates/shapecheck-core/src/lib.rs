//! # shapecheck-core — Structural Matching Engine
//!
//! The validation engine behind the `shapecheck` assertion crate. Walks a
//! candidate [`serde_json::Value`] against a declarative [`SchemaNode`]
//! definition and reports the first point of divergence as a structured
//! [`MismatchError`] carrying the path into the value and an
//! expected-vs-actual description.
//!
//! ## Node Algebra (`node`)
//!
//! Schema definitions are a closed sum type: runtime type tags, literal
//! values, regex patterns, user predicates, coercing transforms, AND/OR
//! combinators, sequences, and mapping schemas with required / optional /
//! forbidden entries.
//!
//! ## Matching (`matcher`)
//!
//! [`match_value`] performs a finite recursive walk bounded by the depth of
//! the input. The single behavioral knob is [`MatchOptions::ignore_extra_keys`]:
//! lenient mode tolerates mapping keys the schema does not name, exact mode
//! rejects them. Successful matches return a normalized value, since
//! transform nodes may coerce rather than merely check.
//!
//! ## Crate Policy
//!
//! - No dependencies on other shapecheck crates (this is the leaf).
//! - No I/O, no network, no persisted state, no async.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod matcher;
pub mod node;

pub use error::{MismatchError, MismatchKind, PathSegment, SchemaError, ValuePath};
pub use matcher::{match_value, MatchOptions};
pub use node::{Entry, KeySchema, Modality, SchemaNode, TypeTag};
