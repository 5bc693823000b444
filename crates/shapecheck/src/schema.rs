//! # Comparison Object
//!
//! [`Schema`] wraps one immutable schema definition together with a
//! persistent strictness flag and exposes the validation entry points tests
//! use:
//!
//! - `validate` / `matches` — current strictness, mismatch propagates;
//! - `is_valid` / `differs` — non-propagating probes;
//! - `exact` / `like` — per-call strictness override, mismatch propagates;
//! - `not_exact` / `not_like` — per-call override, negative probe.
//!
//! The positive entry points return `Result` so a failed assertion surfaces
//! the full structural diff; the negative probes return plain booleans and
//! never surface `MismatchError`. That asymmetry is deliberate and mirrors
//! how the entry points compose with assertions.
//!
//! ## Thread Safety
//!
//! The strictness flag is a `Cell`, so `Schema` is not `Sync`: two threads
//! cannot share one comparison object, which removes the override-clobbering
//! race by construction. Distinct `Schema` values, even over the same
//! definition, are always independent.

use std::cell::Cell;

use serde_json::Value;

use shapecheck_core::{match_value, MatchOptions, MismatchError, SchemaNode};

use crate::guard::StrictnessGuard;

/// A schema definition usable as the operand of a test comparison.
///
/// The definition never changes after construction; the only mutable state
/// is the strictness flag, and every per-call override of it is reverted
/// before the call returns.
#[derive(Debug, Clone)]
pub struct Schema {
    node: SchemaNode,
    ignore_extra_keys: Cell<bool>,
    error: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

impl Schema {
    /// Wraps a definition with the lenient default (extra keys ignored).
    /// No validation happens at construction.
    pub fn new(definition: impl Into<SchemaNode>) -> Self {
        Schema {
            node: definition.into(),
            ignore_extra_keys: Cell::new(true),
            error: None,
            name: None,
            description: None,
        }
    }

    /// Replaces mismatch descriptions with fixed text (paths are kept).
    pub fn with_error(mut self, text: impl Into<String>) -> Self {
        self.error = Some(text.into());
        self
    }

    /// Attaches a name for documentation purposes.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the persistent strictness flag.
    pub fn ignoring_extra_keys(self, ignore: bool) -> Self {
        self.ignore_extra_keys.set(ignore);
        self
    }

    /// The wrapped definition.
    pub fn node(&self) -> &SchemaNode {
        &self.node
    }

    /// The configured name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The configured description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Current value of the strictness flag.
    pub fn ignores_extra_keys(&self) -> bool {
        self.ignore_extra_keys.get()
    }

    fn run_match(&self, value: &Value) -> Result<Value, MismatchError> {
        let opts = MatchOptions {
            ignore_extra_keys: self.ignore_extra_keys.get(),
        };
        match_value(&self.node, value, opts).map_err(|err| match &self.error {
            Some(text) => err.with_message(text.clone()),
            None => err,
        })
    }

    /// Validates under the currently configured strictness and returns the
    /// normalized value (transforms may coerce).
    ///
    /// # Errors
    ///
    /// Propagates [`MismatchError`] so an asserting caller gets the full
    /// structural diff as the failure message.
    pub fn validate(&self, value: &Value) -> Result<Value, MismatchError> {
        self.run_match(value)
    }

    /// Like [`Schema::validate`] but discards the normalized value.
    ///
    /// # Errors
    ///
    /// Propagates [`MismatchError`] on mismatch.
    pub fn matches(&self, value: &Value) -> Result<(), MismatchError> {
        self.run_match(value).map(|_| ())
    }

    /// Non-propagating probe: does the value conform under the current
    /// strictness?
    pub fn is_valid(&self, value: &Value) -> bool {
        self.run_match(value).is_ok()
    }

    /// Negative probe: true iff the value does *not* conform under the
    /// current strictness. Never propagates a mismatch.
    pub fn differs(&self, value: &Value) -> bool {
        !self.is_valid(value)
    }

    /// Validates with extra keys rejected, for this call only.
    ///
    /// The configured strictness is restored before this returns, on the
    /// `Err` path included.
    ///
    /// # Errors
    ///
    /// Propagates [`MismatchError`] on mismatch.
    pub fn exact(&self, value: &Value) -> Result<(), MismatchError> {
        let _strict = StrictnessGuard::set(&self.ignore_extra_keys, true);
        self.matches(value)
    }

    /// Negative probe under exact strictness; never propagates. The
    /// configured strictness is restored before this returns.
    pub fn not_exact(&self, value: &Value) -> bool {
        let _strict = StrictnessGuard::set(&self.ignore_extra_keys, true);
        self.differs(value)
    }

    /// Validates with extra keys ignored, for this call only.
    ///
    /// # Errors
    ///
    /// Propagates [`MismatchError`] on mismatch.
    pub fn like(&self, value: &Value) -> Result<(), MismatchError> {
        let _lenient = StrictnessGuard::set(&self.ignore_extra_keys, false);
        self.matches(value)
    }

    /// Negative probe under lenient strictness; never propagates. The
    /// configured strictness is restored before this returns.
    pub fn not_like(&self, value: &Value) -> bool {
        let _lenient = StrictnessGuard::set(&self.ignore_extra_keys, false);
        self.differs(value)
    }
}

/// Boolean-only operator surface: `schema == value` runs validation under
/// the current strictness. Use the assertion macros when the failure
/// diagnostic matters.
impl PartialEq<Value> for Schema {
    fn eq(&self, other: &Value) -> bool {
        self.is_valid(other)
    }
}

impl PartialEq<Schema> for Value {
    fn eq(&self, other: &Schema) -> bool {
        other.is_valid(self)
    }
}
