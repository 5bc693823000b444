//! # Mismatch and Definition Errors
//!
//! Two error families live here:
//!
//! - [`MismatchError`] — a value did not conform to a schema definition.
//!   Carries the path to the offending location and an expected-vs-actual
//!   description. Assertion entry points propagate it unchanged so the
//!   failure message is the diagnostic.
//! - [`SchemaError`] — the definition itself is malformed (today: a regex
//!   that does not compile). This is a programmer error and is never
//!   converted to a boolean by negative probes.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::node::TypeTag;

/// A path into a nested candidate value, rendered JSON-pointer style
/// (`/hello/hey`, `/items/2`). The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath(Vec<PathSegment>);

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Descent into a mapping by key.
    Key(String),
    /// Descent into an array by index.
    Index(usize),
}

impl ValuePath {
    /// The root path.
    pub fn root() -> Self {
        ValuePath(Vec::new())
    }

    /// Returns a new path extended by a mapping key.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_string()));
        ValuePath(segments)
    }

    /// Returns a new path extended by an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        ValuePath(segments)
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path's segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("(root)");
        }
        for segment in &self.0 {
            match segment {
                PathSegment::Key(k) => write!(f, "/{k}")?,
                PathSegment::Index(i) => write!(f, "/{i}")?,
            }
        }
        Ok(())
    }
}

/// The specific way a value diverged from its definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MismatchKind {
    /// The value's runtime type is wrong.
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        /// Tag the definition demands.
        expected: TypeTag,
        /// Tag describing the candidate.
        actual: TypeTag,
    },

    /// The value differs from a literal definition.
    #[error("expected {expected}, got {actual}")]
    LiteralMismatch {
        /// The literal the definition names.
        expected: Value,
        /// The candidate value.
        actual: Value,
    },

    /// A string did not match a pattern definition.
    #[error("{actual:?} does not match pattern {pattern:?}")]
    PatternMismatch {
        /// The pattern source.
        pattern: String,
        /// The candidate string.
        actual: String,
    },

    /// A user predicate rejected the value.
    #[error("predicate '{name}' rejected value")]
    PredicateFailed {
        /// Diagnostic name given at definition time.
        name: String,
    },

    /// A coercing transform could not normalize the value.
    #[error("transform '{name}' failed: {reason}")]
    TransformFailed {
        /// Diagnostic name given at definition time.
        name: String,
        /// Reason reported by the transform.
        reason: String,
    },

    /// A required mapping key is absent.
    #[error("missing required key '{key}'")]
    MissingKey {
        /// The missing key, or the pattern no key matched.
        key: String,
    },

    /// A key the schema does not name is present, under exact strictness.
    #[error("extra key '{key}' not permitted")]
    ExtraKey {
        /// The offending key.
        key: String,
    },

    /// A forbidden key is present.
    #[error("forbidden key '{key}' present")]
    ForbiddenKey {
        /// The offending key.
        key: String,
    },

    /// No alternative of an OR / sequence definition matched.
    #[error("no alternative matched ({tried} tried)")]
    NoAlternativeMatched {
        /// How many alternatives were attempted.
        tried: usize,
    },
}

/// A value did not conform to a schema definition.
///
/// Display output pairs the path with the divergence description, e.g.
/// `/hello/hey: expected string, got int`, so a failed assertion is
/// diagnosable without extra logging. An override message supplied at
/// comparison-object construction replaces the description but keeps the
/// path.
#[derive(Debug, Clone, PartialEq)]
pub struct MismatchError {
    path: ValuePath,
    kind: MismatchKind,
    override_text: Option<String>,
}

impl MismatchError {
    /// Mismatch at the root of the candidate.
    pub fn new(kind: MismatchKind) -> Self {
        MismatchError {
            path: ValuePath::root(),
            kind,
            override_text: None,
        }
    }

    /// Mismatch at a specific path.
    pub fn at(path: ValuePath, kind: MismatchKind) -> Self {
        MismatchError {
            path,
            kind,
            override_text: None,
        }
    }

    /// Replaces the rendered description with caller-supplied text.
    /// The path is preserved.
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        self.override_text = Some(text.into());
        self
    }

    /// Path to the offending location.
    pub fn path(&self) -> &ValuePath {
        &self.path
    }

    /// The divergence description.
    pub fn kind(&self) -> &MismatchKind {
        &self.kind
    }
}

impl fmt::Display for MismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.override_text {
            Some(text) => write!(f, "{}: {}", self.path, text),
            None => write!(f, "{}: {}", self.path, self.kind),
        }
    }
}

impl std::error::Error for MismatchError {}

/// The schema definition itself is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A pattern node or pattern key failed to compile.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// Compiler error text.
        reason: String,
    },
}
