//! # Schema Node Algebra
//!
//! A schema definition is a closed sum type with one case per node kind.
//! The recursive matcher dispatches on the tag; nothing here is open for
//! downstream extension beyond the `Predicate` and `Transform` escape
//! hatches, which carry arbitrary callables.
//!
//! Definitions are immutable after construction. Cloning a node is cheap
//! for the callable cases (shared via `Arc`) and structural for the rest.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// Runtime type membership tags for JSON values.
///
/// `Int` matches integer-valued JSON numbers only, `Float` matches
/// non-integer numbers, and `Number` matches both. Booleans are never
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    /// JSON `null`.
    Null,
    /// JSON booleans.
    Bool,
    /// Integer-valued JSON numbers.
    Int,
    /// Non-integer JSON numbers.
    Float,
    /// Any JSON number.
    Number,
    /// JSON strings.
    String,
    /// JSON arrays.
    Array,
    /// JSON objects.
    Object,
}

impl TypeTag {
    /// Returns the lowercase name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }

    /// Returns true if `value`'s runtime type belongs to this tag.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeTag::Null => value.is_null(),
            TypeTag::Bool => value.is_boolean(),
            TypeTag::Int => value.is_i64() || value.is_u64(),
            TypeTag::Float => value.is_f64(),
            TypeTag::Number => value.is_number(),
            TypeTag::String => value.is_string(),
            TypeTag::Array => value.is_array(),
            TypeTag::Object => value.is_object(),
        }
    }

    /// The most specific tag describing `value`, for diagnostics.
    pub fn of(value: &Value) -> TypeTag {
        match value {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => TypeTag::Int,
            Value::Number(_) => TypeTag::Float,
            Value::String(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Object(_) => TypeTag::Object,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User predicate: inspects a value, returns whether it conforms.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Coercing transform: maps a value to its normalized form, or a reason
/// string when the value cannot be coerced.
pub type TransformFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// A declarative schema definition.
#[derive(Clone)]
pub enum SchemaNode {
    /// Matches every value.
    Any,
    /// Runtime type membership.
    Type(TypeTag),
    /// Exact structural equality against a JSON value.
    Literal(Value),
    /// String candidate matching a compiled regex.
    Pattern(Regex),
    /// Arbitrary user predicate with a diagnostic name.
    Predicate {
        /// Name surfaced in mismatch diagnostics.
        name: String,
        /// The predicate itself.
        check: PredicateFn,
    },
    /// Coercing node: validates by transforming.
    Transform {
        /// Name surfaced in mismatch diagnostics.
        name: String,
        /// The coercion; its output becomes the normalized value.
        apply: TransformFn,
    },
    /// Logical AND: every branch must match. Each branch receives the
    /// previous branch's normalized output.
    AllOf(Vec<SchemaNode>),
    /// Logical OR: the first branch to match supplies the normalized value.
    AnyOf(Vec<SchemaNode>),
    /// Array candidate where every element must match at least one of the
    /// listed alternatives. An empty alternative list admits only `[]`.
    Sequence(Vec<SchemaNode>),
    /// Mapping schema over named or pattern keys.
    Object(Vec<Entry>),
}

impl SchemaNode {
    /// Literal equality node.
    pub fn literal(value: impl Into<Value>) -> Self {
        SchemaNode::Literal(value.into())
    }

    /// Regex pattern node over string candidates.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if the pattern does not
    /// compile.
    pub fn pattern(pattern: &str) -> Result<Self, SchemaError> {
        let re = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(SchemaNode::Pattern(re))
    }

    /// Predicate node with a diagnostic name.
    pub fn predicate(
        name: impl Into<String>,
        check: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        SchemaNode::Predicate {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Coercing transform node with a diagnostic name.
    pub fn transform(
        name: impl Into<String>,
        apply: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        SchemaNode::Transform {
            name: name.into(),
            apply: Arc::new(apply),
        }
    }

    /// Logical AND over sub-definitions.
    pub fn all_of(nodes: impl IntoIterator<Item = SchemaNode>) -> Self {
        SchemaNode::AllOf(nodes.into_iter().collect())
    }

    /// Logical OR over sub-definitions.
    pub fn any_of(nodes: impl IntoIterator<Item = SchemaNode>) -> Self {
        SchemaNode::AnyOf(nodes.into_iter().collect())
    }

    /// Membership over literal alternatives: the value must equal one of
    /// `values`.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        SchemaNode::AnyOf(
            values
                .into_iter()
                .map(|v| SchemaNode::Literal(v.into()))
                .collect(),
        )
    }

    /// Sequence node: array where every element matches one alternative.
    pub fn sequence(nodes: impl IntoIterator<Item = SchemaNode>) -> Self {
        SchemaNode::Sequence(nodes.into_iter().collect())
    }

    /// Mapping node over the given entries.
    pub fn object(entries: impl IntoIterator<Item = Entry>) -> Self {
        SchemaNode::Object(entries.into_iter().collect())
    }

    /// Short tag name used in trace events and debug output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::Any => "any",
            SchemaNode::Type(_) => "type",
            SchemaNode::Literal(_) => "literal",
            SchemaNode::Pattern(_) => "pattern",
            SchemaNode::Predicate { .. } => "predicate",
            SchemaNode::Transform { .. } => "transform",
            SchemaNode::AllOf(_) => "all_of",
            SchemaNode::AnyOf(_) => "any_of",
            SchemaNode::Sequence(_) => "sequence",
            SchemaNode::Object(_) => "object",
        }
    }
}

impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaNode::Any => f.write_str("Any"),
            SchemaNode::Type(tag) => f.debug_tuple("Type").field(tag).finish(),
            SchemaNode::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            SchemaNode::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            SchemaNode::Predicate { name, .. } => {
                f.debug_struct("Predicate").field("name", name).finish()
            }
            SchemaNode::Transform { name, .. } => {
                f.debug_struct("Transform").field("name", name).finish()
            }
            SchemaNode::AllOf(nodes) => f.debug_tuple("AllOf").field(nodes).finish(),
            SchemaNode::AnyOf(nodes) => f.debug_tuple("AnyOf").field(nodes).finish(),
            SchemaNode::Sequence(nodes) => f.debug_tuple("Sequence").field(nodes).finish(),
            SchemaNode::Object(entries) => f.debug_tuple("Object").field(entries).finish(),
        }
    }
}

impl From<TypeTag> for SchemaNode {
    fn from(tag: TypeTag) -> Self {
        SchemaNode::Type(tag)
    }
}

impl From<Value> for SchemaNode {
    fn from(value: Value) -> Self {
        SchemaNode::Literal(value)
    }
}

impl From<&str> for SchemaNode {
    fn from(value: &str) -> Self {
        SchemaNode::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for SchemaNode {
    fn from(value: String) -> Self {
        SchemaNode::Literal(Value::String(value))
    }
}

impl From<i64> for SchemaNode {
    fn from(value: i64) -> Self {
        SchemaNode::Literal(Value::from(value))
    }
}

impl From<f64> for SchemaNode {
    fn from(value: f64) -> Self {
        SchemaNode::Literal(Value::from(value))
    }
}

impl From<bool> for SchemaNode {
    fn from(value: bool) -> Self {
        SchemaNode::Literal(Value::Bool(value))
    }
}

/// How a mapping entry's key is identified.
#[derive(Clone)]
pub enum KeySchema {
    /// A single named key.
    Exact(String),
    /// Every key matching the regex.
    Pattern(Regex),
}

impl KeySchema {
    /// Returns true if `key` is identified by this key schema.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeySchema::Exact(k) => k == key,
            KeySchema::Pattern(re) => re.is_match(key),
        }
    }

    /// Human-readable form for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            KeySchema::Exact(k) => k.clone(),
            KeySchema::Pattern(re) => re.as_str().to_string(),
        }
    }
}

impl fmt::Debug for KeySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySchema::Exact(k) => f.debug_tuple("Exact").field(k).finish(),
            KeySchema::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
        }
    }
}

/// Presence requirement for a mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    /// The key must be present.
    Required,
    /// The key may be absent; if present, its value must conform.
    Optional,
    /// The key must not be present.
    Forbidden,
}

/// One entry of a mapping schema: a key schema, the sub-definition its
/// values must satisfy, and a presence requirement.
///
/// When a candidate key is identified by more than one entry, the first
/// entry in definition order wins.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Key identification.
    pub key: KeySchema,
    /// Sub-definition for the entry's values.
    pub value: SchemaNode,
    /// Presence requirement.
    pub modality: Modality,
}

impl Entry {
    /// Required named key.
    pub fn required(key: &str, value: impl Into<SchemaNode>) -> Self {
        Entry {
            key: KeySchema::Exact(key.to_string()),
            value: value.into(),
            modality: Modality::Required,
        }
    }

    /// Optional named key.
    pub fn optional(key: &str, value: impl Into<SchemaNode>) -> Self {
        Entry {
            key: KeySchema::Exact(key.to_string()),
            value: value.into(),
            modality: Modality::Optional,
        }
    }

    /// Forbidden named key. Presence alone is a mismatch.
    pub fn forbidden(key: &str) -> Self {
        Entry {
            key: KeySchema::Exact(key.to_string()),
            value: SchemaNode::Any,
            modality: Modality::Forbidden,
        }
    }

    /// Required pattern key: at least one candidate key must match the
    /// pattern, and every matching key's value must conform.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if the pattern does not
    /// compile.
    pub fn pattern(pattern: &str, value: impl Into<SchemaNode>) -> Result<Self, SchemaError> {
        let re = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Entry {
            key: KeySchema::Pattern(re),
            value: value.into(),
            modality: Modality::Required,
        })
    }

    /// Downgrades this entry to optional presence.
    pub fn into_optional(mut self) -> Self {
        self.modality = Modality::Optional;
        self
    }
}
