//! # Recursive Structural Matcher
//!
//! Walks a candidate value against a [`SchemaNode`] definition and reports
//! the first point of divergence. The walk is finite, synchronous, and
//! bounded by the depth of the input; there is no I/O and no shared state.
//!
//! Successful matches return a *normalized* value: transform nodes coerce,
//! every other node passes its input through. In lenient mode, mapping keys
//! the schema does not name are carried into the normalized output
//! untouched.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{MismatchError, MismatchKind, ValuePath};
use crate::node::{Entry, KeySchema, Modality, SchemaNode, TypeTag};

/// Behavioral options for one matching walk.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Whether mapping keys the schema does not name are tolerated
    /// (lenient) or rejected (exact).
    pub ignore_extra_keys: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            ignore_extra_keys: true,
        }
    }
}

/// Match `value` against `node`, returning the normalized value.
///
/// # Errors
///
/// Returns [`MismatchError`] describing the first divergence: its path into
/// `value` and an expected-vs-actual description.
pub fn match_value(
    node: &SchemaNode,
    value: &Value,
    opts: MatchOptions,
) -> Result<Value, MismatchError> {
    let result = match_at(node, value, opts, &ValuePath::root());
    if let Err(ref err) = result {
        debug!(error = %err, "structural mismatch");
    }
    result
}

fn match_at(
    node: &SchemaNode,
    value: &Value,
    opts: MatchOptions,
    path: &ValuePath,
) -> Result<Value, MismatchError> {
    trace!(node = node.kind_name(), path = %path, "matching");
    match node {
        SchemaNode::Any => Ok(value.clone()),

        SchemaNode::Type(tag) => {
            if tag.matches(value) {
                Ok(value.clone())
            } else {
                Err(MismatchError::at(
                    path.clone(),
                    MismatchKind::TypeMismatch {
                        expected: *tag,
                        actual: TypeTag::of(value),
                    },
                ))
            }
        }

        SchemaNode::Literal(expected) => {
            if expected == value {
                Ok(value.clone())
            } else {
                Err(MismatchError::at(
                    path.clone(),
                    MismatchKind::LiteralMismatch {
                        expected: expected.clone(),
                        actual: value.clone(),
                    },
                ))
            }
        }

        SchemaNode::Pattern(re) => match value.as_str() {
            Some(s) if re.is_match(s) => Ok(value.clone()),
            Some(s) => Err(MismatchError::at(
                path.clone(),
                MismatchKind::PatternMismatch {
                    pattern: re.as_str().to_string(),
                    actual: s.to_string(),
                },
            )),
            None => Err(MismatchError::at(
                path.clone(),
                MismatchKind::TypeMismatch {
                    expected: TypeTag::String,
                    actual: TypeTag::of(value),
                },
            )),
        },

        SchemaNode::Predicate { name, check } => {
            if check(value) {
                Ok(value.clone())
            } else {
                Err(MismatchError::at(
                    path.clone(),
                    MismatchKind::PredicateFailed { name: name.clone() },
                ))
            }
        }

        SchemaNode::Transform { name, apply } => apply(value).map_err(|reason| {
            MismatchError::at(
                path.clone(),
                MismatchKind::TransformFailed {
                    name: name.clone(),
                    reason,
                },
            )
        }),

        SchemaNode::AllOf(nodes) => {
            // Each branch sees the previous branch's normalized output, so
            // a transform followed by a check validates the coerced value.
            let mut current = value.clone();
            for sub in nodes {
                current = match_at(sub, &current, opts, path)?;
            }
            Ok(current)
        }

        SchemaNode::AnyOf(nodes) => {
            for sub in nodes {
                if let Ok(normalized) = match_at(sub, value, opts, path) {
                    return Ok(normalized);
                }
            }
            Err(MismatchError::at(
                path.clone(),
                MismatchKind::NoAlternativeMatched { tried: nodes.len() },
            ))
        }

        SchemaNode::Sequence(alternatives) => {
            let Some(items) = value.as_array() else {
                return Err(MismatchError::at(
                    path.clone(),
                    MismatchKind::TypeMismatch {
                        expected: TypeTag::Array,
                        actual: TypeTag::of(value),
                    },
                ));
            };
            let mut normalized = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let item_path = path.index(index);
                let matched = alternatives
                    .iter()
                    .find_map(|alt| match_at(alt, item, opts, &item_path).ok());
                match matched {
                    Some(v) => normalized.push(v),
                    None => {
                        return Err(MismatchError::at(
                            item_path,
                            MismatchKind::NoAlternativeMatched {
                                tried: alternatives.len(),
                            },
                        ))
                    }
                }
            }
            Ok(Value::Array(normalized))
        }

        SchemaNode::Object(entries) => match_object(entries, value, opts, path),
    }
}

fn match_object(
    entries: &[Entry],
    value: &Value,
    opts: MatchOptions,
    path: &ValuePath,
) -> Result<Value, MismatchError> {
    let Some(map) = value.as_object() else {
        return Err(MismatchError::at(
            path.clone(),
            MismatchKind::TypeMismatch {
                expected: TypeTag::Object,
                actual: TypeTag::of(value),
            },
        ));
    };

    // Presence checks first, so a missing required key is reported even
    // when some other key fails deeper in the walk.
    for entry in entries.iter().filter(|e| e.modality == Modality::Required) {
        let present = match &entry.key {
            KeySchema::Exact(k) => map.contains_key(k),
            KeySchema::Pattern(re) => map.keys().any(|k| re.is_match(k)),
        };
        if !present {
            return Err(MismatchError::at(
                path.clone(),
                MismatchKind::MissingKey {
                    key: entry.key.describe(),
                },
            ));
        }
    }

    let mut normalized = Map::new();
    for (key, item) in map {
        match entries.iter().find(|e| e.key.matches(key)) {
            Some(entry) if entry.modality == Modality::Forbidden => {
                return Err(MismatchError::at(
                    path.clone(),
                    MismatchKind::ForbiddenKey { key: key.clone() },
                ));
            }
            Some(entry) => {
                let v = match_at(&entry.value, item, opts, &path.key(key))?;
                normalized.insert(key.clone(), v);
            }
            None if opts.ignore_extra_keys => {
                normalized.insert(key.clone(), item.clone());
            }
            None => {
                return Err(MismatchError::at(
                    path.clone(),
                    MismatchKind::ExtraKey { key: key.clone() },
                ));
            }
        }
    }
    Ok(Value::Object(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn lenient() -> MatchOptions {
        MatchOptions {
            ignore_extra_keys: true,
        }
    }

    fn exact() -> MatchOptions {
        MatchOptions {
            ignore_extra_keys: false,
        }
    }

    fn id_schema() -> SchemaNode {
        SchemaNode::object([Entry::required("id", TypeTag::Int)])
    }

    #[test]
    fn test_type_node_matches_by_runtime_type() {
        assert!(match_value(&TypeTag::Int.into(), &json!(1), lenient()).is_ok());
        let err = match_value(&TypeTag::Int.into(), &json!("1"), lenient()).unwrap_err();
        assert_eq!(
            err.kind(),
            &MismatchKind::TypeMismatch {
                expected: TypeTag::Int,
                actual: TypeTag::String,
            }
        );
    }

    #[test]
    fn test_literal_node() {
        let node = SchemaNode::literal("red");
        assert!(match_value(&node, &json!("red"), lenient()).is_ok());
        assert!(match_value(&node, &json!("blue"), lenient()).is_err());
    }

    #[test]
    fn test_pattern_node_requires_string() {
        let node = SchemaNode::pattern("^[a-f0-9]{4}$").unwrap();
        assert!(match_value(&node, &json!("beef"), lenient()).is_ok());
        assert!(match_value(&node, &json!("nope"), lenient()).is_err());

        let err = match_value(&node, &json!(42), lenient()).unwrap_err();
        assert!(matches!(
            err.kind(),
            MismatchKind::TypeMismatch {
                expected: TypeTag::String,
                ..
            }
        ));
    }

    #[test]
    fn test_predicate_node() {
        let node = SchemaNode::predicate("positive", |v| v.as_i64().is_some_and(|n| n > 0));
        assert!(match_value(&node, &json!(3), lenient()).is_ok());
        let err = match_value(&node, &json!(-3), lenient()).unwrap_err();
        assert_eq!(err.to_string(), "(root): predicate 'positive' rejected value");
    }

    #[test]
    fn test_transform_node_normalizes() {
        let node = SchemaNode::transform("parse_int", |v| {
            v.as_str()
                .ok_or_else(|| "not a string".to_string())?
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| e.to_string())
        });
        let normalized = match_value(&node, &json!("17"), lenient()).unwrap();
        assert_eq!(normalized, json!(17));

        let err = match_value(&node, &json!("seventeen"), lenient()).unwrap_err();
        assert!(matches!(err.kind(), MismatchKind::TransformFailed { .. }));
    }

    #[test]
    fn test_all_of_feeds_normalized_value_forward() {
        let node = SchemaNode::all_of([
            SchemaNode::transform("parse_int", |v| {
                v.as_str()
                    .ok_or_else(|| "not a string".to_string())?
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|e| e.to_string())
            }),
            SchemaNode::predicate("positive", |v| v.as_i64().is_some_and(|n| n > 0)),
        ]);
        assert_eq!(match_value(&node, &json!("17"), lenient()).unwrap(), json!(17));
        assert!(match_value(&node, &json!("-17"), lenient()).is_err());
    }

    #[test]
    fn test_any_of_first_match_wins() {
        let node = SchemaNode::any_of([TypeTag::Int.into(), TypeTag::String.into()]);
        assert!(match_value(&node, &json!(1), lenient()).is_ok());
        assert!(match_value(&node, &json!("one"), lenient()).is_ok());

        let err = match_value(&node, &json!(true), lenient()).unwrap_err();
        assert_eq!(err.kind(), &MismatchKind::NoAlternativeMatched { tried: 2 });
    }

    #[test]
    fn test_one_of_membership() {
        let node = SchemaNode::one_of(["red", "blue", "green"]);
        assert!(match_value(&node, &json!("red"), lenient()).is_ok());
        assert!(match_value(&node, &json!("yellow"), lenient()).is_err());
    }

    #[test]
    fn test_sequence_each_element_matches_some_alternative() {
        let node = SchemaNode::sequence([TypeTag::Int.into(), TypeTag::String.into()]);
        assert!(match_value(&node, &json!([1, "two", 3]), lenient()).is_ok());

        let err = match_value(&node, &json!([1, true]), lenient()).unwrap_err();
        assert_eq!(err.path().to_string(), "/1");
    }

    #[test]
    fn test_empty_sequence_admits_only_empty_array() {
        let node = SchemaNode::sequence([]);
        assert!(match_value(&node, &json!([]), lenient()).is_ok());
        assert!(match_value(&node, &json!([1]), lenient()).is_err());
    }

    #[test]
    fn test_object_missing_required_key() {
        let err = match_value(&id_schema(), &json!({"name": "x"}), lenient()).unwrap_err();
        assert_eq!(
            err.kind(),
            &MismatchKind::MissingKey {
                key: "id".to_string()
            }
        );
    }

    #[test]
    fn test_object_extra_key_lenient_vs_exact() {
        let value = json!({"id": 1, "extra": "x"});
        assert!(match_value(&id_schema(), &value, lenient()).is_ok());

        let err = match_value(&id_schema(), &value, exact()).unwrap_err();
        assert_eq!(
            err.kind(),
            &MismatchKind::ExtraKey {
                key: "extra".to_string()
            }
        );
    }

    #[test]
    fn test_object_lenient_keeps_extra_keys_in_normalized_output() {
        let value = json!({"id": 1, "extra": "x"});
        let normalized = match_value(&id_schema(), &value, lenient()).unwrap();
        assert_eq!(normalized, value);
    }

    #[test]
    fn test_object_optional_key() {
        let node = SchemaNode::object([
            Entry::required("id", TypeTag::Int),
            Entry::optional("note", TypeTag::String),
        ]);
        assert!(match_value(&node, &json!({"id": 1}), exact()).is_ok());
        assert!(match_value(&node, &json!({"id": 1, "note": "hi"}), exact()).is_ok());
        assert!(match_value(&node, &json!({"id": 1, "note": 2}), exact()).is_err());
    }

    #[test]
    fn test_object_forbidden_key() {
        let node = SchemaNode::object([
            Entry::required("id", TypeTag::Int),
            Entry::forbidden("password"),
        ]);
        let err =
            match_value(&node, &json!({"id": 1, "password": "hunter2"}), lenient()).unwrap_err();
        assert_eq!(
            err.kind(),
            &MismatchKind::ForbiddenKey {
                key: "password".to_string()
            }
        );
    }

    #[test]
    fn test_object_pattern_keys() {
        let node = SchemaNode::object([Entry::pattern("^x_", TypeTag::String).unwrap()]);
        assert!(match_value(&node, &json!({"x_factor": "yes"}), exact()).is_ok());

        // No key matching the pattern: required presence fails.
        let err = match_value(&node, &json!({}), lenient()).unwrap_err();
        assert!(matches!(err.kind(), MismatchKind::MissingKey { .. }));

        // Non-matching key rejected only in exact mode.
        assert!(match_value(&node, &json!({"x_a": "v", "y": 1}), lenient()).is_ok());
        assert!(match_value(&node, &json!({"x_a": "v", "y": 1}), exact()).is_err());
    }

    #[test]
    fn test_nested_object_error_path() {
        let node = SchemaNode::object([Entry::required(
            "hello",
            SchemaNode::object([Entry::required("hey", TypeTag::String)]),
        )]);
        assert!(match_value(&node, &json!({"hello": {"hey": "world"}}), lenient()).is_ok());

        let err = match_value(&node, &json!({"hello": {"hey": 1}}), lenient()).unwrap_err();
        assert_eq!(err.path().to_string(), "/hello/hey");

        // Sibling keys being correct does not mask the inner failure.
        let err = match_value(
            &node,
            &json!({"hello": {"hey": 1}, "other": "fine"}),
            lenient(),
        )
        .unwrap_err();
        assert_eq!(err.path().to_string(), "/hello/hey");
    }

    #[test]
    fn test_object_type_mismatch_on_non_object() {
        let err = match_value(&id_schema(), &json!([1, 2]), lenient()).unwrap_err();
        assert_eq!(
            err.kind(),
            &MismatchKind::TypeMismatch {
                expected: TypeTag::Object,
                actual: TypeTag::Array,
            }
        );
    }
}
