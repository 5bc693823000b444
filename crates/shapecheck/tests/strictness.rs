//! Strictness scoping invariants: every per-call override is fully reverted
//! on every exit path, and the raise/no-raise asymmetry between positive
//! entry points and negative probes holds across strictness modes.

use serde_json::json;
use shapecheck::{exact_schema, schema, Entry, Schema, SchemaNode, TypeTag};

use proptest::prelude::*;

fn id_schema() -> Schema {
    schema(SchemaNode::object([Entry::required("id", TypeTag::Int)]))
}

#[test]
fn test_flag_unchanged_around_every_override_entry_point() {
    let extra = json!({"id": 1, "extra": "x"});
    let wrong = json!({"id": "1"});

    for lenient_default in [true, false] {
        let s = id_schema().ignoring_extra_keys(lenient_default);

        let _ = s.exact(&extra);
        assert_eq!(s.ignores_extra_keys(), lenient_default);

        let _ = s.not_exact(&extra);
        assert_eq!(s.ignores_extra_keys(), lenient_default);

        let _ = s.like(&wrong);
        assert_eq!(s.ignores_extra_keys(), lenient_default);

        let _ = s.not_like(&wrong);
        assert_eq!(s.ignores_extra_keys(), lenient_default);
    }
}

#[test]
fn test_validate_and_differs_complement_each_other() {
    let s = id_schema();
    for value in [
        json!({"id": 1}),
        json!({"id": "1"}),
        json!({}),
        json!([1]),
        json!(null),
    ] {
        assert_eq!(s.validate(&value).is_err(), s.differs(&value));
    }
}

#[test]
fn test_negative_probes_never_propagate() {
    // A malformed candidate produces only booleans through the probes.
    let s = exact_schema(SchemaNode::object([Entry::required("id", TypeTag::Int)]));
    assert!(s.not_exact(&json!("not even an object")));
    assert!(s.not_like(&json!(42)));
}

#[test]
fn test_override_does_not_leak_into_following_assertions() {
    let s = id_schema();
    let extra = json!({"id": 1, "extra": "x"});

    // Exact rejects, and the very next plain validation is lenient again.
    assert!(s.exact(&extra).is_err());
    assert!(s.validate(&extra).is_ok());
}

proptest! {
    /// The persistent flag survives any interleaving of entry points.
    #[test]
    fn flag_restored_under_arbitrary_call_sequences(
        calls in prop::collection::vec(0u8..6, 1..20),
        lenient_default in any::<bool>(),
    ) {
        let s = id_schema().ignoring_extra_keys(lenient_default);
        let extra = json!({"id": 1, "extra": "x"});

        for call in calls {
            match call {
                0 => { let _ = s.exact(&extra); }
                1 => { let _ = s.not_exact(&extra); }
                2 => { let _ = s.like(&extra); }
                3 => { let _ = s.not_like(&extra); }
                4 => { let _ = s.validate(&extra); }
                _ => { let _ = s.differs(&extra); }
            }
            prop_assert_eq!(s.ignores_extra_keys(), lenient_default);
        }
    }
}
