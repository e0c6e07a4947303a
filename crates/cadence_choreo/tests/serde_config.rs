//! Loading sort functions from configuration
//!
//! These tests verify that:
//! - Sort functions round-trip through JSON with a `kind` tag
//! - Negative weights are rejected while deserializing

#![cfg(feature = "serde")]

use cadence_choreo::{Corner, Direction, SortFunction};

/// A JSON document describes a sort function by kind and parameters
#[test]
fn test_sort_function_from_json() {
    let sort: SortFunction = serde_json::from_str(
        r#"{ "kind": "snake", "delay": 40, "reversed": true, "corner": "bottom_right" }"#,
    )
    .unwrap();
    assert_eq!(sort, SortFunction::snake(40, true, Corner::BottomRight));

    let linear = SortFunction::linear(-15, false, Direction::RightToLeft);
    let json = serde_json::to_string(&linear).unwrap();
    assert!(json.contains(r#""kind":"linear""#));
    assert_eq!(serde_json::from_str::<SortFunction>(&json).unwrap(), linear);
}

/// Weights are validated on the way in
#[test]
fn test_weighted_rejects_negative_weight() {
    let ok = r#"{ "kind": "continuous_weighted", "delay": 100, "reversed": false,
        "position": "middle", "weights": { "horizontal": 2.0, "vertical": 0.5 } }"#;
    let sort: SortFunction = serde_json::from_str(ok).unwrap();
    assert_eq!(sort.name(), "continuous_weighted");

    let bad = ok.replace("0.5", "-0.5");
    assert!(serde_json::from_str::<SortFunction>(&bad).is_err());
}
