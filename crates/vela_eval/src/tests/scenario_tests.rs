//! spec.md §8 scenarios 3 and 5: object-literal fields are mutually
//! recursive, and a field that cycles back to itself is a `cyclic_reference`
//! rather than an unbound identifier.

use pretty_assertions::{assert_eq, assert_ne};
use vela_values::{ErrorKind, Value};

use super::eval_source;

#[test]
fn sibling_field_resolves_through_a_lazy_thunk() {
    // scenario 3: `{ a: 1, b: a + 1 }` then `.b` -> `2`.
    let result = eval_source("{ a: 1, b: a + 1 }.b").unwrap();
    assert_eq!(result, Value::int(2));
}

#[test]
fn field_can_reference_a_later_sibling_too() {
    // the knot is built before any field is forced, so forward references
    // work the same as backward ones.
    let result = eval_source("{ a: b, b: 5 }.a").unwrap();
    assert_eq!(result, Value::int(5));
}

#[test]
fn object_extend_argument_fields_are_mutually_recursive() {
    // `eval_object_literal` is reused for the record-argument in a
    // function-call-shaped object-extend; it must see the same knot.
    let result = eval_source("(x -> x.b) { a: 1, b: a + 1 }").unwrap();
    assert_eq!(result, Value::int(2));
}

#[test]
fn self_referencing_field_is_a_cyclic_reference_not_an_unknown_identifier() {
    // scenario 5: `{ a: b, b: a }` accessing `.a` -> `cyclic_reference`,
    // not `unknown_identifier` (the pre-fix behavior, since a bare sibling
    // name didn't resolve at all).
    let err = eval_source("{ a: b, b: a }.a").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CyclicReference), "got {:?}", err.kind);
}

#[test]
fn cyclic_reference_carries_two_distinct_spans() {
    // scenario 5's diagnostic: the field's defining key site plus a
    // reference site found inside the thunk's own expression, not the
    // same span reported twice.
    let err = eval_source("{ a: b, b: a }.a").unwrap_err();
    let primary = err.span.expect("cyclic_reference should carry a primary span");
    let secondary = err.secondary.expect("cyclic_reference should carry a secondary span");
    assert_ne!(primary, secondary.span, "primary and secondary spans must not collapse to the same site");
    assert_eq!(secondary.label, "defined here");
}

#[test]
fn direct_self_cycle_is_also_detected() {
    let err = eval_source("{ a: a }.a").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CyclicReference), "got {:?}", err.kind);
}
