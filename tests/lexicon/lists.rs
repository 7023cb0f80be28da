//! Integration tests for base lists

use parlance_lexicon::{List, ListValue, RangeList};

#[test]
fn values_keep_declaration_order() {
    let list = List::values(
        "color",
        [ListValue::literal("rosso"), ListValue::new("blu", "blue")],
    );
    let values = list.static_values().unwrap();
    assert_eq!(values[0].value, "rosso");
    assert_eq!(values[1].text, "blu");
    assert_eq!(values[1].value, "blue");
}

#[test]
fn range_steps_inclusively() {
    let range = RangeList::new(0, 100, 25).unwrap();
    let values: Vec<_> = range.values().into_iter().map(|v| v.value).collect();
    assert_eq!(values, vec!["0", "25", "50", "75", "100"]);
}

#[test]
fn range_rejects_bad_bounds() {
    assert!(RangeList::new(10, 0, 1).unwrap_err().is_configuration());
    assert!(RangeList::new(0, 10, 0).unwrap_err().is_configuration());
}

#[test]
fn dynamic_lists_have_no_static_values() {
    let list = List::dynamic("name");
    assert!(list.is_dynamic());
    assert!(list.static_values().is_none());
}
