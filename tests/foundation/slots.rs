//! Integration tests for slot bindings

use parlance_foundation::{SlotBinding, find_slot};

#[test]
fn binding_keeps_source_value_and_surface() {
    let binding = SlotBinding::new("name", "armadio", "dell'armadio");
    assert_eq!(binding.value, "armadio");
    assert_eq!(binding.text, "dell'armadio");
    assert_eq!(binding.to_string(), "name=armadio");
}

#[test]
fn find_slot_by_name() {
    let slots = vec![
        SlotBinding::new("name", "armadio", "armadio"),
        SlotBinding::new("brightness", "50", "50"),
    ];
    assert_eq!(find_slot(&slots, "brightness").unwrap().value, "50");
    assert!(find_slot(&slots, "area").is_none());
}
