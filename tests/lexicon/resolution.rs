//! Integration tests for lexicon building and list resolution
//!
//! Tests transformed list chains, cycle detection, static caching, and
//! per-call dynamic resolution through value providers.

use parlance_foundation::ErrorKind;
use parlance_lexicon::{
    Lexicon, LexiconResolver, List, ListResolver, NoValues, Registry, Rule, RuleSet,
    TransformedList,
};

fn rule_sets() -> [RuleSet; 2] {
    [
        RuleSet::new(
            "de",
            vec![
                Rule::new(Some("[aeiou]"), &["dell'{value}"]).unwrap(),
                Rule::catch_all(&["del {value}"]).unwrap(),
            ],
        ),
        RuleSet::new("su", vec![Rule::catch_all(&["su {value}"]).unwrap()]),
    ]
}

fn lexicon() -> Lexicon {
    let [de, su] = rule_sets();
    Lexicon::builder()
        .list(List::literals("color", ["arancione", "blu"]))
        .list(List::dynamic("name"))
        .rule_set(de)
        .rule_set(su)
        .transformed_list(TransformedList::new("del_color", "color", ["de"]))
        .transformed_list(TransformedList::new("le_name", "name", ["de"]))
        .transformed_list(TransformedList::new("su_le_name", "le_name", ["su"]))
        .build()
        .unwrap()
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn chains_flatten_to_root() {
    let lexicon = lexicon();
    let derivation = lexicon.derivation("su_le_name").unwrap();
    assert_eq!(derivation.root, "name");
    assert_eq!(derivation.stages, vec!["de", "su"]);
    assert_eq!(lexicon.default_slot("su_le_name"), Some("name"));
    assert!(lexicon.is_dynamic("su_le_name"));
    assert!(!lexicon.is_dynamic("del_color"));
}

#[test]
fn static_lists_are_cached() {
    let lexicon = lexicon();
    let cached = lexicon.cached("del_color").unwrap();
    assert_eq!(cached[0].surfaces, vec!["dell'arancione"]);
    assert!(lexicon.cached("le_name").is_none());
}

#[test]
fn cycles_are_rejected() {
    let [de, _] = rule_sets();
    let err = Lexicon::builder()
        .rule_set(de)
        .transformed_list(TransformedList::new("a", "b", ["de"]))
        .transformed_list(TransformedList::new("b", "a", ["de"]))
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn unknown_source_and_transformation_are_rejected() {
    let [de, _] = rule_sets();
    assert!(
        Lexicon::builder()
            .rule_set(de)
            .transformed_list(TransformedList::new("le_area", "area", ["de"]))
            .build()
            .is_err()
    );
    assert!(
        Lexicon::builder()
            .list(List::dynamic("name"))
            .transformed_list(TransformedList::new("le_name", "name", ["de"]))
            .build()
            .is_err()
    );
}

#[test]
fn duplicate_names_are_rejected() {
    let [de, _] = rule_sets();
    let err = Lexicon::builder()
        .list(List::dynamic("name"))
        .rule_set(de)
        .transformed_list(TransformedList::new("name", "name", ["de"]))
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn resolves_chained_dynamic_list_from_registry() {
    let lexicon = lexicon();
    let registry = Registry::new()
        .with_entity("cover", ["armadio"])
        .with_entity("light", ["lampada"]);
    let resolver = LexiconResolver::new(&lexicon, &registry);

    let resolved = resolver.resolve("su_le_name").unwrap();
    assert_eq!(&*resolved.slot, "name");
    let surfaces: Vec<_> = resolved
        .values
        .iter()
        .map(|v| (v.value.as_str(), v.surfaces[0].as_str()))
        .collect();
    assert_eq!(
        surfaces,
        vec![("armadio", "su dell'armadio"), ("lampada", "su del lampada")]
    );
}

#[test]
fn snapshots_do_not_outlive_the_resolver() {
    let lexicon = lexicon();

    let before = Registry::new().with_entity("cover", ["armadio"]);
    let first = LexiconResolver::new(&lexicon, &before)
        .resolve("le_name")
        .unwrap();
    assert_eq!(first.values.len(), 1);

    let after = Registry::new();
    let second = LexiconResolver::new(&lexicon, &after)
        .resolve("le_name")
        .unwrap();
    assert!(second.values.is_empty());
}

#[test]
fn unsupplied_dynamic_list_is_unresolved() {
    let lexicon = lexicon();
    let resolver = LexiconResolver::new(&lexicon, &NoValues);
    let err = resolver.resolve("su_le_name").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedList(ref list) if list == "name"));
    assert!(resolver.resolve("color").is_ok());
}

#[test]
fn registry_supplies_floors_and_areas() {
    let [de, _] = rule_sets();
    let lexicon = Lexicon::builder()
        .list(List::dynamic("floor"))
        .list(List::dynamic("area"))
        .rule_set(de)
        .transformed_list(TransformedList::new("del_floor", "floor", ["de"]))
        .build()
        .unwrap();
    let registry = Registry::new()
        .with_area(["cucina"])
        .with_floor(["primo piano", " "])
        .with_floor(["attico"]);
    let resolver = LexiconResolver::new(&lexicon, &registry);

    let floors = resolver.resolve("del_floor").unwrap();
    assert_eq!(&*floors.slot, "floor");
    let surfaces: Vec<_> = floors.values.iter().map(|v| v.surfaces[0].as_str()).collect();
    assert_eq!(surfaces, vec!["del primo piano", "dell'attico"]);
    assert_eq!(resolver.resolve("area").unwrap().values.len(), 1);
}
