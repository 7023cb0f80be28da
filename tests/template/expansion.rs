//! Integration tests for expansion against a lexicon
//!
//! Tests expansion order, slot naming through transformed lists, and the
//! behavior of empty and missing lists.

use parlance_foundation::ErrorKind;
use parlance_lexicon::{
    Lexicon, LexiconResolver, List, NoValues, Registry, Rule, RuleSet, TransformedList,
};
use parlance_template::{compile, expand};

fn lexicon() -> Lexicon {
    Lexicon::builder()
        .list(List::literals("color", ["rosso", "verde"]))
        .list(List::dynamic("name"))
        .rule_set(RuleSet::new(
            "de",
            vec![
                Rule::new(Some("[aeiou]"), &["dell'{value}", "{value}"]).unwrap(),
                Rule::catch_all(&["del {value}", "{value}"]).unwrap(),
            ],
        ))
        .transformed_list(TransformedList::new("le_name", "name", ["de"]))
        .build()
        .unwrap()
}

#[test]
fn italian_phrases_in_order() {
    let lexicon = lexicon();
    let registry = Registry::new().with_entity("cover", ["armadio"]);
    let resolver = LexiconResolver::new(&lexicon, &registry);

    let template = compile("(apri|chiudi) {le_name}").unwrap();
    let expansion = expand(&template, &resolver).unwrap();
    let phrases: Vec<_> = expansion.iter().collect();
    let texts: Vec<_> = phrases.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "apri dell'armadio",
            "apri armadio",
            "chiudi dell'armadio",
            "chiudi armadio",
        ]
    );
    for phrase in &phrases {
        assert_eq!(phrase.slots[0].name, "name");
        assert_eq!(phrase.slots[0].value, "armadio");
    }
}

#[test]
fn optional_without_slots_doubles_count() {
    let lexicon = lexicon();
    let resolver = LexiconResolver::new(&lexicon, &NoValues);
    let base = compile("imposta {color}").unwrap();
    let extended = compile("imposta {color} [per favore]").unwrap();
    let base_count = expand(&base, &resolver).unwrap().count();
    let extended_count = expand(&extended, &resolver).unwrap().count();
    assert_eq!(base_count, 2);
    assert_eq!(extended_count, 2 * base_count);
}

#[test]
fn empty_dynamic_list_yields_no_phrases() {
    let lexicon = lexicon();
    let registry = Registry::new();
    let resolver = LexiconResolver::new(&lexicon, &registry);
    let template = compile("apri {le_name}").unwrap();
    assert_eq!(expand(&template, &resolver).unwrap().iter().count(), 0);
}

#[test]
fn missing_dynamic_list_fails_before_iteration() {
    let lexicon = lexicon();
    let resolver = LexiconResolver::new(&lexicon, &NoValues);
    let template = compile("[apri {le_name}] {color}").unwrap();
    let err = expand(&template, &resolver).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedList(_)));
}

#[test]
fn abandoning_iteration_is_harmless() {
    let lexicon = lexicon();
    let resolver = LexiconResolver::new(&lexicon, &NoValues);
    let template = compile("{color} {color} {color}").unwrap();
    let expansion = expand(&template, &resolver).unwrap();
    let first_two: Vec<_> = expansion.iter().take(2).map(|p| p.text).collect();
    assert_eq!(first_two, vec!["rosso rosso rosso", "rosso rosso verde"]);
    assert_eq!(expansion.iter().count(), 8);
}
