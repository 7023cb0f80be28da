//! Integration tests for grammar documents
//!
//! Tests YAML decoding, load-time validation, and layering custom sentences
//! over the built-in grammar.

use parlance_foundation::ErrorKind;
use parlance_matcher::{
    Backend, CapabilityValue, Grammar, GrammarDocument, ListValueDef, Matcher, MatcherConfig,
    TRIGGER_SENTENCES_INTENT,
};

use crate::{home, italian_document, italian_grammar};

#[test]
fn decodes_fixture() {
    let document = italian_document();
    assert_eq!(document.language, "it");
    assert_eq!(document.lists.len(), 4);
    assert_eq!(
        document.lists["color"].values.as_ref().unwrap()[2],
        ListValueDef::Mapped {
            input: "blu".to_string(),
            output: "blue".to_string(),
        }
    );
    assert_eq!(document.lists["brightness"].range.unwrap().step, 1);
    assert_eq!(document.transformations["de"].len(), 3);
    assert!(document.transformations["de"][2].pattern.is_none());
    assert_eq!(document.skip_words, vec!["per favore", "puoi"]);
}

#[test]
fn loads_intents_in_order() {
    let grammar = italian_grammar();
    let names: Vec<_> = grammar.intents().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "HassTurnOn",
            "HassTurnOff",
            "HassLightSet",
            TRIGGER_SENTENCES_INTENT
        ]
    );
    assert_eq!(grammar.language(), "it");
    assert_eq!(grammar.entries().len(), 8);
}

#[test]
fn decodes_capabilities() {
    let document = italian_document();
    let light_set = &document.intents[2];
    assert_eq!(
        light_set.data[0].requires["light_supports_brightness"],
        CapabilityValue::Bool(true)
    );
    assert_eq!(
        light_set.data[1].metadata["source"],
        CapabilityValue::Text("builtin".to_string())
    );
}

#[test]
fn malformed_template_aborts_load() {
    let yaml = r#"
language: it
lists:
  name: { dynamic: true }
intents:
  - name: HassTurnOn
    data:
      - sentences: ["accendi {name}", "(apri|chiudi {name}"]
"#;
    let document: GrammarDocument = serde_yaml::from_str(yaml).unwrap();
    let err = Grammar::from_document(&document).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.is_malformed_template());
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.intent.as_deref(), Some("HassTurnOn"));
    assert_eq!(context.template.as_deref(), Some("(apri|chiudi {name}"));
}

#[test]
fn undefined_list_aborts_load() {
    let yaml = r#"
language: it
intents:
  - name: HassTurnOn
    data:
      - sentences: ["accendi {le_name}"]
"#;
    let document: GrammarDocument = serde_yaml::from_str(yaml).unwrap();
    let err = Grammar::from_document(&document).unwrap_err();
    assert!(err.is_configuration());
    assert!(!err.is_malformed_template());
}

#[test]
fn transformation_cycle_aborts_load() {
    let yaml = r#"
language: it
lists:
  name: { dynamic: true }
transformations:
  de:
    - { outputs: ["del {value}"] }
transformed_lists:
  a: { source: b, transformations: [de] }
  b: { source: a, transformations: [de] }
"#;
    let document: GrammarDocument = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(
        Grammar::from_document(&document).unwrap_err().kind,
        ErrorKind::Configuration { .. }
    ));
}

#[test]
fn custom_sentences_layer_over_builtin() {
    let custom = r#"
language: it
lists:
  color:
    values: [giallo]
intents:
  - name: HassTurnOn
    data:
      - sentences: ["apri {le_name}"]
        domains: [custom]
  - name: CustomGoodMorning
    data:
      - sentences: ["buongiorno casa"]
"#;
    let mut document = italian_document();
    document.merge(serde_yaml::from_str(custom).unwrap());
    let grammar = Grammar::from_document(&document).unwrap();

    let on = grammar.intents().iter().find(|i| i.name == "HassTurnOn").unwrap();
    assert_eq!(on.data.len(), 3);
    assert_eq!(on.data[2].domains, vec!["custom"]);

    let matcher = Matcher::new(grammar, MatcherConfig::default());
    let registry = home();

    let builtin = matcher.recognize("apri armadio", &registry).unwrap();
    assert_eq!(builtin.as_match().unwrap().domains, vec!["cover"]);

    let all = matcher.recognize_all("apri armadio", &registry).unwrap();
    let domains: Vec<_> = all.iter().map(|r| r.domains.clone()).collect();
    assert_eq!(domains, vec![vec!["cover"], vec!["custom"]]);

    let color = matcher.recognize("colora lampada giallo", &registry).unwrap();
    assert_eq!(color.as_match().unwrap().slot_value("color"), Some("giallo"));
    assert!(!matcher.recognize("colora lampada rosso", &registry).unwrap().is_match());

    let custom = matcher.recognize("Buongiorno casa!", &registry).unwrap();
    assert_eq!(custom.as_match().unwrap().intent, "CustomGoodMorning");
}

#[test]
fn identical_custom_sentence_is_reported_separately() {
    let custom = r#"
language: it
intents:
  - name: HassTurnOn
    data:
      - sentences: ["(apri|alza) {le_name}"]
        domains: [custom]
        requires:
          custom_flag: 1
"#;
    let mut document = italian_document();
    document.merge(serde_yaml::from_str(custom).unwrap());
    let grammar = Grammar::from_document(&document).unwrap();

    for backend in [Backend::Expansion, Backend::Compiled] {
        let matcher = Matcher::new(grammar.clone(), MatcherConfig::default().with_backend(backend));
        let all = matcher.recognize_all("apri armadio", &home()).unwrap();
        let domains: Vec<_> = all.iter().map(|r| r.domains.clone()).collect();
        assert_eq!(domains, vec![vec!["cover"], vec!["custom"]]);
        assert_eq!(all[1].requires["custom_flag"], CapabilityValue::Int(1));
        assert_eq!(all[0].template, all[1].template);
    }
}
