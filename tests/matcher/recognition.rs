//! Integration tests for recognition
//!
//! Tests end-to-end scenarios over the Italian grammar on both backends.

use parlance_foundation::{ErrorKind, ExpansionLimit, NormalizerConfig, SlotBinding};
use parlance_lexicon::{NoValues, Registry};
use parlance_matcher::{
    Backend, CapabilityValue, MatcherConfig, Outcome, TRIGGER_SENTENCES_INTENT,
};

use crate::{home, italian_matcher};

const BACKENDS: [Backend; 2] = [Backend::Expansion, Backend::Compiled];

fn config(backend: Backend) -> MatcherConfig {
    MatcherConfig::default().with_backend(backend)
}

// =============================================================================
// Intents and Slots
// =============================================================================

#[test]
fn elided_article_binds_source_value() {
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend));
        let registry = home();

        let plain = matcher.recognize("Apri armadio", &registry).unwrap();
        let plain = plain.into_match().unwrap();
        assert_eq!(plain.intent, "HassTurnOn");
        assert_eq!(plain.domains, vec!["cover"]);
        assert_eq!(plain.template, "(apri|alza) {le_name}");
        assert_eq!(plain.text, "apri armadio");
        assert_eq!(plain.slots, vec![SlotBinding::new("name", "armadio", "armadio")]);

        let elided = matcher.recognize("alza dell'armadio", &registry).unwrap();
        let elided = elided.into_match().unwrap();
        assert_eq!(elided.slot_value("name"), Some("armadio"));
        assert_eq!(elided.slot("name").unwrap().text, "dell'armadio");
    }
}

#[test]
fn optional_area_binds_when_spoken() {
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend));
        let registry = home();

        let without = matcher.recognize("accendi lampada", &registry).unwrap();
        let without = without.into_match().unwrap();
        assert_eq!(without.domains, vec!["light"]);
        assert!(without.slot("area").is_none());

        let with = matcher.recognize("accendi lampada in cucina", &registry).unwrap();
        let with = with.into_match().unwrap();
        assert_eq!(with.slot_value("name"), Some("lampada"));
        assert_eq!(with.slot_value("area"), Some("cucina"));

        let elided = matcher.recognize("spegni lampada nell'ufficio", &registry).unwrap();
        let elided = elided.into_match().unwrap();
        assert_eq!(elided.intent, "HassTurnOff");
        assert_eq!(elided.slot_value("area"), Some("ufficio"));
    }
}

#[test]
fn range_and_mapped_values() {
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend));
        let registry = home();

        let brightness = matcher
            .recognize("Imposta la luminosità dello zaino luminoso al 50 percento", &registry)
            .unwrap()
            .into_match()
            .unwrap();
        assert_eq!(brightness.intent, "HassLightSet");
        assert_eq!(brightness.slot_value("name"), Some("zaino luminoso"));
        assert_eq!(brightness.slot_value("brightness"), Some("50"));

        let color = matcher
            .recognize("colora tenda di blu", &registry)
            .unwrap()
            .into_match()
            .unwrap();
        assert_eq!(color.slot_value("color"), Some("blue"));
        assert_eq!(color.slot("color").unwrap().text, "blu");
    }
}

#[test]
fn capability_requirements_are_reported_only() {
    let matcher = italian_matcher(MatcherConfig::default());
    // Nothing in the registry says the lamp supports brightness.
    let registry = Registry::new().with_entity("switch", ["lampada"]);

    let result = matcher
        .recognize("imposta lampada al 20 percento", &registry)
        .unwrap()
        .into_match()
        .unwrap();
    assert_eq!(
        result.requires.get("light_supports_brightness"),
        Some(&CapabilityValue::Bool(true))
    );

    let color = matcher
        .recognize("imposta lampada rosso", &registry)
        .unwrap()
        .into_match()
        .unwrap();
    assert_eq!(
        color.metadata.get("source"),
        Some(&CapabilityValue::Text("builtin".to_string()))
    );
}

#[test]
fn value_keeps_registry_casing() {
    let matcher = italian_matcher(MatcherConfig::default());
    let registry = Registry::new().with_entity("cover", ["Armadio"]);
    let result = matcher
        .recognize("APRI ARMADIO", &registry)
        .unwrap()
        .into_match()
        .unwrap();
    assert_eq!(result.slot_value("name"), Some("Armadio"));
    assert_eq!(result.text, "apri armadio");
}

// =============================================================================
// Input Handling
// =============================================================================

#[test]
fn trigger_sentences() {
    let matcher = italian_matcher(MatcherConfig::default());
    let result = matcher
        .recognize("Salve Nabu.", &home())
        .unwrap()
        .into_match()
        .unwrap();
    assert_eq!(result.intent, TRIGGER_SENTENCES_INTENT);
    assert_eq!(result.template, "(ciao|salve) nabu");
    assert!(result.slots.is_empty());
}

#[test]
fn skip_words_are_dropped() {
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend));
        let result = matcher
            .recognize("Puoi apri armadio per favore?", &home())
            .unwrap()
            .into_match()
            .unwrap();
        assert_eq!(result.text, "apri armadio");
        assert_eq!(result.intent, "HassTurnOn");
    }
}

#[test]
fn inner_punctuation_is_significant() {
    let matcher = italian_matcher(MatcherConfig::default());
    assert_eq!(
        matcher.recognize("salve, nabu", &home()).unwrap(),
        Outcome::NoMatch
    );
}

#[test]
fn custom_terminal_punctuation() {
    let normalizer = NormalizerConfig::default().with_terminal_punctuation(['~']);
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend).with_normalizer(normalizer.clone()));
        assert!(matcher.recognize("apri armadio~~", &home()).unwrap().is_match());
        assert!(!matcher.recognize("apri armadio!", &home()).unwrap().is_match());
    }
}

// =============================================================================
// No Match and Errors
// =============================================================================

#[test]
fn unknown_sentence_is_no_match() {
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend));
        let outcome = matcher.recognize("apri la finestra", &home()).unwrap();
        assert_eq!(outcome, Outcome::NoMatch);
        assert!(matcher.recognize_all("apri la finestra", &home()).unwrap().is_empty());
    }
}

#[test]
fn empty_registry_is_no_match() {
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend));
        let outcome = matcher.recognize("apri armadio", &Registry::new()).unwrap();
        assert!(!outcome.is_match());
        // Sentences without dynamic lists still match.
        assert!(matcher.recognize("ciao nabu", &Registry::new()).unwrap().is_match());
    }
}

#[test]
fn unsupplied_dynamic_list_is_an_error() {
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend));
        let err = matcher.recognize("ciao nabu", &NoValues).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnresolvedList(_)));
    }
}

#[test]
fn expansion_limit_stops_search() {
    let matcher = italian_matcher(MatcherConfig::expansion(10));
    let err = matcher.recognize("spegni tenda", &home()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(ExpansionLimit::MaxPhrases { limit: 10 })
    ));

    // The compiled backend does not count phrases.
    let compiled = italian_matcher(MatcherConfig::default().with_max_phrases(Some(10)));
    assert!(compiled.recognize("spegni tenda", &home()).unwrap().is_match());
}

// =============================================================================
// Repeatability
// =============================================================================

#[test]
fn repeated_recognition_gives_identical_results() {
    let inputs = [
        "apri dell'armadio",
        "accendi lampada in cucina",
        "imposta la luminosità dello zaino luminoso al 50 percento",
        "ciao nabu",
        "apri la finestra",
    ];
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend));
        let registry = home();
        for input in inputs {
            let first = matcher.recognize(input, &registry).unwrap();
            let second = matcher.recognize(input, &registry).unwrap();
            assert_eq!(first, second, "{input}");

            let first_all = matcher.recognize_all(input, &registry).unwrap();
            let second_all = matcher.recognize_all(input, &registry).unwrap();
            assert_eq!(first_all, second_all, "{input}");
        }
    }
}

#[test]
fn each_call_sees_its_own_provider_snapshot() {
    for backend in BACKENDS {
        let matcher = italian_matcher(config(backend));
        let before = Registry::new().with_entity("cover", ["armadio"]);
        let after = Registry::new().with_entity("cover", ["tenda"]);

        assert!(matcher.recognize("apri armadio", &before).unwrap().is_match());
        assert!(!matcher.recognize("apri armadio", &after).unwrap().is_match());
        assert!(matcher.recognize("apri armadio", &before).unwrap().is_match());
    }
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn matcher_is_shared_across_threads() {
    let matcher = italian_matcher(MatcherConfig::default());
    let registry = home();
    let inputs = ["apri armadio", "spegni tenda", "ciao nabu", "apri la finestra"];

    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let matcher = &matcher;
                let registry = &registry;
                scope.spawn(move || matcher.recognize(input, registry).unwrap().is_match())
            })
            .collect();
        let matched: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(matched, vec![true, true, true, false]);
    });
}
