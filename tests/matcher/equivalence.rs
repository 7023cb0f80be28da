//! Property tests for backend agreement
//!
//! The compiled backend must make the same decisions, with the same
//! bindings, as naive expansion on every input.

use std::sync::LazyLock;

use parlance_lexicon::{LexiconResolver, Registry};
use parlance_matcher::{Backend, Matcher, MatcherConfig};
use parlance_template::Expansion;
use proptest::prelude::*;

use crate::{home, italian_matcher};

struct Backends {
    expansion: Matcher,
    compiled: Matcher,
    registry: Registry,
    phrases: Vec<String>,
    words: Vec<String>,
}

static BACKENDS: LazyLock<Backends> = LazyLock::new(|| {
    let expansion = italian_matcher(MatcherConfig::default().with_backend(Backend::Expansion));
    let compiled = italian_matcher(MatcherConfig::default());
    let registry = home();

    let phrases = {
        let grammar = compiled.grammar();
        let resolver = LexiconResolver::new(grammar.lexicon(), &registry);
        let phrases: Vec<String> = grammar
            .entries()
            .iter()
            .flat_map(|id| {
                Expansion::new(grammar.template(*id), &resolver)
                    .unwrap()
                    .iter()
                    .map(|phrase| phrase.text)
                    .collect::<Vec<_>>()
            })
            .collect();
        phrases
    };
    let words = compiled.vocabulary(&registry).unwrap().into_iter().collect();

    Backends {
        expansion,
        compiled,
        registry,
        phrases,
        words,
    }
});

/// Inputs near the grammar: exact phrases, phrases with a character
/// changed or cut, and word salad over the vocabulary.
fn input() -> impl Strategy<Value = String> {
    let phrases = BACKENDS.phrases.clone();
    let words = BACKENDS.words.clone();
    prop_oneof![
        prop::sample::select(phrases.clone()),
        (prop::sample::select(phrases.clone()), any::<prop::sample::Index>())
            .prop_map(|(phrase, at)| {
                let chars: Vec<char> = phrase.chars().collect();
                chars[..at.index(chars.len() + 1)].iter().collect()
            }),
        (prop::sample::select(phrases), "[ a-z'!.]{0,2}")
            .prop_map(|(phrase, suffix)| format!("{}{suffix}", phrase.to_uppercase())),
        prop::collection::vec(prop::sample::select(words), 1..6).prop_map(|w| w.join(" ")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn backends_agree_on_first_match(text in input()) {
        let backends = &*BACKENDS;
        let expected = backends.expansion.recognize(&text, &backends.registry).unwrap();
        let actual = backends.compiled.recognize(&text, &backends.registry).unwrap();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn backends_agree_on_all_matches(text in input()) {
        let backends = &*BACKENDS;
        let expected = backends.expansion.recognize_all(&text, &backends.registry).unwrap();
        let actual = backends.compiled.recognize_all(&text, &backends.registry).unwrap();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn every_phrase_is_recognized(text in prop::sample::select(BACKENDS.phrases.clone())) {
        let backends = &*BACKENDS;
        prop_assert!(backends.compiled.recognize(&text, &backends.registry).unwrap().is_match());
    }
}
