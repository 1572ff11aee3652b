//! Tokenizer determinism and shape.

use std::collections::HashSet;

use proptest::prelude::*;
use rangeseek::tokenize;

fn query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::string::string_regex("[A-Za-z]{1,8}").unwrap(),
            prop::string::string_regex("[ぁ-ゖァ-ヺ一-龠]{1,6}").unwrap(),
            Just("Rust語".to_string()),
        ],
        0..6,
    )
    .prop_map(|words| words.join(" "))
}

#[test]
fn test_known_queries() {
    assert_eq!(tokenize("AB cd"), vec!["ab", "cd"]);
    assert_eq!(tokenize("あいう"), vec!["あい", "いう"]);
    assert_eq!(tokenize("rust RUST Rust"), vec!["rust"]);
    assert!(tokenize(" \t\u{3000}").is_empty());
}

proptest! {
    #[test]
    fn prop_tokenize_is_deterministic(query in query_strategy()) {
        prop_assert_eq!(tokenize(&query), tokenize(&query));
    }

    #[test]
    fn prop_keys_are_unique_and_short(query in query_strategy()) {
        let keys = tokenize(&query);
        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());
        for key in &keys {
            prop_assert!(!key.is_empty());
            if !key.is_ascii() {
                prop_assert!(key.chars().count() <= 2);
            }
        }
    }

    /// Repeating the query adds no keys.
    #[test]
    fn prop_repetition_collapses(query in query_strategy()) {
        let doubled = format!("{} {}", query, query);
        prop_assert_eq!(tokenize(&doubled), tokenize(&query));
    }
}
