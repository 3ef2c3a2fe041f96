//! Property-based tests for the conversion pipeline
//!
//! These tests ensure the lexer and parser never panic on arbitrary input,
//! that conversion is deterministic, and that well-formed word paragraphs
//! always produce the document skeleton around their own text.

use md2html::convert;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_no_panic_on_arbitrary_input(input in any::<String>()) {
        // Ok or Err are both acceptable; panicking is not.
        let _ = convert(&input);
    }

    #[test]
    fn test_conversion_is_deterministic(input in any::<String>()) {
        let first = convert(&input);
        let second = convert(&input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_word_paragraph_roundtrip(words in "[a-z]{1,8}( [a-z]{1,8}){0,5}") {
        // A run of plain words is a single text token and renders verbatim
        // inside the skeleton.
        let html = convert(&words).unwrap();
        prop_assert_eq!(
            html,
            format!("<!DOCTYPE html><html><body>{}</body></html>", words)
        );
    }

    #[test]
    fn test_bulleted_word_lists_always_convert(
        items in prop::collection::vec("[a-z]{1,8}", 1..6)
    ) {
        let source: String = items.iter().map(|w| format!("- {w}\n")).collect();
        let html = convert(&source).unwrap();
        let expected_items: String = items.iter().map(|w| format!("<li>{w}</li>")).collect();
        prop_assert_eq!(
            html,
            format!("<!DOCTYPE html><html><body><ul>{}</ul></body></html>", expected_items)
        );
    }
}
