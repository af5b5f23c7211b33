//! Script classification contract consumed by the pipeline.
//!
//! The pipeline never inspects Unicode blocks or romaji tables directly; it
//! goes through a [`ScriptClassifier`], so callers can substitute their own
//! kana/kanji rules. [`DefaultScriptClassifier`] is the built-in
//! implementation on top of [`crate::unicode`] and [`crate::romaji`].

use crate::romaji::romaji_to_hiragana;
use crate::unicode::{
    is_japanese_punctuation, is_kana, is_kanji, is_latin, katakana_to_hiragana,
};

/// Per-character predicates and per-string transforms for Japanese text.
pub trait ScriptClassifier: Send + Sync {
    fn is_kanji_char(&self, c: char) -> bool;

    fn is_kana_char(&self, c: char) -> bool;

    /// Map katakana and romaji input to hiragana. Anything else passes through.
    fn normalize_to_hiragana(&self, s: &str) -> String;

    /// True if `s`, with ASCII punctuation removed, is non-empty Japanese text.
    fn could_be_japanese(&self, s: &str) -> bool;

    /// True if every non-whitespace, non-punctuation character is Latin.
    fn is_latin_only(&self, s: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScriptClassifier;

impl ScriptClassifier for DefaultScriptClassifier {
    fn is_kanji_char(&self, c: char) -> bool {
        is_kanji(c)
    }

    fn is_kana_char(&self, c: char) -> bool {
        is_kana(c)
    }

    fn normalize_to_hiragana(&self, s: &str) -> String {
        let hiragana = katakana_to_hiragana(s);
        if hiragana.chars().any(|c| c.is_ascii_alphabetic()) {
            romaji_to_hiragana(&hiragana)
        } else {
            hiragana
        }
    }

    fn could_be_japanese(&self, s: &str) -> bool {
        let mut any = false;
        for c in s.chars().filter(|c| !c.is_ascii_punctuation()) {
            if !(is_kana(c) || is_kanji(c) || is_japanese_punctuation(c)) {
                return false;
            }
            any = true;
        }
        any
    }

    fn is_latin_only(&self, s: &str) -> bool {
        let mut letters = s
            .chars()
            .filter(|c| !c.is_whitespace() && !c.is_ascii_punctuation())
            .peekable();
        letters.peek().is_some() && letters.all(is_latin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_katakana() {
        let sc = DefaultScriptClassifier;
        assert_eq!(sc.normalize_to_hiragana("ルート"), "るーと");
        assert_eq!(sc.normalize_to_hiragana("る"), "る");
        assert_eq!(sc.normalize_to_hiragana("、"), "、");
    }

    #[test]
    fn test_normalize_romaji() {
        let sc = DefaultScriptClassifier;
        assert_eq!(sc.normalize_to_hiragana("kudasai"), "ください");
        assert_eq!(sc.normalize_to_hiragana("Koko"), "ここ");
    }

    #[test]
    fn test_could_be_japanese() {
        let sc = DefaultScriptClassifier;
        assert!(sc.could_be_japanese("ここ"));
        assert!(sc.could_be_japanese("書きて、"));
        assert!(sc.could_be_japanese("\"ください\"!"));
        assert!(!sc.could_be_japanese("wりて"));
        assert!(!sc.could_be_japanese(""));
        assert!(!sc.could_be_japanese("..."));
    }

    #[test]
    fn test_is_latin_only() {
        let sc = DefaultScriptClassifier;
        assert!(sc.is_latin_only("koko de"));
        assert!(sc.is_latin_only("hello, world!"));
        assert!(!sc.is_latin_only("kakiて"));
        assert!(!sc.is_latin_only("123"));
        assert!(!sc.is_latin_only(" "));
    }
}
