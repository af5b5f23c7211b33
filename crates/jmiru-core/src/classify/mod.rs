//! Line classification.
//!
//! Every raw line gets exactly one [`LineType`]. Classifiers are tried in
//! priority order (Kanji, Kana, Chord, Romaji) and the first match wins;
//! anything else, including blank lines, is `Unclassified`.

mod chord;
mod romaji;

use serde::Serialize;
use tracing::debug;

use crate::script::ScriptClassifier;
use crate::settings::{settings, ClassifierSettings};

pub use chord::{is_chord_line, is_chord_token};
pub use romaji::{is_romaji_line, romaji_line_to_hiragana, trim_word_punctuation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LineType {
    Kanji,
    Kana,
    Chord,
    Romaji,
    Unclassified,
}

impl LineType {
    /// Classified types in priority order.
    pub const CLASSIFIED: [LineType; 4] = [
        LineType::Kanji,
        LineType::Kana,
        LineType::Chord,
        LineType::Romaji,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LineType::Kanji => "kanji",
            LineType::Kana => "kana",
            LineType::Chord => "chord",
            LineType::Romaji => "romaji",
            LineType::Unclassified => "unclassified",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub line: String,
    pub line_type: LineType,
}

pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_kanji_line(sc: &dyn ScriptClassifier, line: &str) -> bool {
    line.chars().any(|c| sc.is_kanji_char(c))
}

fn is_kana_line(sc: &dyn ScriptClassifier, line: &str) -> bool {
    line.chars().all(|c| sc.is_kana_char(c))
}

fn matches_type(
    sc: &dyn ScriptClassifier,
    cfg: &ClassifierSettings,
    line: &str,
    line_type: LineType,
) -> bool {
    match line_type {
        LineType::Kanji => is_kanji_line(sc, line),
        LineType::Kana => is_kana_line(sc, line),
        LineType::Chord => is_chord_line(line),
        LineType::Romaji => is_romaji_line(sc, line, cfg),
        LineType::Unclassified => true,
    }
}

/// Classify a single line using the global classifier settings.
pub fn classify_line(sc: &dyn ScriptClassifier, line: &str) -> ClassifiedLine {
    classify_line_with(sc, &settings().classifier, line)
}

pub fn classify_line_with(
    sc: &dyn ScriptClassifier,
    cfg: &ClassifierSettings,
    line: &str,
) -> ClassifiedLine {
    let line_type = if is_blank_line(line) {
        LineType::Unclassified
    } else {
        LineType::CLASSIFIED
            .into_iter()
            .find(|&t| matches_type(sc, cfg, line, t))
            .unwrap_or(LineType::Unclassified)
    };
    debug!(line_type = line_type.as_str(), chars = line.chars().count(), "classify_line");
    ClassifiedLine {
        line: line.to_string(),
        line_type,
    }
}

/// Classify every line of one input block.
pub fn classify_block(sc: &dyn ScriptClassifier, block: &str) -> Vec<ClassifiedLine> {
    let cfg = &settings().classifier;
    block
        .split('\n')
        .map(|l| classify_line_with(sc, cfg, l.strip_suffix('\r').unwrap_or(l)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::DefaultScriptClassifier;

    fn classify(line: &str) -> LineType {
        classify_line(&DefaultScriptClassifier, line).line_type
    }

    #[test]
    fn test_examples() {
        assert_eq!(classify("C     F     G"), LineType::Chord);
        assert_eq!(classify("koko de kakite kudasai"), LineType::Romaji);
        assert_eq!(classify("ここで書きてください"), LineType::Kanji);
        assert_eq!(classify("write here please"), LineType::Unclassified);
    }

    #[test]
    fn test_kana_line() {
        assert_eq!(classify("ここでかいてください"), LineType::Kana);
        assert_eq!(classify("ルート"), LineType::Kana);
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), LineType::Unclassified);
        assert_eq!(classify("   \t"), LineType::Unclassified);
    }

    #[test]
    fn test_kanji_beats_everything() {
        assert_eq!(classify("C 書"), LineType::Kanji);
        assert_eq!(classify("love 愛"), LineType::Kanji);
    }

    #[test]
    fn test_chord_beats_romaji() {
        // "A E" also reads as romaji (あ え), but chords take priority.
        let sc = DefaultScriptClassifier;
        assert!(is_romaji_line(&sc, "A E", &settings().classifier));
        assert_eq!(classify("A E"), LineType::Chord);
    }

    #[test]
    fn test_classify_block_strips_cr() {
        let lines = classify_block(&DefaultScriptClassifier, "C G\r\n心\r\n");
        let types: Vec<LineType> = lines.iter().map(|l| l.line_type).collect();
        assert_eq!(
            types,
            vec![LineType::Chord, LineType::Kanji, LineType::Unclassified]
        );
        assert_eq!(lines[1].line, "心");
    }
}
