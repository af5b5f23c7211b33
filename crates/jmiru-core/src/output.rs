//! Assembly of slots and alignments into ordered output groups.
//!
//! Markup is the renderer's job; this module only decides what each group
//! contains. [`render_bracketed`] is a plain-text rendering (`漢[かん]`) for
//! terminals and tests.

use serde::Serialize;
use tracing::debug_span;

use crate::align::{align_line, strip_spaces, CharacterRecord, LineAlignment};
use crate::classify::romaji_line_to_hiragana;
use crate::script::ScriptClassifier;
use crate::slots::Slot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputComponent {
    Chord(String),
    /// One alignment per source line.
    Annotated(Vec<LineAlignment>),
    /// Text shown as-is: a kanji line without reading, or a reading without kanji.
    Plain(String),
    Unclassified(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputGroup {
    pub components: Vec<OutputComponent>,
}

/// The reading for a slot: its kana line, else its romaji line in hiragana.
pub fn slot_reading(sc: &dyn ScriptClassifier, slot: &Slot) -> Option<String> {
    if let Some(kana) = &slot.kana {
        return Some(kana.clone());
    }
    slot.romaji
        .as_deref()
        .map(|line| {
            line.split('\n')
                .map(|l| romaji_line_to_hiragana(sc, l))
                .collect::<Vec<_>>()
                .join("\n")
        })
}

/// Align a possibly multi-line source against a possibly multi-line reading.
///
/// Merged slots hold several lines per type. When both sides have the same
/// number of lines they are aligned pairwise; otherwise each side is
/// flattened into one line.
pub fn align_text(sc: &dyn ScriptClassifier, source: &str, reading: &str) -> Vec<LineAlignment> {
    let source_lines: Vec<&str> = source.split('\n').collect();
    let reading_lines: Vec<&str> = reading.split('\n').collect();
    if source_lines.len() == reading_lines.len() {
        source_lines
            .iter()
            .zip(&reading_lines)
            .map(|(s, r)| align_line(sc, s, r))
            .collect()
    } else {
        vec![align_line(sc, &source_lines.concat(), &reading_lines.concat())]
    }
}

fn text_component(sc: &dyn ScriptClassifier, slot: &Slot) -> Option<OutputComponent> {
    let reading = slot_reading(sc, slot).filter(|r| !strip_spaces(r).trim().is_empty());
    match (slot.kanji.as_deref(), reading) {
        (Some(kanji), Some(reading)) => Some(OutputComponent::Annotated(align_text(sc, kanji, &reading))),
        (Some(kanji), None) => Some(OutputComponent::Plain(kanji.to_string())),
        (None, Some(reading)) => Some(OutputComponent::Plain(reading)),
        (None, None) => None,
    }
}

pub fn assemble_slot(sc: &dyn ScriptClassifier, slot: &Slot) -> OutputGroup {
    let mut components = Vec::new();
    if let Some(chord) = slot.chord.as_deref().filter(|c| !c.is_empty()) {
        components.push(OutputComponent::Chord(chord.to_string()));
    }
    components.extend(text_component(sc, slot));
    let unclassified = slot.unclassified.join("\n");
    if !unclassified.is_empty() {
        components.push(OutputComponent::Unclassified(unclassified));
    }
    OutputGroup { components }
}

/// One output group per slot, in slot order.
pub fn assemble(sc: &dyn ScriptClassifier, slots: &[Slot]) -> Vec<OutputGroup> {
    let _span = debug_span!("assemble", slots = slots.len()).entered();
    slots.iter().map(|s| assemble_slot(sc, s)).collect()
}

/// Render records as `字[よみ]` text. With `include_debug`, kana whose span
/// does not hold their own kana are bracketed too.
pub fn render_records(records: &[CharacterRecord], include_debug: bool) -> String {
    let mut out = String::new();
    for r in records {
        out.push(r.character);
        if r.annotate || (include_debug && r.annotate_debug) {
            out.push('[');
            out.push_str(&r.matched);
            out.push(']');
        }
        out.push_str(&r.trailing_unmatched);
    }
    out
}

pub fn render_group(group: &OutputGroup, include_debug: bool) -> String {
    group
        .components
        .iter()
        .map(|c| match c {
            OutputComponent::Chord(s) | OutputComponent::Plain(s) | OutputComponent::Unclassified(s) => {
                s.clone()
            }
            OutputComponent::Annotated(lines) => lines
                .iter()
                .map(|l| render_records(&l.records, include_debug))
                .collect::<Vec<_>>()
                .join("\n"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render all groups, one group per line block.
pub fn render_bracketed(groups: &[OutputGroup], include_debug: bool) -> String {
    groups
        .iter()
        .map(|g| render_group(g, include_debug))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::DefaultScriptClassifier;
    use crate::slots::slots_from_blocks;

    fn run(blocks: &[&str]) -> String {
        let sc = DefaultScriptClassifier;
        render_bracketed(&assemble(&sc, &slots_from_blocks(&sc, blocks)), false)
    }

    #[test]
    fn test_kanji_with_kana_line() {
        assert_eq!(run(&["書写です\nしょしゃです"]), "書[しょ]写[しゃ]です");
    }

    #[test]
    fn test_kanji_with_romaji_line() {
        let sc = DefaultScriptClassifier;
        let slots = slots_from_blocks(&sc, &["C     F     G\n心が体を\nkokoro ga karada wo\nmy heart and body"]);
        let groups = assemble(&sc, &slots);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].components.len(), 3);
        assert_eq!(
            render_group(&groups[0], false),
            "C     F     G\n心[こころ]が体[からだ]を\nmy heart and body"
        );
    }

    #[test]
    fn test_kanji_without_reading() {
        assert_eq!(run(&["心が体を"]), "心が体を");
    }

    #[test]
    fn test_romaji_without_kanji() {
        assert_eq!(run(&["koko de kakite kudasai"]), "ここ で かきて ください");
    }

    #[test]
    fn test_paragraphs_preserved() {
        assert_eq!(run(&["書写です\nしょしゃです\n\n心\nこころ"]), "書[しょ]写[しゃ]です\n\n心[こころ]");
    }

    #[test]
    fn test_merged_blocks() {
        let out = run(&["書写です\n\n心が体を", "shosha desu\n\nkokoro ga karada wo"]);
        assert_eq!(out, "書[しょ]写[しゃ]です\n\n心[こころ]が体[からだ]を");
    }

    #[test]
    fn test_multiline_slot_aligns_pairwise() {
        let sc = DefaultScriptClassifier;
        let lines = align_text(&sc, "書写\n心", "しょしゃ\nこころ");
        assert_eq!(lines.len(), 2);
        assert_eq!(render_records(&lines[0].records, false), "書[しょ]写[しゃ]");
        assert_eq!(render_records(&lines[1].records, false), "心[こころ]");
    }

    #[test]
    fn test_multiline_mismatch_flattens() {
        let sc = DefaultScriptClassifier;
        let lines = align_text(&sc, "書写\n心", "しょしゃこころ");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source, "書写心");
    }

    #[test]
    fn test_debug_rendering() {
        let sc = DefaultScriptClassifier;
        let line = align_line(&sc, "ルート", "るうと");
        assert_eq!(render_records(&line.records, false), "ルート");
        assert_eq!(render_records(&line.records, true), "ルー[う]ト");
    }

    #[test]
    fn test_empty_groups() {
        let sc = DefaultScriptClassifier;
        let group = assemble_slot(&sc, &Slot::default());
        assert!(group.components.is_empty());
        assert_eq!(render_group(&group, false), "");
    }
}
