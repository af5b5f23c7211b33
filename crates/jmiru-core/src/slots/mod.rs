//! Slot building and multi-block reconciliation.
//!
//! A [`Slot`] is one synchronized row of the document: at most one line per
//! classified type plus any unclassified lines. Blank slots separate
//! paragraphs and keep independently pasted blocks in step when merged.

mod build;
mod merge;


use serde::Serialize;

use crate::classify::{classify_block, is_blank_line, LineType};
use crate::script::ScriptClassifier;

pub use build::build_slots;
pub use merge::{is_complementary, merge, merge_blocks};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub chord: Option<String>,
    pub kanji: Option<String>,
    pub kana: Option<String>,
    pub romaji: Option<String>,
    pub unclassified: Vec<String>,
}

impl Slot {
    fn field(&self, line_type: LineType) -> Option<&Option<String>> {
        match line_type {
            LineType::Chord => Some(&self.chord),
            LineType::Kanji => Some(&self.kanji),
            LineType::Kana => Some(&self.kana),
            LineType::Romaji => Some(&self.romaji),
            LineType::Unclassified => None,
        }
    }

    fn field_mut(&mut self, line_type: LineType) -> Option<&mut Option<String>> {
        match line_type {
            LineType::Chord => Some(&mut self.chord),
            LineType::Kanji => Some(&mut self.kanji),
            LineType::Kana => Some(&mut self.kana),
            LineType::Romaji => Some(&mut self.romaji),
            LineType::Unclassified => None,
        }
    }

    /// The line stored for a classified type, if non-empty.
    pub fn get(&self, line_type: LineType) -> Option<&str> {
        self.field(line_type)
            .and_then(|f| f.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn is_defined(&self, line_type: LineType) -> bool {
        match line_type {
            LineType::Unclassified => !self.unclassified.is_empty(),
            t => self.get(t).is_some(),
        }
    }

    pub fn has_classified(&self) -> bool {
        LineType::CLASSIFIED.iter().any(|&t| self.is_defined(t))
    }

    /// No classified content and nothing but whitespace in the unclassified lines.
    pub fn is_blank(&self) -> bool {
        !self.has_classified() && self.unclassified.iter().all(|l| is_blank_line(l))
    }

    /// Holds no lines at all.
    pub fn is_empty(&self) -> bool {
        !self.has_classified() && self.unclassified.is_empty()
    }

    /// Store a line under its type. Unclassified lines are appended.
    pub(crate) fn assign(&mut self, line_type: LineType, line: String) {
        match self.field_mut(line_type) {
            Some(field) => *field = Some(line),
            None => self.unclassified.push(line),
        }
    }

    /// Combine two corresponding slots from different blocks.
    ///
    /// Per classified type the lines present are joined with a line break;
    /// unclassified lines are concatenated, `first` before `second`.
    pub fn combine(first: &Slot, second: &Slot) -> Slot {
        let mut combined = Slot {
            unclassified: first
                .unclassified
                .iter()
                .chain(&second.unclassified)
                .cloned()
                .collect(),
            ..Slot::default()
        };
        for t in LineType::CLASSIFIED {
            let parts: Vec<&str> = [first.get(t), second.get(t)].into_iter().flatten().collect();
            if !parts.is_empty() {
                combined.assign(t, parts.join("\n"));
            }
        }
        combined
    }
}

/// Classify each block, build its slots, and reconcile all blocks in order.
pub fn slots_from_blocks<S: AsRef<str>>(sc: &dyn ScriptClassifier, blocks: &[S]) -> Vec<Slot> {
    let per_block: Vec<Vec<Slot>> = blocks
        .iter()
        .map(|b| build_slots(&classify_block(sc, b.as_ref())))
        .collect();
    merge_blocks(per_block)
}
