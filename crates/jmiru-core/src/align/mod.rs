//! Kanji-to-reading alignment.
//!
//! Given a line of source text and its kana reading, assign every source
//! character a contiguous span of the reading:
//!
//! - spans follow each other, skipping at most `max_unmatched` characters
//!   (preferably none), and the first starts at 0
//! - kana and other characters take exactly one reading character and are
//!   pinned between the first and last occurrence of their own kana
//! - kanji take between `min_kana_per_kanji` and `max_kana_per_kanji`
//!   characters, preferably `average_kana_per_kanji`, and avoid starting or
//!   ending on a small kana
//! - the last span should reach the end of the reading
//!
//! The constraints are solved by a bounded dynamic program (see
//! [`solver`]). If the hard constraints cannot all hold, a relaxed pass is
//! run instead, so alignment never fails.

mod model;
mod solver;


use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::script::ScriptClassifier;
use crate::settings::settings;
use crate::unicode::is_small_kana;

pub use model::AlignmentModel;
pub use solver::SolvePass;

use solver::{solve, ReadingInfo, SourceChar};

/// Half-open range `[start, end)` of reading character indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharClass {
    Kanji,
    Kana,
    Other,
}

impl CharClass {
    pub fn of(sc: &dyn ScriptClassifier, c: char) -> Self {
        if sc.is_kanji_char(c) {
            CharClass::Kanji
        } else if sc.is_kana_char(c) {
            CharClass::Kana
        } else {
            CharClass::Other
        }
    }
}

/// One source character with its resolved reading span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRecord {
    pub character: char,
    pub class: CharClass,
    pub span: Span,
    /// Reading text covered by `span`.
    pub matched: String,
    /// Reading text skipped between this span and the next one.
    pub trailing_unmatched: String,
    /// A kanji with a non-empty reading.
    pub annotate: bool,
    /// `annotate`, or a kana whose span does not hold the kana it spells.
    pub annotate_debug: bool,
}

/// Alignment of one source line against one reading line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineAlignment {
    /// Source line with spaces removed.
    pub source: String,
    /// Reading line with spaces removed; spans index into its characters.
    pub reading: String,
    pub records: Vec<CharacterRecord>,
    pub pass: SolvePass,
    pub cost: i64,
}

impl LineAlignment {
    /// Concatenation of every record's matched and trailing text.
    /// Equals `reading` whenever the source line is non-empty.
    pub fn reassembled_reading(&self) -> String {
        self.records
            .iter()
            .flat_map(|r| [r.matched.as_str(), r.trailing_unmatched.as_str()])
            .collect()
    }
}

/// Remove ASCII and ideographic spaces.
pub fn strip_spaces(s: &str) -> String {
    s.chars().filter(|&c| c != ' ' && c != '\u{3000}').collect()
}

/// Align using the global settings.
pub fn align_line(sc: &dyn ScriptClassifier, source: &str, reading: &str) -> LineAlignment {
    align_line_with(sc, &AlignmentModel::from_settings(settings()), source, reading)
}

pub fn align_line_with(
    sc: &dyn ScriptClassifier,
    model: &AlignmentModel,
    source: &str,
    reading: &str,
) -> LineAlignment {
    let source = strip_spaces(source);
    let reading = strip_spaces(reading);
    let source_chars: Vec<char> = source.chars().collect();
    let reading_chars: Vec<char> = reading.chars().collect();
    let _span = debug_span!(
        "align_line",
        source_len = source_chars.len(),
        reading_len = reading_chars.len()
    )
    .entered();

    if source_chars.is_empty() || reading_chars.is_empty() {
        return unaligned(sc, source, reading, &source_chars);
    }

    let normalized_reading: Vec<String> = reading_chars
        .iter()
        .map(|c| sc.normalize_to_hiragana(&c.to_string()))
        .collect();
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, r) in normalized_reading.iter().enumerate() {
        positions.entry(r.as_str()).or_default().push(i);
    }
    let prepared: Vec<SourceChar<'_>> = source_chars
        .iter()
        .map(|&c| {
            let class = CharClass::of(sc, c);
            let occurrences = if class == CharClass::Kanji {
                &[][..]
            } else {
                let norm = sc.normalize_to_hiragana(&c.to_string());
                positions.get(norm.as_str()).map_or(&[][..], Vec::as_slice)
            };
            SourceChar { class, occurrences }
        })
        .collect();
    // Katakana readings count too, so test the normalized form.
    let info = ReadingInfo {
        len: reading_chars.len(),
        small: normalized_reading
            .iter()
            .map(|r| {
                let mut chars = r.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if is_small_kana(c))
            })
            .collect(),
    };

    let strict = solve(&prepared, &info, model, SolvePass::Strict, true).or_else(|| {
        debug!("beam lost every strict path; retrying exhaustively");
        solve(&prepared, &info, model, SolvePass::Strict, false)
    });
    let (solution, pass) = match strict {
        Some(s) => (s, SolvePass::Strict),
        None => {
            debug!("hard constraints infeasible; relaxing");
            match solve(&prepared, &info, model, SolvePass::Relaxed, true) {
                Some(s) => (s, SolvePass::Relaxed),
                None => return unaligned(sc, source, reading, &source_chars),
            }
        }
    };
    debug!(?pass, cost = solution.cost);

    let records = build_records(sc, &source_chars, &prepared, &reading_chars, &solution.spans);
    LineAlignment {
        source,
        reading,
        records,
        pass,
        cost: solution.cost,
    }
}

/// Records with empty spans, used when there is nothing to align against.
fn unaligned(
    sc: &dyn ScriptClassifier,
    source: String,
    reading: String,
    source_chars: &[char],
) -> LineAlignment {
    let end = reading.chars().count();
    let last = source_chars.len().saturating_sub(1);
    let records = source_chars
        .iter()
        .enumerate()
        .map(|(i, &c)| CharacterRecord {
            character: c,
            class: CharClass::of(sc, c),
            span: Span { start: 0, end: 0 },
            matched: String::new(),
            trailing_unmatched: if i == last && end > 0 {
                reading.clone()
            } else {
                String::new()
            },
            annotate: false,
            annotate_debug: false,
        })
        .collect();
    LineAlignment {
        source,
        reading,
        records,
        pass: SolvePass::Skipped,
        cost: 0,
    }
}

fn build_records(
    sc: &dyn ScriptClassifier,
    source_chars: &[char],
    prepared: &[SourceChar<'_>],
    reading_chars: &[char],
    spans: &[Span],
) -> Vec<CharacterRecord> {
    let slice = |from: usize, to: usize| -> String { reading_chars[from..to].iter().collect() };
    spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let character = source_chars[i];
            let class = prepared[i].class;
            // The last record absorbs whatever the reading has left.
            let next_start = spans.get(i + 1).map_or(reading_chars.len(), |s| s.start);
            let matched = slice(span.start, span.end);
            let trailing_unmatched = slice(span.end, next_start);
            let annotate = !matched.is_empty() && class == CharClass::Kanji;
            let misplaced_kana = class == CharClass::Kana
                && sc.normalize_to_hiragana(&character.to_string())
                    != sc.normalize_to_hiragana(&matched);
            CharacterRecord {
                character,
                class,
                span: *span,
                matched,
                trailing_unmatched,
                annotate,
                annotate_debug: annotate || misplaced_kana,
            }
        })
        .collect()
}
