use std::sync::OnceLock;

use regex::Regex;

/// Root note with optional accidental, any run of qualities/extensions, optional slash bass.
const CHORD_PATTERN: &str = r"^\(?[A-G][b#]?(?:2|5|6|7|9|11|13|6/9|7-5|7-9|7#5|7#9|7\+5|7\+9|7b5|7b9|7sus2|7sus4|add2|add4|add9|aug|dim|dim7|M7|m/maj7|m6|m7|m7b5|m9|m11|m13|maj7|maj9|maj11|maj13|mb5|m|sus|sus2|sus4)*(?:/[A-G][b#]*)*\)?$";

/// Repeat markers such as (2x), [4X].
const REPEAT_PATTERN: &str = r"^[\[(][0-9]+[xX][\])]$";

fn chord_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CHORD_PATTERN).expect("chord pattern must compile"))
}

fn repeat_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REPEAT_PATTERN).expect("repeat pattern must compile"))
}

pub fn is_chord_token(token: &str) -> bool {
    chord_regex().is_match(token) || repeat_regex().is_match(token)
}

/// A line of chord symbols, e.g. `C     F     G` or `Am7 D/F# (2x)`.
///
/// Empty and punctuation-only tokens are ignored; at least one token must remain.
pub fn is_chord_line(line: &str) -> bool {
    let mut tokens = line
        .split(' ')
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.chars().all(|c| c.is_ascii_punctuation()))
        .peekable();
    tokens.peek().is_some() && tokens.all(is_chord_token)
}
