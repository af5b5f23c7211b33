use crate::script::ScriptClassifier;
use crate::settings::ClassifierSettings;

/// Strip leading/trailing ASCII punctuation from a word.
pub fn trim_word_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| c.is_ascii_punctuation())
}

/// Convert one romaji word to hiragana, or `None` if it does not look like romaji.
///
/// Words containing `l` or `ti` are rejected: neither spelling occurs in
/// Hepburn romanization, so they are far more likely to be English.
fn convert_word(sc: &dyn ScriptClassifier, word: &str) -> Option<String> {
    if !sc.is_latin_only(word) {
        return None;
    }
    let lower = word.to_lowercase();
    if lower.contains('l') || lower.contains("ti") {
        return None;
    }
    let converted = sc.normalize_to_hiragana(&lower.replace("dzu", "du"));
    sc.could_be_japanese(&converted).then_some(converted)
}

/// Convert the romaji words of a line to hiragana, leaving other words as typed.
pub fn romaji_line_to_hiragana(sc: &dyn ScriptClassifier, line: &str) -> String {
    line.split(' ')
        .map(|w| convert_word(sc, w).unwrap_or_else(|| w.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WordRun {
    japanese: bool,
    count: usize,
}

fn group_runs(flags: &[bool]) -> Vec<WordRun> {
    let mut runs: Vec<WordRun> = Vec::new();
    for &japanese in flags {
        match runs.last_mut() {
            Some(run) if run.japanese == japanese => run.count += 1,
            _ => runs.push(WordRun { japanese, count: 1 }),
        }
    }
    runs
}

/// Fold short Japanese-looking runs into the surrounding non-Japanese text.
///
/// Short English words are often valid romaji ("to", "on", "no"), so a run
/// shorter than `min_run` only counts when the line has no other language.
fn collapse_false_positives(runs: Vec<WordRun>, min_run: usize) -> Vec<WordRun> {
    if runs.iter().all(|r| r.japanese) {
        return runs;
    }
    let mut collapsed: Vec<WordRun> = Vec::new();
    for mut run in runs {
        if run.japanese && run.count < min_run {
            run.japanese = false;
        }
        match collapsed.last_mut() {
            Some(last) if last.japanese == run.japanese => last.count += run.count,
            _ => collapsed.push(run),
        }
    }
    collapsed
}

/// A line of romanized Japanese, possibly mixed with a little of another language.
pub fn is_romaji_line(sc: &dyn ScriptClassifier, line: &str, cfg: &ClassifierSettings) -> bool {
    let flags: Vec<bool> = line
        .split_whitespace()
        .map(trim_word_punctuation)
        .filter(|w| !w.is_empty())
        .map(|w| match convert_word(sc, w) {
            Some(converted) => sc.could_be_japanese(&converted),
            None => sc.could_be_japanese(w),
        })
        .collect();

    let runs = collapse_false_positives(group_runs(&flags), cfg.romaji_min_run);
    let japanese: usize = runs.iter().filter(|r| r.japanese).map(|r| r.count).sum();
    let other: usize = runs.iter().filter(|r| !r.japanese).map(|r| r.count).sum();
    !runs.is_empty() && runs.len() <= cfg.romaji_max_runs && japanese > other
}
