use tracing::{debug, debug_span};

use super::model::AlignmentModel;
use super::{CharClass, Span};

/// A source character prepared for solving.
#[derive(Debug, Clone)]
pub(crate) struct SourceChar<'a> {
    pub class: CharClass,
    /// Reading positions holding the same (normalized) character, ascending.
    /// Always empty for kanji.
    pub occurrences: &'a [usize],
}

/// The reading as seen by the solver.
pub(crate) struct ReadingInfo {
    pub len: usize,
    /// `small[i]` is true if reading position `i` is a small kana.
    pub small: Vec<bool>,
}

impl ReadingInfo {
    fn is_small_at(&self, idx: usize) -> bool {
        self.small.get(idx).copied().unwrap_or(false)
    }
}

/// Which constraint set a solution was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SolvePass {
    /// All hard constraints hold.
    Strict,
    /// The hard system was infeasible; kana pins became preferences and
    /// spans were allowed to be empty at `required` cost.
    Relaxed,
    /// Nothing to solve (empty source or reading).
    Skipped,
}

pub(crate) struct Solution {
    pub spans: Vec<Span>,
    pub cost: i64,
    /// DP states allocated across all rows.
    pub cells: usize,
}

/// Best-so-far for one (character, end) state, with a backpointer.
#[derive(Clone, Copy)]
struct Entry {
    cost: i64,
    start: u32,
    prev_end: u32,
}

/// DP states of one character, indexed by span end over `lo..lo + cells.len()`.
struct Row {
    lo: usize,
    cells: Vec<Option<Entry>>,
}

impl Row {
    fn get(&self, end: usize) -> Option<Entry> {
        end.checked_sub(self.lo)
            .and_then(|k| self.cells.get(k).copied().flatten())
    }

    fn states(&self) -> impl Iterator<Item = (usize, Entry)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(k, e)| e.map(|e| (self.lo + k, e)))
    }

    /// Drop states trailing the row minimum by `margin` or more, then trim
    /// empty cells from both ends.
    fn prune(&mut self, margin: i64) {
        let Some(min) = self.states().map(|(_, e)| e.cost).min() else {
            return;
        };
        for cell in &mut self.cells {
            if matches!(cell, Some(e) if e.cost.saturating_sub(min) >= margin) {
                *cell = None;
            }
        }
        let first = self.cells.iter().position(Option::is_some).unwrap_or(0);
        let last = self.cells.iter().rposition(Option::is_some).map_or(0, |k| k + 1);
        self.cells.truncate(last);
        self.cells.drain(..first.min(self.cells.len()));
        self.lo += first;
    }
}

/// Minimum-cost span assignment by dynamic programming over (character, end).
///
/// Every constraint only relates a character to its predecessor, so the best
/// path into each `(i, end)` state is all that needs remembering. Hard
/// constraints prune transitions; soft ones accumulate as cost. Ties keep the
/// first candidate in (prev_end, gap, length) order.
///
/// Each row only covers the ends reachable from the previous row that still
/// leave room for the remaining characters. With `beam` set, states that
/// trail their row's best by more than [`AlignmentModel::beam_margin`] are
/// dropped as well, which keeps rows narrow wherever kana pins anchor the
/// line.
pub(crate) fn solve(
    chars: &[SourceChar<'_>],
    reading: &ReadingInfo,
    model: &AlignmentModel,
    pass: SolvePass,
    beam: bool,
) -> Option<Solution> {
    let n = chars.len();
    let len = reading.len;
    let _span = debug_span!("solve", n, len, ?pass, beam).entered();
    if n == 0 || u32::try_from(len).is_err() {
        return None;
    }
    let relaxed = pass == SolvePass::Relaxed;
    let bounds: Vec<(usize, usize)> = chars
        .iter()
        .map(|ch| span_bounds(ch.class, model, relaxed))
        .collect();

    // rest_min[i] = reading characters the characters after i need at least
    let mut rest_min = vec![0usize; n];
    for i in (0..n.saturating_sub(1)).rev() {
        rest_min[i] = rest_min[i + 1] + bounds[i + 1].0;
    }

    let mut rows: Vec<Row> = Vec::with_capacity(n);
    let mut cells_total = 0usize;

    for (i, ch) in chars.iter().enumerate() {
        let (min_len, max_len) = bounds[i];
        let max_gap = if i == 0 { 0 } else { model.max_unmatched };
        let is_last = i + 1 == n;

        let prev: Vec<(usize, i64)> = match rows.last() {
            None => vec![(0, 0)],
            Some(row) => row.states().map(|(end, e)| (end, e.cost)).collect(),
        };
        let (first_prev, last_prev) = match (prev.first(), prev.last()) {
            (Some(f), Some(l)) => (f.0, l.0),
            _ => return None,
        };
        let cap = len.checked_sub(rest_min[i])?;
        let lo = first_prev + min_len;
        let hi = (last_prev + max_gap + max_len).min(cap);
        if lo > hi {
            return None;
        }
        let mut row = Row {
            lo,
            cells: vec![None; hi - lo + 1],
        };

        for &(prev_end, prev_cost) in &prev {
            for gap in 0..=max_gap {
                let start = prev_end + gap;
                if start > hi {
                    break;
                }
                let Some(char_cost) = start_cost(ch, start, model, relaxed) else {
                    continue;
                };

                for span_len in min_len..=max_len {
                    let end = start + span_len;
                    if end > hi {
                        break;
                    }
                    let mut cost = prev_cost
                        .saturating_add(model.gap_cost(gap))
                        .saturating_add(char_cost)
                        .saturating_add(length_cost(ch.class, start, end, reading, model));
                    if is_last {
                        cost = cost.saturating_add(model.coverage_cost(end, len));
                    }

                    let slot = &mut row.cells[end - lo];
                    if slot.map_or(true, |e| cost < e.cost) {
                        // `len` fits in u32, and so does every position up to it.
                        *slot = Some(Entry {
                            cost,
                            start: start as u32,
                            prev_end: prev_end as u32,
                        });
                    }
                }
            }
        }

        if beam {
            row.prune(model.beam_margin(relaxed));
        }
        if row.states().next().is_none() {
            return None;
        }
        cells_total += row.cells.len();
        rows.push(row);
    }

    let (best_end, best) = rows
        .last()?
        .states()
        .min_by_key(|&(end, e)| (e.cost, end))?;

    let spans = backtrace(&rows, best_end);
    debug!(cost = best.cost, end = best_end, cells = cells_total);
    Some(Solution {
        spans,
        cost: best.cost,
        cells: cells_total,
    })
}

fn span_bounds(class: CharClass, model: &AlignmentModel, relaxed: bool) -> (usize, usize) {
    let (min, max) = match class {
        CharClass::Kanji => (model.min_kana_per_kanji, model.max_kana_per_kanji),
        CharClass::Kana | CharClass::Other => (1, 1),
    };
    if relaxed {
        (0, max)
    } else {
        (min, max)
    }
}

/// Cost that depends only on where a character starts. `None` means the
/// start position breaks a hard constraint.
fn start_cost(ch: &SourceChar<'_>, start: usize, model: &AlignmentModel, relaxed: bool) -> Option<i64> {
    let (Some(&first), Some(&last)) = (ch.occurrences.first(), ch.occurrences.last()) else {
        return Some(0);
    };
    if !relaxed && !(first..=last).contains(&start) {
        return None;
    }
    Some(
        model
            .strong
            .saturating_mul(nearest_distance(ch.occurrences, start) as i64),
    )
}

fn nearest_distance(sorted: &[usize], target: usize) -> usize {
    let idx = sorted.partition_point(|&p| p < target);
    let after = sorted.get(idx).map(|&p| p - target);
    let before = idx.checked_sub(1).map(|j| target - sorted[j]);
    match (before, after) {
        (Some(b), Some(a)) => b.min(a),
        (Some(d), None) | (None, Some(d)) => d,
        (None, None) => 0,
    }
}

fn length_cost(
    class: CharClass,
    start: usize,
    end: usize,
    reading: &ReadingInfo,
    model: &AlignmentModel,
) -> i64 {
    let span_len = end - start;
    let mut cost: i64 = 0;
    if span_len == 0 {
        cost = cost.saturating_add(model.required);
    }
    if class == CharClass::Kanji {
        let boundaries = [start, end]
            .into_iter()
            .filter(|&idx| reading.is_small_at(idx))
            .count();
        cost = cost
            .saturating_add(model.kanji_length_cost(span_len))
            .saturating_add(model.small_kana_boundary.saturating_mul(boundaries as i64));
    }
    cost
}

fn backtrace(rows: &[Row], last_end: usize) -> Vec<Span> {
    let mut spans = Vec::with_capacity(rows.len());
    let mut end = last_end;
    for row in rows.iter().rev() {
        // Every entry on the best path has a predecessor by construction.
        let Some(entry) = row.get(end) else {
            break;
        };
        spans.push(Span {
            start: entry.start as usize,
            end,
        });
        end = entry.prev_end as usize;
    }
    spans.reverse();
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{DefaultScriptClassifier, ScriptClassifier};
    use crate::settings::settings;
    use crate::unicode::is_small_kana;

    struct Fixture {
        classes: Vec<CharClass>,
        occurrences: Vec<Vec<usize>>,
        info: ReadingInfo,
    }

    impl Fixture {
        fn new(source: &str, reading: &str) -> Self {
            let sc = DefaultScriptClassifier;
            let norm: Vec<String> = reading
                .chars()
                .map(|c| sc.normalize_to_hiragana(&c.to_string()))
                .collect();
            let classes: Vec<CharClass> = source.chars().map(|c| CharClass::of(&sc, c)).collect();
            let occurrences = source
                .chars()
                .zip(&classes)
                .map(|(c, &class)| {
                    if class == CharClass::Kanji {
                        return Vec::new();
                    }
                    let own = sc.normalize_to_hiragana(&c.to_string());
                    (0..norm.len()).filter(|&i| norm[i] == own).collect()
                })
                .collect();
            let info = ReadingInfo {
                len: norm.len(),
                small: norm
                    .iter()
                    .map(|r| r.chars().all(is_small_kana) && !r.is_empty())
                    .collect(),
            };
            Self {
                classes,
                occurrences,
                info,
            }
        }

        fn solve(&self, pass: SolvePass, beam: bool) -> Option<Solution> {
            let chars: Vec<SourceChar<'_>> = self
                .classes
                .iter()
                .zip(&self.occurrences)
                .map(|(&class, occ)| SourceChar {
                    class,
                    occurrences: occ,
                })
                .collect();
            let model = AlignmentModel::from_settings(settings());
            solve(&chars, &self.info, &model, pass, beam)
        }
    }

    #[test]
    fn test_beam_matches_exhaustive() {
        let cases = [
            ("容赦ないねいつの間に見失ったルート、暴れだす", "ようしゃないねいつのまにみうしなったるうと、あばれだす"),
            ("心が体を追い越してきたんだよ", "こころがからだをおいこしてきたんだよ"),
            ("追い", "おいかけてい"),
            ("漢字心体", "かんじこころからだ"),
        ];
        for (source, reading) in cases {
            let f = Fixture::new(source, reading);
            let beam = f.solve(SolvePass::Strict, true).unwrap();
            let full = f.solve(SolvePass::Strict, false).unwrap();
            assert_eq!(beam.spans, full.spans, "{source}");
            assert_eq!(beam.cost, full.cost, "{source}");
        }
        let f = Fixture::new("漢字", "か");
        assert!(f.solve(SolvePass::Strict, true).is_none());
        let relaxed = f.solve(SolvePass::Relaxed, true).unwrap();
        assert_eq!(relaxed.cost, f.solve(SolvePass::Relaxed, false).unwrap().cost);
    }

    #[test]
    fn test_rows_stay_narrow_on_long_lines() {
        let source = "容赦ないねいつの間に見失ったルート、暴れだす".repeat(100);
        let reading = "ようしゃないねいつのまにみうしなったるうと、あばれだす".repeat(100);
        let n = source.chars().count();
        let len = reading.chars().count();
        let solution = Fixture::new(&source, &reading)
            .solve(SolvePass::Strict, true)
            .unwrap();
        assert!(solution.cells <= 32 * n, "{} cells for {n} characters", solution.cells);
        assert!(solution.cells * 20 < n * len);
        assert_eq!(solution.spans.last().map(|s| s.end), Some(len));
        assert!(solution.cost < settings().weights.strong);
    }

    #[test]
    fn test_window_caps_by_remaining_characters() {
        // で and す keep the last two reading characters, so 書 stops at 4.
        let f = Fixture::new("書です", "しょしゃです");
        let full = f.solve(SolvePass::Strict, false).unwrap();
        assert_eq!(full.spans[0], Span { start: 0, end: 4 });
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let f = Fixture::new("追い", "おいかけてい");
        let chars: Vec<SourceChar<'_>> = f
            .classes
            .iter()
            .zip(&f.occurrences)
            .map(|(&class, occ)| SourceChar {
                class,
                occurrences: occ,
            })
            .collect();
        let mut model = AlignmentModel::from_settings(settings());
        model.required = i64::MAX;
        model.strong = i64::MAX / 2;
        model.medium = i64::MAX / 4;
        for pass in [SolvePass::Strict, SolvePass::Relaxed] {
            let solution = solve(&chars, &f.info, &model, pass, true).unwrap();
            assert_eq!(solution.spans.len(), 2);
            assert!(solution.cost >= 0);
        }
    }

    #[test]
    fn test_nearest_distance() {
        assert_eq!(nearest_distance(&[2, 5, 9], 5), 0);
        assert_eq!(nearest_distance(&[2, 5, 9], 7), 2);
        assert_eq!(nearest_distance(&[2, 5, 9], 0), 2);
        assert_eq!(nearest_distance(&[2, 5, 9], 12), 3);
        assert_eq!(nearest_distance(&[], 3), 0);
    }

    #[test]
    fn test_span_bounds() {
        let m = AlignmentModel::from_settings(crate::settings::settings());
        assert_eq!(span_bounds(CharClass::Kanji, &m, false), (1, 4));
        assert_eq!(span_bounds(CharClass::Kana, &m, false), (1, 1));
        assert_eq!(span_bounds(CharClass::Other, &m, true), (0, 1));
    }
}
