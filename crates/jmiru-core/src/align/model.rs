use crate::settings::Settings;

/// Solver parameters: span bounds plus one weight per constraint tier.
///
/// Hard constraints prune the search; soft ones add `weight × violation` to
/// the path cost. Weights are spaced so a single violation in a higher tier
/// outweighs the violations a line can realistically accumulate below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentModel {
    /// Reading characters that may be skipped between consecutive spans.
    pub max_unmatched: usize,
    pub average_kana_per_kanji: usize,
    pub min_kana_per_kanji: usize,
    pub max_kana_per_kanji: usize,
    /// Cost of breaking a hard constraint in the relaxed fallback pass.
    pub required: i64,
    pub strong: i64,
    pub medium: i64,
    pub weak: i64,
    /// Cost per kanji span boundary that falls on a small kana.
    pub small_kana_boundary: i64,
}

impl AlignmentModel {
    pub fn from_settings(s: &Settings) -> Self {
        Self {
            max_unmatched: s.alignment.max_unmatched,
            average_kana_per_kanji: s.alignment.average_kana_per_kanji,
            min_kana_per_kanji: s.alignment.min_kana_per_kanji,
            max_kana_per_kanji: s.alignment.max_kana_per_kanji,
            required: s.weights.required,
            strong: s.weights.strong,
            medium: s.weights.medium,
            weak: s.weights.weak,
            small_kana_boundary: s.weights.small_kana_boundary,
        }
    }

    pub fn with_small_kana_boundary(mut self, weight: i64) -> Self {
        self.small_kana_boundary = weight;
        self
    }

    /// How far a DP state may trail the best state of its row before it is
    /// dropped: a few spans' worth of violations in the pass's top tier.
    pub(crate) fn beam_margin(&self, relaxed: bool) -> i64 {
        let tier = if relaxed { self.required } else { self.strong };
        let reach = 2 * (self.max_kana_per_kanji + self.max_unmatched) as i64;
        tier.max(1).saturating_mul(reach)
    }

    /// Penalty for the last span ending at `end` in a reading of `len` characters.
    pub(crate) fn coverage_cost(&self, end: usize, len: usize) -> i64 {
        let shortfall = len.saturating_sub(end) as i64;
        let beyond_slack = len.saturating_sub(end + self.max_unmatched) as i64;
        self.strong
            .saturating_mul(beyond_slack)
            .saturating_add(self.medium.saturating_mul(shortfall))
    }

    pub(crate) fn gap_cost(&self, gap: usize) -> i64 {
        self.strong.saturating_mul(gap as i64)
    }

    pub(crate) fn kanji_length_cost(&self, len: usize) -> i64 {
        self.weak
            .saturating_mul(len.abs_diff(self.average_kana_per_kanji) as i64)
    }
}
