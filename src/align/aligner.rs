//! Sequence alignment of original segments onto refined reply lines.
//!
//! The LLM reply may merge lines, drop lines, reword, or append commentary.
//! A Needleman-Wunsch-style dynamic program maps each original segment to
//! the refined line that most plausibly corrects it, leaving gaps where no
//! counterpart exists. Gapped originals keep their text, so the output list
//! always has exactly as many segments as the input, with timestamps intact.

use crate::align::similarity::score;
use crate::defaults;
use crate::transcript::Segment;

/// Tuning constants for the aligner. Fixed at construction, not per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignConfig {
    /// Penalty for leaving either side unmatched (must be negative).
    pub gap_penalty: f64,
    /// Trailing window (in segments) protected by the tail guard.
    pub tail_guard_size: usize,
    /// Relative length drift tolerated inside the tail guard window.
    pub length_tolerance: f64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            gap_penalty: defaults::GAP_PENALTY,
            tail_guard_size: defaults::TAIL_GUARD_SIZE,
            length_tolerance: defaults::LENGTH_TOLERANCE,
        }
    }
}

/// Which branch won a DP cell, for backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Original i-1 matched refined j-1.
    Match,
    /// Original i-1 has no refined counterpart.
    SkipOriginal,
    /// Refined j-1 is an extra or noise line.
    SkipRefined,
}

/// Aligner mapping original segment texts onto refined reply lines.
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    config: AlignConfig,
}

impl Aligner {
    /// Creates an aligner with default configuration.
    pub fn new() -> Self {
        Self::with_config(AlignConfig::default())
    }

    /// Creates an aligner with custom configuration.
    pub fn with_config(config: AlignConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Compute the maximum-score alignment path.
    ///
    /// Returns one entry per original index: `Some(j)` when original `i`
    /// matched refined line `j`, `None` for a gap. Allows gaps on either
    /// side; ties break match, then skip-original, then skip-refined.
    pub fn alignment_path(&self, originals: &[&str], refined: &[String]) -> Vec<Option<usize>> {
        let n = originals.len();
        let m = refined.len();
        if n == 0 {
            return Vec::new();
        }

        let gap = self.config.gap_penalty;

        // Plain (n+1) x (m+1) tables; chunk sizes are tens of lines.
        let mut dp = vec![vec![f64::NEG_INFINITY; m + 1]; n + 1];
        let mut back = vec![vec![None::<Step>; m + 1]; n + 1];

        dp[0][0] = 0.0;
        for i in 1..=n {
            dp[i][0] = dp[i - 1][0] + gap;
            back[i][0] = Some(Step::SkipOriginal);
        }
        for j in 1..=m {
            dp[0][j] = dp[0][j - 1] + gap;
            back[0][j] = Some(Step::SkipRefined);
        }

        for i in 1..=n {
            for j in 1..=m {
                // Seed with the match branch so exact ties prefer matching.
                let mut best = dp[i - 1][j - 1] + score(originals[i - 1], &refined[j - 1]);
                let mut step = Step::Match;

                let skip_original = dp[i - 1][j] + gap;
                if skip_original > best {
                    best = skip_original;
                    step = Step::SkipOriginal;
                }

                let skip_refined = dp[i][j - 1] + gap;
                if skip_refined > best {
                    best = skip_refined;
                    step = Step::SkipRefined;
                }

                dp[i][j] = best;
                back[i][j] = Some(step);
            }
        }

        let mut mapping = vec![None; n];
        let (mut i, mut j) = (n, m);
        while i > 0 || j > 0 {
            match back[i][j] {
                Some(Step::Match) if i > 0 && j > 0 => {
                    mapping[i - 1] = Some(j - 1);
                    i -= 1;
                    j -= 1;
                }
                Some(Step::SkipOriginal) if i > 0 => {
                    i -= 1;
                }
                Some(Step::SkipRefined) if j > 0 => {
                    j -= 1;
                }
                // The boundary rows make every cell reachable; this arm only
                // fires if a pointer disagrees with the remaining indices.
                _ => {
                    if i > 0 {
                        i -= 1;
                    } else {
                        j -= 1;
                    }
                }
            }
        }

        mapping
    }

    /// Align original segments to refined lines and build the output list.
    ///
    /// Every original index produces exactly one output segment with its
    /// timestamps untouched. Matched, non-empty refined text replaces the
    /// original text; gaps and empty candidates keep the original. With
    /// `apply_tail_guard`, matches in the trailing window whose length
    /// drifts beyond the tolerance are reverted to the original text.
    pub fn align(
        &self,
        originals: &[Segment],
        refined: &[String],
        apply_tail_guard: bool,
    ) -> Vec<Segment> {
        let texts: Vec<&str> = originals.iter().map(|seg| seg.text.as_str()).collect();
        let mapping = self.alignment_path(&texts, refined);

        let tail_start = if apply_tail_guard {
            originals.len().saturating_sub(self.config.tail_guard_size)
        } else {
            usize::MAX
        };

        originals
            .iter()
            .enumerate()
            .map(|(idx, seg)| {
                let mut text = mapping[idx]
                    .and_then(|j| refined.get(j))
                    .cloned()
                    .unwrap_or_else(|| seg.text.clone());

                if idx >= tail_start && !text.is_empty() {
                    let original_len = seg.text.chars().count().max(1);
                    let candidate_len = text.chars().count();
                    let drift = candidate_len.abs_diff(original_len) as f64 / original_len as f64;
                    if drift > self.config.length_tolerance {
                        text = seg.text.clone();
                    }
                }

                if text.is_empty() {
                    text = seg.text.clone();
                }

                Segment {
                    text,
                    start_ms: seg.start_ms,
                    end_ms: seg.end_ms,
                    start_time_label: seg.start_time_label.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(texts: &[&str]) -> Vec<Segment> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Segment::new(*text, i as u64 * 1000, (i as u64 + 1) * 1000))
            .collect()
    }

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identity_alignment_maps_each_index_to_itself() {
        let aligner = Aligner::new();
        let originals = ["hello world", "this is fine", "goodbye"];
        let refined = lines(&originals);
        let mapping = aligner.alignment_path(&originals, &refined);
        assert_eq!(mapping, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn empty_originals_align_to_nothing() {
        let aligner = Aligner::new();
        assert!(aligner.alignment_path(&[], &lines(&["stray"])).is_empty());
        assert!(aligner.align(&[], &lines(&["stray"]), false).is_empty());
    }

    #[test]
    fn empty_refined_leaves_all_gaps() {
        let aligner = Aligner::new();
        let originals = segments(&["one", "two", "three"]);
        let out = aligner.align(&originals, &[], false);
        assert_eq!(out, originals);
    }

    #[test]
    fn typo_fix_replaces_text_and_keeps_timestamps() {
        let aligner = Aligner::new();
        let originals = segments(&["hello wrld", "this is fine"]);
        let refined = lines(&["hello world", "this is fine"]);
        let out = aligner.align(&originals, &refined, false);
        assert_eq!(out[0].text, "hello world");
        assert_eq!(out[1].text, "this is fine");
        for (orig, new) in originals.iter().zip(&out) {
            assert_eq!(orig.start_ms, new.start_ms);
            assert_eq!(orig.end_ms, new.end_ms);
            assert_eq!(orig.start_time_label, new.start_time_label);
        }
    }

    #[test]
    fn merged_reply_leaves_one_original_gapped() {
        // 3 originals, model merged two spoken lines into one reply line:
        // the two strongest pairs match, the leftover keeps its text.
        let aligner = Aligner::new();
        let originals = segments(&[
            "the quick brown fox",
            "jumps over the lazy dog",
            "and runs away home",
        ]);
        let refined = lines(&[
            "the quick brown fox jumps over the lazy dog",
            "and runs away home",
        ]);
        let out = aligner.align(&originals, &refined, false);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2].text, "and runs away home");
        // no refined line is invented for the gapped index
        let gap_count = out
            .iter()
            .zip(&originals)
            .filter(|(new, orig)| new.text == orig.text)
            .count();
        assert!(gap_count >= 1);
    }

    #[test]
    fn extra_noise_line_is_skipped() {
        let aligner = Aligner::new();
        let originals = segments(&["hello world", "goodbye now"]);
        let refined = lines(&[
            "Here is the corrected transcript:",
            "hello world",
            "goodbye now",
        ]);
        let out = aligner.align(&originals, &refined, false);
        assert_eq!(out[0].text, "hello world");
        assert_eq!(out[1].text, "goodbye now");
    }

    #[test]
    fn output_length_always_matches_originals() {
        let aligner = Aligner::new();
        let originals = segments(&["a b c", "d e f", "g h i", "j k l"]);
        for refined in [
            Vec::new(),
            lines(&["a b c"]),
            lines(&["a b c", "d e f", "g h i", "j k l", "extra", "more extra"]),
        ] {
            let out = aligner.align(&originals, &refined, false);
            assert_eq!(out.len(), originals.len());
        }
    }

    #[test]
    fn tail_guard_reverts_length_drift_in_window() {
        let config = AlignConfig::default();
        let aligner = Aligner::with_config(config);
        let originals = segments(&["the meeting starts at nine tomorrow"]);
        // Same words present so it still matches, but far longer than ±10%.
        let refined = lines(&[
            "the meeting starts at nine tomorrow and there is much more text appended here",
        ]);

        let guarded = aligner.align(&originals, &refined, true);
        assert_eq!(guarded[0].text, originals[0].text);

        let unguarded = aligner.align(&originals, &refined, false);
        assert_eq!(unguarded[0].text, refined[0]);
    }

    #[test]
    fn tail_guard_only_covers_trailing_window() {
        let aligner = Aligner::new();
        // 6 originals: index 0 is outside a 5-segment tail window.
        let originals = segments(&[
            "alpha line number zero",
            "beta line number one",
            "gamma line number two",
            "delta line number three",
            "epsilon line number four",
            "zeta line number five",
        ]);
        let mut refined: Vec<String> = originals.iter().map(|s| s.text.clone()).collect();
        // Drastic rewrite of the first line: outside the window, kept.
        refined[0] = "alpha line number zero with a very large trailing addition".to_string();
        let out = aligner.align(&originals, &refined, true);
        assert_eq!(out[0].text, refined[0]);
    }

    #[test]
    fn tail_guard_allows_small_corrections() {
        let aligner = Aligner::new();
        let originals = segments(&["the meating starts at nine"]);
        let refined = lines(&["the meeting starts at nine"]);
        let out = aligner.align(&originals, &refined, true);
        assert_eq!(out[0].text, "the meeting starts at nine");
    }

    #[test]
    fn empty_refined_candidate_falls_back_to_original() {
        let aligner = Aligner::new();
        let originals = segments(&["keep me"]);
        // An empty refined line scores 0 but can still be matched; the
        // empty-candidate fallback restores the original text.
        let refined = lines(&[""]);
        let out = aligner.align(&originals, &refined, false);
        assert_eq!(out[0].text, "keep me");
    }

    #[test]
    fn alignment_is_deterministic() {
        let aligner = Aligner::new();
        let originals = segments(&["some line", "another line", "a third line"]);
        let refined = lines(&["some line", "a third line"]);
        let first = aligner.align(&originals, &refined, true);
        let second = aligner.align(&originals, &refined, true);
        assert_eq!(first, second);
    }
}
