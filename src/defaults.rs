//! Default configuration constants for subfix.
//!
//! This module provides shared constants used across the alignment core and
//! the refinement orchestration to ensure consistency and eliminate duplication.

/// Default maximum number of segments per refinement chunk.
///
/// Controls how many caption segments are sent to the LLM in one request.
/// Larger chunks mean fewer requests but longer replies, and reply fidelity
/// degrades toward the end of long generations. 40 balances request count
/// against per-chunk reply quality.
pub const MAX_SEGMENTS_PER_CHUNK: usize = 40;

/// Gap penalty for the sequence aligner.
///
/// Cost of leaving an original segment unmatched (or skipping a refined
/// line) during alignment. Must be negative; at -0.30 a pair needs a
/// similarity above ~0.30 before matching beats a double gap.
pub const GAP_PENALTY: f64 = -0.30;

/// Number of trailing segments per chunk protected by the tail guard.
///
/// LLM replies lose fidelity near the end of a generated block (truncation,
/// summarizing instead of transcribing). Suspicious matches within this
/// window are reverted to the original text.
pub const TAIL_GUARD_SIZE: usize = 5;

/// Relative length tolerance for the tail guard.
///
/// Within the tail guard window, a matched line whose character length
/// differs from the original by more than this fraction is discarded in
/// favor of the original text.
pub const LENGTH_TOLERANCE: f64 = 0.10;

/// Weight of character-level similarity in the combined line score.
pub const CHAR_SIMILARITY_WEIGHT: f64 = 0.7;

/// Weight of token-level Jaccard similarity in the combined line score.
pub const TOKEN_JACCARD_WEIGHT: f64 = 0.3;

/// Sentinel inserted between per-chunk replies before reassembly.
///
/// A run of ASCII record-separator control characters. Control characters
/// never appear in natural transcript text, so splitting on this string
/// recovers chunk boundaries unambiguously.
pub const CHUNK_SENTINEL: &str = "\u{1e}\u{1e}\u{1e}";

/// Default LLM model identifier for the OpenRouter refiner.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash-lite";

/// Default OpenRouter API base URL.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Environment variable holding the OpenRouter API key.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_penalty_is_negative() {
        assert!(GAP_PENALTY < 0.0);
    }

    #[test]
    fn similarity_weights_sum_to_one() {
        assert!((CHAR_SIMILARITY_WEIGHT + TOKEN_JACCARD_WEIGHT - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sentinel_is_control_characters_only() {
        assert!(!CHUNK_SENTINEL.is_empty());
        assert!(CHUNK_SENTINEL.chars().all(|c| c.is_control()));
    }
}
