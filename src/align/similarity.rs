//! Line similarity scoring for the aligner.
//!
//! Scores two text strings in [0, 1] for "are these the same spoken line,
//! possibly corrected": a weighted blend of character-level similarity and
//! token-level Jaccard overlap.

use crate::defaults::{CHAR_SIMILARITY_WEIGHT, TOKEN_JACCARD_WEIGHT};
use std::collections::HashSet;

/// Combined similarity score between two lines, in [0, 1].
///
/// `0.7 * char_similarity + 0.3 * token_jaccard`. Either input being empty
/// short-circuits to 0.0.
pub fn score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    CHAR_SIMILARITY_WEIGHT * char_similarity(a, b) + TOKEN_JACCARD_WEIGHT * token_jaccard(a, b)
}

/// Bag-of-characters similarity: the fraction of the shorter string's
/// characters that occur anywhere in the longer string, over the longer
/// string's length.
///
/// This is a deliberately cheap membership heuristic, not an edit distance.
/// Character position is ignored; only occurrence counts. On equal lengths,
/// `b` is treated as the longer string.
fn char_similarity(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (longer, longer_len, shorter) = if a_len > b_len {
        (a, a_len, b)
    } else {
        (b, b_len, a)
    };

    if longer_len == 0 {
        return 1.0;
    }

    let longer_chars: HashSet<char> = longer.chars().collect();
    let matches = shorter
        .chars()
        .filter(|c| longer_chars.contains(c))
        .count();

    matches as f64 / longer_len as f64
}

/// Jaccard similarity over case-insensitive word tokens.
///
/// Tokens are maximal runs of ASCII alphanumerics and apostrophes. Returns
/// `|intersection| / |union|`, or 0.0 when the union is empty.
fn token_jaccard(a: &str, b: &str) -> f64 {
    let a_tokens = tokenize(a);
    let b_tokens = tokenize(b);

    let union = a_tokens.union(&b_tokens).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a_tokens.intersection(&b_tokens).count();

    intersection as f64 / union as f64
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '\'')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
