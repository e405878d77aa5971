//! Chunk planning for refinement dispatch.
//!
//! Splits the segment list into bounded, order-preserving index ranges
//! before dispatch. The reassembler re-runs the same plan from the original
//! segment count to recover chunk boundaries, so planning must be a pure
//! function of `(segment_count, max_per_chunk)`.

use std::ops::Range;

/// Plan half-open `[start, end)` chunk ranges over `segment_count` segments.
///
/// Walks the list in fixed strides of `max_per_chunk`; the final chunk may
/// be shorter. Ranges are contiguous, non-overlapping, and cover every index
/// exactly once, in order. A `max_per_chunk` of 0 is treated as 1.
pub fn plan_chunks(segment_count: usize, max_per_chunk: usize) -> Vec<Range<usize>> {
    let stride = max_per_chunk.max(1);
    let mut ranges = Vec::with_capacity(segment_count.div_ceil(stride));
    let mut start = 0;

    while start < segment_count {
        let end = (start + stride).min(segment_count);
        ranges.push(start..end);
        start = end;
    }

    ranges
}
