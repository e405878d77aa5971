//! Reassembly of a combined LLM reply onto the original segment list.
//!
//! The dispatcher joins per-chunk replies with a sentinel before handing the
//! combined text here. When the sentinel is present, each reply block is
//! aligned against its recomputed chunk range with the tail guard enabled.
//! Replies without a sentinel (legacy, non-chunked) get one global alignment
//! with the tail guard disabled, since there is no chunk boundary to protect.

use crate::align::aligner::{AlignConfig, Aligner};
use crate::align::chunker::plan_chunks;
use crate::align::normalize::normalize_block;
use crate::defaults;
use crate::transcript::Segment;

/// Routes a combined reply to per-chunk or global alignment.
#[derive(Debug, Clone)]
pub struct Reassembler {
    max_per_chunk: usize,
    aligner: Aligner,
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reassembler {
    /// Creates a reassembler with default chunking and alignment settings.
    pub fn new() -> Self {
        Self::with_config(defaults::MAX_SEGMENTS_PER_CHUNK, AlignConfig::default())
    }

    /// Creates a reassembler with custom settings.
    ///
    /// `max_per_chunk` must equal the value used when planning the dispatch;
    /// chunk ranges are recomputed from it, not received as input.
    pub fn with_config(max_per_chunk: usize, align: AlignConfig) -> Self {
        Self {
            max_per_chunk,
            aligner: Aligner::with_config(align),
        }
    }

    /// Reconcile `reply` onto `originals`.
    ///
    /// Always returns exactly `originals.len()` segments with timestamps
    /// untouched, whatever shape the reply is in. Malformed or missing reply
    /// text degrades to original-text retention, never an error.
    pub fn reassemble(&self, originals: &[Segment], reply: &str) -> Vec<Segment> {
        if reply.contains(defaults::CHUNK_SENTINEL) {
            self.reassemble_chunked(originals, reply)
        } else {
            self.reassemble_global(originals, reply)
        }
    }

    /// Per-chunk alignment of a sentinel-delimited reply.
    fn reassemble_chunked(&self, originals: &[Segment], reply: &str) -> Vec<Segment> {
        let mut blocks: Vec<&str> = reply.split(defaults::CHUNK_SENTINEL).collect();
        let ranges = plan_chunks(originals.len(), self.max_per_chunk);

        // A dropped chunk means fewer blocks than ranges: pad with empty
        // blocks so those chunks fall back to their original text. Extra
        // trailing blocks (e.g. after a trailing sentinel) are ignored.
        while blocks.len() < ranges.len() {
            blocks.push("");
        }

        let mut out = Vec::with_capacity(originals.len());
        for (range, block) in ranges.into_iter().zip(blocks) {
            let chunk = &originals[range];
            let lines = normalize_block(block);
            out.extend(self.aligner.align(chunk, &lines, true));
        }
        out
    }

    /// One global alignment for replies without chunk markers.
    fn reassemble_global(&self, originals: &[Segment], reply: &str) -> Vec<Segment> {
        let lines = normalize_block(reply);
        self.aligner.align(originals, &lines, false)
    }
}
