//! Segment realignment core.
//!
//! Pure and synchronous: chunk planning, reply-line normalization,
//! similarity-scored sequence alignment, and chunked/global reassembly.
//! Safe to invoke concurrently per chunk; each call only touches its own
//! local DP tables.

pub mod aligner;
pub mod chunker;
pub mod normalize;
pub mod reassembler;
pub mod similarity;

pub use aligner::{AlignConfig, Aligner};
pub use chunker::plan_chunks;
pub use normalize::{collapse_whitespace, normalize_block, normalize_line};
pub use reassembler::Reassembler;
pub use similarity::score;
