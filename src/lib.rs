//! subfix - Caption refinement for timestamped transcripts
//!
//! Sends caption text to an LLM for typo/grammar correction and reconciles
//! the free-form reply back onto the original, immutable timestamps.

// Error handling discipline: the core degrades, it does not panic.
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod align;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod refine;
pub mod transcript;

// Realignment core
pub use align::{AlignConfig, Aligner, Reassembler, normalize_line, plan_chunks};

// Refinement orchestration
#[cfg(feature = "llm")]
pub use refine::OpenRouterRefiner;
pub use refine::{Dispatcher, PassthroughRefiner, RefineOutcome, RefineTracker, Refiner};

// Data model
pub use transcript::{RefineReport, Segment, Video};

// Error handling
pub use error::{Result, SubfixError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.3.1+abc1234"` when git hash is available, `"0.3.1"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
