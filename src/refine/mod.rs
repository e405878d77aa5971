//! LLM refinement orchestration.
//!
//! Everything network-shaped lives here, behind the [`Refiner`] trait; the
//! alignment core in [`crate::align`] stays pure.

pub mod dispatcher;
#[cfg(feature = "llm")]
pub mod openrouter;
pub mod prompt;
pub mod refiner;
pub mod tracker;

pub use dispatcher::{Dispatcher, RefineOutcome};
#[cfg(feature = "llm")]
pub use openrouter::OpenRouterRefiner;
pub use prompt::{ChunkPrompt, build_chunk_prompt};
pub use refiner::{PassthroughRefiner, Refiner};
pub use tracker::RefineTracker;
