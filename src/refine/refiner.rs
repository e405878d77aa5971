//! Refiner trait for LLM transcript correction.

use async_trait::async_trait;

use crate::error::Result;
use crate::refine::prompt::ChunkPrompt;

/// Trait for refining one chunk of transcript text.
///
/// Implementations receive a chunk prompt (system instructions plus the
/// chunk's one-line-per-segment text) and return the corrected text, one
/// line per segment. Replies are free-form; the realignment core reconciles
/// whatever comes back onto the original segments.
#[async_trait]
pub trait Refiner: Send + Sync {
    /// Refine one chunk. The reply should preserve the line structure of
    /// `prompt.chunk_text`, but callers must not rely on it.
    async fn refine(&self, prompt: &ChunkPrompt) -> Result<String>;

    /// Return the name of this refiner for logging.
    fn name(&self) -> &str;
}

/// Passthrough refiner that echoes the chunk text back unchanged.
///
/// Used when refinement is disabled (dry runs) and in tests: the full
/// dispatch and reassembly path runs, and alignment becomes a no-op.
pub struct PassthroughRefiner;

#[async_trait]
impl Refiner for PassthroughRefiner {
    async fn refine(&self, prompt: &ChunkPrompt) -> Result<String> {
        Ok(prompt.chunk_text.clone())
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refine::prompt::build_chunk_prompt;

    #[tokio::test]
    async fn passthrough_echoes_chunk_text() {
        let refiner = PassthroughRefiner;
        let prompt = build_chunk_prompt(Some("Title"), None, "hello wrld\nthis is fine");
        let reply = refiner.refine(&prompt).await.unwrap();
        assert_eq!(reply, "hello wrld\nthis is fine");
    }

    #[test]
    fn passthrough_name_is_passthrough() {
        let refiner = PassthroughRefiner;
        assert_eq!(refiner.name(), "passthrough");
    }

    #[test]
    fn refiner_trait_object_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<Box<dyn Refiner>>();
    }
}
