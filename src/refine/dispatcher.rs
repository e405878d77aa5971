//! Chunked refinement orchestration.
//!
//! Plans chunk ranges, dispatches one refiner request per chunk
//! concurrently, joins the replies with the chunk sentinel, and hands the
//! combined text to the reassembler. If any chunk's request fails, the whole
//! batch is abandoned and the original segments come back unchanged — the
//! realignment core is never asked to partially proceed.

use futures_util::future::join_all;

use crate::align::chunker::plan_chunks;
use crate::align::{AlignConfig, Reassembler};
use crate::defaults;
use crate::refine::prompt::build_chunk_prompt;
use crate::refine::refiner::Refiner;
use crate::transcript::{Segment, Video, format_lines};

/// Result of a refinement run.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineOutcome {
    /// Same length and timestamps as the input; only text may differ.
    pub segments: Vec<Segment>,
    /// False when refinement was abandoned and the originals came back.
    pub refined: bool,
}

/// Orchestrates chunked dispatch and reassembly.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    max_per_chunk: usize,
    align: AlignConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Creates a dispatcher with default chunking and alignment settings.
    pub fn new() -> Self {
        Self::with_config(defaults::MAX_SEGMENTS_PER_CHUNK, AlignConfig::default())
    }

    /// Creates a dispatcher with custom settings. The same `max_per_chunk`
    /// is used for planning and reassembly, keeping both sides in sync.
    pub fn with_config(max_per_chunk: usize, align: AlignConfig) -> Self {
        Self {
            max_per_chunk: max_per_chunk.max(1),
            align,
        }
    }

    pub fn max_per_chunk(&self) -> usize {
        self.max_per_chunk
    }

    /// Refine a video's transcript. Convenience wrapper over [`refine`].
    ///
    /// [`refine`]: Dispatcher::refine
    pub async fn refine_video(&self, refiner: &dyn Refiner, video: &Video) -> RefineOutcome {
        self.refine(
            refiner,
            video.title.as_deref(),
            video.description.as_deref(),
            video.segments(),
        )
        .await
    }

    /// Refine `segments`, returning a list of identical length and
    /// timestamps with only text possibly changed.
    pub async fn refine(
        &self,
        refiner: &dyn Refiner,
        title: Option<&str>,
        description: Option<&str>,
        segments: &[Segment],
    ) -> RefineOutcome {
        if segments.is_empty() {
            return RefineOutcome {
                segments: Vec::new(),
                refined: false,
            };
        }

        let ranges = plan_chunks(segments.len(), self.max_per_chunk);
        let prompts: Vec<_> = ranges
            .iter()
            .map(|range| {
                let chunk_text = format_lines(&segments[range.clone()]);
                build_chunk_prompt(title, description, &chunk_text)
            })
            .collect();

        let replies = join_all(prompts.iter().map(|prompt| refiner.refine(prompt))).await;

        let mut combined = String::new();
        for (index, (range, reply)) in ranges.iter().zip(replies).enumerate() {
            let reply = match reply {
                Ok(text) => text,
                Err(e) => {
                    eprintln!(
                        "subfix: chunk {} failed via {}: {} — keeping original transcript",
                        index + 1,
                        refiner.name(),
                        e
                    );
                    return RefineOutcome {
                        segments: segments.to_vec(),
                        refined: false,
                    };
                }
            };

            let expected = range.len();
            let received = reply.trim().lines().filter(|l| !l.trim().is_empty()).count();
            if received != expected {
                eprintln!(
                    "subfix: chunk {} returned {} lines (expected {}); realigning",
                    index + 1,
                    received,
                    expected
                );
            }

            combined.push_str(reply.trim());
            combined.push('\n');
            combined.push_str(defaults::CHUNK_SENTINEL);
            combined.push('\n');
        }

        let reassembler = Reassembler::with_config(self.max_per_chunk, self.align);
        RefineOutcome {
            segments: reassembler.reassemble(segments, &combined),
            refined: true,
        }
    }
}
