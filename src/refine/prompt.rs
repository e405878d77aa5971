//! Prompt construction for the refinement pipeline.

/// System instructions sent with every chunk request.
///
/// The constraints matter for realignment quality: the closer the model
/// sticks to one-output-line-per-input-line with similar lengths, the more
/// the aligner degenerates into the cheap identity case.
pub const SYSTEM_PROMPT: &str = "\
You are correcting segments of a video transcript. These segments could be \
from anywhere in the video (beginning, middle, or end). Use the video title \
and description for context.

CRITICAL CONSTRAINTS:
- Only fix typos and grammar. Do NOT change meaning or structure.
- PRESERVE ALL NEWLINES: each line is a distinct transcript segment.
- Do NOT add, remove, or merge lines. Keep the same number of lines.
- MAINTAIN SIMILAR LINE LENGTHS: Each output line should be approximately \
the same character count as its corresponding input line (\u{b1}10% tolerance). \
Do NOT expand short lines into long paragraphs. Do NOT condense long lines \
significantly. Keep each line concise.
- If a sentence is broken across lines, keep it broken the same way.
- PRESERVE THE ORIGINAL LANGUAGE: output must be in the same language as \
the input transcript.
- Focus on minimal corrections: fix typos, correct grammar errors, but keep \
expansions/additions to an absolute minimum.";

/// A fully assembled per-chunk request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkPrompt {
    /// System instructions.
    pub system: String,
    /// User message: context preamble followed by the chunk text.
    pub user: String,
    /// The chunk's one-line-per-segment text, kept separate so passthrough
    /// refiners and tests can echo it without re-parsing the user message.
    pub chunk_text: String,
}

/// Build the context preamble from video metadata.
fn user_preamble(title: Option<&str>, description: Option<&str>) -> String {
    format!(
        "Video Title: {}\nVideo Description: {}\n\nTranscript Chunk:",
        title.unwrap_or(""),
        description.unwrap_or("")
    )
}

/// Assemble the prompt for one chunk.
pub fn build_chunk_prompt(
    title: Option<&str>,
    description: Option<&str>,
    chunk_text: &str,
) -> ChunkPrompt {
    ChunkPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: format!("{}\n{}", user_preamble(title, description), chunk_text),
        chunk_text: chunk_text.to_string(),
    }
}
