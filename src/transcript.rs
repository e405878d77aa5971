//! Transcript data model and formatting.
//!
//! `Segment` mirrors the upstream transcript provider's wire shape
//! (camelCase field names, millisecond values that may arrive as strings).
//! Timestamps are immutable through the whole pipeline; refinement only ever
//! rewrites `text`.

use serde::{Deserialize, Serialize};

use crate::align::normalize::collapse_whitespace;

/// One timestamped unit of caption text.
///
/// The segment list is ordered by `start_ms`. Refinement rewrites `text`
/// only; `start_ms`, `end_ms`, and `start_time_label` pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    #[serde(rename = "startMs", deserialize_with = "ms_value")]
    pub start_ms: u64,
    #[serde(rename = "endMs", deserialize_with = "ms_value")]
    pub end_ms: u64,
    /// Human-readable start time, e.g. "1:23". Optional on the wire.
    #[serde(
        rename = "startTimeText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time_label: Option<String>,
}

impl Segment {
    /// Create a segment with no display label, mostly for tests and tools.
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
            start_time_label: None,
        }
    }
}

/// Video metadata plus its transcript, as fetched from the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub transcript: Option<Vec<Segment>>,
}

impl Video {
    /// Parse a video from JSON. Accepts either a full video object or a bare
    /// array of segments.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        if let Ok(segments) = serde_json::from_str::<Vec<Segment>>(json) {
            return Ok(Self {
                title: None,
                description: None,
                transcript: Some(segments),
            });
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn segments(&self) -> &[Segment] {
        self.transcript.as_deref().unwrap_or(&[])
    }
}

/// Upstream APIs deliver millisecond offsets as numbers or decimal strings.
fn ms_value<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MsValue {
        Number(u64),
        Text(String),
    }

    match MsValue::deserialize(deserializer)? {
        MsValue::Number(ms) => Ok(ms),
        MsValue::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid millisecond value: {:?}", text))),
    }
}

/// Format segments as one text-only line per segment, for the LLM prompt.
///
/// Internal newlines are removed so each segment is exactly one line; the
/// reply is expected to come back with the same line structure.
pub fn format_lines(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| collapse_whitespace(&seg.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format segments as `[label] text` lines for display.
///
/// Segments without a label fall back to the bare text.
pub fn format_labeled_lines(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| {
            let text = collapse_whitespace(&seg.text);
            match &seg.start_time_label {
                Some(label) => format!("[{}] {}", label, text),
                None => text,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summary statistics comparing a refined segment list against the original.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineReport {
    /// Segments compared (the shorter of the two lists).
    pub total: usize,
    /// Segments whose trimmed text changed.
    pub changed: usize,
    /// Segments whose timestamps and label survived unchanged.
    pub timestamps_preserved: usize,
    /// Mean character-length delta (refined minus original).
    pub avg_length_delta: f64,
    /// Largest absolute character-length delta.
    pub max_length_delta: usize,
}

impl RefineReport {
    pub fn compare(original: &[Segment], refined: &[Segment]) -> Self {
        let total = original.len().min(refined.len());
        let mut changed = 0;
        let mut timestamps_preserved = 0;
        let mut delta_sum: i64 = 0;
        let mut max_length_delta = 0;

        for (orig, new) in original.iter().zip(refined.iter()) {
            if orig.text.trim() != new.text.trim() {
                changed += 1;
            }
            if orig.start_ms == new.start_ms
                && orig.end_ms == new.end_ms
                && orig.start_time_label == new.start_time_label
            {
                timestamps_preserved += 1;
            }
            let orig_len = orig.text.chars().count();
            let new_len = new.text.chars().count();
            delta_sum += new_len as i64 - orig_len as i64;
            max_length_delta = max_length_delta.max(new_len.abs_diff(orig_len));
        }

        let avg_length_delta = if total > 0 {
            delta_sum as f64 / total as f64
        } else {
            0.0
        };

        Self {
            total,
            changed,
            timestamps_preserved,
            avg_length_delta,
            max_length_delta,
        }
    }

    /// True when every compared segment kept its timestamps and label.
    pub fn all_timestamps_preserved(&self) -> bool {
        self.timestamps_preserved == self.total
    }
}
