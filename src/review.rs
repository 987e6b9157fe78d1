//! Review session builder — pure transforms between stage-1 chunk records
//! and the editable review payload.
//!
//! No rendering surface is involved here: the orchestrator hands a borrowed
//! view of the chunks in, and gets a freshly built edit map back, so both
//! directions are unit-testable in isolation.

use std::collections::BTreeMap;

use crate::job::ReviewChunk;

/// Edited (or untouched) translation text keyed by chunk index.
///
/// Ordered so the serialized request body is deterministic. The contract is
/// completeness: every rendered chunk appears here, including ones the user
/// never touched — their original translation is resubmitted verbatim.
pub type EditMap = BTreeMap<u32, String>;

/// One display entry of the review form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    /// Correlation key for collecting edits; stable for the chunk's lifetime.
    pub index: u32,
    pub start_ms: u64,
    pub end_ms: u64,
    /// Read-only backend transcription; empty string when transcription failed.
    pub transcribed_text: String,
    pub transcription_status: String,
    /// The editable text, seeded with the backend's translation.
    pub translated_text: String,
    pub translation_status: String,
    /// Opaque token for the playback link, keyed together with the job id.
    pub audio_chunk: String,
}

/// The full review form model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewModel {
    pub job_id: String,
    pub entries: Vec<ReviewEntry>,
}

impl ReviewModel {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map backend chunk records 1:1 into display entries.
///
/// Ordering is preserved from the backend response: the final submission
/// correlates edits by index, so entries must render in the same order they
/// arrived.
pub fn build_review_model(job_id: &str, chunks: &[ReviewChunk]) -> ReviewModel {
    let entries = chunks
        .iter()
        .map(|chunk| ReviewEntry {
            index: chunk.index,
            start_ms: chunk.start_ms,
            end_ms: chunk.end_ms,
            transcribed_text: chunk.transcribed_text.clone().unwrap_or_default(),
            transcription_status: chunk
                .transcription_status
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            translated_text: chunk.translated_text.clone().unwrap_or_default(),
            translation_status: chunk
                .translation_status
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            audio_chunk: chunk.original_audio_chunk.clone(),
        })
        .collect();

    ReviewModel {
        job_id: job_id.to_string(),
        entries,
    }
}

/// Collect the current text of every rendered entry into an edit map.
///
/// The identity transform in the common case, but its contract is that it
/// captures **every** value handed to it, touched or not.
pub fn collect_edits<I>(rendered_values: I) -> EditMap
where
    I: IntoIterator<Item = (u32, String)>,
{
    rendered_values.into_iter().collect()
}
