//! Remote-call contract for the two job-progressing endpoints.
//!
//! Both calls are asynchronous and single-shot: no automatic retry, no
//! client-side timeout. The backend's stage-1 response is mode-discriminated
//! and decodes into a closed set of variants; anything else is rejected as a
//! structured error rather than probed field by field.

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::TransportError;
use crate::job::{InputSource, ReviewChunk, SubmissionPrefs, VoicePreference};
use crate::review::EditMap;

/// Payload of a stage-1 `review` response.
///
/// The backend attaches extra bookkeeping fields (base filename, pipeline
/// status, stored voice choice); the client only needs the id and chunks.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewData {
    pub job_id: String,
    #[serde(default)]
    pub chunks: Vec<ReviewChunk>,
}

/// Stage-1 response, discriminated on `mode`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Stage1Response {
    Review {
        #[serde(default)]
        message: Option<String>,
        review_data: ReviewData,
    },
    Direct {
        #[serde(default)]
        message: Option<String>,
        final_video_filename: String,
    },
}

/// Final-stage response. A success without a filename still completes the
/// job; the message is shown without an artifact link.
#[derive(Debug, Clone, Deserialize)]
pub struct FinalResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub final_video_filename: Option<String>,
}

/// The two remote submission calls plus URL templating for the two
/// link-only GET endpoints.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn submit_stage1(
        &self,
        input: &InputSource,
        prefs: SubmissionPrefs,
    ) -> Result<Stage1Response, TransportError>;

    async fn submit_final(
        &self,
        job_id: &str,
        edits: &EditMap,
        voice: VoicePreference,
    ) -> Result<FinalResponse, TransportError>;

    /// Playback/download link for one original audio segment. Never fetched
    /// programmatically; only handed to the presenter.
    fn chunk_url(&self, job_id: &str, audio_chunk: &str) -> String;

    /// Link to the finished artifact.
    fn artifact_url(&self, filename: &str) -> String;
}
