//! In-memory record of the current job.
//!
//! The orchestrator exclusively owns one `Job` per session. It is created on
//! the first submission action and reset to defaults when the pipeline
//! reaches a terminal state or the user starts a fresh submission after a
//! failure.

use serde::{Deserialize, Serialize};

/// Lifecycle states of the one job the orchestrator tracks.
///
/// `SubmittingStage1` and `SubmittingFinal` are the two in-flight states;
/// any job-progressing trigger arriving while the status is one of them is
/// rejected without a network call. Modelling the latch as a single enum
/// makes "both stages in flight at once" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Idle,
    SubmittingStage1,
    AwaitingReview,
    SubmittingFinal,
    Completed,
    Failed,
}

impl JobStatus {
    /// True while an outbound submission call is in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, JobStatus::SubmittingStage1 | JobStatus::SubmittingFinal)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Idle => "idle",
            JobStatus::SubmittingStage1 => "submitting-stage1",
            JobStatus::AwaitingReview => "awaiting-review",
            JobStatus::SubmittingFinal => "submitting-final",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Synthesis voice selector, fixed at submission and carried through both
/// remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoicePreference {
    #[default]
    Female,
    Male,
}

impl VoicePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoicePreference::Female => "female",
            VoicePreference::Male => "male",
        }
    }
}

impl std::str::FromStr for VoicePreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "female" => Ok(VoicePreference::Female),
            "male" => Ok(VoicePreference::Male),
            _ => anyhow::bail!("Invalid voice '{}'. Valid values: female, male", s),
        }
    }
}

/// Whether the job routes through the human-edit checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    #[default]
    Direct,
    Review,
}

impl ReviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewMode::Direct => "direct",
            ReviewMode::Review => "review",
        }
    }
}

impl std::str::FromStr for ReviewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(ReviewMode::Direct),
            "review" => Ok(ReviewMode::Review),
            _ => anyhow::bail!("Invalid review mode '{}'. Valid values: direct, review", s),
        }
    }
}

/// User preferences fixed at submission time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionPrefs {
    pub voice: VoicePreference,
    pub mode: ReviewMode,
}

/// The video input for a job. Exactly one of the two forms is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(std::path::PathBuf),
    Url(String),
}

impl InputSource {
    /// Short human-readable name used in progress feedback.
    pub fn display_name(&self) -> String {
        match self {
            InputSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            InputSource::Url(url) => url.clone(),
        }
    }
}

/// One time-bounded speech segment as returned by stage-1.
///
/// `translated_text` is the only field the client mutates; everything else
/// is read-only backend output. Unknown backend bookkeeping fields are
/// ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewChunk {
    pub index: u32,
    pub start_ms: u64,
    pub end_ms: u64,
    #[serde(default)]
    pub transcribed_text: Option<String>,
    #[serde(default)]
    pub transcription_status: Option<String>,
    #[serde(default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub translation_status: Option<String>,
    /// Opaque filename token, templated into the playback link only.
    pub original_audio_chunk: String,
}

/// The single mutable job record.
#[derive(Debug, Clone, Default)]
pub struct Job {
    /// Backend-assigned id; present only after a stage-1 review response.
    pub id: Option<String>,
    pub status: JobStatus,
    pub input: Option<InputSource>,
    pub prefs: SubmissionPrefs,
    /// Present only while the job is in (or retrying) review.
    pub chunks: Vec<ReviewChunk>,
}

impl Job {
    /// Reset to a fresh idle record for the next submission.
    pub fn reset(&mut self) {
        *self = Job::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_covers_both_submission_states() {
        assert!(JobStatus::SubmittingStage1.is_in_flight());
        assert!(JobStatus::SubmittingFinal.is_in_flight());
        assert!(!JobStatus::Idle.is_in_flight());
        assert!(!JobStatus::AwaitingReview.is_in_flight());
        assert!(!JobStatus::Completed.is_in_flight());
        assert!(!JobStatus::Failed.is_in_flight());
    }

    #[test]
    fn voice_preference_parses_case_insensitive() {
        assert_eq!("Female".parse::<VoicePreference>().unwrap(), VoicePreference::Female);
        assert_eq!("MALE".parse::<VoicePreference>().unwrap(), VoicePreference::Male);
        assert!("robot".parse::<VoicePreference>().is_err());
    }

    #[test]
    fn review_mode_defaults_to_direct() {
        assert_eq!(ReviewMode::default(), ReviewMode::Direct);
        assert_eq!(ReviewMode::default().as_str(), "direct");
    }

    #[test]
    fn chunk_decodes_with_unknown_backend_fields() {
        let raw = r#"{
            "index": 0,
            "start_ms": 1200,
            "end_ms": 4800,
            "silence_before_ms": 1200,
            "transcribed_text": "hello there",
            "transcription_status": "OK",
            "translated_text": "vanakkam",
            "translation_status": "OK",
            "original_audio_chunk": "chunk_0.wav"
        }"#;
        let chunk: ReviewChunk = serde_json::from_str(raw).unwrap();
        assert_eq!(chunk.index, 0);
        assert_eq!(chunk.end_ms, 4800);
        assert_eq!(chunk.translated_text.as_deref(), Some("vanakkam"));
        assert_eq!(chunk.original_audio_chunk, "chunk_0.wav");
    }

    #[test]
    fn chunk_decodes_with_missing_text_fields() {
        let raw = r#"{"index": 3, "start_ms": 0, "end_ms": 10, "original_audio_chunk": "chunk_3.wav"}"#;
        let chunk: ReviewChunk = serde_json::from_str(raw).unwrap();
        assert!(chunk.transcribed_text.is_none());
        assert!(chunk.translation_status.is_none());
    }

    #[test]
    fn job_reset_clears_everything() {
        let mut job = Job {
            id: Some("123_clip".into()),
            status: JobStatus::AwaitingReview,
            input: Some(InputSource::Url("https://youtu.be/abc".into())),
            prefs: SubmissionPrefs {
                voice: VoicePreference::Male,
                mode: ReviewMode::Review,
            },
            chunks: vec![],
        };
        job.reset();
        assert!(job.id.is_none());
        assert_eq!(job.status, JobStatus::Idle);
        assert!(job.input.is_none());
        assert_eq!(job.prefs.voice, VoicePreference::Female);
    }

    #[test]
    fn input_source_display_name_uses_file_name() {
        let input = InputSource::File("/tmp/videos/clip.mp4".into());
        assert_eq!(input.display_name(), "clip.mp4");
        let input = InputSource::Url("https://youtube.com/watch?v=x".into());
        assert_eq!(input.display_name(), "https://youtube.com/watch?v=x");
    }
}
