//! The job orchestration state machine.
//!
//! Owns the single mutable [`Job`] record, enforces the single-flight
//! invariant (at most one outbound job-progressing request at a time),
//! sequences stage-1 → (review →) final stage, and mediates between the
//! transport and the presentation adapter.
//!
//! The job sits behind a mutex so the in-flight check-and-set is atomic;
//! all methods take `&self` and are safe to trigger from concurrent tasks.
//! The lock is never held across a network await: each operation is
//! check-and-arm, await, reconcile.

mod presenter;

pub use presenter::{Controls, FeedbackLevel, Presenter};

use std::path::Path;
use std::sync::Mutex;

use tracing::debug;

use crate::job::{InputSource, Job, JobStatus, SubmissionPrefs};
use crate::review::{EditMap, ReviewModel, build_review_model};
use crate::transport::{Stage1Response, Transport};
use crate::validate::{validate_video_file, validate_watch_url};

const BUSY_NOTICE: &str = "Processing already in progress. Please wait.";

/// Reference to a finished artifact exposed on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub url: String,
    pub filename: String,
}

/// How a submission trigger resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A call was already in flight; nothing was sent.
    Busy,
    /// Local validation (or a mismatched edit map) rejected the trigger;
    /// nothing was sent and no state changed.
    Rejected,
    /// Stage-1 answered in review mode; the review form is on screen.
    AwaitingReview,
    /// Review mode with zero chunks: nothing to edit, back to idle.
    EmptyReview,
    /// The pipeline finished. The artifact is absent when the backend
    /// reported success without a filename.
    Completed { artifact: Option<ArtifactRef> },
    /// The stage failed; the error notice has been presented.
    Failed,
}

pub struct Orchestrator<T, P> {
    transport: T,
    presenter: P,
    job: Mutex<Job>,
}

impl<T: Transport, P: Presenter> Orchestrator<T, P> {
    pub fn new(transport: T, presenter: P) -> Self {
        Self {
            transport,
            presenter,
            job: Mutex::new(Job::default()),
        }
    }

    pub fn status(&self) -> JobStatus {
        self.lock_job().status
    }

    /// Snapshot of the review form currently on screen, if any.
    pub fn review_model(&self) -> Option<ReviewModel> {
        let job = self.lock_job();
        match (&job.id, job.status) {
            (Some(id), JobStatus::AwaitingReview | JobStatus::SubmittingFinal) => {
                Some(build_review_model(id, &job.chunks))
            }
            _ => None,
        }
    }

    /// Validated file submission. Rejects locally (no network call) unless
    /// the file looks like video.
    pub async fn submit_file(&self, path: &Path, prefs: SubmissionPrefs) -> SubmitOutcome {
        if let Err(err) = validate_video_file(path) {
            self.presenter
                .set_feedback(FeedbackLevel::Error, &err.to_string());
            return SubmitOutcome::Rejected;
        }
        self.run_stage1(InputSource::File(path.to_path_buf()), prefs)
            .await
    }

    /// Validated URL submission. Rejects locally unless the URL is a known
    /// watch page.
    pub async fn submit_url(&self, url: &str, prefs: SubmissionPrefs) -> SubmitOutcome {
        let url = url.trim();
        if let Err(err) = validate_watch_url(url) {
            self.presenter
                .set_feedback(FeedbackLevel::Error, &err.to_string());
            return SubmitOutcome::Rejected;
        }
        self.run_stage1(InputSource::Url(url.to_string()), prefs)
            .await
    }

    async fn run_stage1(&self, input: InputSource, prefs: SubmissionPrefs) -> SubmitOutcome {
        // Check-and-arm under the lock; reject overlapping triggers.
        {
            let mut job = self.lock_job();
            if job.status.is_in_flight() {
                self.presenter.set_feedback(FeedbackLevel::Info, BUSY_NOTICE);
                return SubmitOutcome::Busy;
            }
            job.reset();
            job.status = JobStatus::SubmittingStage1;
            job.input = Some(input.clone());
            job.prefs = prefs;
        }

        let mode_text = match prefs.mode {
            crate::job::ReviewMode::Review => "Stage 1 (Segmentation, Transcription & Translation)",
            crate::job::ReviewMode::Direct => "Direct Processing",
        };
        self.presenter.set_controls(Controls::locked());
        self.presenter.clear_review();
        self.presenter.set_feedback(
            FeedbackLevel::Info,
            &format!("Starting {} for: {}", mode_text, input.display_name()),
        );
        self.presenter
            .begin_progress("Processing Video... This may take a while.");

        let result = self.transport.submit_stage1(&input, prefs).await;
        self.presenter.end_progress();

        match result {
            Ok(Stage1Response::Review {
                message,
                review_data,
            }) => {
                if review_data.chunks.is_empty() {
                    // Degenerate review: nothing to edit, short-circuit to idle.
                    debug!(job_id = %review_data.job_id, "stage-1 returned zero chunks");
                    self.lock_job().reset();
                    self.presenter.set_feedback(
                        FeedbackLevel::Info,
                        "No speech segments found to review.",
                    );
                    self.presenter.set_controls(Controls::idle());
                    return SubmitOutcome::EmptyReview;
                }

                let model = build_review_model(&review_data.job_id, &review_data.chunks);
                let playback_urls: Vec<String> = model
                    .entries
                    .iter()
                    .map(|e| self.transport.chunk_url(&review_data.job_id, &e.audio_chunk))
                    .collect();

                {
                    let mut job = self.lock_job();
                    job.id = Some(review_data.job_id);
                    job.chunks = review_data.chunks;
                    job.status = JobStatus::AwaitingReview;
                }
                self.presenter.set_feedback(
                    FeedbackLevel::Success,
                    message
                        .as_deref()
                        .unwrap_or("Translation complete. Please review."),
                );
                self.presenter.render_review(&model, &playback_urls);
                self.presenter.set_controls(Controls::reviewing());
                SubmitOutcome::AwaitingReview
            }
            Ok(Stage1Response::Direct {
                message,
                final_video_filename,
            }) => {
                self.lock_job().reset();
                self.presenter.set_feedback(
                    FeedbackLevel::Success,
                    message.as_deref().unwrap_or("Direct processing complete!"),
                );
                let artifact = ArtifactRef {
                    url: self.transport.artifact_url(&final_video_filename),
                    filename: final_video_filename,
                };
                self.presenter
                    .offer_artifact(&artifact.url, &artifact.filename);
                self.presenter.set_controls(Controls::idle());
                SubmitOutcome::Completed {
                    artifact: Some(artifact),
                }
            }
            Err(err) => {
                // No partial state is retained: inputs cleared, latch released.
                {
                    let mut job = self.lock_job();
                    job.reset();
                    job.status = JobStatus::Failed;
                }
                self.presenter.set_feedback(
                    FeedbackLevel::Error,
                    &format!("Processing Failed: {}", err),
                );
                self.presenter.set_controls(Controls::idle());
                SubmitOutcome::Failed
            }
        }
    }

    /// Submit the (possibly edited) review. Legal only from `AwaitingReview`;
    /// `edits` must cover exactly the rendered chunk indices.
    pub async fn submit_review(&self, edits: &EditMap) -> SubmitOutcome {
        let (job_id, voice) = {
            let mut job = self.lock_job();
            if job.status.is_in_flight() {
                self.presenter.set_feedback(FeedbackLevel::Info, BUSY_NOTICE);
                return SubmitOutcome::Busy;
            }
            if job.status != JobStatus::AwaitingReview {
                self.presenter
                    .set_feedback(FeedbackLevel::Error, "No review in progress.");
                return SubmitOutcome::Rejected;
            }
            if !edit_map_matches(edits, &job.chunks) {
                self.presenter.set_feedback(
                    FeedbackLevel::Error,
                    "Edited text does not match the review segments.",
                );
                return SubmitOutcome::Rejected;
            }
            job.status = JobStatus::SubmittingFinal;
            (
                job.id.clone().expect("awaiting-review job has an id"),
                job.prefs.voice,
            )
        };

        self.presenter.set_controls(Controls::locked());
        self.presenter
            .set_feedback(FeedbackLevel::Info, "Starting Final Stage (TTS & Merging)...");
        self.presenter
            .begin_progress("Generating Final Video... This may take a while.");

        let result = self.transport.submit_final(&job_id, edits, voice).await;
        self.presenter.end_progress();

        match result {
            Ok(resp) => {
                self.lock_job().reset();
                self.presenter.set_feedback(
                    FeedbackLevel::Success,
                    resp.message.as_deref().unwrap_or("Processing complete!"),
                );
                let artifact = resp.final_video_filename.map(|filename| ArtifactRef {
                    url: self.transport.artifact_url(&filename),
                    filename,
                });
                if let Some(ref artifact) = artifact {
                    self.presenter
                        .offer_artifact(&artifact.url, &artifact.filename);
                }
                self.presenter.clear_review();
                self.presenter.set_controls(Controls::idle());
                SubmitOutcome::Completed { artifact }
            }
            Err(err) => {
                // Retry branch: the review view and its edits stay intact,
                // the submit control is re-armed, inputs unblock.
                self.lock_job().status = JobStatus::AwaitingReview;
                self.presenter.set_feedback(
                    FeedbackLevel::Error,
                    &format!("Final Stage Failed: {}", err),
                );
                self.presenter.set_controls(Controls::review_retry());
                SubmitOutcome::Failed
            }
        }
    }

    /// Playback link for one chunk of the current review.
    pub fn playback_url(&self, audio_chunk: &str) -> Option<String> {
        let job = self.lock_job();
        job.id
            .as_ref()
            .map(|id| self.transport.chunk_url(id, audio_chunk))
    }

    fn lock_job(&self) -> std::sync::MutexGuard<'_, Job> {
        // The lock is only ever held for short, non-async sections.
        self.job.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Every rendered chunk index must be present, and nothing else: edits are
/// correlated by array index, so a mismatch would misapply text.
fn edit_map_matches(edits: &EditMap, chunks: &[crate::job::ReviewChunk]) -> bool {
    edits.len() == chunks.len() && chunks.iter().all(|c| edits.contains_key(&c.index))
}
