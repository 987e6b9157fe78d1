//! Presentation adapter contract.
//!
//! The state machine never renders anything itself; it instructs a
//! [`Presenter`] on each transition. This keeps the orchestrator
//! unit-testable without a terminal (or any other rendering surface).

use crate::review::ReviewModel;

/// Severity of a feedback line. Showing an `Error` also clears any
/// previously offered artifact link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Info,
    Success,
    Error,
}

/// Which user controls are currently actionable.
///
/// `inputs` covers every job-initiating control (file selection, URL
/// submission, the voice and review-mode selectors); `submit_edits` is the
/// one final-stage trigger, meaningful only while a review is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub inputs: bool,
    pub submit_edits: bool,
}

impl Controls {
    /// Everything locked: a submission call is in flight.
    pub fn locked() -> Self {
        Self {
            inputs: false,
            submit_edits: false,
        }
    }

    /// Input-ready state with no review on screen.
    pub fn idle() -> Self {
        Self {
            inputs: true,
            submit_edits: false,
        }
    }

    /// Review on screen, inputs hidden behind it.
    pub fn reviewing() -> Self {
        Self {
            inputs: false,
            submit_edits: true,
        }
    }

    /// After a failed final stage: the review stays open and re-armed, and
    /// inputs are re-enabled so the user is not fully blocked.
    pub fn review_retry() -> Self {
        Self {
            inputs: true,
            submit_edits: true,
        }
    }
}

/// Side-effecting collaborator that reflects orchestrator state to the user.
///
/// Implemented for `Arc<P>` so the caller can keep a handle to the same
/// presenter the orchestrator drives.
pub trait Presenter: Send + Sync {
    /// Show a feedback line. An `Error` level clears any artifact link
    /// shown earlier.
    fn set_feedback(&self, level: FeedbackLevel, message: &str);

    /// A long-running remote call has started; show the step description.
    fn begin_progress(&self, step: &str);

    /// The remote call has settled (either way); hide the progress surface.
    fn end_progress(&self);

    /// Enable/disable controls following a transition.
    fn set_controls(&self, controls: Controls);

    /// Render the editable review form. `playback_urls` is index-aligned
    /// with `model.entries`.
    fn render_review(&self, model: &ReviewModel, playback_urls: &[String]);

    /// Tear down the review form.
    fn clear_review(&self);

    /// Expose a link to the finished artifact.
    fn offer_artifact(&self, url: &str, filename: &str);
}

impl<P: Presenter + ?Sized> Presenter for std::sync::Arc<P> {
    fn set_feedback(&self, level: FeedbackLevel, message: &str) {
        self.as_ref().set_feedback(level, message);
    }
    fn begin_progress(&self, step: &str) {
        self.as_ref().begin_progress(step);
    }
    fn end_progress(&self) {
        self.as_ref().end_progress();
    }
    fn set_controls(&self, controls: Controls) {
        self.as_ref().set_controls(controls);
    }
    fn render_review(&self, model: &ReviewModel, playback_urls: &[String]) {
        self.as_ref().render_review(model, playback_urls);
    }
    fn clear_review(&self) {
        self.as_ref().clear_review();
    }
    fn offer_artifact(&self, url: &str, filename: &str) {
        self.as_ref().offer_artifact(url, filename);
    }
}
