//! Terminal implementation of the presentation adapter.
//!
//! A spinner marks the two long remote calls; feedback lines are styled by
//! level; the review form is printed as numbered blocks. Control
//! enable/disable has no direct terminal equivalent — the CLI is modal and
//! only offers actions that are currently legal — so `set_controls` is
//! tracked for the submit prompt but draws nothing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::orchestrator::{Controls, FeedbackLevel, Presenter};
use crate::review::ReviewModel;
use crate::ui::icons::{CHECK, CLAPPER, CROSS, INFO, LINK, PENCIL, SPEAKER};

pub struct ConsolePresenter {
    spinner: Mutex<Option<ProgressBar>>,
    submit_armed: AtomicBool,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            submit_armed: AtomicBool::new(false),
        }
    }

    /// Whether the last control update left the final-stage submit
    /// actionable. The CLI consults this before offering the edit prompt.
    pub fn submit_armed(&self) -> bool {
        self.submit_armed.load(Ordering::SeqCst)
    }

    fn println(&self, line: String) {
        // Route through the spinner when one is live so lines don't tear it.
        let spinner = self.spinner.lock().unwrap_or_else(|p| p.into_inner());
        match spinner.as_ref() {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for ConsolePresenter {
    fn set_feedback(&self, level: FeedbackLevel, message: &str) {
        let line = match level {
            FeedbackLevel::Info => format!("{}{}", INFO, style(message).dim()),
            FeedbackLevel::Success => format!("{}{}", CHECK, style(message).green()),
            FeedbackLevel::Error => format!("{}{}", CROSS, style(message).red().bold()),
        };
        self.println(line);
    }

    fn begin_progress(&self, step: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix:.bold.dim} {spinner} {msg}")
                .expect("progress bar template is a valid static string"),
        );
        bar.set_prefix("Job");
        bar.set_message(step.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        let mut spinner = self.spinner.lock().unwrap_or_else(|p| p.into_inner());
        *spinner = Some(bar);
    }

    fn end_progress(&self) {
        let mut spinner = self.spinner.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    }

    fn set_controls(&self, controls: Controls) {
        self.submit_armed
            .store(controls.submit_edits, Ordering::SeqCst);
    }

    fn render_review(&self, model: &ReviewModel, playback_urls: &[String]) {
        self.println(format!(
            "\n{}",
            style(format!(
                "Review {} segment(s) for job {}",
                model.entries.len(),
                model.job_id
            ))
            .bold()
        ));
        self.println(format!("{}", style("═".repeat(70)).cyan()));

        for (entry, url) in model.entries.iter().zip(playback_urls) {
            self.println(format!(
                "\n{}Chunk {} ({:.2}s - {:.2}s)",
                CLAPPER,
                style(entry.index + 1).yellow().bold(),
                entry.start_ms as f64 / 1000.0,
                entry.end_ms as f64 / 1000.0,
            ));
            let transcription = if entry.transcribed_text.is_empty() {
                style("(Transcription failed or empty)").dim().to_string()
            } else {
                entry.transcribed_text.clone()
            };
            self.println(format!(
                "  {} {}  {}",
                style("Original:").dim(),
                transcription,
                style(format!("[{}]", entry.transcription_status)).dim(),
            ));
            self.println(format!(
                "  {}{} {}  {}",
                PENCIL,
                style("Translated:").dim(),
                entry.translated_text,
                style(format!("[{}]", entry.translation_status)).dim(),
            ));
            self.println(format!("  {}{}", SPEAKER, style(url).underlined().dim()));
        }
        self.println(String::new());
    }

    fn clear_review(&self) {
        // Printed output cannot be retracted; the next render starts a
        // fresh block instead.
    }

    fn offer_artifact(&self, url: &str, filename: &str) {
        self.println(format!(
            "{}Download/View {}: {}",
            LINK,
            style(filename).green().bold(),
            style(url).underlined()
        ));
    }
}
