//! `dubstage submit` — run one job end to end, including the interactive
//! review loop when the backend hands a transcript back.

use anyhow::{Context, Result};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::path::PathBuf;
use std::sync::Arc;

use dubstage::config::ClientConfig;
use dubstage::orchestrator::{ArtifactRef, Orchestrator, SubmitOutcome};
use dubstage::review::{EditMap, collect_edits};
use dubstage::transport::HttpTransport;
use dubstage::ui::ConsolePresenter;

pub async fn cmd_submit(
    config: &ClientConfig,
    file: Option<PathBuf>,
    url: Option<String>,
    open_artifact: bool,
) -> Result<()> {
    let presenter = Arc::new(ConsolePresenter::new());
    let transport = HttpTransport::new(&config.server_url);
    let orch = Orchestrator::new(transport, presenter.clone());

    let outcome = match (&file, &url) {
        (Some(path), None) => orch.submit_file(path, config.prefs).await,
        (None, Some(url)) => orch.submit_url(url, config.prefs).await,
        _ => anyhow::bail!("Provide a video file or --url (one of the two)"),
    };

    match outcome {
        SubmitOutcome::Completed { artifact } => {
            finish(artifact, open_artifact);
            Ok(())
        }
        SubmitOutcome::AwaitingReview => {
            run_review_loop(&orch, &presenter, open_artifact).await
        }
        SubmitOutcome::EmptyReview => Ok(()),
        // The presenter already showed the reason.
        SubmitOutcome::Rejected | SubmitOutcome::Failed => {
            anyhow::bail!("Submission did not complete")
        }
        SubmitOutcome::Busy => unreachable!("single CLI invocation cannot overlap itself"),
    }
}

/// Interactive edit checkpoint. Edits live here (keyed by chunk index)
/// until the user submits; a failed final stage keeps them for retry.
async fn run_review_loop(
    orch: &Orchestrator<HttpTransport, Arc<ConsolePresenter>>,
    presenter: &Arc<ConsolePresenter>,
    open_artifact: bool,
) -> Result<()> {
    let model = orch
        .review_model()
        .context("Review form missing after stage-1")?;
    let mut texts: Vec<(u32, String)> = model
        .entries
        .iter()
        .map(|e| (e.index, e.translated_text.clone()))
        .collect();

    loop {
        let action = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Review")
            .items(&["Edit a segment", "Submit and generate the video", "Abort"])
            .default(1)
            .interact()?;

        match action {
            0 => edit_one_segment(&mut texts)?,
            1 => {
                if !presenter.submit_armed() {
                    anyhow::bail!("Submission is not available right now");
                }
                let edits: EditMap = collect_edits(texts.iter().cloned());
                match orch.submit_review(&edits).await {
                    SubmitOutcome::Completed { artifact } => {
                        finish(artifact, open_artifact);
                        return Ok(());
                    }
                    SubmitOutcome::Failed => {
                        // Retry branch: edits are intact, ask before looping.
                        let retry = Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt("Final stage failed. Keep your edits and retry?")
                            .default(true)
                            .interact()?;
                        if !retry {
                            anyhow::bail!("Job abandoned after final-stage failure");
                        }
                    }
                    SubmitOutcome::Rejected => anyhow::bail!("Review submission rejected"),
                    other => anyhow::bail!("Unexpected review outcome: {other:?}"),
                }
            }
            _ => {
                println!("{}", style("Review abandoned; job left on the server.").dim());
                return Ok(());
            }
        }
    }
}

fn edit_one_segment(texts: &mut [(u32, String)]) -> Result<()> {
    let labels: Vec<String> = texts
        .iter()
        .map(|(index, text)| format!("Chunk {}: {}", index + 1, truncate(text, 48)))
        .collect();
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which segment?")
        .items(&labels)
        .interact()?;

    let current = texts[picked].1.clone();
    let edited: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Translated text")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    texts[picked].1 = edited;
    Ok(())
}

fn finish(artifact: Option<ArtifactRef>, open_artifact: bool) {
    if let Some(artifact) = artifact
        && open_artifact
        && let Err(err) = open::that(&artifact.url)
    {
        eprintln!("Could not open {}: {}", artifact.url, err);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}
