use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dubstage::config::{ClientConfig, DubstageToml};
use dubstage::job::{ReviewMode, VoicePreference};

mod cmd;

#[derive(Parser)]
#[command(name = "dubstage")]
#[command(version, about = "Client for a multi-stage video dubbing service")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server base URL (overrides dubstage.toml and DUBSTAGE_SERVER_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a video for dubbing
    Submit {
        /// Path to a local video file
        file: Option<PathBuf>,

        /// Watch-page URL instead of a local file
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,

        /// Synthesis voice: female or male
        #[arg(long)]
        voice: Option<String>,

        /// Pause for a transcript review before synthesis
        #[arg(long, conflicts_with = "direct")]
        review: bool,

        /// Skip the review checkpoint even if the config enables it
        #[arg(long)]
        direct: bool,

        /// Open the finished video in the browser
        #[arg(long)]
        open: bool,
    },
    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Write a starter dubstage.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "dubstage=debug".into()),
            )
            .init();
    }

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;

    match cli.command {
        Commands::Submit {
            file,
            url,
            voice,
            review,
            direct,
            open,
        } => {
            let voice = voice
                .as_deref()
                .map(str::parse::<VoicePreference>)
                .transpose()?;
            let mode = if review {
                Some(ReviewMode::Review)
            } else if direct {
                Some(ReviewMode::Direct)
            } else {
                None
            };
            let file_config = DubstageToml::load_or_default(&working_dir)?;
            let config = ClientConfig::resolve(
                &file_config,
                cli.server.as_deref(),
                voice,
                mode,
                cli.verbose,
            );
            cmd::cmd_submit(&config, file, url, open).await?;
        }
        Commands::Config { command } => {
            cmd::cmd_config(&working_dir, command)?;
        }
    }

    Ok(())
}
