//! `dubstage config` — view or initialize the client configuration.

use anyhow::Result;
use console::style;
use std::path::Path;

use dubstage::config::{CONFIG_FILE_NAME, ClientConfig, DubstageToml, SERVER_URL_ENV};

use super::super::ConfigCommands;

pub fn cmd_config(dir: &Path, command: Option<ConfigCommands>) -> Result<()> {
    match command.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            let file = DubstageToml::load_or_default(dir)?;
            let resolved = ClientConfig::resolve(&file, None, None, None, false);
            println!("{}", style("Resolved configuration").bold());
            println!("  server url:  {}", resolved.server_url);
            println!("  voice:       {}", resolved.prefs.voice.as_str());
            println!("  review mode: {}", resolved.prefs.mode.as_str());
            println!();
            println!(
                "{}",
                style(format!(
                    "Sources: {} < {} < CLI flags",
                    CONFIG_FILE_NAME, SERVER_URL_ENV
                ))
                .dim()
            );
        }
        ConfigCommands::Init => {
            let path = DubstageToml::init(dir)?;
            println!("Initialized {}", path.display());
        }
    }
    Ok(())
}
