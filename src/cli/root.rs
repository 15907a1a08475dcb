use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use super::ask::AskCommand;
use super::auth::{LoginCommand, LogoutCommand, RegisterCommand, WhoamiCommand};
use crate::app::App;
use crate::config::Config;

/// Marhaba - your Morocco travel assistant in the terminal
#[derive(Parser)]
#[command(
    name = "marhaba",
    version,
    about = "Your Morocco travel assistant in the terminal",
    long_about = r#"Marhaba is a terminal chat client for the Morocco travel-guide service.
It answers questions about tourist attractions, culture, local customs, and travel tips.

Examples:
  marhaba                                # Start an interactive conversation
  marhaba ask "What is Chefchaouen?"     # Ask a single question
  marhaba login -e amina@example.com     # Sign in and store the token"#
)]
pub struct Cli {
    /// Backend base URL override
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Data directory override (stored token and theme preference)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account
    Register(RegisterCommand),
    /// Sign in and store the bearer token
    Login(LoginCommand),
    /// Remove the stored bearer token
    Logout(LogoutCommand),
    /// Show the signed-in profile
    Whoami(WhoamiCommand),
    /// Ask a single question non-interactively
    Ask(AskCommand),
    /// Start an interactive conversation
    Chat,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        // Initialize configuration and apply command-line overrides
        let mut config = Config::init().await?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
            std::fs::create_dir_all(&config.data_dir)?;
        }
        config.validate()?;
        debug!("Configuration initialized");

        let app = App::new(config)?;

        match self.command {
            Some(Commands::Register(cmd)) => cmd.execute(&app).await,
            Some(Commands::Login(cmd)) => cmd.execute(&app).await,
            Some(Commands::Logout(cmd)) => cmd.execute(&app).await,
            Some(Commands::Whoami(cmd)) => cmd.execute(&app).await,
            Some(Commands::Ask(cmd)) => cmd.execute(&app).await,
            // Interactive conversation is the default mode
            Some(Commands::Chat) | None => app.run_interactive().await,
        }
    }
}
