use anyhow::{anyhow, Result};
use clap::Args;
use std::io::{self, Read};
use tracing::{debug, info};

use crate::app::App;
use crate::tui::markdown;

/// Ask a single question non-interactively
#[derive(Args)]
pub struct AskCommand {
    /// The question to ask. If not provided, will read from stdin
    pub question: Vec<String>,

    /// Print the raw answer without markdown rendering
    #[arg(short = 'r', long = "raw")]
    pub raw: bool,
}

impl AskCommand {
    pub async fn execute(&self, app: &App) -> Result<()> {
        debug!("Executing ask command");

        // Get the question either from arguments or stdin
        let question = self.get_question()?;

        if question.trim().is_empty() {
            return Err(anyhow!(
                "No question provided. Use arguments or pipe input via stdin."
            ));
        }

        info!(
            "Asking: {}",
            question.chars().take(50).collect::<String>()
        );

        let answer = app.run_non_interactive(&question).await?;

        // Output the answer
        if self.raw {
            println!("{}", answer);
        } else {
            println!("{}", markdown::render(&answer));
        }

        Ok(())
    }

    fn get_question(&self) -> Result<String> {
        if !self.question.is_empty() {
            // Join all arguments into a single question
            Ok(self.question.join(" "))
        } else {
            // Read from stdin
            debug!("Reading question from stdin");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
            Ok(buffer)
        }
    }
}
