use anyhow::{anyhow, Result};
use clap::Args;
use std::io::Write;

use crate::app::{App, NOT_LOGGED_IN};

/// Create a new account
#[derive(Args)]
pub struct RegisterCommand {
    /// Display name for the new account
    #[arg(short = 'n', long = "name")]
    pub name: String,

    /// Email address for the new account
    #[arg(short = 'e', long = "email")]
    pub email: String,

    /// Password; prompted for when omitted
    #[arg(short = 'p', long = "password")]
    pub password: Option<String>,
}

impl RegisterCommand {
    pub async fn execute(&self, app: &App) -> Result<()> {
        let password = resolve_password(&self.password)?;

        let receipt = app
            .session()
            .register(&self.name, &self.email, &password)
            .await
            .map_err(|failure| anyhow!(failure.message))?;

        println!("{}", receipt.message);
        println!("You can now sign in with `marhaba login`.");
        Ok(())
    }
}

/// Sign in and store the bearer token
#[derive(Args)]
pub struct LoginCommand {
    /// Email address of the account
    #[arg(short = 'e', long = "email")]
    pub email: String,

    /// Password; prompted for when omitted
    #[arg(short = 'p', long = "password")]
    pub password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(&self, app: &App) -> Result<()> {
        let password = resolve_password(&self.password)?;

        app.session()
            .login(&self.email, &password)
            .await
            .map_err(|failure| anyhow!(failure.message))?;

        match app.session().snapshot().await.user {
            Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
            None => println!("Signed in."),
        }
        Ok(())
    }
}

/// Remove the stored bearer token
#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(&self, app: &App) -> Result<()> {
        app.session().logout().await;
        println!("Signed out.");
        Ok(())
    }
}

/// Show the signed-in profile
#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(&self, app: &App) -> Result<()> {
        app.session().verify_token().await;

        let session = app.session().snapshot().await;
        let user = session.user.ok_or_else(|| anyhow!(NOT_LOGGED_IN))?;

        println!("{} <{}>", user.name, user.email);
        if let Some(created_at) = &user.created_at {
            println!("Member since {}", created_at);
        }
        Ok(())
    }
}

/// Take the password from the flag, or prompt for it on stdin
// TODO: read the password without echoing it back
fn resolve_password(password: &Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password.clone());
    }

    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(anyhow!("No password provided"));
    }
    Ok(password.to_string())
}
