use anyhow::Result;
use chrono::Utc;
use clap::Args;
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::info;

use agora_data::navigation::Route;
use agora_data::{LoginForm, LoginOutcome, Member, RegistrationForm, Retrieve};

use crate::cli::Context;
use crate::formatting::PrintFormatted;

fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new(message)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    Ok(password)
}

#[derive(Args, Debug, Default)]
pub struct Login {
    #[clap(short, long)]
    pub email: Option<String>,
    /// Prompted for when missing
    #[clap(short, long)]
    pub password: Option<String>,
}

impl Login {
    /// Run the command and establish a session
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let email = match self.email {
            Some(email) => email,
            None => Text::new("Email:").prompt()?,
        };
        let password = match self.password {
            Some(password) => password,
            None => prompt_password("Password:")?,
        };

        let form = LoginForm { email, password };
        match form.submit(&ctx.db, Utc::now()).await? {
            LoginOutcome::NotFound => {
                println!("User not found");
            }
            LoginOutcome::Authenticated(session) => {
                ctx.sessions.save(&session)?;
                println!("Logged in as {}.", session.member.username);
                println!("");
                Route::MENU_ENTRIES.print_formatted();
            }
        }
        Ok(())
    }
}

#[derive(Args, Debug, Default)]
pub struct Logout {}

impl Logout {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        if ctx.sessions.clear()? {
            info!("logged out");
            println!("Logged out.");
        } else {
            println!("Not logged in.");
        }
        Ok(())
    }
}

#[derive(Args, Debug, Default)]
pub struct Register {
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub username: Option<String>,
    /// Prompted for when missing
    #[clap(short, long)]
    pub password: Option<String>,
    /// Prompted for when missing
    #[clap(short, long)]
    pub confirm_password: Option<String>,
}

impl Register {
    /// Run the command and create an account
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let email = match self.email {
            Some(email) => email,
            None => Text::new("Email:").prompt()?,
        };
        let username = match self.username {
            Some(username) => username,
            None => Text::new("Username:").prompt()?,
        };
        let password = match self.password {
            Some(password) => password,
            None => prompt_password("Password:")?,
        };
        let confirm_password = match self.confirm_password {
            Some(password) => password,
            None => prompt_password("Confirm Password:")?,
        };

        let form = RegistrationForm {
            email,
            username,
            password,
            confirm_password,
        };
        form.submit(&ctx.db).await?;
        println!("Registration successful! Log in with `agora login`.");
        Ok(())
    }
}

#[derive(Args, Debug, Default)]
pub struct WhoAmI {
    /// Reload the record from the store
    #[clap(short, long)]
    pub refresh: bool,
}

impl WhoAmI {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let Some(mut session) = ctx.session()? else {
            println!("Not logged in.");
            return Ok(());
        };
        if self.refresh {
            let member: Member = ctx.db.retrieve(session.member.id.clone()).await?;
            session.replace_member(member);
            ctx.sessions.save(&session)?;
        }
        session.print_formatted();
        Ok(())
    }
}
