use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use inquire::{Confirm, Select, Text};

use agora_data::navigation::Route;
use agora_data::{Loadable, MembersView, ProfileField, RosterFilter};

use crate::cli::Context;
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Filter the member list interactively
    #[clap(name = "browse")]
    Browse(BrowseMembers),
    /// Show your own profile
    #[clap(name = "profile")]
    Profile(ShowProfile),
    /// Edit your own profile
    #[clap(name = "edit")]
    Edit(EditProfile),
}

impl Members {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Members::List(cmd) => cmd.run(ctx).await,
            Members::Browse(cmd) => cmd.run(ctx).await,
            Members::Profile(cmd) => cmd.run(ctx).await,
            Members::Edit(cmd) => cmd.run(ctx).await,
        }
    }
}

/// Enter the members screen and load the roster.
async fn open_view(ctx: &Context) -> Result<MembersView> {
    let session = ctx.enter(Route::Members)?;

    eprintln!("Loading user data...");
    let view = MembersView::activate(session, &ctx.db).await;
    if let Loadable::Failed(message) = view.state() {
        return Err(anyhow!("Error: {}", message));
    }
    if let Some(notice) = view.notice() {
        println!("{}", notice);
    }
    Ok(view)
}

fn print_roster(view: &MembersView) {
    let rows = view.rows();
    println!("{} members.", view.filtered().len());
    rows.print_formatted();
}

#[derive(Args, Debug, Default)]
pub struct ListMembers {
    /// Match any field
    #[clap(short, long, default_value = "")]
    pub search: String,
    #[clap(short, long, default_value = "")]
    pub gender: String,
    #[clap(short, long, default_value = "")]
    pub year: String,
    #[clap(short, long, default_value = "")]
    pub interest: String,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let mut view = open_view(ctx).await?;
        view.filter = RosterFilter {
            search: self.search,
            gender: self.gender,
            year: self.year,
            interest: self.interest,
        };
        print_roster(&view);
        Ok(())
    }
}

#[derive(Args, Debug, Default)]
pub struct BrowseMembers {}

impl BrowseMembers {
    /// Run the command; the roster is fetched once and
    /// filtered on every change.
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let mut view = open_view(ctx).await?;
        print_roster(&view);

        let actions = vec!["Search", "Gender", "Year", "Interest", "Clear filters", "Quit"];
        loop {
            let action = Select::new("Filter members:", actions.clone()).prompt()?;
            match action {
                "Search" => {
                    view.filter.search = Text::new("Search by any field:")
                        .with_initial_value(&view.filter.search)
                        .prompt()?;
                }
                "Gender" => {
                    let gender = Select::new("Gender:", vec!["All", "M", "F"]).prompt()?;
                    view.filter.gender = match gender {
                        "All" => String::new(),
                        other => other.to_string(),
                    };
                }
                "Year" => {
                    view.filter.year = Text::new("Year:")
                        .with_initial_value(&view.filter.year)
                        .prompt()?;
                }
                "Interest" => {
                    view.filter.interest = Text::new("Search by interest:")
                        .with_initial_value(&view.filter.interest)
                        .prompt()?;
                }
                "Clear filters" => view.filter = RosterFilter::default(),
                _ => return Ok(()),
            }
            println!("");
            print_roster(&view);
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ShowProfile {}

impl ShowProfile {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let view = open_view(ctx).await?;
        println!("");
        view.draft().print_formatted();
        println!("");
        Ok(())
    }
}

#[derive(Args, Debug, Default)]
pub struct EditProfile {
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub username: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub interest: Option<String>,
    #[clap(short, long)]
    pub year: Option<String>,
    #[clap(long)]
    pub university: Option<String>,
    #[clap(short, long)]
    pub gender: Option<String>,
    /// Prompt for a new password
    #[clap(long)]
    pub password: bool,
}

impl EditProfile {
    fn changes(&self) -> Vec<(ProfileField, &String)> {
        [
            (ProfileField::Name, &self.name),
            (ProfileField::Username, &self.username),
            (ProfileField::Email, &self.email),
            (ProfileField::Interest, &self.interest),
            (ProfileField::Year, &self.year),
            (ProfileField::University, &self.university),
            (ProfileField::Gender, &self.gender),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_ref().map(|v| (field, v)))
        .collect()
    }

    /// Run command and update the own profile
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let mut view = open_view(ctx).await?;
        if !view.can_save() {
            return Err(anyhow!("Profile can not be saved without a valid login."));
        }

        let before = view.draft().clone();
        for (field, value) in self.changes() {
            view.set_field(field, value.clone());
        }
        if self.password {
            let password = inquire::Password::new("New password:").prompt()?;
            view.set_password(password);
        }
        if view.draft() == &before {
            println!("Nothing to change.");
            return Ok(());
        }

        println!("");
        (before, view.draft().clone()).print_formatted();
        println!("");
        let confirm = Confirm::new("Save changes?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let saved = view.save(&ctx.db).await.map(|_| ());
        if let Err(err) = saved {
            let message = view
                .save_error()
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return Err(anyhow!(message));
        }
        if let Some(session) = view.session() {
            ctx.sessions.save(session)?;
        }
        println!("Profile updated successfully!");
        Ok(())
    }
}
