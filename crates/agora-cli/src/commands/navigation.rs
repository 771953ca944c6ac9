use anyhow::Result;
use clap::Args;
use tracing::debug;

use agora_data::navigation::{self, Route};

use crate::cli::Context;
use crate::commands::{ListEvents, ListMembers, Login, Register, ShowDashboard};
use crate::formatting::PrintFormatted;

#[derive(Args, Debug, Default)]
pub struct ShowMenu {}

impl ShowMenu {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let session = ctx.enter(Route::Menu)?;
        if let Some(session) = session {
            println!("Welcome, {}!", session.member.username);
            println!("");
        }
        Route::MENU_ENTRIES.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct OpenRoute {
    /// Path of the screen, e.g. /menu/members
    #[clap(default_value = "/")]
    pub path: String,
}

impl OpenRoute {
    /// Resolve the path and run the screen it leads to
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let authenticated = ctx.session()?.is_some();
        let route = navigation::follow(&self.path, authenticated);
        debug!(path = %self.path, route = %route, "resolved");
        if route.path() != self.path {
            println!("-> {}", route);
        }

        match route {
            Route::Login => Login::default().run(ctx).await,
            Route::Register => Register::default().run(ctx).await,
            Route::Menu => ShowMenu::default().run(ctx).await,
            Route::Dashboard => ShowDashboard::default().run(ctx).await,
            Route::Calendar => ListEvents::default().run(ctx).await,
            Route::Members => ListMembers::default().run(ctx).await,
        }
    }
}
