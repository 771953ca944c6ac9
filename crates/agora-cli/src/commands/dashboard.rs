use anyhow::{anyhow, Result};
use clap::Args;

use agora_data::navigation::Route;
use agora_data::{Dashboard, Loadable};

use crate::cli::Context;
use crate::formatting::PrintFormatted;

#[derive(Args, Debug, Default)]
pub struct ShowDashboard {}

impl ShowDashboard {
    /// Run the command and show the statistics
    pub async fn run(self, ctx: &Context) -> Result<()> {
        ctx.enter(Route::Dashboard)?;

        eprintln!("Loading statistics...");
        let dashboard = Dashboard::activate(&ctx.db).await;
        match dashboard.state() {
            Loadable::Ready(statistics) => {
                println!("Dashboard Statistics");
                println!("");
                statistics.print_formatted();
                Ok(())
            }
            Loadable::Failed(message) => Err(anyhow!("Error: {}", message)),
            Loadable::Loading => Ok(()),
        }
    }
}
