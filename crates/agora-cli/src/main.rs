
use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use agora_cli::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::init();
    let ctx = cli.context()?;
    match cli.command {
        Command::Login(cmd) => cmd.run(&ctx).await,
        Command::Logout(cmd) => cmd.run(&ctx).await,
        Command::Register(cmd) => cmd.run(&ctx).await,
        Command::Whoami(cmd) => cmd.run(&ctx).await,
        Command::Menu(cmd) => cmd.run(&ctx).await,
        Command::Open(cmd) => cmd.run(&ctx).await,
        Command::Members(cmd) => cmd.run(&ctx).await,
        Command::Dashboard(cmd) => cmd.run(&ctx).await,
        Command::Calendar(cmd) => cmd.run(&ctx).await,
    }?;

    Ok(())
}
