
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use agora_data::navigation::{self, Navigation, Route};
use agora_data::Session;
use agora_store::{RecordStore, SessionFile};

use crate::commands::{
    Calendar, Login, Logout, Members, OpenRoute, Register, ShowDashboard, ShowMenu, WhoAmI,
};

/// A hundred years, far below what `chrono::Duration` can hold
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 100;

#[derive(Parser, Debug)]
#[clap(name = "agora", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Base url of the record store
    #[clap(long, env = "AGORA_STORE_URL", default_value = "http://localhost:3000", global = true)]
    pub store_url: String,

    /// Where the session of the logged in member is kept
    #[clap(long, env = "AGORA_SESSION_FILE", default_value = "agora-session.json", global = true)]
    pub session_file: PathBuf,

    /// Sessions older than this are discarded
    #[clap(
        long,
        env = "AGORA_SESSION_TTL_HOURS",
        default_value_t = 12,
        value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_TTL_HOURS),
        global = true
    )]
    pub session_ttl_hours: i64,

    /// Request timeout; requests wait indefinitely if unset
    #[clap(long, env = "AGORA_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn context(&self) -> Result<Context> {
        let db = RecordStore::open(&self.store_url, self.timeout_secs.map(Duration::from_secs))?;
        let sessions = SessionFile::new(
            self.session_file.clone(),
            chrono::Duration::hours(self.session_ttl_hours),
        );
        Ok(Context { db, sessions })
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password
    #[clap(name = "login")]
    Login(Login),
    /// End the current session
    #[clap(name = "logout")]
    Logout(Logout),
    /// Create an account
    #[clap(name = "register")]
    Register(Register),
    /// Show the logged in member
    #[clap(name = "whoami")]
    Whoami(WhoAmI),
    /// Show the menu
    #[clap(name = "menu")]
    Menu(ShowMenu),
    /// Open a screen by its path
    #[clap(name = "open")]
    Open(OpenRoute),
    #[clap(subcommand, name = "members")]
    Members(Members),
    /// Show member statistics
    #[clap(name = "dashboard")]
    Dashboard(ShowDashboard),
    #[clap(subcommand, name = "calendar")]
    Calendar(Calendar),
}

/// Everything a command needs to talk to the outside world
#[derive(Debug, Clone)]
pub struct Context {
    pub db: RecordStore,
    pub sessions: SessionFile,
}

impl Context {
    /// The current session, if any.
    pub fn session(&self) -> Result<Option<Session>> {
        Ok(self.sessions.load(Utc::now())?)
    }

    /// Enter `route`, which may need a logged in member.
    pub fn enter(&self, route: Route) -> Result<Option<Session>> {
        let session = self.session()?;
        match navigation::resolve(route.path(), session.is_some()) {
            Navigation::Show(_) => Ok(session),
            Navigation::Redirect(_) => Err(anyhow!(
                "{} requires a login, run `agora login` first.",
                route.title()
            )),
        }
    }
}
