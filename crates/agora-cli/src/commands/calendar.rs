use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand};

use agora_data::navigation::Route;
use agora_data::{parse_datetime, Calendar as EventCalendar, CalendarEvent, EventDraft};

use crate::cli::Context;
use crate::formatting::PrintFormatted;

fn datetime_arg(value: &str) -> Result<NaiveDateTime, String> {
    parse_datetime(value).ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got {}", value))
}

fn month_arg(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM, got {}", value))
}

/// The calendar is not stored anywhere; each invocation starts
/// from the two fixture events.
#[derive(Subcommand, Debug)]
pub enum Calendar {
    /// List events
    #[clap(name = "list")]
    List(ListEvents),
    /// Add an event and list the result
    #[clap(name = "add")]
    Add(AddEvent),
}

impl Calendar {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Calendar::List(cmd) => cmd.run(ctx).await,
            Calendar::Add(cmd) => cmd.run(ctx).await,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ListEvents {
    /// Only events of this month (YYYY-MM)
    #[clap(short, long, value_parser = month_arg)]
    pub month: Option<NaiveDate>,
}

impl ListEvents {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        ctx.enter(Route::Calendar)?;
        print_events(&EventCalendar::seeded(), self.month);
        Ok(())
    }
}

/// All events in insertion order, or one month by start time.
fn listed(calendar: &EventCalendar, month: Option<NaiveDate>) -> Vec<&CalendarEvent> {
    match month {
        Some(month) => calendar.month(month.year(), month.month()),
        None => calendar.events().iter().collect(),
    }
}

fn print_events(calendar: &EventCalendar, month: Option<NaiveDate>) {
    listed(calendar, month).print_formatted();
}

#[derive(Args, Debug, Default)]
pub struct AddEvent {
    #[clap(short, long, default_value = "")]
    pub title: String,
    /// Start time (YYYY-MM-DDTHH:MM)
    #[clap(short, long, value_parser = datetime_arg)]
    pub start: Option<NaiveDateTime>,
    /// End time (YYYY-MM-DDTHH:MM)
    #[clap(short, long, value_parser = datetime_arg)]
    pub end: Option<NaiveDateTime>,
}

impl AddEvent {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        ctx.enter(Route::Calendar)?;

        let mut calendar = EventCalendar::seeded();
        calendar.draft = EventDraft {
            title: self.title,
            start: self.start,
            end: self.end,
        };
        let event = calendar.add_event()?;
        println!("Added {}.", event.title);
        println!("");
        print_events(&calendar, None);
        Ok(())
    }
}
