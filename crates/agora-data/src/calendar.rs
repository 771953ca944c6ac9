use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Parse a local date and time as typed into a form,
/// `2024-11-29T10:00` or `2024-11-29 10:00`.
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

/// The add-event form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl EventDraft {
    pub fn validate(&self) -> Result<CalendarEvent, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(ValidationError::MissingTimes);
        };
        if end <= start {
            return Err(ValidationError::EndNotAfterStart);
        }
        Ok(CalendarEvent {
            title: self.title.clone(),
            start,
            end,
        })
    }
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .unwrap_or_default()
}

/// The calendar screen. Events live only as long as the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    events: Vec<CalendarEvent>,
    pub draft: EventDraft,
}

impl Calendar {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            draft: EventDraft::default(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(vec![
            CalendarEvent {
                title: "Team Meeting".to_string(),
                start: at(2024, 11, 29, 10, 0),
                end: at(2024, 11, 29, 11, 30),
            },
            CalendarEvent {
                title: "Project Deadline".to_string(),
                start: at(2024, 11, 30, 15, 0),
                end: at(2024, 11, 30, 17, 0),
            },
        ])
    }

    /// Events in insertion order
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Validate the draft and append it. The draft is cleared on success
    /// and left alone on failure.
    pub fn add_event(&mut self) -> Result<&CalendarEvent, ValidationError> {
        let event = self.draft.validate()?;
        self.events.push(event);
        self.draft = EventDraft::default();
        Ok(&self.events[self.events.len() - 1])
    }

    /// Events starting in the given month, by start time.
    pub fn month(&self, year: i32, month: u32) -> Vec<&CalendarEvent> {
        let mut events: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|e| e.start.year() == year && e.start.month() == month)
            .collect();
        events.sort_by_key(|e| e.start);
        events
    }
}
