use std::fmt::Write;

use agora_data::navigation::Route;
use agora_data::{
    CalendarEvent, FrequencyTable, ProfileDraft, RosterRow, Session, Statistics, NO_MEMBERS_FOUND,
    ROSTER_COLUMNS,
};

const BAR_WIDTH: usize = 40;

macro_rules! next_attr {
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

pub trait PrintFormatted {
    fn formatted(&self) -> String;

    fn print_formatted(&self) {
        print!("{}", self.formatted());
    }
}

impl PrintFormatted for ProfileDraft {
    fn formatted(&self) -> String {
        let mut out = String::new();
        writeln!(out, "Name:\t\t{}", self.name).ok();
        writeln!(out, "Username:\t{}", self.username).ok();
        writeln!(out, "Email:\t\t{}", self.email).ok();
        writeln!(out, "ID:\t\t{}", self.id()).ok();
        writeln!(out, "Interest:\t{}", self.interest).ok();
        writeln!(out, "Year:\t\t{}", self.year).ok();
        writeln!(out, "University:\t{}", self.university).ok();
        writeln!(out, "Gender:\t\t{}", self.gender).ok();
        out
    }
}

impl PrintFormatted for (ProfileDraft, ProfileDraft) {
    fn formatted(&self) -> String {
        let (old, new) = self;
        let mut out = String::new();

        let next_name = next_attr!(old, new, name);
        writeln!(out, "Name:\t\t{}{}", old.name, next_name).ok();
        let next_username = next_attr!(old, new, username);
        writeln!(out, "Username:\t{}{}", old.username, next_username).ok();
        let next_email = next_attr!(old, new, email);
        writeln!(out, "Email:\t\t{}{}", old.email, next_email).ok();
        writeln!(out, "ID:\t\t{}", old.id()).ok();
        let next_interest = next_attr!(old, new, interest);
        writeln!(out, "Interest:\t{}{}", old.interest, next_interest).ok();
        let next_year = next_attr!(old, new, year);
        writeln!(out, "Year:\t\t{}{}", old.year, next_year).ok();
        let next_university = next_attr!(old, new, university);
        writeln!(out, "University:\t{}{}", old.university, next_university).ok();
        let next_gender = next_attr!(old, new, gender);
        writeln!(out, "Gender:\t\t{}{}", old.gender, next_gender).ok();
        if new.changes_password() {
            writeln!(out, "Password:\t******** -> (new)").ok();
        }
        out
    }
}

impl PrintFormatted for Vec<RosterRow<'_>> {
    fn formatted(&self) -> String {
        let mut out = String::new();
        writeln!(
            out,
            "{:<24}\t{:<16}\t{:<30}\t{:<6}\t{:<24}\t{:<4}\t{}",
            ROSTER_COLUMNS[0],
            ROSTER_COLUMNS[1],
            ROSTER_COLUMNS[2],
            ROSTER_COLUMNS[3],
            ROSTER_COLUMNS[4],
            ROSTER_COLUMNS[5],
            ROSTER_COLUMNS[6],
        )
        .ok();
        writeln!(out, "{:-<150}", "-").ok();

        for row in self {
            match row {
                RosterRow::Member(entry) => {
                    let [name, username, email, gender, university, year, interest] =
                        entry.columns();
                    writeln!(
                        out,
                        "{:<24}\t{:<16}\t{:<30}\t{:<6}\t{:<24}\t{:<4}\t{}",
                        name, username, email, gender, university, year, interest
                    )
                    .ok();
                }
                RosterRow::Placeholder => {
                    writeln!(out, "{:^150}", NO_MEMBERS_FOUND).ok();
                }
            }
        }
        out
    }
}

impl PrintFormatted for FrequencyTable {
    fn formatted(&self) -> String {
        let mut out = String::new();
        writeln!(out, "{}", self.title()).ok();
        let max = self.entries().iter().map(|(_, c)| *c).max().unwrap_or(0);
        for (label, count) in self.entries() {
            let width = if max == 0 { 0 } else { count * BAR_WIDTH / max };
            writeln!(out, "  {:<24} {:<40} {}", label, "#".repeat(width), count).ok();
        }
        out
    }
}

impl PrintFormatted for Statistics {
    fn formatted(&self) -> String {
        self.tables()
            .iter()
            .map(|table| table.formatted())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PrintFormatted for Vec<&CalendarEvent> {
    fn formatted(&self) -> String {
        let mut out = String::new();
        let mut day = None;
        for event in self {
            let date = event.start.date();
            if day != Some(date) {
                writeln!(out, "{}", date.format("%a %Y-%m-%d")).ok();
                day = Some(date);
            }
            writeln!(
                out,
                "  {} - {}\t{}",
                event.start.format("%H:%M"),
                event.end.format("%H:%M"),
                event.title
            )
            .ok();
        }
        if self.is_empty() {
            writeln!(out, "No events.").ok();
        }
        out
    }
}

impl PrintFormatted for Session {
    fn formatted(&self) -> String {
        let mut out = String::new();
        writeln!(out, "ID:\t\t{}", self.member.id).ok();
        writeln!(out, "Username:\t{}", self.member.username).ok();
        writeln!(out, "Email:\t\t{}", self.member.email).ok();
        writeln!(
            out,
            "Since:\t\t{}",
            self.established_at.format("%Y-%m-%d %H:%M UTC")
        )
        .ok();
        out
    }
}

impl PrintFormatted for [Route] {
    fn formatted(&self) -> String {
        let mut out = String::new();
        for (i, route) in self.iter().enumerate() {
            writeln!(out, "{}. {:<12}agora open {}", i + 1, route.title(), route.path()).ok();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use agora_data::{Member, ProfileField, RosterEntry};
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_profile_diff() {
        let member = Member {
            id: "7".to_string(),
            name: "Eris".to_string(),
            year: "2".to_string(),
            ..Default::default()
        };
        let old = ProfileDraft::from_member(&member);
        let mut new = old.clone();
        new.set(ProfileField::Year, "3");

        let out = (old, new).formatted();
        assert!(out.contains("Year:\t\t2 -> 3\n"));
        assert!(out.contains("Name:\t\tEris\n"));
        assert!(out.contains("ID:\t\t7\n"));
        assert!(!out.contains("Password"));
    }

    #[test]
    fn test_roster_placeholder() {
        let rows: Vec<RosterRow> = vec![RosterRow::Placeholder];
        let out = rows.formatted();
        assert!(out.contains(NO_MEMBERS_FOUND));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_roster_rows() {
        let entry = RosterEntry {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            ..Default::default()
        };
        let rows = vec![RosterRow::Member(&entry)];
        let out = rows.formatted();
        assert!(out.lines().nth(2).unwrap().starts_with("Alice"));
        assert!(out.contains("alice@x.com"));
        assert!(!out.contains(NO_MEMBERS_FOUND));
    }

    #[test]
    fn test_frequency_bars() {
        let mut table = FrequencyTable::new("Interests");
        table.add("AI");
        table.add("AI");
        table.add("Web");
        let out = table.formatted();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Interests");
        assert_eq!(lines[1].matches('#').count(), BAR_WIDTH);
        assert_eq!(lines[2].matches('#').count(), BAR_WIDTH / 2);
        assert!(lines[2].ends_with(" 1"));
    }

    #[test]
    fn test_events_grouped_by_day() {
        let at = |d, h| {
            NaiveDate::from_ymd_opt(2024, 11, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let a = CalendarEvent {
            title: "A".to_string(),
            start: at(29, 10),
            end: at(29, 11),
        };
        let b = CalendarEvent {
            title: "B".to_string(),
            start: at(29, 12),
            end: at(29, 13),
        };
        let out = vec![&a, &b].formatted();
        assert_eq!(out, "Fri 2024-11-29\n  10:00 - 11:00\tA\n  12:00 - 13:00\tB\n");
    }
}
