use tracing::debug;

use crate::{Loadable, Member, MemberFilter, Query, Resource};

pub const UNKNOWN_LABEL: &str = "unknown";

/// Counts per label, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    title: &'static str,
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            entries: Vec::new(),
        }
    }

    /// A table listing `labels` even when nothing is counted for them.
    pub fn with_labels(title: &'static str, labels: &[&str]) -> Self {
        Self {
            title,
            entries: labels.iter().map(|label| (label.to_string(), 0)).collect(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn count(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn add(&mut self, label: &str) {
        let label = if label.is_empty() { UNKNOWN_LABEL } else { label };
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((label.to_string(), 1)),
        }
    }

    fn map_labels(mut self, f: impl Fn(&str) -> String) -> Self {
        for (label, _) in self.entries.iter_mut() {
            if label != UNKNOWN_LABEL {
                *label = f(label);
            }
        }
        self
    }
}

fn gender_label(gender: &str) -> &str {
    match gender.to_lowercase().as_str() {
        "m" | "male" => "Male",
        "f" | "female" => "Female",
        _ => gender,
    }
}

fn education_label(education: &str) -> &str {
    match education.to_lowercase().as_str() {
        "bachelor" => "Bachelor",
        "master" => "Master",
        _ => education,
    }
}

/// Member statistics shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub gender: FrequencyTable,
    pub education: FrequencyTable,
    pub interest: FrequencyTable,
    pub university: FrequencyTable,
    pub year: FrequencyTable,
    pub age: FrequencyTable,
}

impl Statistics {
    pub fn from_members(members: &[Member]) -> Self {
        let mut gender = FrequencyTable::with_labels("Gender Distribution", &["Male", "Female"]);
        let mut education =
            FrequencyTable::with_labels("Education Levels", &["Bachelor", "Master"]);
        let mut interest = FrequencyTable::new("Interests");
        let mut university = FrequencyTable::new("University Attendance");
        let mut year = FrequencyTable::new("Year of Study");
        let mut age = FrequencyTable::new("Age Distribution");

        for member in members {
            gender.add(gender_label(&member.gender));
            education.add(education_label(&member.education));
            interest.add(&member.interest);
            university.add(&member.university);
            year.add(&member.year);
            age.add(&member.age);
        }

        Self {
            gender,
            education,
            interest,
            university,
            year: year.map_labels(|y| format!("{} Year", y)),
            age,
        }
    }

    pub fn tables(&self) -> [&FrequencyTable; 6] {
        [
            &self.gender,
            &self.education,
            &self.interest,
            &self.university,
            &self.year,
            &self.age,
        ]
    }
}

/// The dashboard screen
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    statistics: Resource<Statistics>,
}

impl Dashboard {
    pub async fn activate<DB>(db: &DB) -> Self
    where
        DB: Query<Member, Filter = MemberFilter> + Sync,
    {
        let mut dashboard = Self::default();
        dashboard
            .statistics
            .load(async {
                let members = db
                    .query(&MemberFilter::default())
                    .await
                    .map_err(|err| format!("Failed to fetch members data: {}", err))?;
                debug!(members = members.len(), "computing statistics");
                Ok::<_, String>(Statistics::from_members(&members))
            })
            .await;
        dashboard
    }

    pub fn state(&self) -> &Loadable<Statistics> {
        self.statistics.state()
    }
}
