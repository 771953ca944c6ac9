use crate::RosterEntry;

/// Client side roster filter.
///
/// All clauses must hold; a clause with an empty input always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    /// Substring of any attribute, case insensitive
    pub search: String,
    /// Exact gender, case insensitive
    pub gender: String,
    /// Exact year
    pub year: String,
    /// Substring of the interest, case insensitive
    pub interest: String,
}

impl RosterFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.gender.is_empty()
            && self.year.is_empty()
            && self.interest.is_empty()
    }

    pub fn matches(&self, entry: &RosterEntry) -> bool {
        self.matches_search(entry)
            && self.matches_gender(entry)
            && self.matches_year(entry)
            && self.matches_interest(entry)
    }

    /// Entries passing the filter, in roster order.
    pub fn apply<'a>(&self, roster: &'a [RosterEntry]) -> Vec<&'a RosterEntry> {
        roster.iter().filter(|entry| self.matches(entry)).collect()
    }

    fn matches_search(&self, entry: &RosterEntry) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        entry
            .values()
            .iter()
            .any(|value| value.to_lowercase().contains(&needle))
    }

    fn matches_gender(&self, entry: &RosterEntry) -> bool {
        self.gender.is_empty() || entry.gender.to_lowercase() == self.gender.to_lowercase()
    }

    fn matches_year(&self, entry: &RosterEntry) -> bool {
        self.year.is_empty() || entry.year == self.year
    }

    fn matches_interest(&self, entry: &RosterEntry) -> bool {
        self.interest.is_empty()
            || entry
                .interest
                .to_lowercase()
                .contains(&self.interest.to_lowercase())
    }
}
