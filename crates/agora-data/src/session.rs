use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::Member;

/// The logged-in member.
///
/// A session is created on login and ends with an explicit
/// logout or when it is older than the configured lifetime.
/// It is not proof of anything to the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub member: Member,
    pub established_at: DateTime<Utc>,
}

impl Session {
    pub fn establish(member: Member, now: DateTime<Utc>) -> Self {
        Self {
            member: member.public(),
            established_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, lifetime: Duration) -> bool {
        now - self.established_at >= lifetime
    }

    /// Take over the store's representation after an update.
    pub fn replace_member(&mut self, member: Member) {
        self.member = member.public();
    }
}
