use anyhow::Result;
use tracing::{info, warn};

use crate::{
    Loadable, Member, MemberFilter, ProfileDraft, ProfileField, Query, Resource, RosterEntry,
    RosterFilter, Session, Update, ValidationError,
};

pub const NO_MEMBERS_FOUND: &str = "No members found.";

/// One row of the rendered roster table.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterRow<'a> {
    Member(&'a RosterEntry),
    /// Shown instead of an empty table body
    Placeholder,
}

/// The members screen: the own profile as an editable draft and
/// the roster of all members with client side filtering.
#[derive(Debug, Clone)]
pub struct MembersView {
    session: Option<Session>,
    roster: Resource<Vec<RosterEntry>>,
    draft: ProfileDraft,
    save_error: Option<String>,
    pub filter: RosterFilter,
}

impl MembersView {
    pub fn new(session: Option<Session>) -> Self {
        let draft = session
            .as_ref()
            .map(|s| ProfileDraft::from_member(&s.member))
            .unwrap_or_default();
        Self {
            session,
            roster: Resource::new(),
            draft,
            save_error: None,
            filter: RosterFilter::default(),
        }
    }

    /// Create the view and fetch the roster.
    pub async fn activate<DB>(session: Option<Session>, db: &DB) -> Self
    where
        DB: Query<Member, Filter = MemberFilter> + Sync,
    {
        let mut view = Self::new(session);
        view.reload(db).await;
        view
    }

    pub async fn reload<DB>(&mut self, db: &DB) -> &Loadable<Vec<RosterEntry>>
    where
        DB: Query<Member, Filter = MemberFilter> + Sync,
    {
        let request = async {
            let members: Vec<Member> = db.query(&MemberFilter::default()).await?;
            let roster: Vec<RosterEntry> = members.into_iter().map(Member::sanitize).collect();
            anyhow::Ok(roster)
        };
        self.roster
            .load(async {
                request
                    .await
                    .map_err(|err| format!("Failed to fetch user data: {}", err))
            })
            .await
    }

    pub fn state(&self) -> &Loadable<Vec<RosterEntry>> {
        self.roster.state()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Shown when nobody is logged in.
    pub fn notice(&self) -> Option<&'static str> {
        match self.session {
            Some(_) => None,
            None => Some("No user logged in!"),
        }
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.draft.set_password(password);
    }

    /// Saving needs a session, an identifier and a loaded view.
    pub fn can_save(&self) -> bool {
        self.session.is_some() && !self.draft.id().is_empty() && self.state().ready().is_some()
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// Replace the own record with the draft.
    ///
    /// On success session and draft take over the record the store
    /// returned. On failure the draft is kept as it is. Like
    /// `can_save`, this refuses while the roster is not loaded.
    pub async fn save<DB>(&mut self, db: &DB) -> Result<&Session>
    where
        DB: Update<ProfileDraft, Output = Member> + Sync,
    {
        if self.roster.state().ready().is_none() {
            return Err(ValidationError::NotLoaded.into());
        }
        let Some(session) = self.session.as_mut() else {
            return Err(ValidationError::NotLoggedIn.into());
        };
        if self.draft.id().is_empty() {
            return Err(ValidationError::MissingIdentifier.into());
        }

        match db.update(self.draft.clone()).await {
            Ok(member) => {
                info!(id = %member.id, "profile updated");
                session.replace_member(member);
                self.draft = ProfileDraft::from_member(&session.member);
                self.save_error = None;
                Ok(&*session)
            }
            Err(err) => {
                warn!(error = %err, "profile update failed");
                self.save_error = Some(format!("Error: {}", err));
                Err(err)
            }
        }
    }

    /// Roster entries passing the current filter.
    pub fn filtered(&self) -> Vec<&RosterEntry> {
        match self.state() {
            Loadable::Ready(roster) => self.filter.apply(roster),
            _ => Vec::new(),
        }
    }

    pub fn rows(&self) -> Vec<RosterRow<'_>> {
        let rows: Vec<RosterRow<'_>> = self
            .filtered()
            .into_iter()
            .map(RosterRow::Member)
            .collect();
        if rows.is_empty() {
            return vec![RosterRow::Placeholder];
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::testing::MemoryStore;
    use crate::Retrieve;

    fn members() -> Vec<Member> {
        serde_json::from_value(json!([
            {
                "id": "1", "email": "alice@x.com", "username": "alice", "password": "a",
                "name": "Alice", "gender": "F", "year": 2, "interest": "Robotics",
                "university": "TU Berlin", "education": "master", "age": 24
            },
            {
                "id": "2", "email": "bob@x.com", "username": "bob", "password": "b",
                "name": "Bob", "gender": "M", "year": 3, "interest": "Chess",
                "university": "FU Berlin", "education": "bachelor", "age": 21
            }
        ]))
        .unwrap()
    }

    fn session_for(member: &Member) -> Session {
        let now = Utc.with_ymd_and_hms(2024, 11, 29, 10, 0, 0).unwrap();
        Session::establish(member.clone(), now)
    }

    #[tokio::test]
    async fn test_activate_sanitizes_roster() {
        let db = MemoryStore::with_members(members());
        let session = session_for(&db.members()[0]);
        let view = MembersView::activate(Some(session), &db).await;

        let roster = view.state().ready().unwrap();
        assert_eq!(roster.len(), 2);
        for entry in roster {
            let value = serde_json::to_value(entry).unwrap();
            assert!(value.get("id").is_none());
            assert!(value.get("password").is_none());
        }
        assert_eq!(view.draft().id(), "1");
        assert!(view.can_save());
        assert_eq!(view.notice(), None);
    }

    #[tokio::test]
    async fn test_activate_without_session() {
        let db = MemoryStore::with_members(members());
        let mut view = MembersView::activate(None, &db).await;

        assert_eq!(view.notice(), Some("No user logged in!"));
        assert!(!view.can_save());

        let err = view.save(&db).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::NotLoggedIn)
        );
        assert_eq!(db.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_activate_fetch_failure() {
        let db = MemoryStore::with_members(members());
        db.fail_with("connection refused");
        let view = MembersView::activate(None, &db).await;

        assert_eq!(
            view.state().error(),
            Some("Failed to fetch user data: connection refused")
        );
        assert!(!view.can_save());
        assert_eq!(view.rows(), vec![RosterRow::Placeholder]);
    }

    #[tokio::test]
    async fn test_filtering_never_refetches() {
        let db = MemoryStore::with_members(members());
        let mut view = MembersView::activate(None, &db).await;

        view.filter.search = "chess".to_string();
        assert_eq!(view.filtered().len(), 1);
        view.filter.search.clear();
        view.filter.gender = "f".to_string();
        assert_eq!(view.filtered()[0].name, "Alice");
        view.filter.year = "3".to_string();
        assert_eq!(view.rows(), vec![RosterRow::Placeholder]);

        assert_eq!(db.queries.load(Ordering::SeqCst), 1);
        assert_eq!(view.state().ready().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_rows_keep_server_order() {
        let db = MemoryStore::with_members(members());
        let view = MembersView::activate(None, &db).await;
        let names: Vec<&str> = view
            .rows()
            .into_iter()
            .map(|row| match row {
                RosterRow::Member(entry) => entry.name.as_str(),
                RosterRow::Placeholder => "",
            })
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_save_round_trip() {
        let db = MemoryStore::with_members(members());
        let session = session_for(&db.members()[1]);
        let mut view = MembersView::activate(Some(session), &db).await;

        view.set_field(ProfileField::Interest, "Go");
        view.set_field(ProfileField::Year, "4");
        let session = view.save(&db).await.unwrap().clone();

        assert_eq!(session.member.interest, "Go");
        assert_eq!(session.member.year, "4");
        assert_eq!(session.member.password, None);
        assert_eq!(view.draft(), &ProfileDraft::from_member(&session.member));
        assert_eq!(view.save_error(), None);

        // Reload the session from the store
        let stored: Member = db.retrieve("2".to_string()).await.unwrap();
        let mut reloaded = session.clone();
        reloaded.replace_member(stored.clone());
        assert_eq!(reloaded, session);
        assert_eq!(stored.interest, "Go");
        assert_eq!(stored.education, "bachelor");

        // Untouched scalars keep their JSON type, the edited year stays numeric
        let record = serde_json::to_value(&stored).unwrap();
        assert_eq!(record["age"], json!(21));
        assert_eq!(record["year"], json!(4));
        assert_eq!(record["id"], json!("2"));

        // The replace carries no password unless a new one was chosen,
        // so the store no longer has one for this record.
        assert_eq!(stored.password, None);
    }

    #[tokio::test]
    async fn test_save_with_new_password() {
        let db = MemoryStore::with_members(members());
        let session = session_for(&db.members()[1]);
        let mut view = MembersView::activate(Some(session), &db).await;

        view.set_password("hunter2");
        let session = view.save(&db).await.unwrap().clone();
        assert_eq!(session.member.password, None);
        assert!(!view.draft().changes_password());

        let stored: Member = db.retrieve("2".to_string()).await.unwrap();
        assert_eq!(stored.password.as_deref(), Some("hunter2"));
    }

    #[tokio::test]
    async fn test_save_requires_loaded_roster() {
        let db = MemoryStore::with_members(members());
        let session = session_for(&db.members()[0]);
        db.fail_with("connection refused");
        let mut view = MembersView::activate(Some(session), &db).await;
        assert!(!view.can_save());

        let err = view.save(&db).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::NotLoaded)
        );
        assert_eq!(db.updates.load(Ordering::SeqCst), 0);
        assert_eq!(view.save_error(), None);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_draft() {
        let db = MemoryStore::with_members(members());
        let session = session_for(&db.members()[0]);
        let mut view = MembersView::activate(Some(session), &db).await;

        view.set_field(ProfileField::Name, "Alice Liddell");
        db.fail_with("email already taken");
        assert!(view.save(&db).await.is_err());

        assert_eq!(view.save_error(), Some("Error: email already taken"));
        assert_eq!(view.draft().name, "Alice Liddell");
        assert_eq!(view.session().unwrap().member.name, "Alice");
    }

    #[tokio::test]
    async fn test_save_requires_identifier() {
        let db = MemoryStore::with_members(members());
        let session = session_for(&Member {
            email: "ghost@x.com".to_string(),
            ..Default::default()
        });
        let mut view = MembersView::activate(Some(session), &db).await;
        assert!(!view.can_save());

        let err = view.save(&db).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingIdentifier)
        );
        assert_eq!(db.updates.load(Ordering::SeqCst), 0);
    }
}
