use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    is_valid_email, Insert, Member, MemberFilter, Query, Registration, Session, ValidationError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Authenticated(Session),
    /// No member with this email
    NotFound,
}

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Look up the member by email and establish a session.
    pub async fn submit<DB>(&self, db: &DB, now: DateTime<Utc>) -> Result<LoginOutcome>
    where
        DB: Query<Member, Filter = MemberFilter> + Sync,
    {
        self.validate()?;

        debug!(email = %self.email, "looking up member");
        let members = db
            .query(&MemberFilter {
                email: Some(self.email.clone()),
            })
            .await?;

        let Some(member) = members.into_iter().next() else {
            return Ok(LoginOutcome::NotFound);
        };
        info!(id = %member.id, "logged in");
        Ok(LoginOutcome::Authenticated(Session::establish(member, now)))
    }
}

#[derive(Debug, Default, Clone)]
pub struct RegistrationForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty()
            || self.username.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    /// Create the account. The new member is not logged in.
    pub async fn submit<DB>(self, db: &DB) -> Result<Member>
    where
        DB: Insert<Registration, Output = Member> + Sync,
    {
        self.validate()?;
        let registration = Registration {
            email: self.email,
            username: self.username,
            password: self.password,
        };
        let member = db.insert(registration).await?;
        info!(id = %member.id, "registered");
        Ok(member.public())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::TimeZone;

    use super::*;
    use crate::testing::MemoryStore;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 29, 10, 0, 0).unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::with_members(vec![Member {
            id: "1".to_string(),
            email: "bob@x.com".to_string(),
            username: "bob".to_string(),
            password: Some("pw".to_string()),
            ..Default::default()
        }])
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email_before_query() {
        let db = store();
        let form = LoginForm {
            email: "bob".to_string(),
            password: "pw".to_string(),
        };
        let err = form.submit(&db, now()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidEmail)
        );
        assert_eq!(db.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_login_rejects_missing_fields() {
        let db = store();
        let form = LoginForm {
            email: "bob@x.com".to_string(),
            ..Default::default()
        };
        let err = form.submit(&db, now()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingCredentials)
        );
        assert_eq!(db.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_login_establishes_session() {
        let db = store();
        let form = LoginForm {
            email: "bob@x.com".to_string(),
            password: "pw".to_string(),
        };
        let outcome = form.submit(&db, now()).await.unwrap();
        assert_eq!(db.queries.load(Ordering::SeqCst), 1);

        let LoginOutcome::Authenticated(session) = outcome else {
            panic!("expected a session");
        };
        assert_eq!(session.member.id, "1");
        assert_eq!(session.member.username, "bob");
        assert_eq!(session.member.password, None);
        assert_eq!(session.established_at, now());
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let db = store();
        let form = LoginForm {
            email: "alice@x.com".to_string(),
            password: "pw".to_string(),
        };
        let outcome = form.submit(&db, now()).await.unwrap();
        assert_eq!(outcome, LoginOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords() {
        let db = store();
        let form = RegistrationForm {
            email: "alice@x.com".to_string(),
            username: "alice".to_string(),
            password: "secret".to_string(),
            confirm_password: "Secret".to_string(),
        };
        let err = form.submit(&db).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::PasswordMismatch)
        );
        assert_eq!(db.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        let form = RegistrationForm {
            email: "alice@x.com".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[tokio::test]
    async fn test_register_creates_member() {
        let db = store();
        let form = RegistrationForm {
            email: "alice@x.com".to_string(),
            username: "alice".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        };
        let member = form.submit(&db).await.unwrap();
        assert_eq!(member.email, "alice@x.com");
        assert_eq!(member.password, None);
        assert_eq!(db.members().len(), 2);
    }
}
