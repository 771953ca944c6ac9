use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use agora_data::{
    Insert, Member, MemberFilter, ProfileDraft, Query, Registration, Retrieve, Update,
    ValidationError,
};

use crate::errors::StoreError;

/// HTTP client for the `/users` collection of the record store
#[derive(Debug, Clone)]
pub struct RecordStore {
    client: Client,
    base: Url,
}

impl RecordStore {
    /// Create a client for the store at `base`. Requests never time
    /// out unless a `timeout` is given.
    pub fn open(base: &str, timeout: Option<Duration>) -> Result<Self> {
        let url = Url::parse(base).map_err(|_| StoreError::InvalidUrl(base.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base.to_string()).into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(StoreError::from)?;

        Ok(Self { client, base: url })
    }

    /// Url of the collection, or of a single record.
    pub fn users_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

/// Decode a successful response, or turn it into a `StoreError`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(%status, "record store rejected request");
        return Err(StoreError::rejected(status, &body).into());
    }
    let value = response.json::<T>().await.map_err(StoreError::from)?;
    Ok(value)
}

#[async_trait]
impl Query<Member> for RecordStore {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut request = self.client.get(self.users_url(None));
        if let Some(email) = &filter.email {
            request = request.query(&[("email", email)]);
        }
        debug!(?filter, "GET users");
        let response = request.send().await.map_err(StoreError::from)?;
        read_json(response).await
    }
}

#[async_trait]
impl Retrieve<Member> for RecordStore {
    type Key = String;
    async fn retrieve(&self, id: Self::Key) -> Result<Member> {
        debug!(%id, "GET user");
        let response = self
            .client
            .get(self.users_url(Some(&id)))
            .send()
            .await
            .map_err(StoreError::from)?;
        read_json(response).await
    }
}

#[async_trait]
impl Insert<Registration> for RecordStore {
    type Output = Member;
    async fn insert(&self, registration: Registration) -> Result<Member> {
        debug!(email = %registration.email, "POST users");
        let response = self
            .client
            .post(self.users_url(None))
            .json(&registration)
            .send()
            .await
            .map_err(StoreError::from)?;
        read_json(response).await
    }
}

#[async_trait]
impl Update<ProfileDraft> for RecordStore {
    type Output = Member;
    /// Replace the record with the full draft
    async fn update(&self, draft: ProfileDraft) -> Result<Member> {
        if draft.id().is_empty() {
            return Err(ValidationError::MissingIdentifier.into());
        }
        debug!(id = %draft.id(), "PUT user");
        let response = self
            .client
            .put(self.users_url(Some(draft.id())))
            .json(&draft)
            .send()
            .await
            .map_err(StoreError::from)?;
        read_json(response).await
    }
}
