use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::{Insert, Member, MemberFilter, ProfileDraft, Query, Registration, Retrieve, Update};

/// In-process record store for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    members: Mutex<Vec<Member>>,
    next_id: AtomicUsize,
    pub queries: AtomicUsize,
    pub updates: AtomicUsize,
    pub inserts: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_members(members: Vec<Member>) -> Self {
        let store = Self::default();
        store.next_id.store(members.len() + 1, Ordering::SeqCst);
        *store.members.lock().unwrap() = members;
        store
    }

    /// Reject every following request with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn members(&self) -> Vec<Member> {
        self.members.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(anyhow!(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Query<Member> for MemoryStore {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let members = self.members.lock().unwrap();
        Ok(members
            .iter()
            .filter(|m| match &filter.email {
                Some(email) => &m.email == email,
                None => true,
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Retrieve<Member> for MemoryStore {
    type Key = String;
    async fn retrieve(&self, key: Self::Key) -> Result<Member> {
        self.check()?;
        let members = self.members.lock().unwrap();
        members
            .iter()
            .find(|m| m.id == key)
            .cloned()
            .ok_or_else(|| anyhow!("Not Found"))
    }
}

#[async_trait]
impl Insert<Registration> for MemoryStore {
    type Output = Member;
    async fn insert(&self, item: Registration) -> Result<Member> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let member = Member {
            id: id.to_string(),
            email: item.email,
            username: item.username,
            password: Some(item.password),
            ..Default::default()
        };
        self.members.lock().unwrap().push(member.clone());
        Ok(member)
    }
}

#[async_trait]
impl Update<ProfileDraft> for MemoryStore {
    type Output = Member;
    /// Replace the whole record with the submitted one, like `PUT`.
    async fn update(&self, item: ProfileDraft) -> Result<Member> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let record: Member = serde_json::from_value(serde_json::to_value(&item)?)?;
        let mut members = self.members.lock().unwrap();
        let slot = members
            .iter_mut()
            .find(|m| m.id == item.id())
            .ok_or_else(|| anyhow!("Not Found"))?;
        *slot = record.clone();
        Ok(record)
    }
}
