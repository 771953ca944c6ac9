use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Query<T> {
    type Filter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<T>>;
}

/// Create a record. The store answers with its own
/// representation, which is not necessarily the payload type.
#[async_trait]
pub trait Insert<T> {
    type Output;
    async fn insert(&self, item: T) -> Result<Self::Output>;
}

/// Replace a record by its identifier.
#[async_trait]
pub trait Update<T> {
    type Output;
    async fn update(&self, item: T) -> Result<Self::Output>;
}

#[async_trait]
pub trait Retrieve<T> {
    type Key;
    async fn retrieve(&self, key: Self::Key) -> Result<T>;
}
