use std::fmt::Display;
use std::future::Future;

use tracing::debug;

/// State of a view backed by a record store request.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one load of a `Resource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A value loaded from the record store.
///
/// Every load takes a ticket; a result handed in with an outdated
/// ticket belongs to a load that has since been superseded and is
/// dropped.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    generation: u64,
    state: Loadable<T>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            state: Loadable::Loading,
        }
    }
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Loadable<T> {
        &self.state
    }

    /// Start a new load, superseding any load in flight.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = Loadable::Loading;
        Ticket(self.generation)
    }

    /// Apply the result of the load identified by `ticket`.
    /// Returns false when the result is stale and was ignored.
    pub fn complete<E: Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "ignoring stale load");
            return false;
        }
        self.state = match result {
            Ok(value) => Loadable::Ready(value),
            Err(err) => Loadable::Failed(err.to_string()),
        };
        true
    }

    /// Begin, await `request` and complete in one go.
    pub async fn load<F, E>(&mut self, request: F) -> &Loadable<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let ticket = self.begin();
        let result = request.await;
        self.complete(ticket, result);
        &self.state
    }
}
