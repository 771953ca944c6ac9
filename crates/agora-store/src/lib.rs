
pub mod client;
pub use client::RecordStore;

pub mod errors;
pub use errors::{SessionError, StoreError};

pub mod session;
pub use session::SessionFile;
