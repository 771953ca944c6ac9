// Operations
mod operations;
pub use operations::*;

// Models
mod members;
pub use members::*;

mod session;
pub use session::*;

mod draft;
pub use draft::*;

mod calendar;
pub use calendar::*;

// Forms and views
mod validation;
pub use validation::*;

mod filter;
pub use filter::*;

mod auth;
pub use auth::*;

mod view;
pub use view::*;

mod members_view;
pub use members_view::*;

mod dashboard;
pub use dashboard::*;

pub mod navigation;

#[cfg(test)]
mod testing;
