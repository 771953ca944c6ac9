mod auth;
pub use auth::*;

mod members;
pub use members::*;

mod dashboard;
pub use dashboard::*;

mod calendar;
pub use calendar::*;

mod navigation;
pub use navigation::*;
