//! Request handlers for API endpoints

pub mod categories;
pub mod compilations;
pub mod events;
pub mod health;
pub mod helpers;
pub mod requests;
pub mod subscriptions;
pub mod users;

// Re-export commonly used handlers
pub use categories::*;
pub use compilations::*;
pub use events::*;
pub use health::*;
pub use requests::*;
pub use subscriptions::*;
pub use users::*;
