//! Data Transfer Objects (DTOs) exchanged between clients, the gateway and the service

pub mod categories;
pub mod common;
pub mod compilations;
pub mod events;
pub mod requests;
pub mod subscriptions;
pub mod users;

// Re-exports
pub use categories::*;
pub use common::*;
pub use compilations::*;
pub use events::*;
pub use requests::*;
pub use subscriptions::*;
pub use users::*;
