//! Business rules of the service
//!
//! Services take the pool, call repositories and return [`shared::Result`],
//! so handlers only translate the outcome into an HTTP response.

pub mod access;
pub mod categories;
pub mod compilations;
pub mod events;
pub mod requests;
pub mod subscriptions;
pub mod users;

pub use categories::CategoryService;
pub use compilations::CompilationService;
pub use events::EventService;
pub use requests::RequestService;
pub use subscriptions::SubscriptionService;
pub use users::UserService;
