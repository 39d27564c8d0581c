//! Repository layer for database access

pub mod categories;
pub mod compilations;
pub mod events;
pub mod followers;
pub mod groups;
pub mod locations;
pub mod requests;
pub mod subscriptions;
pub mod users;

// Re-exports
pub use categories::CategoryRepository;
pub use compilations::CompilationRepository;
pub use events::{CompilationEventRow, EventFilter, EventRecord, EventRepository};
pub use followers::FollowerRepository;
pub use groups::GroupRepository;
pub use locations::LocationRepository;
pub use requests::RequestRepository;
pub use subscriptions::SubscriptionRepository;
pub use users::UserRepository;
