//! Error types for the application

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types
#[derive(Debug, Error)]
pub enum Error {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Repository errors carrying query context
    #[error("Storage error: {0:#}")]
    Storage(#[source] anyhow::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("{entity} with id={id} was not found")]
    NotFound { entity: String, id: String },

    /// The request is well-formed but violates a state or uniqueness condition
    #[error("{0}")]
    Conflict(String),

    /// The acting user may not see or touch the resource
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A unique constraint rejecting a row means a duplicate, whichever check
/// lost the race
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match duplicate_message(&err) {
            Some(message) => Self::Conflict(message),
            None => Self::Database(err),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<sqlx::Error>().and_then(duplicate_message) {
            Some(message) => Self::Conflict(message),
            None => Self::Storage(err),
        }
    }
}

fn duplicate_message(err: &sqlx::Error) -> Option<String> {
    let sqlx::Error::Database(db) = err else {
        return None;
    };
    if !db.is_unique_violation() {
        return None;
    }

    let message = match db.constraint() {
        Some("uq_users_email") => "A user with this email already exists".to_string(),
        Some("uq_categories_name") => "A category with this name already exists".to_string(),
        Some("uq_friend_groups_owner_title") => "A group with this title already exists".to_string(),
        Some("uq_requests_event_requester") => {
            "The user has already requested to join this event".to_string()
        }
        Some("uq_subscription_requests_open_pair") => {
            "An open subscription request between these users already exists".to_string()
        }
        Some(other) => format!("Duplicate value violates {}", other),
        None => "Duplicate value".to_string(),
    };
    Some(message)
}

impl Error {
    /// Create a NotFound error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a Validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a Forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create an Internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Forbidden(_) => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Storage(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Machine-readable error code used in response bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Database(_) | Self::Storage(_) | Self::Config(_) | Self::Internal(_) => {
                "internal_error"
            }
        }
    }

    /// Whether the message is safe to show to API clients
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
