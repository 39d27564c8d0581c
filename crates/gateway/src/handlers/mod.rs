//! HTTP handlers for the gateway

pub mod admin;
pub mod health;
pub mod helpers;
pub mod private;
pub mod public;

pub use health::health_check;
