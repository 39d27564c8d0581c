//! Explore With Me gateway
//!
//! Public entry point of the platform. Requests are validated here and
//! forwarded to the backend service; its answers are relayed unchanged.

pub mod client;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
