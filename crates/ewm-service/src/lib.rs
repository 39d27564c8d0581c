//! Explore With Me backend service
//!
//! This library exposes the routes, handlers, services and repositories of
//! the service for the binary and for integration tests.

pub mod handlers;
pub mod openapi;
pub mod repositories;
pub mod routes;
pub mod services;
