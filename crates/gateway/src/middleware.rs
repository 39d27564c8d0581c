//! Gateway middleware

use actix_cors::Cors;
use actix_web::http;
use std::env;

/// Configure CORS middleware
///
/// `ALLOWED_ORIGINS` holds a comma-separated whitelist. Debug builds accept
/// any localhost origin instead.
pub fn cors() -> Cors {
    let origins = allowed_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default());

    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            let origin_str = origin.to_str().unwrap_or("");

            if cfg!(debug_assertions) {
                origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            } else if origins.is_empty() {
                tracing::warn!("ALLOWED_ORIGINS not set. Denying all CORS requests in production.");
                false
            } else {
                origins.iter().any(|allowed| origin_str == allowed)
            }
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![http::header::ACCEPT, http::header::CONTENT_TYPE])
        .max_age(3600)
}

fn allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
