//! Forwarding client for the backend service
//!
//! [`Forwarder`] sends one request to the service and hands back the raw
//! answer. [`ServiceClient`] binds a forwarder to a path prefix such as
//! `/admin/users` so handlers only name what follows it.

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde_json::Value;
use shared::GatewayConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{GatewayError, GatewayResult};

const USER_AGENT: &str = "ewm-gateway/1.0";

/// A request bound for the service
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRequest {
    pub method: Method,
    /// Absolute path on the service, e.g. `/admin/users/3`
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: String,
    pub body: Option<Value>,
}

/// The service's answer, relayed to the client unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ForwardResponse {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string().into_bytes(),
        }
    }
}

/// Sends a request to the service
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, request: ForwardRequest) -> GatewayResult<ForwardResponse>;
}

/// Forwarder backed by a pooled reqwest client
pub struct HttpForwarder {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpForwarder {
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::invalid_config(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.main_server_url.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout_secs,
        })
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, request: ForwardRequest) -> GatewayResult<ForwardResponse> {
        let url = build_url(&self.base_url, &request.path, &request.query);
        debug!(method = %request.method, url = %url, "Forwarding request");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(url = %url, "Service timed out");
                GatewayError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                warn!(url = %url, error = %e, "Service unreachable");
                GatewayError::unavailable(format!("Connection failed: {}", e))
            } else {
                warn!(url = %url, error = %e, "Forwarding failed");
                GatewayError::unavailable(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::unavailable(format!("Failed to read response: {}", e)))?;

        debug!(status, bytes = body.len(), "Service answered");
        Ok(ForwardResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

/// Join base URL, path and query
fn build_url(base_url: &str, path: &str, query: &str) -> String {
    if query.is_empty() {
        format!("{}{}", base_url, path)
    } else {
        format!("{}{}?{}", base_url, path, query)
    }
}

/// Forwards requests under one path prefix
#[derive(Clone)]
pub struct ServiceClient {
    prefix: &'static str,
    forwarder: Arc<dyn Forwarder>,
}

impl ServiceClient {
    pub fn new(prefix: &'static str, forwarder: Arc<dyn Forwarder>) -> Self {
        Self { prefix, forwarder }
    }

    pub async fn get(&self, path: &str, query: &str) -> GatewayResult<ForwardResponse> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        query: &str,
        body: Option<Value>,
    ) -> GatewayResult<ForwardResponse> {
        self.send(Method::POST, path, query, body).await
    }

    pub async fn patch(
        &self,
        path: &str,
        query: &str,
        body: Option<Value>,
    ) -> GatewayResult<ForwardResponse> {
        self.send(Method::PATCH, path, query, body).await
    }

    pub async fn put(&self, path: &str, body: Value) -> GatewayResult<ForwardResponse> {
        self.send(Method::PUT, path, "", Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> GatewayResult<ForwardResponse> {
        self.send(Method::DELETE, path, "", None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &str,
        body: Option<Value>,
    ) -> GatewayResult<ForwardResponse> {
        self.forwarder
            .forward(ForwardRequest {
                method,
                path: format!("{}{}", self.prefix, path),
                query: query.to_string(),
                body,
            })
            .await
    }
}

/// One client per area of the service API
#[derive(Clone)]
pub struct Clients {
    pub admin_users: ServiceClient,
    pub admin_categories: ServiceClient,
    pub admin_events: ServiceClient,
    pub admin_compilations: ServiceClient,
    pub users: ServiceClient,
    pub events: ServiceClient,
    pub compilations: ServiceClient,
    pub categories: ServiceClient,
}

impl Clients {
    pub fn new(forwarder: Arc<dyn Forwarder>) -> Self {
        Self {
            admin_users: ServiceClient::new("/admin/users", forwarder.clone()),
            admin_categories: ServiceClient::new("/admin/categories", forwarder.clone()),
            admin_events: ServiceClient::new("/admin/events", forwarder.clone()),
            admin_compilations: ServiceClient::new("/admin/compilations", forwarder.clone()),
            users: ServiceClient::new("/users", forwarder.clone()),
            events: ServiceClient::new("/events", forwarder.clone()),
            compilations: ServiceClient::new("/compilations", forwarder.clone()),
            categories: ServiceClient::new("/categories", forwarder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use serde_json::json;

    mock! {
        pub Forward {}

        #[async_trait]
        impl Forwarder for Forward {
            async fn forward(&self, request: ForwardRequest) -> GatewayResult<ForwardResponse>;
        }
    }

    #[test]
    fn test_build_url_without_query() {
        assert_eq!(
            build_url("http://svc:9090", "/admin/users/3", ""),
            "http://svc:9090/admin/users/3"
        );
    }

    #[test]
    fn test_build_url_with_query() {
        assert_eq!(
            build_url("http://svc:9090", "/events", "text=jazz&from=0&size=5"),
            "http://svc:9090/events?text=jazz&from=0&size=5"
        );
    }

    #[test]
    fn test_http_forwarder_trims_base_url() {
        let config = GatewayConfig {
            server: shared::config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            main_server_url: "http://svc:9090/".to_string(),
            request_timeout_secs: 5,
        };
        let forwarder = HttpForwarder::new(&config).unwrap();
        assert_eq!(forwarder.base_url, "http://svc:9090");
        assert_eq!(forwarder.timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_service_client_prefixes_path() {
        let mut mock = MockForward::new();
        mock.expect_forward()
            .withf(|req| {
                req.method == Method::DELETE && req.path == "/admin/users/7" && req.body.is_none()
            })
            .times(1)
            .returning(|_| {
                Ok(ForwardResponse {
                    status: 204,
                    content_type: None,
                    body: vec![],
                })
            });

        let client = ServiceClient::new("/admin/users", Arc::new(mock));
        let response = client.delete("/7").await.unwrap();
        assert_eq!(response.status, 204);
    }

    #[tokio::test]
    async fn test_service_client_passes_query_and_body() {
        let mut mock = MockForward::new();
        mock.expect_forward()
            .withf(|req| {
                req.method == Method::PATCH
                    && req.path == "/users/1/subscriptions/4/accept"
                    && req.query == "friendship=true"
                    && req.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(ForwardResponse::json(200, &json!({"id": 4}))));

        let client = ServiceClient::new("/users", Arc::new(mock));
        let response = client
            .patch("/1/subscriptions/4/accept", "friendship=true", None)
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"id":4}"#.to_vec());
    }

    #[tokio::test]
    async fn test_service_client_surfaces_forward_errors() {
        let mut mock = MockForward::new();
        mock.expect_forward()
            .times(1)
            .returning(|_| Err(GatewayError::unavailable("connection refused")));

        let client = ServiceClient::new("/events", Arc::new(mock));
        let err = client.get("", "").await.unwrap_err();
        assert_eq!(err.status_code(), 502);
    }
}
