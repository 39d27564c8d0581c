//! Errors raised while forwarding a request to the service

use thiserror::Error;

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The service could not be reached or broke the connection
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service did not answer in time
    #[error("Service did not answer within {0}s")]
    Timeout(u64),

    /// The forwarding client could not be set up from its configuration
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

impl GatewayError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// HTTP status code returned to the client
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unavailable(_) => 502,
            Self::Timeout(_) => 504,
            Self::InvalidConfig(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "bad_gateway",
            Self::Timeout(_) => "gateway_timeout",
            Self::InvalidConfig(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::unavailable("refused").status_code(), 502);
        assert_eq!(GatewayError::Timeout(30).status_code(), 504);
        assert_eq!(GatewayError::invalid_config("tls backend").status_code(), 500);
    }

    #[test]
    fn test_config_error_is_internal() {
        let err = GatewayError::invalid_config("tls backend");
        assert_eq!(err.code(), "internal_error");
        assert_eq!(err.to_string(), "Configuration error: tls backend");
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            GatewayError::Timeout(30).to_string(),
            "Service did not answer within 30s"
        );
    }
}
