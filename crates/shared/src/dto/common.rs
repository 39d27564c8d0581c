//! Common DTOs shared across multiple resources

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationError;

use crate::error::{Error, Result};

/// Standard error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// `from`/`size` paging used by every list endpoint
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PageParams {
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    10
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            from: 0,
            size: default_size(),
        }
    }
}

impl PageParams {
    pub fn new(from: i64, size: i64) -> Self {
        Self { from, size }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.from < 0 {
            return Err("Parameter 'from' must be non-negative".to_string());
        }
        if self.size < 1 {
            return Err("Parameter 'size' must be positive".to_string());
        }
        Ok(())
    }

    /// Page size to use in `LIMIT`
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// `from` is rounded down to the start of the page containing it
    pub fn offset(&self) -> i64 {
        (self.from / self.size) * self.size
    }
}

/// Parse a comma-separated list of ids such as `1,2,3`
pub fn parse_id_list(raw: Option<&str>) -> Result<Option<Vec<i64>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| Error::validation(format!("Invalid id in list: '{}'", part.trim())))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Rejects strings made only of whitespace
pub fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_from_error() {
        let err = Error::not_found("User", 5);
        let resp = ErrorResponse::from(&err);
        assert_eq!(resp.error, "not_found");
        assert_eq!(resp.message, "User with id=5 was not found");
        assert!(resp.details.is_none());
    }

    #[test]
    fn test_error_response_serialization() {
        let json = serde_json::to_string(&ErrorResponse::new("conflict", "dup")).unwrap();
        assert!(json.contains("conflict"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_error_response_with_details() {
        let resp = ErrorResponse::with_details(
            "validation_error",
            "Validation failed",
            serde_json::json!({"field": "email"}),
        );
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("details"));
    }

    #[test]
    fn test_page_params_defaults() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.from, 0);
        assert_eq!(params.size, 10);
    }

    #[test]
    fn test_page_offset_rounds_down_to_page() {
        assert_eq!(PageParams::new(0, 10).offset(), 0);
        assert_eq!(PageParams::new(15, 10).offset(), 10);
        assert_eq!(PageParams::new(20, 10).offset(), 20);
        assert_eq!(PageParams::new(3, 2).offset(), 2);
    }

    #[test]
    fn test_page_validate() {
        assert!(PageParams::new(0, 1).validate().is_ok());
        assert!(PageParams::new(-1, 10).validate().unwrap_err().contains("from"));
        assert!(PageParams::new(0, 0).validate().unwrap_err().contains("size"));
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list(None).unwrap(), None);
        assert_eq!(parse_id_list(Some("")).unwrap(), None);
        assert_eq!(parse_id_list(Some("1, 2,3")).unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(parse_id_list(Some("1,x")).unwrap_err().status_code(), 400);
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Concerts").is_ok());
        assert!(not_blank("   ").is_err());
    }
}
