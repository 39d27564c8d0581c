//! Compilation DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::not_blank;
use super::events::EventShortDto;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"events": [1, 2], "pinned": false, "title": "Summer in the city"}))]
pub struct NewCompilationDto {
    #[serde(default)]
    pub events: Vec<i64>,

    #[serde(default)]
    pub pinned: bool,

    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompilationDto {
    pub id: i64,
    pub events: Vec<EventShortDto>,
    pub pinned: bool,
    pub title: String,
}

/// Query parameters for the public compilation listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilationsQuery {
    pub pinned: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_compilation_defaults() {
        let dto: NewCompilationDto = serde_json::from_str(r#"{"title": "Weekend"}"#).unwrap();
        assert!(dto.events.is_empty());
        assert!(!dto.pinned);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_new_compilation_blank_title() {
        let dto = NewCompilationDto {
            events: vec![],
            pinned: true,
            title: " ".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
