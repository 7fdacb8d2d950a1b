//! Publisher domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::trimmed;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create publisher request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePublisherRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 2, max = 48, message = "must be between 2 and 48 characters"))]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 2, max = 32, message = "must be between 2 and 32 characters"))]
    pub city: String,
}

/// Publisher response
#[derive(Debug, Serialize)]
pub struct PublisherResponse {
    pub id: i64,
    pub name: String,
    pub city: String,
}

impl From<Publisher> for PublisherResponse {
    fn from(publisher: Publisher) -> Self {
        Self {
            id: publisher.id,
            name: publisher.name,
            city: publisher.city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_publisher_validation() {
        let ok = CreatePublisherRequest {
            name: "Acme".to_string(),
            city: "Springfield".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = CreatePublisherRequest {
            name: "A".to_string(),
            city: "x".repeat(33),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("city"));
    }

    #[test]
    fn test_padded_name_is_trimmed_before_validation() {
        let req: CreatePublisherRequest =
            serde_json::from_str(r#"{"name": "  A   ", "city": "Springfield"}"#).unwrap();
        assert_eq!(req.name, "A");
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let req: CreatePublisherRequest =
            serde_json::from_str(r#"{"name": " Acme ", "city": " Springfield "}"#).unwrap();
        assert_eq!(req.name, "Acme");
        assert_eq!(req.city, "Springfield");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_response_from_row() {
        let now = Utc::now();
        let response = PublisherResponse::from(Publisher {
            id: 7,
            name: "Acme".to_string(),
            city: "Springfield".to_string(),
            created_at: now,
            updated_at: now,
        });
        assert_eq!(response.id, 7);
        assert_eq!(response.name, "Acme");
        assert_eq!(response.city, "Springfield");
    }
}
