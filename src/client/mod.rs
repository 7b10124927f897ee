//! Registration service client.
//!
//! The registration service exposes two JSON endpoints: a phone lookup and an
//! email registration. This module defines the wire types, the client trait the
//! flow controller depends on, and the HTTP implementation.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::http::HttpRegistrationClient;

/// Transport-level failures talking to the registration service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Connection, TLS or timeout error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Response body was not the expected JSON
    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),
    /// HTTP client could not be constructed
    #[error("Client build error: {0}")]
    Build(String),
}

#[derive(Debug, Serialize)]
pub struct CheckUserRequest<'a> {
    pub phone: &'a str,
}

/// Outcome of a phone lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckUserResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterEmailRequest<'a> {
    pub phone: &'a str,
    pub email: &'a str,
}

/// Outcome of an email registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegisterEmailResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// The registration service as seen by the flow controller.
///
/// Implementations fold non-success HTTP statuses into a negative outcome
/// (`found == false` / `success == false`) and reserve `Err` for transport
/// and decoding failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Looks up a phone number.
    async fn check_user(&self, phone: &str) -> Result<CheckUserResponse, ServiceError>;

    /// Attaches an email address to a verified phone number.
    async fn register_email(
        &self,
        phone: &str,
        email: &str,
    ) -> Result<RegisterEmailResponse, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_defaults_for_missing_fields() {
        let response: CheckUserResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.found);
        assert_eq!(response.message, None);

        let response: RegisterEmailResponse =
            serde_json::from_str(r#"{"message": null}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.message, None);
    }

    #[test]
    fn test_request_wire_shape() {
        let body = serde_json::to_value(RegisterEmailRequest {
            phone: "5551234",
            email: "a@b.com",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"phone": "5551234", "email": "a@b.com"}));
    }
}
