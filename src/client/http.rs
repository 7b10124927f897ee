use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::{
    CheckUserRequest, CheckUserResponse, RegisterEmailRequest, RegisterEmailResponse,
    RegistrationService, ServiceError,
};
use crate::config::ServiceConfig;

/// Registration service client speaking JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    client: Client,
    check_user_url: String,
    register_email_url: String,
}

impl HttpRegistrationClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Build(e.to_string()))?;

        let base_url = config.base_url.trim_end_matches('/');

        Ok(Self {
            client,
            check_user_url: format!("{}{}", base_url, config.check_user_path),
            register_email_url: format!("{}{}", base_url, config.register_email_path),
        })
    }

    /// POSTs `body` as JSON and decodes the JSON reply regardless of status.
    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<(StatusCode, R), ServiceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(url = %url, "Sending registration service request");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Failed to send request");
                ServiceError::Http(e)
            })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let reply = serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                status = %status,
                error = %e,
                "Failed to parse registration service response"
            );
            ServiceError::Decode(e)
        })?;

        debug!(status = %status, "Registration service response received");
        Ok((status, reply))
    }
}

#[async_trait]
impl RegistrationService for HttpRegistrationClient {
    async fn check_user(&self, phone: &str) -> Result<CheckUserResponse, ServiceError> {
        let (status, mut reply): (_, CheckUserResponse) = self
            .post_json(&self.check_user_url, &CheckUserRequest { phone })
            .await?;

        if !status.is_success() {
            warn!(status = %status, "Phone lookup returned non-success status");
            reply.found = false;
        }
        Ok(reply)
    }

    async fn register_email(
        &self,
        phone: &str,
        email: &str,
    ) -> Result<RegisterEmailResponse, ServiceError> {
        let (status, mut reply): (_, RegisterEmailResponse) = self
            .post_json(&self.register_email_url, &RegisterEmailRequest { phone, email })
            .await?;

        if !status.is_success() {
            warn!(status = %status, "Email registration returned non-success status");
            reply.success = false;
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(base_url: String) -> HttpRegistrationClient {
        let config = ServiceConfig {
            base_url,
            ..ServiceConfig::default()
        };
        HttpRegistrationClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_check_user_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/check_user")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"phone": "5551234"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"found": true, "message": "Hi Ana"}"#)
            .create_async()
            .await;

        let client = client_for(server.url());
        let reply = client.check_user("5551234").await.unwrap();

        assert!(reply.found);
        assert_eq!(reply.message.as_deref(), Some("Hi Ana"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_check_user_non_success_status_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/check_user")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"found": true, "message": "Not registered"}"#)
            .create_async()
            .await;

        let client = client_for(server.url());
        let reply = client.check_user("000").await.unwrap();

        assert!(!reply.found);
        assert_eq!(reply.message.as_deref(), Some("Not registered"));
    }

    #[tokio::test]
    async fn test_register_email_sends_phone_and_email() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/register_email")
            .match_body(Matcher::Json(json!({"phone": "5551234", "email": "a@b.com"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "message": "Welcome!"}"#)
            .create_async()
            .await;

        let client = client_for(format!("{}/", server.url()));
        let reply = client.register_email("5551234", "a@b.com").await.unwrap();

        assert!(reply.success);
        assert_eq!(reply.message.as_deref(), Some("Welcome!"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_email_server_error_is_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/register_email")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "message": "Error interno"}"#)
            .create_async()
            .await;

        let client = client_for(server.url());
        let reply = client.register_email("5551234", "a@b.com").await.unwrap();

        assert!(!reply.success);
        assert_eq!(reply.message.as_deref(), Some("Error interno"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/check_user")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = client_for(server.url());
        let result = client.check_user("5551234").await;

        assert!(matches!(result, Err(ServiceError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        let client = client_for("http://127.0.0.1:1".to_string());
        let result = client.check_user("5551234").await;

        assert!(matches!(result, Err(ServiceError::Http(_))));
    }
}
