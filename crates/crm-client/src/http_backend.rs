//! HTTP implementation of the backend traits.

use crate::{ClientError, OtpService, ProfileChannel, Result, VerifyOutcome};

use crm_core::{EmailAddress, ProfileDraft};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP client for the CRM backend REST API
pub struct HttpBackend {
    pub base_url: String,
    pub user_id: Option<String>,
    client: ReqwestClient,
}

impl HttpBackend {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "http://127.0.0.1:8000")
    /// * `user_id` - Optional user ID to include in X-User-Id header
    /// * `request_timeout` - Per-request timeout
    pub fn new(base_url: &str, user_id: Option<&str>, request_timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(request_timeout)
            .build()
            .map_err(ClientError::from_reqwest)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.map(String::from),
            client,
        })
    }

    /// Build a request with optional user ID header
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(ref user_id) = self.user_id {
            req = req.header("X-User-Id", user_id);
        }

        req
    }

    /// Execute a request whose success reply must be JSON
    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<Value> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(rejection_from_body(status.as_u16(), &body));
        }

        let body: Value = response.json().await?;
        Ok(body)
    }
}

/// Map a non-success reply to an error.
///
/// The backend reports rejections as `{"error": "..."}` or
/// `{"error": {"code", "message"}}`. Identity-propagation rejections are
/// recognized here, at the wire boundary, so callers branch on the error
/// variant and never inspect message text themselves.
#[track_caller]
fn rejection_from_body(status: u16, body: &str) -> ClientError {
    if let Ok(value) = serde_json::from_str::<Value>(body)
        && let Some(error) = value.get("error")
    {
        let message = match error {
            Value::String(text) => text.clone(),
            other => other
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
        };

        // The backend words identity-propagation rejections around the
        // anonymous placeholder principal.
        return if message.to_lowercase().contains("anonymous") {
            ClientError::identity_not_ready(message)
        } else {
            ClientError::rejected(message)
        };
    }

    ClientError::status(status, body.trim())
}

#[async_trait]
impl OtpService for HttpBackend {
    async fn generate_otp(&self, email: &EmailAddress) -> Result<String> {
        #[derive(Serialize)]
        struct GenerateRequest<'a> {
            email: &'a str,
        }

        #[derive(Deserialize)]
        struct GenerateReply {
            code: String,
        }

        let body = GenerateRequest {
            email: email.as_str(),
        };
        let req = self.request(Method::POST, "/api/v1/auth/otp").json(&body);
        let value = self.execute(req).await?;

        let reply: GenerateReply = serde_json::from_value(value)?;
        Ok(reply.code)
    }

    async fn verify_otp(&self, email: &EmailAddress, code: &str) -> Result<VerifyOutcome> {
        #[derive(Serialize)]
        struct VerifyRequest<'a> {
            email: &'a str,
            code: &'a str,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "lowercase")]
        enum VerifyStatus {
            Success,
            Expired,
            Invalid,
        }

        #[derive(Deserialize)]
        struct VerifyReply {
            status: VerifyStatus,
            #[serde(default)]
            profile_status: Option<Value>,
        }

        let body = VerifyRequest {
            email: email.as_str(),
            code,
        };
        let req = self
            .request(Method::POST, "/api/v1/auth/otp/verify")
            .json(&body);
        let value = self.execute(req).await?;

        let reply: VerifyReply = serde_json::from_value(value)?;
        Ok(match reply.status {
            VerifyStatus::Success => VerifyOutcome::Success {
                profile_status: reply.profile_status,
            },
            VerifyStatus::Expired => VerifyOutcome::Expired,
            VerifyStatus::Invalid => VerifyOutcome::Invalid,
        })
    }
}

#[async_trait]
impl ProfileChannel for HttpBackend {
    async fn save_profile(&self, draft: &ProfileDraft) -> Result<()> {
        let req = self.request(Method::PUT, "/api/v1/profile").json(draft);
        let response = req.send().await?;
        let status = response.status();

        // Any non-error reply counts as success; the body is not inspected.
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await?;
        Err(rejection_from_body(status.as_u16(), &body))
    }
}
