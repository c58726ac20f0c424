//! Twilio API client for SMS dispatch.
//!
//! One call per contact: `POST /2010-04-01/Accounts/{sid}/Messages.json`
//! with form-encoded `To`/`From`/`Body` and HTTP basic auth. A successful
//! dispatch hands back the message SID; Twilio's structured error body is
//! unwrapped into the failure message so callers see something better than
//! raw JSON.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::{GatewayError, SmsGateway};
use crate::config::TwilioConfig;

/// Twilio Messages API version segment.
const API_VERSION: &str = "2010-04-01";

/// SMS gateway backed by the Twilio Messages API.
#[derive(Clone)]
pub struct TwilioClient {
    client: reqwest::Client,
    account_sid: String,
    auth_token: SecretString,
    from_number: String,
    messages_url: String,
}

impl TwilioClient {
    /// Create a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &TwilioConfig, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            messages_url: messages_url(&config.api_base, &config.account_sid),
        })
    }
}

/// Build the Messages resource URL for an account.
fn messages_url(api_base: &str, account_sid: &str) -> String {
    format!(
        "{}/{API_VERSION}/Accounts/{account_sid}/Messages.json",
        api_base.trim_end_matches('/')
    )
}

#[async_trait]
impl SmsGateway for TwilioClient {
    async fn send(&self, to: &str, body: &str) -> Result<String, GatewayError> {
        let params = [("To", to), ("From", self.from_number.as_str()), ("Body", body)];

        let response = self
            .client
            .post(&self.messages_url)
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .form(&params)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(err) => err.message,
                Err(_) => text,
            };
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let created: MessageResource = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;

        tracing::debug!(to, sid = %created.sid, "SMS accepted by gateway");
        Ok(created.sid)
    }
}

/// The slice of a created Message resource we care about.
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

/// Twilio's structured error body.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_includes_version_and_account() {
        assert_eq!(
            messages_url("https://api.twilio.com", "AC123"),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn messages_url_tolerates_trailing_slash() {
        assert_eq!(
            messages_url("https://api.twilio.com/", "AC123"),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn parses_created_message_resource() {
        let created: MessageResource = serde_json::from_str(
            r#"{"sid": "SM1234567890", "status": "queued", "to": "+15551234567"}"#,
        )
        .unwrap();
        assert_eq!(created.sid, "SM1234567890");
    }

    #[test]
    fn parses_structured_error_body() {
        let err: ApiErrorBody = serde_json::from_str(
            r#"{"code": 21211, "message": "The 'To' number is not a valid phone number.", "status": 400}"#,
        )
        .unwrap();
        assert!(err.message.contains("not a valid phone number"));
    }
}
