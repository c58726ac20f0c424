//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TWILIO_ACCOUNT_SID` - Twilio account identifier
//! - `TWILIO_AUTH_TOKEN` - Twilio API auth token
//! - `TWILIO_PHONE_NUMBER` - Sender number alerts are dispatched from
//! - `FIREBASE_DATABASE_URL` - Root URL of the Realtime Database holding
//!   contact sets (no embedded default; deployments must supply their own)
//!
//! ## Optional
//! - `LIFELINE_HOST` - Bind address (default: 127.0.0.1)
//! - `LIFELINE_PORT` - Listen port (default: 8080; generic `PORT` as set by
//!   deploy platforms is honored as a fallback)
//! - `LIFELINE_EXTERNAL_TIMEOUT_SECS` - Per-call bound on outbound HTTP
//!   requests to the store and the gateway (default: 10)
//! - `TWILIO_API_BASE` - Override of the Twilio API origin (regional
//!   endpoints, test doubles)
//! - `FIREBASE_DATABASE_SECRET` - Database auth credential, raw
//! - `FIREBASE_DATABASE_SECRET_B64` - Same credential, base64-encoded (for
//!   secret stores that only carry base64 material)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default origin of the Twilio REST API.
const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Lifeline server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Per-call bound on outbound HTTP requests
    pub external_timeout: Duration,
    /// SMS gateway configuration
    pub twilio: TwilioConfig,
    /// Contact store configuration
    pub firebase: FirebaseConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Twilio SMS gateway configuration.
///
/// Implements `Debug` manually to redact the auth token.
#[derive(Clone)]
pub struct TwilioConfig {
    /// Account SID (public identifier, also the basic-auth username)
    pub account_sid: String,
    /// API auth token (basic-auth password)
    pub auth_token: SecretString,
    /// Sender number alerts are dispatched from
    pub from_number: String,
    /// API origin (overridable for regional endpoints and tests)
    pub api_base: String,
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("from_number", &self.from_number)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Firebase Realtime Database configuration.
///
/// Implements `Debug` manually to redact the database secret.
#[derive(Clone)]
pub struct FirebaseConfig {
    /// Root URL of the database (e.g., `https://<project>.firebaseio.com/`)
    pub database_url: Url,
    /// Auth credential appended to REST calls, when the database requires one
    pub database_secret: Option<SecretString>,
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("database_url", &self.database_url.as_str())
            .field(
                "database_secret",
                &self.database_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("LIFELINE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("LIFELINE_HOST".to_string(), e.to_string()))?;
        let port = get_port("LIFELINE_PORT")?;
        let external_timeout = get_env_or_default("LIFELINE_EXTERNAL_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LIFELINE_EXTERNAL_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        let twilio = TwilioConfig::from_env()?;
        let firebase = FirebaseConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            external_timeout,
            twilio,
            firebase,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl TwilioConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            account_sid: get_required_env("TWILIO_ACCOUNT_SID")?,
            auth_token: get_required_secret("TWILIO_AUTH_TOKEN")?,
            from_number: get_required_env("TWILIO_PHONE_NUMBER")?,
            api_base: get_env_or_default("TWILIO_API_BASE", DEFAULT_TWILIO_API_BASE),
        })
    }
}

impl FirebaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("FIREBASE_DATABASE_URL")?;
        let database_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("FIREBASE_DATABASE_URL".to_string(), e.to_string())
        })?;

        let database_secret = match get_optional_env("FIREBASE_DATABASE_SECRET") {
            Some(raw) => Some(SecretString::from(raw)),
            None => get_optional_env("FIREBASE_DATABASE_SECRET_B64")
                .map(|encoded| {
                    decode_base64_secret(&encoded).map_err(|e| {
                        ConfigError::InvalidEnvVar(
                            "FIREBASE_DATABASE_SECRET_B64".to_string(),
                            e,
                        )
                    })
                })
                .transpose()?
                .map(SecretString::from),
        };

        Ok(Self {
            database_url,
            database_secret,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get the listen port with fallback to generic `PORT` (set by deploy
/// platforms such as Render and Fly.io).
fn get_port(primary_key: &str) -> Result<u16, ConfigError> {
    let (key, value) = if let Ok(value) = std::env::var(primary_key) {
        (primary_key, value)
    } else if let Ok(value) = std::env::var("PORT") {
        ("PORT", value)
    } else {
        ("", "8080".to_string())
    };

    value
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Decode base64-encoded credential material into its UTF-8 form.
fn decode_base64_secret(encoded: &str) -> Result<String, String> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| format!("not valid base64: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("decoded secret is not UTF-8: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64_secret() {
        let encoded = BASE64.encode("super-secret-material");
        assert_eq!(
            decode_base64_secret(&encoded).unwrap(),
            "super-secret-material"
        );
    }

    #[test]
    fn test_decode_base64_secret_trims_whitespace() {
        let encoded = format!("  {}\n", BASE64.encode("s3cr3t"));
        assert_eq!(decode_base64_secret(&encoded).unwrap(), "s3cr3t");
    }

    #[test]
    fn test_decode_base64_secret_rejects_garbage() {
        assert!(decode_base64_secret("!!not-base64!!").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            external_timeout: Duration::from_secs(10),
            twilio: TwilioConfig {
                account_sid: "AC00000000000000000000000000000000".to_string(),
                auth_token: SecretString::from("token"),
                from_number: "+15005550006".to_string(),
                api_base: DEFAULT_TWILIO_API_BASE.to_string(),
            },
            firebase: FirebaseConfig {
                database_url: Url::parse("https://demo.firebaseio.com/").unwrap(),
                database_secret: None,
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_twilio_config_debug_redacts_auth_token() {
        let config = TwilioConfig {
            account_sid: "AC00000000000000000000000000000000".to_string(),
            auth_token: SecretString::from("very_secret_token_value"),
            from_number: "+15005550006".to_string(),
            api_base: DEFAULT_TWILIO_API_BASE.to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("AC00000000000000000000000000000000"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very_secret_token_value"));
    }

    #[test]
    fn test_firebase_config_debug_redacts_secret() {
        let config = FirebaseConfig {
            database_url: Url::parse("https://demo.firebaseio.com/").unwrap(),
            database_secret: Some(SecretString::from("database_secret_value")),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("https://demo.firebaseio.com/"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("database_secret_value"));
    }
}
