//! External collaborators: the contact store and the SMS gateway.
//!
//! # Services
//!
//! - [`firebase`] - Contact persistence via the Firebase Realtime Database
//!   REST surface
//! - [`twilio`] - SMS dispatch via the Twilio Messages API
//!
//! Handlers never talk to a concrete client; they go through the
//! [`ContactStore`] and [`SmsGateway`] traits held in application state, so
//! tests can substitute fakes without any network in the loop. Production
//! implementations are constructed once at startup with a bounded per-call
//! timeout and live for the process lifetime.

pub mod firebase;
pub mod twilio;

pub use firebase::FirebaseStore;
pub use twilio::TwilioClient;

use async_trait::async_trait;
use lifeline_core::{ContactName, ContactSet, UserId};
use thiserror::Error;

/// Errors from the contact store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed (includes per-call timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store returned an error response.
    #[error("Store API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to interpret a store response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors from a single SMS dispatch attempt.
///
/// These never surface as HTTP errors; the alert handler catches them per
/// contact and aggregates them into the response body.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed (includes per-call timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway rejected the dispatch.
    #[error("Gateway API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to interpret a gateway response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Per-user contact persistence.
///
/// All state lives behind this trait; the service holds no cache, so every
/// operation is a round trip.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Fetch the user's full contact set.
    ///
    /// A user with nothing stored yields an empty set, not an error.
    async fn contacts(&self, user: &UserId) -> Result<ContactSet, StoreError>;

    /// Set `name -> phone` in the user's set, overwriting any prior value.
    ///
    /// This is a single scoped key write, so two concurrent upserts for
    /// different names cannot clobber each other.
    async fn upsert(
        &self,
        user: &UserId,
        name: &ContactName,
        phone: &str,
    ) -> Result<(), StoreError>;

    /// Delete the single key `name` from the user's set.
    ///
    /// Deleting an absent key succeeds as a no-op.
    async fn remove(&self, user: &UserId, name: &ContactName) -> Result<(), StoreError>;
}

/// Outbound SMS dispatch.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send `body` to the phone number `to`, returning the gateway's
    /// delivery identifier.
    async fn send(&self, to: &str, body: &str) -> Result<String, GatewayError>;
}
