//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{
    ContactStore, FirebaseStore, GatewayError, SmsGateway, StoreError, TwilioClient,
};

/// Error constructing the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build store client: {0}")]
    Store(#[from] StoreError),
    #[error("failed to build gateway client: {0}")]
    Gateway(#[from] GatewayError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the configuration and the two external
/// adapters behind their traits, so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: Arc<dyn ContactStore>,
    gateway: Arc<dyn SmsGateway>,
}

impl AppState {
    /// Create application state with production adapters.
    ///
    /// Both clients are built once here and live for the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client fails to build.
    pub fn new(config: AppConfig) -> Result<Self, StateError> {
        let store = FirebaseStore::new(&config.firebase, config.external_timeout)?;
        let gateway = TwilioClient::new(&config.twilio, config.external_timeout)?;

        Ok(Self::with_adapters(config, Arc::new(store), Arc::new(gateway)))
    }

    /// Create application state with explicit adapters (used by tests).
    #[must_use]
    pub fn with_adapters(
        config: AppConfig,
        store: Arc<dyn ContactStore>,
        gateway: Arc<dyn SmsGateway>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                gateway,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the contact store adapter.
    #[must_use]
    pub fn store(&self) -> &dyn ContactStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the SMS gateway adapter.
    #[must_use]
    pub fn gateway(&self) -> &dyn SmsGateway {
        self.inner.gateway.as_ref()
    }
}
