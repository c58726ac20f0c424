//! Firebase Realtime Database client for contact persistence.
//!
//! Talks to the database's REST surface. Contact sets live under
//! `contacts/{user_id}` as flat `name -> phone` objects:
//!
//! - `GET contacts/{user_id}.json` - full set (`null` when absent)
//! - `PATCH contacts/{user_id}.json` - merge a single `name -> phone` key
//! - `DELETE contacts/{user_id}/{name}.json` - drop one key
//!
//! A legacy database secret, when configured, rides along as the `auth`
//! query parameter on every call.

use std::time::Duration;

use async_trait::async_trait;
use lifeline_core::{ContactName, ContactSet, UserId};
use secrecy::{ExposeSecret, SecretString};

use super::{ContactStore, StoreError};
use crate::config::FirebaseConfig;

/// Contact store backed by a Firebase Realtime Database.
#[derive(Clone)]
pub struct FirebaseStore {
    client: reqwest::Client,
    base_url: String,
    secret: Option<SecretString>,
}

impl FirebaseStore {
    /// Create a new store client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &FirebaseConfig, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: config.database_url.as_str().trim_end_matches('/').to_string(),
            secret: config.database_secret.clone(),
        })
    }

    /// Build the REST URL for a node path, percent-encoding each segment
    /// and appending the `auth` credential when configured.
    fn node_url(&self, segments: &[&str]) -> String {
        let path = segments
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let mut url = format!("{}/{path}.json", self.base_url);
        if let Some(secret) = &self.secret {
            url.push_str("?auth=");
            url.push_str(&urlencoding::encode(secret.expose_secret()));
        }
        url
    }
}

#[async_trait]
impl ContactStore for FirebaseStore {
    async fn contacts(&self, user: &UserId) -> Result<ContactSet, StoreError> {
        let url = self.node_url(&["contacts", user.as_str()]);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // An absent node comes back as a literal `null` body.
        let set: Option<ContactSet> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(set.unwrap_or_default())
    }

    async fn upsert(
        &self,
        user: &UserId,
        name: &ContactName,
        phone: &str,
    ) -> Result<(), StoreError> {
        let url = self.node_url(&["contacts", user.as_str()]);

        // PATCH merges the single key into the node, leaving sibling
        // contacts untouched; no read-modify-write cycle to race.
        let mut body = serde_json::Map::new();
        body.insert(
            name.as_str().to_string(),
            serde_json::Value::String(phone.to_string()),
        );

        let response = self.client.patch(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    async fn remove(&self, user: &UserId, name: &ContactName) -> Result<(), StoreError> {
        let url = self.node_url(&["contacts", user.as_str(), name.as_str()]);

        // Deleting an absent key still returns 200, which is exactly the
        // idempotent contract the delete endpoint promises.
        let response = self.client.delete(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    fn store(secret: Option<&str>) -> FirebaseStore {
        let config = FirebaseConfig {
            database_url: Url::parse("https://demo.firebaseio.com/").unwrap(),
            database_secret: secret.map(SecretString::from),
        };
        FirebaseStore::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn node_url_joins_segments_under_base() {
        let store = store(None);
        assert_eq!(
            store.node_url(&["contacts", "u1"]),
            "https://demo.firebaseio.com/contacts/u1.json"
        );
        assert_eq!(
            store.node_url(&["contacts", "u1", "Mom"]),
            "https://demo.firebaseio.com/contacts/u1/Mom.json"
        );
    }

    #[test]
    fn node_url_percent_encodes_segments() {
        let store = store(None);
        assert_eq!(
            store.node_url(&["contacts", "u1", "Aunt Carol"]),
            "https://demo.firebaseio.com/contacts/u1/Aunt%20Carol.json"
        );
    }

    #[test]
    fn node_url_appends_auth_when_secret_configured() {
        let store = store(Some("s3cr3t"));
        assert_eq!(
            store.node_url(&["contacts", "u1"]),
            "https://demo.firebaseio.com/contacts/u1.json?auth=s3cr3t"
        );
    }

    #[test]
    fn absent_node_parses_as_empty_set() {
        let set: Option<ContactSet> = serde_json::from_str("null").unwrap();
        assert!(set.unwrap_or_default().is_empty());
    }

    #[test]
    fn populated_node_parses_as_contact_set() {
        let set: Option<ContactSet> =
            serde_json::from_str(r#"{"Mom":"+15551234567"}"#).unwrap();
        let set = set.unwrap_or_default();
        assert_eq!(set.get("Mom"), Some("+15551234567"));
    }
}
