//! Per-user contact sets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// All emergency contacts belonging to one user, keyed by contact name.
///
/// Serializes as a flat JSON object (`{"Mom": "+15551234567"}`), which is
/// exactly the shape the document store holds under `contacts/{user_id}`.
/// The service never caches one of these; every request re-reads from the
/// store.
///
/// Phone numbers are stored verbatim (E.164 by convention, not validated);
/// the SMS gateway is the authority on what it will accept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactSet(BTreeMap<String, String>);

impl ContactSet {
    /// Creates an empty contact set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the phone number stored under `name`.
    ///
    /// Returns the previously stored phone number when `name` was already
    /// present, so adding an existing name overwrites without growing the
    /// set.
    pub fn insert(&mut self, name: impl Into<String>, phone: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), phone.into())
    }

    /// Removes `name` from the set, returning its phone number if present.
    ///
    /// Removing an absent name is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Returns the phone number stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of contacts in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no contacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, phone)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ContactSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ContactSet {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
