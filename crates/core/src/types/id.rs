//! Store-key identifier types.
//!
//! Both the user identifier and the contact name are used verbatim as key
//! segments in the external document store, so they share the store's key
//! constraints: non-empty, bounded length, and none of the characters the
//! store reserves for paths and queries (`/ . # $ [ ]`).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Characters the document store rejects in key segments.
const FORBIDDEN_KEY_CHARS: &[char] = &['/', '.', '#', '$', '[', ']'];

/// Errors that can occur when parsing a store-key identifier.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The input string is empty (or whitespace only).
    #[error("must not be empty")]
    Empty,
    /// The input string is too long.
    #[error("must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character the store rejects in keys.
    #[error("must not contain {0:?}")]
    ForbiddenCharacter(char),
}

fn validate_key(s: &str, max: usize) -> Result<(), KeyError> {
    if s.is_empty() {
        return Err(KeyError::Empty);
    }
    if s.len() > max {
        return Err(KeyError::TooLong { max });
    }
    for c in s.chars() {
        if FORBIDDEN_KEY_CHARS.contains(&c) || c.is_control() {
            return Err(KeyError::ForbiddenCharacter(c));
        }
    }
    Ok(())
}

/// A caller-supplied user identifier.
///
/// Scopes every store operation; the service itself attaches no meaning to
/// it beyond key equality.
///
/// ## Constraints
///
/// - Length: 1-128 characters after trimming surrounding whitespace
/// - Must not contain `/ . # $ [ ]` or control characters
///
/// ## Examples
///
/// ```
/// use lifeline_core::UserId;
///
/// assert!(UserId::parse("u1").is_ok());
/// assert!(UserId::parse("  u1  ").is_ok()); // trimmed
///
/// assert!(UserId::parse("").is_err());
/// assert!(UserId::parse("a/b").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Maximum length of a user identifier.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `UserId` from a string.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if the trimmed input is empty, too long, or
    /// contains a character the store rejects in key segments.
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        let trimmed = s.trim();
        validate_key(trimmed, Self::MAX_LENGTH)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A contact's name, unique within one user's contact set.
///
/// Acts as the key of the stored set: adding a contact under an existing
/// name overwrites that contact's phone number.
///
/// ## Constraints
///
/// - Length: 1-256 characters after trimming surrounding whitespace
/// - Must not contain `/ . # $ [ ]` or control characters
///
/// ## Examples
///
/// ```
/// use lifeline_core::ContactName;
///
/// assert!(ContactName::parse("Mom").is_ok());
/// assert!(ContactName::parse("Aunt Carol").is_ok()); // interior spaces are fine
///
/// assert!(ContactName::parse("   ").is_err());
/// assert!(ContactName::parse("a#b").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContactName(String);

impl ContactName {
    /// Maximum length of a contact name.
    pub const MAX_LENGTH: usize = 256;

    /// Parse a `ContactName` from a string.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if the trimmed input is empty, too long, or
    /// contains a character the store rejects in key segments.
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        let trimmed = s.trim();
        validate_key(trimmed, Self::MAX_LENGTH)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_plain_identifiers() {
        for ok in ["u1", "user-42", "u_1", "alice@example", "Aunt Carol"] {
            assert!(UserId::parse(ok).is_ok(), "expected {ok:?} to parse");
        }
    }

    #[test]
    fn user_id_trims_surrounding_whitespace() {
        let id = UserId::parse("  u1\n").unwrap();
        assert_eq!(id.as_str(), "u1");
    }

    #[test]
    fn user_id_rejects_empty_and_whitespace_only() {
        assert_eq!(UserId::parse(""), Err(KeyError::Empty));
        assert_eq!(UserId::parse("   "), Err(KeyError::Empty));
    }

    #[test]
    fn user_id_rejects_store_path_characters() {
        for bad in ["a/b", "a.b", "a#b", "a$b", "a[b", "a]b", "a\tb"] {
            assert!(
                matches!(UserId::parse(bad), Err(KeyError::ForbiddenCharacter(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn user_id_rejects_overlong_input() {
        let long = "x".repeat(UserId::MAX_LENGTH + 1);
        assert_eq!(
            UserId::parse(&long),
            Err(KeyError::TooLong {
                max: UserId::MAX_LENGTH
            })
        );
    }

    #[test]
    fn contact_name_accepts_spaced_names() {
        let name = ContactName::parse("Aunt Carol").unwrap();
        assert_eq!(name.as_str(), "Aunt Carol");
    }

    #[test]
    fn contact_name_rejects_store_path_characters() {
        assert!(matches!(
            ContactName::parse("Dr. Smith"),
            Err(KeyError::ForbiddenCharacter('.'))
        ));
    }

    #[test]
    fn serializes_transparently() {
        let id = UserId::parse("u1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"u1\"");
        let name: ContactName = serde_json::from_str("\"Mom\"").unwrap();
        assert_eq!(name.as_str(), "Mom");
    }
}
