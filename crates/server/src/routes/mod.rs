//! HTTP route handlers for the alert service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Liveness string
//!
//! # Contacts
//! POST /add_contact     - Add or overwrite one contact  {user_id, name, phone}
//! POST /get_contacts    - Fetch a user's contact set    {user_id}
//! POST /delete_contact  - Delete one contact            {user_id, name}
//!
//! # Alerts
//! POST /send_alert      - Broadcast SMS to every contact {user_id}
//! ```
//!
//! Every operation is scoped by a required `user_id`. Request structs use
//! `Option<String>` fields so that a missing or empty field is reported as a
//! 400 `{"error"}` body by our own validation, never as a framework
//! rejection.

pub mod alert;
pub mod contacts;

use axum::{
    Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};
use lifeline_core::{ContactName, UserId};

use crate::error::AppError;
use crate::state::AppState;

/// Create all routes for the alert service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/add_contact", post(contacts::add_contact))
        .route("/get_contacts", post(contacts::get_contacts))
        .route("/delete_contact", post(contacts::delete_contact))
        .route("/send_alert", post(alert::send_alert))
}

/// Liveness string.
async fn home() -> &'static str {
    "Lifeline emergency contact API is running"
}

/// Map a body-level JSON rejection (malformed JSON, wrong content type) to
/// the service's 400 `{"error"}` shape.
pub(crate) fn bad_json(rejection: JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}

/// Require a non-empty value for `field`.
pub(crate) fn require<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// Require and parse the `user_id` field.
pub(crate) fn parse_user_id(value: Option<&str>) -> Result<UserId, AppError> {
    let raw = require("user_id", value)?;
    UserId::parse(raw).map_err(|e| AppError::Validation(format!("user_id {e}")))
}

/// Require and parse the `name` field.
pub(crate) fn parse_contact_name(value: Option<&str>) -> Result<ContactName, AppError> {
    let raw = require("name", value)?;
    ContactName::parse(raw).map_err(|e| AppError::Validation(format!("name {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_and_empty() {
        assert!(require("name", None).is_err());
        assert!(require("name", Some("")).is_err());
        assert!(require("name", Some("   ")).is_err());
        assert_eq!(require("name", Some(" Mom ")).ok(), Some("Mom"));
    }

    #[test]
    fn parse_user_id_reports_field_in_message() {
        let err = parse_user_id(Some("a/b")).unwrap_err();
        assert!(err.to_string().starts_with("user_id "));
    }
}
