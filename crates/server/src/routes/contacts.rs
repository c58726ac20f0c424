//! Contact management route handlers.
//!
//! Each handler validates its fields, makes exactly one store call, and
//! shapes a small JSON confirmation. There is no caching layer: the store is
//! the only copy of a user's contact set.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use lifeline_core::ContactSet;
use serde::{Deserialize, Serialize};

use super::{bad_json, parse_contact_name, parse_user_id, require};
use crate::error::Result;
use crate::state::AppState;

/// Body of `POST /add_contact`.
#[derive(Debug, Deserialize)]
pub struct AddContactRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Body of `POST /get_contacts`.
#[derive(Debug, Deserialize)]
pub struct GetContactsRequest {
    pub user_id: Option<String>,
}

/// Body of `POST /delete_contact`.
#[derive(Debug, Deserialize)]
pub struct DeleteContactRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
}

/// Confirmation message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of `POST /get_contacts`.
#[derive(Debug, Serialize)]
pub struct ContactsResponse {
    pub contacts: ContactSet,
}

/// Add or overwrite one contact.
///
/// Re-adding an existing name overwrites its phone number; the set does not
/// grow. The write is a single scoped key set against the store.
///
/// # Errors
///
/// 400 if any of `user_id`, `name`, `phone` is missing, empty, or not a
/// valid store key; 502 if the store write fails.
pub async fn add_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddContactRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = payload.map_err(bad_json)?;
    let user = parse_user_id(req.user_id.as_deref())?;
    let name = parse_contact_name(req.name.as_deref())?;
    let phone = require("phone", req.phone.as_deref())?;

    state.store().upsert(&user, &name, phone).await?;
    tracing::info!(user_id = %user, contact = %name, "Contact added");

    Ok(Json(MessageResponse {
        message: format!("Contact {name} added successfully."),
    }))
}

/// Fetch a user's full contact set.
///
/// A user with nothing stored gets an empty object, not an error.
///
/// # Errors
///
/// 400 if `user_id` is missing or invalid; 502 if the store read fails.
pub async fn get_contacts(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GetContactsRequest>, JsonRejection>,
) -> Result<Json<ContactsResponse>> {
    let Json(req) = payload.map_err(bad_json)?;
    let user = parse_user_id(req.user_id.as_deref())?;

    let contacts = state.store().contacts(&user).await?;

    Ok(Json(ContactsResponse { contacts }))
}

/// Delete one contact by name.
///
/// Succeeds whether or not the name was present: the store's scoped delete
/// of an absent key is a no-op.
///
/// # Errors
///
/// 400 if `user_id` or `name` is missing or invalid; 502 if the store
/// delete fails.
pub async fn delete_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DeleteContactRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = payload.map_err(bad_json)?;
    let user = parse_user_id(req.user_id.as_deref())?;
    let name = parse_contact_name(req.name.as_deref())?;

    state.store().remove(&user, &name).await?;
    tracing::info!(user_id = %user, contact = %name, "Contact deleted");

    Ok(Json(MessageResponse {
        message: format!("Contact {name} deleted."),
    }))
}
