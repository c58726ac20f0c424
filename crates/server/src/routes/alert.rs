//! Broadcast alert route handler.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use lifeline_core::AlertReport;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{bad_json, parse_user_id};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Fixed alert body broadcast to every contact.
pub const ALERT_MESSAGE: &str = "🚨 Emergency Alert: Your contact needs immediate help!";

/// Body of `POST /send_alert`.
#[derive(Debug, Deserialize)]
pub struct SendAlertRequest {
    pub user_id: Option<String>,
}

/// Response of `POST /send_alert`.
///
/// Flattens the [`AlertReport`] so the wire shape is
/// `{message, sent_to, errors?}`.
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: AlertReport,
}

/// Broadcast the alert SMS to every one of the user's contacts.
///
/// The endpoint's contract is "attempted", not "all delivered": as long as
/// the user had contacts, the response is 200 and every delivery outcome is
/// reported in-band. One contact's failure never aborts the rest of the
/// batch.
///
/// # Errors
///
/// 400 if `user_id` is missing or invalid; 404 if the user has no contacts
/// (no gateway call is made); 502 if the store read fails.
#[instrument(skip_all)]
pub async fn send_alert(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendAlertRequest>, JsonRejection>,
) -> Result<Json<AlertResponse>> {
    let Json(req) = payload.map_err(bad_json)?;
    let user = parse_user_id(req.user_id.as_deref())?;

    let contacts = state.store().contacts(&user).await?;
    if contacts.is_empty() {
        return Err(AppError::NotFound("No contacts found.".to_string()));
    }

    let mut report = AlertReport::new();
    for (name, phone) in contacts.iter() {
        match state.gateway().send(phone, ALERT_MESSAGE).await {
            Ok(sid) => {
                tracing::info!(user_id = %user, contact = name, sid, "Alert SMS sent");
                report.record_sent(name);
            }
            Err(e) => {
                tracing::warn!(user_id = %user, contact = name, error = %e, "Alert SMS failed");
                report.record_failed(name, phone, e.to_string());
            }
        }
    }

    tracing::info!(
        user_id = %user,
        sent = report.sent_to.len(),
        failed = report.errors.len(),
        "Alert broadcast finished"
    );

    Ok(Json(AlertResponse {
        message: "Alert sent to contacts".to_string(),
        report,
    }))
}
