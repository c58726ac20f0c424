//! Alert delivery reporting.

use serde::{Deserialize, Serialize};

/// A single failed SMS delivery within a broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryFailure {
    /// Contact name the delivery was addressed to.
    pub name: String,
    /// Phone number the delivery was addressed to.
    pub phone: String,
    /// Gateway error message, verbatim.
    pub error: String,
}

/// Per-request aggregate of a broadcast alert's outcomes.
///
/// One contact's failure never aborts the rest of the broadcast, so a report
/// can mix successes and failures freely. The report is transient - it is
/// shaped into the HTTP response and never persisted.
///
/// `errors` is omitted from serialization when empty, matching the service's
/// response contract (`errors` is present only if non-empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertReport {
    /// Names whose delivery the gateway accepted.
    pub sent_to: Vec<String>,
    /// Per-contact failures, in no guaranteed order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<DeliveryFailure>,
}

impl AlertReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a delivery the gateway accepted.
    pub fn record_sent(&mut self, name: impl Into<String>) {
        self.sent_to.push(name.into());
    }

    /// Records a delivery the gateway rejected or that never reached it.
    pub fn record_failed(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        error: impl Into<String>,
    ) {
        self.errors.push(DeliveryFailure {
            name: name.into(),
            phone: phone.into(),
            error: error.into(),
        });
    }

    /// Total number of deliveries attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.sent_to.len() + self.errors.len()
    }
}
