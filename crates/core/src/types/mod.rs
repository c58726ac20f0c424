//! Core types for Lifeline.
//!
//! This module provides type-safe wrappers for the domain's few concepts:
//! store-key identifiers, per-user contact sets, and alert delivery reports.

pub mod alert;
pub mod contact;
pub mod id;

pub use alert::{AlertReport, DeliveryFailure};
pub use contact::ContactSet;
pub use id::{ContactName, KeyError, UserId};
