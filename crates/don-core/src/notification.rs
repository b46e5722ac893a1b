//! # Provider Notifications
//!
//! Inbound webhook payloads sent by the payment provider.
//! Parsing is lenient: fields the provider omits become `None` instead of errors.

use crate::amount::minor_to_major;
use crate::checkout::IntentId;
use crate::error::{DonationError, DonationResult};
use serde::Deserialize;
use serde_json::Value;

/// Notification type, from the `eventType` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    /// A payment went through
    Payment,
    /// An order was created
    Order,
    /// Anything else (acknowledged, not handled)
    Unknown(String),
}

impl NotificationType {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "Payment" => NotificationType::Payment,
            "Order" => NotificationType::Order,
            other => NotificationType::Unknown(other.to_string()),
        }
    }
}

/// A parsed provider notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub event_type: NotificationType,
    /// Event payload (`data`)
    pub data: Value,
    /// Metadata echoed from checkout creation
    pub metadata: Value,
}

#[derive(Debug, Deserialize)]
struct RawNotification {
    #[serde(rename = "eventType", default)]
    event_type: Option<String>,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    metadata: Value,
}

impl Notification {
    /// Parse a raw webhook body
    pub fn parse(payload: &[u8]) -> DonationResult<Self> {
        let raw: RawNotification = serde_json::from_slice(payload).map_err(|e| {
            DonationError::Serialization(format!("Failed to parse notification: {}", e))
        })?;

        Ok(Self {
            event_type: NotificationType::from_tag(raw.event_type.as_deref().unwrap_or_default()),
            data: raw.data,
            metadata: raw.metadata,
        })
    }

    /// Identifier carried in `data.id`, if any
    pub fn data_id(&self) -> Option<IntentId> {
        self.data
            .get("id")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }
}

/// Payment details extracted from a `Payment` notification
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub payment_id: Option<IntentId>,
    /// Amount in cents
    pub amount: Option<i64>,
    pub state: Option<String>,
    pub metadata: Value,
}

impl PaymentConfirmation {
    /// Extract payment fields from a notification
    pub fn from_notification(notification: &Notification) -> Self {
        let data = &notification.data;

        Self {
            payment_id: notification.data_id(),
            amount: data.get("amount").and_then(|v| v.as_i64()),
            state: data.get("state").and_then(|v| v.as_str()).map(String::from),
            metadata: notification.metadata.clone(),
        }
    }

    /// Amount in euros
    pub fn amount_euros(&self) -> Option<f64> {
        self.amount.map(minor_to_major)
    }

    /// Local reference set at checkout creation, if echoed back
    pub fn reference(&self) -> Option<&str> {
        self.metadata.get("reference").and_then(|v| v.as_str())
    }
}
