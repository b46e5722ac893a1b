//! # HelloAsso Webhook Handling
//!
//! HelloAsso notifies the organization of orders and payments by POSTing to a
//! single webhook URL. Delivery is at-least-once: anything other than a 200
//! response is redelivered, so handlers must tolerate seeing the same
//! notification more than once.

use don_core::{DonationResult, Notification, NotificationType, PaymentConfirmation};
use tracing::{debug, info};

/// Notification handler trait
///
/// Implement this trait to act on notifications (record the donation, send a
/// thank-you e-mail, ...). Implementations must be idempotent.
#[allow(unused_variables)]
pub trait NotificationHandler: Send + Sync {
    /// Called when a payment is confirmed
    fn on_payment(&self, payment: PaymentConfirmation) -> DonationResult<()> {
        info!(
            "Payment confirmed: payment_id={}, reference={}, amount={} €, state={}, metadata={}",
            payment
                .payment_id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            payment.reference().unwrap_or("none"),
            payment
                .amount_euros()
                .map(|euros| euros.to_string())
                .unwrap_or_else(|| "?".to_string()),
            payment.state.as_deref().unwrap_or("unknown"),
            payment.metadata
        );
        Ok(())
    }

    /// Called when an order is created
    fn on_order(&self, notification: &Notification) -> DonationResult<()> {
        info!(
            "Order created: id={}",
            notification
                .data_id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        Ok(())
    }

    /// Called for unknown/unhandled notifications
    fn on_unknown(&self, notification: &Notification) -> DonationResult<()> {
        debug!("Unhandled notification: {:?}", notification.event_type);
        Ok(())
    }
}

/// Default handler (just logs notifications)
pub struct LoggingNotificationHandler;

impl NotificationHandler for LoggingNotificationHandler {}

/// Dispatch a notification to the appropriate handler method
pub fn dispatch_notification(
    handler: &dyn NotificationHandler,
    notification: Notification,
) -> DonationResult<()> {
    match &notification.event_type {
        NotificationType::Payment => {
            handler.on_payment(PaymentConfirmation::from_notification(&notification))
        }
        NotificationType::Order => handler.on_order(&notification),
        NotificationType::Unknown(_) => handler.on_unknown(&notification),
    }
}
