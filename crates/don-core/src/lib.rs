//! # don-core
//!
//! Core types and traits for the festival donation backend.
//!
//! This crate provides:
//! - `DonationAmount` for validating donation amounts and converting to cents
//! - `DonationCheckout` and `CheckoutIntent` for the checkout flow
//! - `Notification` and `PaymentConfirmation` for provider webhooks
//! - `DonationGateway` trait for implementing payment providers
//! - `DonationError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use don_core::{CallbackUrls, DonationAmount, DonationCheckout, DonationGateway};
//!
//! let amount = DonationAmount::new(10.0)?;
//! let checkout = DonationCheckout::new(amount);
//!
//! let intent = gateway
//!     .create_checkout(&checkout, &CallbackUrls::new("https://don.grandamourfestival.fr"))
//!     .await?;
//!
//! // Redirect the donor to intent.redirect_url
//! ```

pub mod amount;
pub mod checkout;
pub mod error;
pub mod gateway;
pub mod notification;

// Re-exports for convenience
pub use amount::{minor_to_major, DonationAmount, MAX_AMOUNT, MIN_AMOUNT};
pub use checkout::{
    CheckoutIntent, DonationCheckout, DonationMetadata, IntentId, PayerIdentity, DONATION_SOURCE,
};
pub use error::{DonationError, DonationResult};
pub use gateway::{BoxedDonationGateway, CallbackUrls, DonationGateway};
pub use notification::{Notification, NotificationType, PaymentConfirmation};
