//! # don-helloasso
//!
//! HelloAsso gateway for the festival donation backend.
//!
//! - **HelloAssoGateway** creates checkout intents on the HelloAsso API v5
//!   and returns the hosted payment page URL.
//! - **TokenManager** keeps the OAuth2 bearer token fresh (client-credentials
//!   on first use, refresh-token afterwards).
//! - **webhook** dispatches HelloAsso notifications to a handler.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use don_core::{CallbackUrls, DonationAmount, DonationCheckout, DonationGateway};
//! use don_helloasso::HelloAssoGateway;
//!
//! let gateway = HelloAssoGateway::from_env()?;
//! let checkout = DonationCheckout::new(DonationAmount::new(10.0)?);
//! let intent = gateway
//!     .create_checkout(&checkout, &CallbackUrls::new("https://don.grandamourfestival.fr"))
//!     .await?;
//!
//! // Redirect the donor to intent.redirect_url (valid ~15 minutes)
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use don_core::Notification;
//! use don_helloasso::{dispatch_notification, LoggingNotificationHandler};
//!
//! let notification = Notification::parse(&body)?;
//! dispatch_notification(&LoggingNotificationHandler, notification)?;
//! ```

pub mod checkout;
pub mod config;
pub mod token;
pub mod webhook;

// Re-exports
pub use checkout::HelloAssoGateway;
pub use config::HelloAssoConfig;
pub use token::{TokenManager, TokenState};
pub use webhook::{dispatch_notification, LoggingNotificationHandler, NotificationHandler};
