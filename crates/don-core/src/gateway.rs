//! # Donation Gateway Trait
//!
//! Strategy trait for the payment provider that hosts the payment page.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           DonationGateway (trait)           │
//! │  ├── create_checkout()                      │
//! │  ├── provider_name()                        │
//! │  └── webhook_path()                         │
//! └─────────────────────────────────────────────┘
//!                       ▲
//!              ┌────────┴────────┐
//!              │ HelloAssoGateway│
//!              └─────────────────┘
//! ```

use crate::checkout::{CheckoutIntent, DonationCheckout};
use crate::error::DonationResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
#[async_trait]
pub trait DonationGateway: Send + Sync {
    /// Create a checkout intent and return the redirect URL.
    ///
    /// # Arguments
    /// * `checkout` - The validated donation
    /// * `urls` - Where the provider sends the donor afterwards
    async fn create_checkout(
        &self,
        checkout: &DonationCheckout,
        urls: &CallbackUrls,
    ) -> DonationResult<CheckoutIntent>;

    /// Get the provider name (for logging and routing).
    fn provider_name(&self) -> &'static str;

    /// Webhook endpoint path for this provider.
    /// Default: `/webhook/{provider_name}`
    fn webhook_path(&self) -> String {
        format!("/webhook/{}", self.provider_name())
    }
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedDonationGateway = Arc<dyn DonationGateway>;

/// Callback URLs handed to the provider, derived from the public base URL
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    /// Public base URL of the site (e.g., "https://don.grandamourfestival.fr")
    pub base_url: String,
    /// Page shown after a technical payment error
    pub error_path: String,
    /// Page shown after a successful payment
    pub return_path: String,
}

impl CallbackUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            error_path: "/erreur.html".to_string(),
            return_path: "/merci.html".to_string(),
        }
    }

    /// Donor wants to change the donation: back to the form
    pub fn back_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn error_url(&self) -> String {
        format!("{}{}", self.base_url, self.error_path)
    }

    pub fn return_url(&self) -> String {
        format!("{}{}", self.base_url, self.return_path)
    }
}

impl Default for CallbackUrls {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
