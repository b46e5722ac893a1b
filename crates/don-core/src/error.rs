//! # Donation Error Types
//!
//! Typed error handling for the donation backend.
//! All donation operations return `Result<T, DonationError>`.
//!
//! Every variant carries enough detail for server-side logs; callers facing the
//! public only ever see [`DonationError::client_message`].

use thiserror::Error;

/// Message returned for any out-of-range or unparseable donation amount
pub const INVALID_AMOUNT_MESSAGE: &str = "Montant invalide. Minimum 1€, maximum 10 000€.";

/// Message returned when the organization cannot receive payments yet
pub const ORGANIZATION_NOT_VERIFIED_MESSAGE: &str =
    "L'association n'est pas encore vérifiée pour recevoir des paiements.";

/// Message returned when the provider rejects the checkout creation
pub const CHECKOUT_FAILED_MESSAGE: &str = "Erreur lors de la création du paiement. Réessayez.";

/// Message returned for every other server-side failure
pub const SERVER_ERROR_MESSAGE: &str = "Erreur serveur. Réessayez dans quelques instants.";

/// Core error type for all donation operations
#[derive(Debug, Error)]
pub enum DonationError {
    /// Invalid donation input (user-correctable)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider's token endpoint refused the grant
    #[error("Authentication with payment provider failed: HTTP {status}")]
    Authentication { status: u16 },

    /// The organization is not yet allowed to receive payments
    #[error("Organization not verified for payments")]
    OrganizationNotVerified,

    /// Any other non-success response from the provider
    #[error("Provider error: HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors (bad listen address, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catch-all
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl DonationError {
    /// Shorthand for the standard amount validation failure
    pub fn invalid_amount() -> Self {
        DonationError::Validation(INVALID_AMOUNT_MESSAGE.to_string())
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DonationError::Validation(_) => 400,
            DonationError::OrganizationNotVerified => 409,
            DonationError::Authentication { .. }
            | DonationError::Provider { .. }
            | DonationError::Network(_)
            | DonationError::Serialization(_)
            | DonationError::Configuration(_)
            | DonationError::Unexpected(_) => 500,
        }
    }

    /// Message safe to hand back to the donor. Never contains provider detail.
    pub fn client_message(&self) -> String {
        match self {
            DonationError::Validation(message) => message.clone(),
            DonationError::OrganizationNotVerified => ORGANIZATION_NOT_VERIFIED_MESSAGE.to_string(),
            DonationError::Provider { .. } => CHECKOUT_FAILED_MESSAGE.to_string(),
            _ => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Result type alias for donation operations
pub type DonationResult<T> = Result<T, DonationError>;
