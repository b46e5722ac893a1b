//! # Checkout Types
//!
//! Donation checkout and checkout-intent types.

use crate::amount::DonationAmount;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Tag identifying where donations come from, echoed back in webhooks
pub const DONATION_SOURCE: &str = "qr-code-festival";

/// Prefix of the item label shown in the provider's back-office
pub const ITEM_NAME_PREFIX: &str = "Don Grand Amour Festival";

/// Metadata attached to the checkout intent.
///
/// The provider stores it untouched and sends it back with every
/// notification, which is how a payment is tied to its donation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationMetadata {
    pub source: String,
    pub montant_euros: f64,
    pub date: String,
    pub reference: String,
}

/// Payer details sent with the checkout.
///
/// Prefilling lets the donor land directly on the card form. The identity is
/// synthesized, so no tax receipt can be issued to the real donor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
}

impl PayerIdentity {
    /// Festival placeholder payer. The e-mail is made unique per checkout.
    pub fn placeholder(at: DateTime<Utc>) -> Self {
        Self {
            first_name: "Donateur".to_string(),
            last_name: "Festival".to_string(),
            email: format!("don+{}@grandamourfestival.fr", at.timestamp_millis()),
            date_of_birth: "1980-01-01".to_string(),
            address: "1 place du Festival".to_string(),
            city: "Arles".to_string(),
            zip_code: "13200".to_string(),
            country: "FRA".to_string(),
        }
    }
}

/// A donation about to be checked out
#[derive(Debug, Clone)]
pub struct DonationCheckout {
    /// Validated amount
    pub amount: DonationAmount,

    /// Local reference, logged and sent as metadata
    pub reference: Uuid,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl DonationCheckout {
    /// Create a new checkout with a generated reference
    pub fn new(amount: DonationAmount) -> Self {
        Self {
            amount,
            reference: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    /// Amount in cents, used for both total and initial amount
    pub fn minor_units(&self) -> i64 {
        self.amount.minor_units()
    }

    /// Human-readable item label, e.g. `Don Grand Amour Festival - 10€`
    pub fn item_name(&self) -> String {
        format!("{} - {}€", ITEM_NAME_PREFIX, self.amount)
    }

    /// Placeholder payer for this checkout
    pub fn payer(&self) -> PayerIdentity {
        PayerIdentity::placeholder(self.created_at)
    }

    /// Metadata block for later correlation
    pub fn metadata(&self) -> DonationMetadata {
        DonationMetadata {
            source: DONATION_SOURCE.to_string(),
            montant_euros: self.amount.euros(),
            date: self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            reference: self.reference.to_string(),
        }
    }
}

/// Provider identifier of a checkout intent.
///
/// HelloAsso returns a number; it is echoed back to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentId::Number(n) => write!(f, "{}", n),
            IntentId::Text(s) => f.write_str(s),
        }
    }
}

/// A checkout intent created at the provider.
///
/// Nothing is kept locally once the redirect URL has been handed out.
#[derive(Debug, Clone)]
pub struct CheckoutIntent {
    /// Provider identifier
    pub checkout_id: IntentId,

    /// Provider payment page (redirect the donor here)
    pub redirect_url: String,

    /// When the intent was created
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_item_name() {
        let checkout = DonationCheckout::new(DonationAmount::new(10.0).unwrap());
        assert_eq!(checkout.item_name(), "Don Grand Amour Festival - 10€");

        let checkout = DonationCheckout::new(DonationAmount::new(7.5).unwrap());
        assert_eq!(checkout.item_name(), "Don Grand Amour Festival - 7.5€");
    }

    #[test]
    fn test_metadata() {
        let mut checkout = DonationCheckout::new(DonationAmount::new(20.0).unwrap());
        checkout.created_at = Utc.with_ymd_and_hms(2026, 7, 14, 21, 30, 0).unwrap();

        let metadata = checkout.metadata();
        assert_eq!(metadata.source, DONATION_SOURCE);
        assert_eq!(metadata.montant_euros, 20.0);
        assert_eq!(metadata.date, "2026-07-14T21:30:00.000Z");
        assert_eq!(metadata.reference, checkout.reference.to_string());
    }

    #[test]
    fn test_placeholder_payer_email_is_unique_per_instant() {
        let at = Utc.timestamp_millis_opt(1_752_000_000_123).unwrap();
        let payer = PayerIdentity::placeholder(at);
        assert_eq!(payer.email, "don+1752000000123@grandamourfestival.fr");
        assert_eq!(payer.country, "FRA");

        let json = serde_json::to_value(&payer).unwrap();
        assert_eq!(json["firstName"], "Donateur");
        assert_eq!(json["zipCode"], "13200");
        assert_eq!(json["dateOfBirth"], "1980-01-01");
    }

    #[test]
    fn test_intent_id_round_trips_provider_shape() {
        let id: IntentId = serde_json::from_str("12345").unwrap();
        assert_eq!(id, IntentId::Number(12345));
        assert_eq!(serde_json::to_string(&id).unwrap(), "12345");

        let id: IntentId = serde_json::from_str("\"ci_42\"").unwrap();
        assert_eq!(id.to_string(), "ci_42");
    }
}
