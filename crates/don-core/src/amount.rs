//! # Donation Amount
//!
//! Validated donation amounts in major currency units (euros).

use crate::error::{DonationError, DonationResult};
use serde_json::Value;
use std::fmt;

/// Smallest accepted donation, in euros
pub const MIN_AMOUNT: f64 = 1.0;

/// Largest accepted donation, in euros
pub const MAX_AMOUNT: f64 = 10_000.0;

/// A donation amount that has passed validation.
///
/// Always finite and within `[MIN_AMOUNT, MAX_AMOUNT]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonationAmount(f64);

impl DonationAmount {
    /// Validate a raw amount in euros
    pub fn new(euros: f64) -> DonationResult<Self> {
        if !euros.is_finite() || !(MIN_AMOUNT..=MAX_AMOUNT).contains(&euros) {
            return Err(DonationError::invalid_amount());
        }
        Ok(Self(euros))
    }

    /// Validate the `montant` field of an inbound request.
    ///
    /// Accepts a JSON number or a numeric string; anything else is rejected.
    pub fn from_json(value: Option<&Value>) -> DonationResult<Self> {
        let euros = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(DonationError::invalid_amount)?;

        Self::new(euros)
    }

    /// Amount in euros
    pub fn euros(&self) -> f64 {
        self.0
    }

    /// Amount in cents, rounded to the nearest cent
    pub fn minor_units(&self) -> i64 {
        (self.0 * 100.0).round() as i64
    }
}

impl fmt::Display for DonationAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert cents back to euros (for logging provider notifications)
pub fn minor_to_major(minor: i64) -> f64 {
    minor as f64 / 100.0
}
