//! # Request Handlers
//!
//! Axum request handlers for the donation API.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use don_core::{
    DonationAmount, DonationCheckout, DonationError, DonationResult, IntentId, Notification,
};
use don_helloasso::dispatch_notification;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create donation response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationResponse {
    /// Provider payment page (redirect the donor here)
    pub redirect_url: String,
    /// Provider checkout-intent id
    pub checkout_id: IntentId,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub erreur: String,
}

impl ErrorResponse {
    pub fn new(erreur: impl Into<String>) -> Self {
        Self {
            erreur: erreur.into(),
        }
    }
}

/// Webhook acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

fn donation_error_to_response(err: DonationError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.client_message())))
}

/// Read `montant` out of a raw request body
fn parse_amount(body: &[u8]) -> DonationResult<DonationAmount> {
    let request: Value =
        serde_json::from_slice(body).map_err(|_| DonationError::invalid_amount())?;
    DonationAmount::from_json(request.get("montant"))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Create a donation checkout and return the provider redirect URL
#[instrument(skip(state, body))]
pub async fn create_donation(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateDonationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let amount = parse_amount(&body).map_err(|e| {
        warn!("Rejected donation request: {}", e);
        donation_error_to_response(e)
    })?;

    let checkout = DonationCheckout::new(amount);

    info!(
        "Creating donation checkout: amount={}€, minor_units={}, reference={}",
        checkout.amount,
        checkout.minor_units(),
        checkout.reference
    );

    let intent = state
        .gateway
        .create_checkout(&checkout, &state.urls)
        .await
        .map_err(|e| {
            error!("Failed to create checkout: {}", e);
            donation_error_to_response(e)
        })?;

    Ok(Json(CreateDonationResponse {
        redirect_url: intent.redirect_url,
        checkout_id: intent.checkout_id,
    }))
}

/// Handle a HelloAsso notification.
///
/// Always answers 200: HelloAsso redelivers anything else.
#[instrument(skip(state, body))]
pub async fn helloasso_webhook(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<WebhookAck>) {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            warn!("Ignoring unreadable HelloAsso webhook body: {}", e);
            return (StatusCode::OK, Json(WebhookAck { received: true }));
        }
    };

    match Notification::parse(&body) {
        Ok(notification) => {
            info!("HelloAsso webhook received: {:?}", notification.event_type);

            if let Err(e) = dispatch_notification(state.notifications.as_ref(), notification) {
                error!("Webhook handler error: {}", e);
            }
        }
        Err(e) => warn!("Ignoring malformed HelloAsso webhook: {}", e),
    }

    (StatusCode::OK, Json(WebhookAck { received: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use don_core::error::{
        CHECKOUT_FAILED_MESSAGE, INVALID_AMOUNT_MESSAGE, ORGANIZATION_NOT_VERIFIED_MESSAGE,
    };

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(br#"{"montant":10}"#).unwrap().minor_units(), 1000);
        assert_eq!(parse_amount(br#"{"montant":"42.5"}"#).unwrap().minor_units(), 4250);

        let rejected: [&[u8]; 6] = [
            br#"{"montant":0.5}"#,
            br#"{"montant":10001}"#,
            br#"{"montant":null}"#,
            br#"{"autre":10}"#,
            b"",
            b"montant=10",
        ];
        for body in rejected {
            let err = parse_amount(body).unwrap_err();
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn test_error_conversion() {
        let (status, Json(body)) = donation_error_to_response(DonationError::invalid_amount());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.erreur, INVALID_AMOUNT_MESSAGE);

        let (status, Json(body)) =
            donation_error_to_response(DonationError::OrganizationNotVerified);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.erreur, ORGANIZATION_NOT_VERIFIED_MESSAGE);

        let (status, Json(body)) = donation_error_to_response(DonationError::Provider {
            status: 422,
            body: "internal detail".into(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.erreur, CHECKOUT_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(health) = health().await;
        assert_eq!(health.status, "ok");
        assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
        assert!(health.timestamp.ends_with('Z'));
    }
}
