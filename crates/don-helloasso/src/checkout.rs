//! # HelloAsso Checkout Intents
//!
//! Implementation of the HelloAsso checkout-intents API.
//! HelloAsso hosts the card form; we only create the intent and hand the
//! donor's browser the redirect URL.

use crate::config::HelloAssoConfig;
use crate::token::TokenManager;
use async_trait::async_trait;
use chrono::Utc;
use don_core::{
    CallbackUrls, CheckoutIntent, DonationCheckout, DonationError, DonationGateway,
    DonationMetadata, DonationResult, IntentId, PayerIdentity,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// HelloAsso checkout gateway
pub struct HelloAssoGateway {
    config: HelloAssoConfig,
    client: Client,
    tokens: TokenManager,
}

impl HelloAssoGateway {
    /// Create a new HelloAsso gateway with its own token cache
    pub fn new(config: HelloAssoConfig) -> DonationResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                DonationError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let tokens = TokenManager::new(config.clone(), client.clone());

        Ok(Self {
            config,
            client,
            tokens,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> DonationResult<Self> {
        Self::new(HelloAssoConfig::from_env())
    }

    /// Build the checkout-intent request body
    fn build_request(checkout: &DonationCheckout, urls: &CallbackUrls) -> CheckoutIntentRequest {
        let amount = checkout.minor_units();

        CheckoutIntentRequest {
            total_amount: amount,
            // No installments: everything is paid up front
            initial_amount: amount,
            item_name: checkout.item_name(),
            back_url: urls.back_url(),
            error_url: urls.error_url(),
            return_url: urls.return_url(),
            contains_donation: true,
            payer: checkout.payer(),
            metadata: checkout.metadata(),
        }
    }
}

#[async_trait]
impl DonationGateway for HelloAssoGateway {
    #[instrument(skip(self, checkout, urls), fields(reference = %checkout.reference))]
    async fn create_checkout(
        &self,
        checkout: &DonationCheckout,
        urls: &CallbackUrls,
    ) -> DonationResult<CheckoutIntent> {
        let request = Self::build_request(checkout, urls);

        debug!(
            "Creating HelloAsso checkout intent: total_amount={}, org={}",
            request.total_amount, self.config.organization_slug
        );

        let token = self.tokens.acquire_token().await?;

        let response = self
            .client
            .post(self.config.checkout_intents_url())
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await
            .map_err(|e| DonationError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DonationError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("HelloAsso checkout error: status={}, body={}", status, body);

            if status == StatusCode::CONFLICT {
                return Err(DonationError::OrganizationNotVerified);
            }

            return Err(DonationError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let intent: CheckoutIntentResponse = serde_json::from_str(&body).map_err(|e| {
            DonationError::Serialization(format!("Failed to parse HelloAsso response: {}", e))
        })?;

        info!(
            "Checkout created: {} for {}€",
            intent.id, checkout.amount
        );

        Ok(CheckoutIntent {
            checkout_id: intent.id,
            redirect_url: intent.redirect_url,
            created_at: Utc::now(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "helloasso"
    }
}

// =============================================================================
// HelloAsso API Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutIntentRequest {
    total_amount: i64,
    initial_amount: i64,
    item_name: String,
    back_url: String,
    error_url: String,
    return_url: String,
    contains_donation: bool,
    payer: PayerIdentity,
    metadata: DonationMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutIntentResponse {
    id: IntentId,
    redirect_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use don_core::DonationAmount;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INTENTS_PATH: &str = "/v5/organizations/les-ailes-de-charlotte/checkout-intents";

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "bearer-123",
                "refresh_token": "refresh-123",
                "expires_in": 1800
            })))
            .mount(server)
            .await;
    }

    fn gateway_for(server: &MockServer) -> HelloAssoGateway {
        let config = HelloAssoConfig::new("id", "secret", "les-ailes-de-charlotte")
            .with_api_base_url(server.uri());
        HelloAssoGateway::new(config).unwrap()
    }

    fn checkout(euros: f64) -> DonationCheckout {
        DonationCheckout::new(DonationAmount::new(euros).unwrap())
    }

    #[test]
    fn test_build_request() {
        let checkout = checkout(10.0);
        let urls = CallbackUrls::new("https://don.grandamourfestival.fr");
        let request = HelloAssoGateway::build_request(&checkout, &urls);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["totalAmount"], 1000);
        assert_eq!(body["initialAmount"], 1000);
        assert_eq!(body["itemName"], "Don Grand Amour Festival - 10€");
        assert_eq!(body["backUrl"], "https://don.grandamourfestival.fr");
        assert_eq!(body["errorUrl"], "https://don.grandamourfestival.fr/erreur.html");
        assert_eq!(body["returnUrl"], "https://don.grandamourfestival.fr/merci.html");
        assert_eq!(body["containsDonation"], true);
        assert_eq!(body["payer"]["firstName"], "Donateur");
        assert_eq!(body["payer"]["city"], "Arles");
        assert_eq!(body["metadata"]["source"], "qr-code-festival");
        assert_eq!(body["metadata"]["montant_euros"], 10.0);
        assert_eq!(
            body["metadata"]["reference"],
            checkout.reference.to_string()
        );
    }

    #[tokio::test]
    async fn test_create_checkout_success() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path(INTENTS_PATH))
            .and(header("authorization", "Bearer bearer-123"))
            .and(body_partial_json(json!({
                "totalAmount": 2550,
                "initialAmount": 2550,
                "containsDonation": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4242,
                "redirectUrl": "https://checkout.helloasso-sandbox.com/4242"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let intent = gateway
            .create_checkout(&checkout(25.5), &CallbackUrls::default())
            .await
            .unwrap();

        assert_eq!(intent.checkout_id, IntentId::Number(4242));
        assert_eq!(
            intent.redirect_url,
            "https://checkout.helloasso-sandbox.com/4242"
        );
    }

    #[tokio::test]
    async fn test_conflict_means_organization_not_verified() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path(INTENTS_PATH))
            .respond_with(ResponseTemplate::new(409).set_body_string("organization not allowed"))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .create_checkout(&checkout(10.0), &CallbackUrls::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DonationError::OrganizationNotVerified));
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_other_failures_are_provider_errors() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path(INTENTS_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("{\"errors\":[\"bad\"]}"))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .create_checkout(&checkout(10.0), &CallbackUrls::default())
            .await
            .unwrap_err();

        match err {
            DonationError::Provider { status, ref body } => {
                assert_eq!(status, 400);
                assert!(body.contains("bad"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_auth_failure_skips_checkout_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(INTENTS_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .create_checkout(&checkout(10.0), &CallbackUrls::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DonationError::Authentication { status: 401 }));
    }

    #[tokio::test]
    async fn test_token_is_reused_across_checkouts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "bearer-123",
                "refresh_token": "refresh-123",
                "expires_in": 1800
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(INTENTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "redirectUrl": "https://checkout.helloasso-sandbox.com/1"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        for euros in [5.0, 15.0] {
            gateway
                .create_checkout(&checkout(euros), &CallbackUrls::default())
                .await
                .unwrap();
        }
    }

    #[test]
    fn test_provider_name() {
        let gateway = HelloAssoGateway::new(HelloAssoConfig::new("id", "secret", "asso")).unwrap();
        assert_eq!(gateway.provider_name(), "helloasso");
        assert_eq!(gateway.webhook_path(), "/webhook/helloasso");
    }
}
