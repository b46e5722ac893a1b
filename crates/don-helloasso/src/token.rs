//! # OAuth2 Token Management
//!
//! HelloAsso authenticates API calls with short-lived bearer tokens.
//! `TokenManager` caches the current token and transparently renews it:
//! a refresh-token grant when a refresh token is held, a client-credentials
//! grant otherwise.
//!
//! The whole check-then-renew sequence runs under one async mutex, so callers
//! racing on an expired token trigger a single grant and share its result.

use crate::config::HelloAssoConfig;
use chrono::Utc;
use don_core::{DonationError, DonationResult};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

/// A token is renewed once it is within this margin of its expiry
pub const REFRESH_MARGIN_MS: i64 = 60_000;

/// Cached token state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Absolute expiry, milliseconds since the Unix epoch
    pub expires_at_ms: Option<i64>,
}

impl TokenState {
    /// True if the access token can be reused at `now_ms`
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        match (&self.access_token, self.expires_at_ms) {
            (Some(_), Some(expires_at)) => now_ms < expires_at.saturating_sub(REFRESH_MARGIN_MS),
            _ => false,
        }
    }

    fn next_grant(&self) -> Grant {
        match &self.refresh_token {
            Some(refresh_token) => Grant::RefreshToken(refresh_token.clone()),
            None => Grant::ClientCredentials,
        }
    }
}

/// OAuth2 grant used to obtain a new token
#[derive(Debug, Clone, PartialEq, Eq)]
enum Grant {
    ClientCredentials,
    RefreshToken(String),
}

impl Grant {
    fn name(&self) -> &'static str {
        match self {
            Grant::ClientCredentials => "client_credentials",
            Grant::RefreshToken(_) => "refresh_token",
        }
    }

    fn form_params<'a>(&'a self, config: &'a HelloAssoConfig) -> Vec<(&'static str, &'a str)> {
        match self {
            Grant::ClientCredentials => vec![
                ("grant_type", self.name()),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
            ],
            Grant::RefreshToken(refresh_token) => vec![
                ("grant_type", self.name()),
                ("client_id", config.client_id.as_str()),
                ("refresh_token", refresh_token.as_str()),
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Lifetime in seconds
    expires_in: i64,
}

/// Owns the cached HelloAsso token
pub struct TokenManager {
    config: HelloAssoConfig,
    client: Client,
    state: Mutex<TokenState>,
}

impl TokenManager {
    /// Create a token manager with an empty cache
    pub fn new(config: HelloAssoConfig, client: Client) -> Self {
        Self::with_state(config, client, TokenState::default())
    }

    /// Create a token manager starting from a known state
    pub fn with_state(config: HelloAssoConfig, client: Client, state: TokenState) -> Self {
        Self {
            config,
            client,
            state: Mutex::new(state),
        }
    }

    /// Return a valid access token, renewing it first if needed.
    #[instrument(skip(self))]
    pub async fn acquire_token(&self) -> DonationResult<String> {
        let mut state = self.state.lock().await;
        let now = now_ms();

        if state.is_valid_at(now) {
            if let Some(token) = &state.access_token {
                debug!("Reusing cached HelloAsso token");
                return Ok(token.clone());
            }
        }

        let grant = state.next_grant();
        debug!("Requesting HelloAsso token: grant_type={}", grant.name());

        let response = match self.request_grant(&grant).await {
            Ok(response) => response,
            Err(err) => {
                if matches!(grant, Grant::RefreshToken(_))
                    && matches!(err, DonationError::Authentication { .. })
                {
                    warn!("Refresh token rejected, falling back to client credentials next time");
                    *state = TokenState::default();
                }
                return Err(err);
            }
        };

        *state = TokenState {
            access_token: Some(response.access_token.clone()),
            refresh_token: response.refresh_token,
            expires_at_ms: Some(now.saturating_add(response.expires_in.saturating_mul(1000))),
        };

        info!(
            "HelloAsso token obtained via {}, expires in {} seconds",
            grant.name(),
            response.expires_in
        );

        Ok(response.access_token)
    }

    /// Copy of the cached state
    pub async fn snapshot(&self) -> TokenState {
        self.state.lock().await.clone()
    }

    async fn request_grant(&self, grant: &Grant) -> DonationResult<TokenResponse> {
        let response = self
            .client
            .post(self.config.token_url())
            .form(&grant.form_params(&self.config))
            .send()
            .await
            .map_err(|e| DonationError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DonationError::Network(e.to_string()))?;

        if !status.is_success() {
            error!(
                "HelloAsso authentication failed: status={}, body={}",
                status, body
            );
            return Err(DonationError::Authentication {
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            DonationError::Serialization(format!("Failed to parse token response: {}", e))
        })
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
