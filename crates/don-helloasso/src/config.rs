//! # HelloAsso Configuration
//!
//! Configuration for the HelloAsso integration.
//! Credentials are read from environment variables, falling back to
//! placeholders so the server still boots on a fresh checkout.

use std::env;

/// Sandbox API, used unless `HELLOASSO_API_URL` says otherwise
pub const SANDBOX_API_URL: &str = "https://api.helloasso-sandbox.com";

/// Production API
pub const PRODUCTION_API_URL: &str = "https://api.helloasso.com";

const PLACEHOLDER_CLIENT_ID: &str = "TON_CLIENT_ID";
const PLACEHOLDER_CLIENT_SECRET: &str = "TON_CLIENT_SECRET";
const DEFAULT_ORGANIZATION_SLUG: &str = "les-ailes-de-charlotte";

/// HelloAsso API configuration
#[derive(Clone)]
pub struct HelloAssoConfig {
    /// OAuth2 client id (from dev.helloasso.com)
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: String,

    /// Organization slug, as seen in the public HelloAsso URL
    pub organization_slug: String,

    /// API base URL (sandbox, production, or a mock in tests)
    pub api_base_url: String,
}

impl HelloAssoConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized env vars:
    /// - `HELLOASSO_CLIENT_ID`
    /// - `HELLOASSO_CLIENT_SECRET`
    /// - `ASSO_SLUG`
    /// - `HELLOASSO_API_URL`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let var_or = |key: &str, default: &str| env::var(key).unwrap_or_else(|_| default.to_string());

        let config = Self {
            client_id: var_or("HELLOASSO_CLIENT_ID", PLACEHOLDER_CLIENT_ID),
            client_secret: var_or("HELLOASSO_CLIENT_SECRET", PLACEHOLDER_CLIENT_SECRET),
            organization_slug: var_or("ASSO_SLUG", DEFAULT_ORGANIZATION_SLUG),
            api_base_url: var_or("HELLOASSO_API_URL", SANDBOX_API_URL),
        };

        if config.has_placeholder_credentials() {
            tracing::warn!(
                "HELLOASSO_CLIENT_ID / HELLOASSO_CLIENT_SECRET not set, using placeholders; \
                 checkout creation will fail until real credentials are configured"
            );
        }

        config
    }

    /// Create config with explicit values (sandbox API by default)
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        organization_slug: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            organization_slug: organization_slug.into(),
            api_base_url: SANDBOX_API_URL.to_string(),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// OAuth2 token endpoint
    pub fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.api_base_url)
    }

    /// Checkout-intent creation endpoint for the organization
    pub fn checkout_intents_url(&self) -> String {
        format!(
            "{}/v5/organizations/{}/checkout-intents",
            self.api_base_url, self.organization_slug
        )
    }

    /// Check if pointing at the sandbox
    pub fn is_sandbox(&self) -> bool {
        self.api_base_url.contains("helloasso-sandbox")
    }

    /// Check if the credentials are still the shipped placeholders
    pub fn has_placeholder_credentials(&self) -> bool {
        self.client_id == PLACEHOLDER_CLIENT_ID || self.client_secret == PLACEHOLDER_CLIENT_SECRET
    }
}

impl std::fmt::Debug for HelloAssoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelloAssoConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("organization_slug", &self.organization_slug)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let config = HelloAssoConfig::new("id", "secret", "les-ailes-de-charlotte");

        assert_eq!(
            config.token_url(),
            "https://api.helloasso-sandbox.com/oauth2/token"
        );
        assert_eq!(
            config.checkout_intents_url(),
            "https://api.helloasso-sandbox.com/v5/organizations/les-ailes-de-charlotte/checkout-intents"
        );
        assert!(config.is_sandbox());
    }

    #[test]
    fn test_custom_base_url() {
        let config =
            HelloAssoConfig::new("id", "secret", "asso").with_api_base_url("http://127.0.0.1:9999/");

        assert_eq!(config.token_url(), "http://127.0.0.1:9999/oauth2/token");
        assert!(!config.is_sandbox());

        let config = config.with_api_base_url(PRODUCTION_API_URL);
        assert!(!config.is_sandbox());
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(HelloAssoConfig::new(PLACEHOLDER_CLIENT_ID, "real", "asso").has_placeholder_credentials());
        assert!(!HelloAssoConfig::new("real-id", "real-secret", "asso").has_placeholder_credentials());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = HelloAssoConfig::new("id", "super-secret", "asso");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
