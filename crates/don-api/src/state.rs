//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the payment gateway, the notification handler, and configuration.

use don_core::{BoxedDonationGateway, CallbackUrls, DonationError, DonationResult};
use don_helloasso::{HelloAssoConfig, HelloAssoGateway, LoggingNotificationHandler, NotificationHandler};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used for the provider's callback URLs
    pub base_url: String,
    /// Directory served as static files
    pub public_dir: PathBuf,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> DonationResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys fall back to defaults;
    /// a set but unparseable `PORT` is a configuration error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DonationResult<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                DonationError::Configuration(format!("Invalid PORT {:?}: {}", raw, e))
            })?,
            None => 3000,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            base_url: lookup("BASE_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> DonationResult<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            DonationError::Configuration(format!(
                "Invalid listen address {}:{}: {}",
                self.host, self.port, e
            ))
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway
    pub gateway: BoxedDonationGateway,
    /// Receives provider notifications
    pub notifications: Arc<dyn NotificationHandler>,
    /// Callback URLs sent with every checkout
    pub urls: CallbackUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the production state: HelloAsso gateway, logging notifications
    pub fn new(config: AppConfig, helloasso: HelloAssoConfig) -> anyhow::Result<Self> {
        let gateway = HelloAssoGateway::new(helloasso)
            .map_err(|e| anyhow::anyhow!("Failed to initialize HelloAsso: {}", e))?;

        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    /// Create state around any gateway
    pub fn with_gateway(config: AppConfig, gateway: BoxedDonationGateway) -> Self {
        Self {
            gateway,
            notifications: Arc::new(LoggingNotificationHandler),
            urls: CallbackUrls::new(&config.base_url),
            config,
        }
    }

    /// Builder: replace the notification handler
    pub fn with_notification_handler(mut self, handler: Arc<dyn NotificationHandler>) -> Self {
        self.notifications = handler;
        self
    }
}
