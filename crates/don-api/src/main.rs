//! # don-server
//!
//! Donation page backend for the Grand Amour Festival.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export HELLOASSO_CLIENT_ID=...
//! export HELLOASSO_CLIENT_SECRET=...
//! export ASSO_SLUG=les-ailes-de-charlotte
//! export BASE_URL=https://don.grandamourfestival.fr
//!
//! # Run the server
//! don-server
//! ```

use don_api::{routes, AppConfig, AppState};
use don_helloasso::HelloAssoConfig;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = AppConfig::from_env()?;
    let helloasso = HelloAssoConfig::from_env();

    print_banner(&config, &helloasso);

    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    info!("Environment: {}", config.environment);
    info!("Public directory: {}", config.public_dir.display());
    if !helloasso.is_sandbox() {
        info!("HelloAsso production API in use");
    }

    let state = AppState::new(config, helloasso)?;
    let app = routes::create_router(state);

    if !is_prod {
        info!("💳 Checkout: POST http://{}/api/creer-don", addr);
        info!("🔔 Webhook: POST http://{}/webhook/helloasso", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner(config: &AppConfig, helloasso: &HelloAssoConfig) {
    println!(
        r#"
  🎵 Grand Amour Festival - Page de don 🎵
  ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
  URL locale    : http://localhost:{}
  API HelloAsso : {}
  Association   : {}
  Version       : {}
"#,
        config.port,
        helloasso.api_base_url,
        helloasso.organization_slug,
        env!("CARGO_PKG_VERSION")
    );
}
