//! # don-api
//!
//! HTTP API layer for the festival donation backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Donation checkout endpoint
//! - HelloAsso webhook receiver
//! - Static file serving for the donation pages
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/creer-don` | Create donation checkout |
//! | POST | `/webhook/helloasso` | HelloAsso notifications |
//! | GET | `/*` | Static files |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
