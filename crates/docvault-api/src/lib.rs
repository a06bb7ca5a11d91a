//! # docvault-api
//!
//! HTTP surface for DocVault built on Axum. Handlers stay thin: they
//! extract and validate the request, call one service, and shape the
//! response. All domain errors leave through [`error::ApiError`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
