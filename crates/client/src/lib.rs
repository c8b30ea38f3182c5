//! HTTP clients for the Potaful services.
//!
//! Provides the pot service REST client, the plant-recommendation webhook
//! client, the weather client, sign-in callback handling and the typed
//! wire responses, all built on [`reqwest`].

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod recommendation;
pub mod responses;
pub mod services;
pub mod weather;

pub use api::PotApi;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use services::Services;
