//! SiaoPlay Content API Client
//!
//! HTTP client for the remote content API that feeds the track list builder.
//!
//! # Features
//!
//! - **Authentication**: login with email/password, bearer token kept in memory
//! - **Catalog**: audiobooks, albums, series, courses and movies
//! - **Track lists**: [`ContentApi`] turns fetched records into playable
//!   [`siao_core::Track`]s
//!
//! Responses may be bare JSON or wrapped in `{ "data", "message", "success" }`;
//! both are accepted.
//!
//! # Example
//!
//! ```ignore
//! use siao_api_client::{ContentApi, ContentClient};
//! use siao_core::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = ContentClient::new(&config.api)?;
//!     client.login("reader@example.com", "secret").await?;
//!
//!     let tracks = client
//!         .audiobook_tracks(&config.media.server_base_url, "42")
//!         .await?;
//!     println!("{} playable chapters", tracks.len());
//!     Ok(())
//! }
//! ```

mod api;
mod auth;
mod catalog;
mod client;
mod error;
mod response;
mod types;

pub use api::ContentApi;
pub use client::ContentClient;
pub use error::{ApiClientError, Result};
pub use types::{ApiEnvelope, LoginRequest, LoginResponse, User};

// Sub-clients for direct use
pub use auth::AuthClient;
pub use catalog::CatalogClient;
