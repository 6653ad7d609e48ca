//! # Mirror API Client
//!
//! An async Rust client for a wearable-device timeline REST API with
//! automatic token refresh support.
//!
//! ## Features
//!
//! - Automatic retry with a refreshed access token on 401 responses
//! - Validated timeline item and menu action models
//! - Lazy pagination over the timeline feed
//! - Pluggable credential source via the [`TokenSource`] trait
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mirror_api::api::TimelineApi;
//! use mirror_api::models::TimelineItem;
//! use mirror_api::{Client, ClientConfig, StaticToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://www.googleapis.com/mirror/v1");
//!     let client = Client::new(config, Arc::new(StaticToken::new("ya29.token")))?;
//!
//!     let mut item = TimelineItem::builder()
//!         .text("Hello from Rust")
//!         .with_delete_action()
//!         .notify()
//!         .build()?;
//!
//!     let id = client.insert_item_mut(&mut item).await?;
//!     println!("posted item {id}");
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod credential;
pub mod error;
pub mod models;

pub use client::{Client, ClientConfig, RequestOptions};
pub use credential::{StaticToken, TokenSource};
pub use error::{ApiError, ApiResult};
