//! Retail product availability bot
//!
//! This crate answers chat product searches with stock information. A
//! request flows through:
//!
//! - Query validation (max-count parsing and the per-caller result cap)
//! - Catalog search over the product API
//! - One batched stock lookup for every SKU found
//! - Positional correlation of products with availabilities
//! - Formatting into display units and pagination into messages of ten
//!
//! # Architecture
//!
//! - [`api`]: HTTP transport and the two JSON clients
//! - [`engine`]: correlation, pagination and the end-to-end pipeline
//! - [`interface`]: display units and the chat delivery trait
//! - [`bot`]: command parsing, owner checks, lifecycle
//! - [`platforms`]: the terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use potlis_retail::{AvailabilityPipeline, Caller, ReqwestTransport, RetailConfig, SearchCommand};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RetailConfig::from_env()?;
//!     let transport = Arc::new(ReqwestTransport::new(&config)?);
//!     let pipeline = AvailabilityPipeline::new(&config, transport);
//!
//!     let command = SearchCommand::new("rtx 3080").with_max("5");
//!     for delivery in pipeline.respond(&command, Caller::new("me")).await {
//!         println!("{delivery:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod platforms;
pub mod validator;

// Re-export main types for convenience
pub use api::{Availability, Product, ReqwestTransport, Transport};
pub use config::RetailConfig;
pub use engine::{AvailabilityPipeline, SearchCommand};
pub use error::{Result, RetailError};
pub use interface::{ChatSink, Delivery, DisplayUnit};
pub use validator::{Caller, QueryValidator, SearchRequest};
