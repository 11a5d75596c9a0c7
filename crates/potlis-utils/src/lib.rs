//! Shared utilities for potlis
//!
//! This crate provides common functionality used across the potlis workspace:
//! tracing setup and typed access to environment variables.

pub mod config;
pub mod logging;

pub use config::{EnvError, json_var, load_dotenv, optional_var, parse_var};
pub use logging::{init_tracing, init_tracing_with_default};
