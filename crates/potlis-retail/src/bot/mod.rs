//! Potlis retail bot
//!
//! Ties the command surface to the availability pipeline.
//!
//! # Features
//!
//! - **Product search**: `/bestbuy product <query>` with optional
//!   `--category` and `--max`
//! - **Owner privileges**: owners may exceed the result cap and shut the bot down
//! - **Lifecycle**: the pooled HTTP session lives as long as the bot
//!
//! # Example
//!
//! ```rust,ignore
//! use potlis_retail::bot::{BotConfig, OwnerList, RetailBot};
//! use potlis_retail::platforms::StdoutSink;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let sink = StdoutSink::stdout();
//!     let bot = RetailBot::start(BotConfig::from_env()?, Arc::new(OwnerList::from_env()?), &sink).await?;
//!     bot.handle("local", "/bestbuy product rtx 3080", &sink).await?;
//!     bot.stop(&sink).await
//! }
//! ```

pub mod commands;
pub mod privilege;

use crate::api::{ReqwestTransport, Transport};
use crate::config::RetailConfig;
use crate::engine::AvailabilityPipeline;
use crate::error::Result;
use crate::interface::{ChatSink, Formatter, FormatterFactory};
use crate::validator::Caller;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub use commands::Command;
pub use privilege::{OwnerList, PrivilegeCheck};

/// Configuration for the bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Pipeline configuration
    pub retail: RetailConfig,
    /// Version shown in announcements
    pub version: String,
    /// Whether to announce startup and shutdown on the sink
    pub announce_lifecycle: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            retail: RetailConfig::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            announce_lifecycle: true,
        }
    }
}

impl BotConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            retail: RetailConfig::from_env()?,
            ..Default::default()
        })
    }

    /// Create a builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    retail: Option<RetailConfig>,
    version: Option<String>,
    announce_lifecycle: Option<bool>,
}

impl BotConfigBuilder {
    /// Set pipeline config
    pub fn retail(mut self, config: RetailConfig) -> Self {
        self.retail = Some(config);
        self
    }

    /// Set the announced version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Enable or disable lifecycle announcements
    pub fn announce_lifecycle(mut self, announce: bool) -> Self {
        self.announce_lifecycle = Some(announce);
        self
    }

    /// Build the config
    pub fn build(self) -> BotConfig {
        let defaults = BotConfig::default();
        BotConfig {
            retail: self.retail.unwrap_or(defaults.retail),
            version: self.version.unwrap_or(defaults.version),
            announce_lifecycle: self.announce_lifecycle.unwrap_or(defaults.announce_lifecycle),
        }
    }
}

/// What the caller loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAction {
    Continue,
    Shutdown,
}

/// Retail availability bot
pub struct RetailBot {
    config: BotConfig,
    pipeline: AvailabilityPipeline,
    privileges: Arc<dyn PrivilegeCheck>,
    transport: Arc<dyn Transport>,
}

impl RetailBot {
    /// Open the HTTP session and announce the bot on `sink`
    pub async fn start(
        config: BotConfig,
        privileges: Arc<dyn PrivilegeCheck>,
        sink: &dyn ChatSink,
    ) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config.retail)?);
        info!("HTTP session started");
        let bot = Self::with_transport(config, privileges, transport);
        if bot.config.announce_lifecycle {
            sink.send_notice(&bot.online_message()).await?;
        }
        Ok(bot)
    }

    /// Build a bot over an existing transport, without announcing
    pub fn with_transport(
        config: BotConfig,
        privileges: Arc<dyn PrivilegeCheck>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let pipeline = AvailabilityPipeline::new(&config.retail, Arc::clone(&transport));
        Self {
            config,
            pipeline,
            privileges,
            transport,
        }
    }

    pub fn online_message(&self) -> String {
        format!("Potlis is now online! (Version {})", self.config.version)
    }

    pub fn shutdown_message(&self) -> String {
        format!("Potlis is shutting down. (Version {})", self.config.version)
    }

    pub fn pipeline(&self) -> &AvailabilityPipeline {
        &self.pipeline
    }

    /// Resolve a platform user id into a caller
    pub fn caller(&self, user_id: &str) -> Caller {
        Caller::new(user_id).privileged(self.privileges.is_privileged(user_id))
    }

    /// Parse and execute one line of input from `user_id`, answering on `sink`
    pub async fn handle(&self, user_id: &str, input: &str, sink: &dyn ChatSink) -> Result<BotAction> {
        let received = Instant::now();
        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e) => {
                warn!("Could not parse {input:?} from {user_id}: {e}");
                sink.send_notice(&e.to_string()).await?;
                return Ok(BotAction::Continue);
            }
        };
        info!("{} requested by {user_id}", command.description());

        let caller = self.caller(user_id);
        match command {
            Command::Product(search) => {
                self.pipeline.run(&search, caller, sink).await?;
                Ok(BotAction::Continue)
            }
            Command::Ping => {
                // Local handling time only; there is no platform round trip to measure.
                let handled = received.elapsed().as_micros();
                sink.send_notice(&format!("Pong! Handled in {handled} µs."))
                    .await?;
                Ok(BotAction::Continue)
            }
            Command::Help => {
                let formatter: Box<dyn Formatter> = FormatterFactory::create(sink.platform());
                sink.send_notice(&formatter.format_help()).await?;
                Ok(BotAction::Continue)
            }
            Command::Shutdown if caller.privileged => {
                info!("Shutdown signal received");
                sink.send_notice("Now shutting down.").await?;
                Ok(BotAction::Shutdown)
            }
            Command::Shutdown => {
                sink.send_notice("You need to be an owner to do that.").await?;
                Ok(BotAction::Continue)
            }
            Command::Exit => Ok(BotAction::Shutdown),
        }
    }

    /// Announce shutdown and close the HTTP session
    pub async fn stop(self, sink: &dyn ChatSink) -> Result<()> {
        if self.config.announce_lifecycle {
            sink.send_notice(&self.shutdown_message()).await?;
        }
        drop(self.pipeline);
        drop(self.transport);
        info!("HTTP session closed");
        Ok(())
    }
}
