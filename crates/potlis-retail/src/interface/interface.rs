//! Delivery surface abstractions

use super::display::DisplayUnit;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Platform identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotPlatform {
    /// Command-line interface
    CLI,

    /// Discord-style chat with embeds
    Chat,
}

/// One outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// Up to the transport limit of display units in a single message
    Batch(Vec<DisplayUnit>),

    /// Plain-text notice
    Notice(String),
}

impl Delivery {
    pub fn notice(text: impl Into<String>) -> Self {
        Self::Notice(text.into())
    }

    /// Notice text, if this is a notice
    pub fn as_notice(&self) -> Option<&str> {
        match self {
            Self::Notice(text) => Some(text),
            Self::Batch(_) => None,
        }
    }

    /// Display units carried by this delivery
    pub fn units(&self) -> &[DisplayUnit] {
        match self {
            Self::Batch(units) => units,
            Self::Notice(_) => &[],
        }
    }
}

/// Outbound half of a chat platform client
#[async_trait]
pub trait ChatSink: Send + Sync {
    fn platform(&self) -> BotPlatform;

    /// Send one message containing `units`
    async fn send_units(&self, units: &[DisplayUnit]) -> Result<()>;

    /// Send a single plain-text message
    async fn send_notice(&self, text: &str) -> Result<()>;

    /// Send a delivery with the matching method
    async fn deliver(&self, delivery: &Delivery) -> Result<()> {
        match delivery {
            Delivery::Batch(units) => self.send_units(units).await,
            Delivery::Notice(text) => self.send_notice(text).await,
        }
    }
}
