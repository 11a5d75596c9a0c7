//! Chat platform interfaces
//!
//! Platform-agnostic delivery types used to hand results to a chat client

pub mod display;
pub mod formatter;
pub mod interface;

pub use display::DisplayUnit;
pub use formatter::{Formatter, FormatterFactory, MarkdownFormatter, PlainFormatter};
pub use interface::{BotPlatform, ChatSink, Delivery};
