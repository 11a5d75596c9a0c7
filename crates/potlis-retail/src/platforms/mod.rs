//! Platform-specific bot implementations

pub mod cli;

pub use cli::{CliBot, StdoutSink, TextSink};
