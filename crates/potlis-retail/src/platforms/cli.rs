//! Terminal front end
//!
//! Reads commands from stdin and writes rendered results to a text writer.

use crate::bot::{BotAction, RetailBot};
use crate::error::{Result, RetailError};
use crate::interface::{BotPlatform, ChatSink, DisplayUnit, Formatter, FormatterFactory};
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

/// Sink that renders deliveries as text into a writer
///
/// Renders plain text by default; the `Chat` platform keeps the markdown
/// a chat client would receive.
pub struct TextSink<W> {
    writer: Mutex<W>,
    formatter: Box<dyn Formatter>,
}

/// Sink printing to the process stdout
pub type StdoutSink = TextSink<std::io::Stdout>;

impl StdoutSink {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self::for_platform(writer, BotPlatform::CLI)
    }

    /// Render as `platform` would
    pub fn for_platform(writer: W, platform: BotPlatform) -> Self {
        Self {
            writer: Mutex::new(writer),
            formatter: FormatterFactory::create(platform),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_block(&self, text: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| RetailError::DeliveryError("output writer poisoned".to_string()))?;
        writeln!(writer, "{text}\n")
            .and_then(|()| writer.flush())
            .map_err(|e| RetailError::DeliveryError(e.to_string()))
    }
}

#[async_trait]
impl<W: Write + Send + 'static> ChatSink for TextSink<W> {
    fn platform(&self) -> BotPlatform {
        self.formatter.platform()
    }

    async fn send_units(&self, units: &[DisplayUnit]) -> Result<()> {
        self.write_block(&self.formatter.format_batch(units))
    }

    async fn send_notice(&self, text: &str) -> Result<()> {
        self.write_block(&self.formatter.format_notice(text))
    }
}

/// Interactive terminal session for a single local user
pub struct CliBot {
    bot: RetailBot,
    user_id: String,
    prompt: String,
}

impl CliBot {
    pub fn new(bot: RetailBot, user_id: impl Into<String>) -> Self {
        Self {
            bot,
            user_id: user_id.into(),
            prompt: "potlis> ".to_string(),
        }
    }

    /// Set the prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Run one command and return what the loop should do next
    pub async fn run_once(&self, input: &str, sink: &dyn ChatSink) -> Result<BotAction> {
        self.bot.handle(&self.user_id, input, sink).await
    }

    /// Run a single command, then shut the bot down
    ///
    /// The shutdown announcement is sent even when the command fails.
    pub async fn run_command(self, input: &str, sink: &dyn ChatSink) -> Result<()> {
        let outcome = self.run_once(input, sink).await;
        self.stop(sink).await?;
        outcome.map(|_| ())
    }

    /// Announce shutdown and close the HTTP session
    pub async fn stop(self, sink: &dyn ChatSink) -> Result<()> {
        self.bot.stop(sink).await
    }

    /// Read lines from stdin until EOF, `/exit` or an owner `/shutdown`
    pub async fn run_repl(self, sink: &StdoutSink) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("{}", self.prompt);
            std::io::stdout()
                .flush()
                .map_err(|e| RetailError::DeliveryError(e.to_string()))?;

            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    error!("Error reading input: {e}");
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match self.run_once(&line, sink).await {
                Ok(BotAction::Continue) => {}
                Ok(BotAction::Shutdown) => break,
                Err(e) => error!("Command failed: {e}"),
            }
        }

        self.stop(sink).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::MockTransport;
    use crate::bot::{BotConfig, OwnerList};
    use std::sync::Arc;

    fn unit() -> DisplayUnit {
        DisplayUnit {
            sku: "7".to_string(),
            title: "Headphones".to_string(),
            description: "[Noise cancelling](https://shop.test/p/7)".to_string(),
            regular_price: "$99.00".to_string(),
            sale_price: "$79.00".to_string(),
            image_url: "https://img.test/7.jpg".to_string(),
            online_stock: "In Stock: 2".to_string(),
            in_store_stock: "Not Available".to_string(),
            store_breakdown: None,
            footer: "SKU: 7 requested at: 2024-01-01 00:00:00-05:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_text_sink_renders() {
        let sink = TextSink::new(Vec::new());
        sink.send_units(&[unit()]).await.unwrap();
        sink.send_notice("No product was found with query tv").await.unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("== Headphones =="));
        assert!(output.contains("Noise cancelling <https://shop.test/p/7>"));
        assert!(output.contains("» No product was found with query tv"));
    }

    #[tokio::test]
    async fn test_chat_platform_keeps_markdown() {
        let sink = TextSink::for_platform(Vec::new(), BotPlatform::Chat);
        assert_eq!(sink.platform(), BotPlatform::Chat);
        sink.send_units(&[unit()]).await.unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("**Headphones**"));
        assert!(output.contains("[Noise cancelling](https://shop.test/p/7)"));
        assert!(output.contains("_SKU: 7 requested at: 2024-01-01 00:00:00-05:00_"));
    }

    #[tokio::test]
    async fn test_run_command_announces_shutdown() {
        let config = BotConfig::builder().version("0.0.1").build();
        let sink = TextSink::new(Vec::new());
        let bot = RetailBot::start(config, Arc::new(OwnerList::default()), &sink)
            .await
            .unwrap();

        CliBot::new(bot, "local").run_command("/ping", &sink).await.unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let online = output.find("Potlis is now online!").unwrap();
        let pong = output.find("Pong!").unwrap();
        let shutdown = output.find("Potlis is shutting down. (Version 0.0.1)").unwrap();
        assert!(online < pong && pong < shutdown);
    }

    #[tokio::test]
    async fn test_run_once_exit() {
        let bot = RetailBot::with_transport(
            BotConfig::default(),
            Arc::new(OwnerList::default()),
            Arc::new(MockTransport::new()),
        );
        let cli = CliBot::new(bot, "local").with_prompt("> ");
        let sink = TextSink::new(Vec::new());

        assert_eq!(cli.run_once("/ping", &sink).await.unwrap(), BotAction::Continue);
        assert_eq!(cli.run_once("/exit", &sink).await.unwrap(), BotAction::Shutdown);
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("Pong!"));
    }
}
