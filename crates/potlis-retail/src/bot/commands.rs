//! Command parsing for the text command surface

use crate::engine::SearchCommand;
use crate::error::{Result, RetailError};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search products and their stock
    Product(SearchCommand),
    /// Liveness check
    Ping,
    /// Stop the bot (owners only)
    Shutdown,
    /// Show help
    Help,
    /// Leave the local session
    Exit,
}

impl Command {
    /// Parse a command from user input.
    ///
    /// Input without a leading `/` is a product search for the whole text.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(RetailError::CommandError("Empty input".to_string()));
        }

        let Some(body) = input.strip_prefix('/') else {
            return Ok(Command::Product(SearchCommand::new(input)));
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        let Some(first) = parts.first() else {
            return Err(RetailError::CommandError("Empty command".to_string()));
        };

        let cmd = first.to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "bestbuy" | "bb" => match args.first().map(|s| s.to_lowercase()).as_deref() {
                Some("product") => Ok(Command::Product(parse_search(&args[1..])?)),
                Some(other) => Err(RetailError::CommandError(format!(
                    "Unknown {cmd} subcommand: {other}"
                ))),
                None => Err(RetailError::CommandError(format!(
                    "Missing subcommand for {cmd}, try /{cmd} product <query>"
                ))),
            },
            "product" | "p" => Ok(Command::Product(parse_search(args)?)),
            "ping" => Ok(Command::Ping),
            "shutdown" => Ok(Command::Shutdown),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(RetailError::CommandError(format!("Unknown command: {cmd}"))),
        }
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Product(_) => "Product and stock search",
            Command::Ping => "Liveness check",
            Command::Shutdown => "Shut the bot down",
            Command::Help => "Show help",
            Command::Exit => "Exit the session",
        }
    }
}

/// `<query words...> [--category <c>] [--max <n>]`, options in any position
fn parse_search(args: &[&str]) -> Result<SearchCommand> {
    let mut words = Vec::new();
    let mut category = None;
    let mut max = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--category" | "-c" => {
                let value = iter.next().ok_or_else(|| {
                    RetailError::CommandError("Missing value for --category".to_string())
                })?;
                category = Some((*value).to_string());
            }
            "--max" | "-m" => {
                let value = iter.next().ok_or_else(|| {
                    RetailError::CommandError("Missing value for --max".to_string())
                })?;
                max = Some((*value).to_string());
            }
            word => words.push(word),
        }
    }

    if words.is_empty() {
        return Err(RetailError::CommandError(
            "Missing query for product command".to_string(),
        ));
    }

    Ok(SearchCommand {
        query: words.join(" "),
        category,
        max,
    })
}
