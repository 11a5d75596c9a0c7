//! Potlis command line
//!
//! Runs the retail availability bot against a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Endpoint templates and store location
//! export BB_PRODUCT_API="https://.../search?categoryid={category}&pageSize={max}&query={query}"
//! export BB_STOCK_API="https://.../availability?locations={location}&skus={skus}"
//! export DEFAULT_STORE_LOCATION="977"
//! export OWNER_ID='["local"]'
//!
//! # Interactive session
//! cargo run --bin potlis -p potlis-retail
//!
//! # One command
//! cargo run --bin potlis -p potlis-retail -- --command "/bestbuy product rtx 3080"
//! ```

use clap::Parser;
use potlis_retail::bot::{BotConfig, OwnerList, RetailBot};
use potlis_retail::interface::BotPlatform;
use potlis_retail::platforms::{CliBot, StdoutSink};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "potlis")]
#[command(about = "Retail product and stock lookup bot", long_about = None)]
struct Args {
    /// Run a single command and exit
    #[arg(short, long)]
    command: Option<String>,

    /// User id of the local caller, matched against OWNER_ID
    #[arg(short, long, default_value = "local")]
    user: String,

    /// Skip the online/shutdown announcements
    #[arg(long)]
    quiet: bool,

    /// Print the markdown a chat client would receive
    #[arg(long)]
    markdown: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    potlis_utils::load_dotenv();
    potlis_utils::init_tracing_with_default("warn,potlis_retail=info");

    let args = Args::parse();

    let mut config = BotConfig::from_env()?;
    config.announce_lifecycle = !args.quiet;
    let owners = OwnerList::from_env()?;
    info!("Loaded {} owners", owners.len());

    let platform = if args.markdown {
        BotPlatform::Chat
    } else {
        BotPlatform::CLI
    };
    let sink = StdoutSink::for_platform(std::io::stdout(), platform);
    let bot = RetailBot::start(config, Arc::new(owners), &sink).await?;
    let cli = CliBot::new(bot, args.user);

    if let Some(command) = args.command {
        info!("Running command: {command}");
        cli.run_command(&command, &sink).await?;
        return Ok(());
    }

    cli.run_repl(&sink).await?;
    Ok(())
}
