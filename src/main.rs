use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use ticimax::client::{DEFAULT_LIST_PAGE, DEFAULT_LIST_PAGE_SIZE};
use ticimax::config::{
    DEFAULT_BASE_URL, DEFAULT_RETRY_SLEEP_MS, DEFAULT_RETRY_TIMES, DEFAULT_TIMEOUT_SECS,
};
use ticimax::{ClientConfig, TicimaxClient, mapper};

/// ticimax - Ticimax order API client
///
/// Create, fetch and list orders. Connection settings can also be given via
/// TICIMAX_BASE_URL, TICIMAX_API_KEY, TICIMAX_TIMEOUT, TICIMAX_RETRY_TIMES
/// and TICIMAX_RETRY_SLEEP.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Ticimax API base URL
    #[arg(
        long,
        env = "TICIMAX_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    base_url: String,

    /// Bearer token for the API
    #[arg(
        long,
        env = "TICIMAX_API_KEY",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    api_key: String,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(
        long,
        env = "TICIMAX_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        global = true
    )]
    timeout: u64,

    /// Retries after a failed attempt
    #[arg(
        long,
        env = "TICIMAX_RETRY_TIMES",
        default_value_t = DEFAULT_RETRY_TIMES,
        global = true
    )]
    retry_times: u32,

    /// Base delay between retries in milliseconds, doubled on each retry
    #[arg(
        long,
        env = "TICIMAX_RETRY_SLEEP",
        default_value_t = DEFAULT_RETRY_SLEEP_MS,
        global = true
    )]
    retry_sleep: u64,
}

impl Cli {
    fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout,
            retry_times: self.retry_times,
            retry_sleep_ms: self.retry_sleep,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create an order from a JSON file in the Ticimax wire format
    Create(CreateArgs),

    /// Show a single order
    Get(GetArgs),

    /// List orders
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
struct CreateArgs {
    /// Path to the order JSON ("SiparisNo", "MusteriKodu", "Urunler", ...)
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

#[derive(clap::Args, Debug)]
struct GetArgs {
    #[arg(value_name = "ORDER_ID")]
    order_id: String,
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Query filter, e.g. --filter baslangicTarihi=2023-01-01 (repeatable)
    #[arg(long = "filter", short = 'f', value_name = "KEY=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    #[arg(long, default_value_t = DEFAULT_LIST_PAGE)]
    page: u32,

    #[arg(long, default_value_t = DEFAULT_LIST_PAGE_SIZE)]
    page_size: u32,
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let client = TicimaxClient::new(&cli.config())?;

    let output = match cli.command {
        Commands::Create(args) => {
            let content = std::fs::read_to_string(&args.file)
                .with_context(|| format!("Failed to read order file {}", args.file.display()))?;
            let value: serde_json::Value =
                serde_json::from_str(&content).context("Order file is not valid JSON")?;
            let order = mapper::request_from_wire(&value)
                .context("Order file does not match the Ticimax order format")?;
            serde_json::to_string_pretty(&client.create_order(&order).await?)?
        }
        Commands::Get(args) => {
            serde_json::to_string_pretty(&client.get_order(&args.order_id).await?)?
        }
        Commands::List(args) => {
            let filters: BTreeMap<String, String> = args.filters.into_iter().collect();
            let list = client
                .get_orders(&filters, args.page, args.page_size)
                .await?;
            serde_json::to_string_pretty(&list)?
        }
    };

    println!("{}", output);
    Ok(())
}
