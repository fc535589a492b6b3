use anyhow::{Context, Result, bail};
use chrono::{Datelike, Utc};
use clap::{Args, Parser, Subcommand};
use sheetbank_core::{MonthYear, Record, month_label, monthly_summary};
use sheetbank_ingest::extract_records_with;
use sheetbank_sync::{
    DEFAULT_DIGEST_LIMIT, SheetFetcher, SheetPoller, Snapshot, digest_records, fetch_records,
};
use std::path::PathBuf;
use std::time::Duration;

mod config;
mod display;
mod state;

use config::Config;
use display::{RecordView, format_currency, record_line};

#[derive(Parser, Debug)]
#[command(
    name = "sheetbank",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SHEETBANK_BUILD_SHA"), ")"),
    about = "Monthly balances from a shared spreadsheet"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract every balance and transaction record from a sheet export
    Parse {
        #[command(flatten)]
        source: SourceArgs,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved balance and records for one month
    Month {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        select: MonthArgs,
    },

    /// List the selectable months, newest first
    Months,

    /// Print the compact record listing used by the analyst
    Digest {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of records to include (default: 100)
        #[arg(long, default_value_t = DEFAULT_DIGEST_LIMIT)]
        limit: usize,
    },

    /// Poll the sheet and print the month's balance whenever it changes
    Sync {
        /// Sheet link (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,

        /// Seconds between polls (default: from config, 3)
        #[arg(long)]
        interval: Option<u64>,

        #[command(flatten)]
        select: MonthArgs,

        /// Fetch once and exit
        #[arg(long)]
        once: bool,
    },

    /// Manage ~/.sheetbank/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Save the sheet link used when no --csv/--url is given
    SetUrl { url: String },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Local CSV export
    #[arg(long, conflicts_with = "url")]
    csv: Option<PathBuf>,

    /// Sheet link (defaults to the configured one)
    #[arg(long)]
    url: Option<String>,
}

#[derive(Args, Debug)]
struct MonthArgs {
    /// Month number, 1-12 (requires --year)
    #[arg(long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    #[arg(long, requires = "month")]
    year: Option<i32>,

    /// Position in the `months` listing
    #[arg(long, conflicts_with_all = ["month", "year"])]
    index: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { source, json } => {
            let cfg = config::load_config()?;
            let records = load_records(&source, &cfg).await?;

            if json {
                let views: Vec<RecordView> = records.iter().map(RecordView::from).collect();
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                for r in &records {
                    println!("{}", record_line(r));
                }
                println!("\n{} records", records.len());
            }
        }

        Command::Month { source, select } => {
            let cfg = config::load_config()?;
            let selection = resolve_month(&select, &cfg)?;
            let records = load_records(&source, &cfg).await?;
            print_month(&records, &selection);
        }

        Command::Months => {
            let cfg = config::load_config()?;
            for (i, m) in cfg.catalog.months().iter().enumerate() {
                println!("{:>3}  {}", i, m.label);
            }
        }

        Command::Digest { source, limit } => {
            let cfg = config::load_config()?;
            let records = load_records(&source, &cfg).await?;
            if records.is_empty() {
                println!("No data available to analyze.");
            } else {
                print!("{}", digest_records(&records, limit)?);
            }
        }

        Command::Sync {
            url,
            interval,
            select,
            once,
        } => {
            let cfg = config::load_config()?;
            let selection = resolve_month(&select, &cfg)?;
            let url = resolve_url(url.as_deref(), &cfg)?;
            let interval = interval
                .map(|s| Duration::from_secs(s.max(1)))
                .unwrap_or_else(|| cfg.sync.interval());
            run_sync(&url, interval, &cfg, &selection, once).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::SetUrl { url } => config::set_sheet_url(&url)?,
        },
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetbank=info,sheetbank_ingest=info,sheetbank_sync=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_url(url: Option<&str>, cfg: &Config) -> Result<String> {
    match url.or(cfg.sheet.url.as_deref()) {
        Some(u) if !u.trim().is_empty() => Ok(u.trim().to_string()),
        _ => bail!("No sheet configured. Pass --csv <file> or --url <link>, or run: sheetbank config set-url <link>"),
    }
}

async fn load_records(source: &SourceArgs, cfg: &Config) -> Result<Vec<Record>> {
    if let Some(path) = &source.csv {
        if !path.exists() {
            bail!("CSV not found: {}", path.display());
        }
        let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        return extract_records_with(&text, &cfg.extract)
            .with_context(|| format!("parsing {}", path.display()));
    }

    let url = resolve_url(source.url.as_deref(), cfg)?;
    let fetcher = SheetFetcher::new(&url)?;
    let records = fetch_records(&fetcher, &cfg.extract)
        .await
        .with_context(|| format!("fetching {}", fetcher.csv_url()))?;
    if records.is_empty() {
        tracing::warn!("parsed 0 rows");
    }
    Ok(records)
}

/// Explicit month/year, a catalog index, or the current month.
fn resolve_month(select: &MonthArgs, cfg: &Config) -> Result<MonthYear> {
    if let (Some(month), Some(year)) = (select.month, select.year) {
        let month0 = month - 1;
        return Ok(MonthYear {
            month: month0,
            year,
            label: month_label(month0, year),
        });
    }

    let catalog = cfg.catalog.months();
    if let Some(i) = select.index {
        return catalog
            .get(i)
            .cloned()
            .with_context(|| format!("month index {} out of range (0..{})", i, catalog.len()));
    }

    let today = Utc::now().date_naive();
    catalog
        .iter()
        .find(|m| m.month == today.month0() && m.year == today.year())
        .or_else(|| catalog.first())
        .cloned()
        .context("month catalog is empty; check [catalog] in config.toml")
}

fn print_month(records: &[Record], selection: &MonthYear) {
    let summary = monthly_summary(records, selection.month, selection.year);

    println!("{}", selection.label);
    println!("Current balance: {}", format_currency(summary.stats.total_balance));
    println!("Records: {}\n", summary.stats.transaction_count);

    if summary.records.is_empty() {
        println!("No data found for this month in the sheet.");
        println!("(Checked header \"{}\")", selection.label);
        if records.is_empty() {
            println!("\nNo data loaded. Please ensure:");
            println!("1. Sheet has month headers (e.g., \"July 2025\")");
            println!("2. A row contains \"Current Balance\" and a value.");
        }
        return;
    }

    for r in &summary.records {
        println!("{}", record_line(r));
    }
}

fn snapshot_line(snap: &Snapshot, selection: &MonthYear) -> String {
    let summary = monthly_summary(&snap.records, selection.month, selection.year);
    let at = snap
        .refreshed_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    let mut line = format!(
        "[{}] {}: {} ({} records, {} total)",
        at,
        selection.label,
        format_currency(summary.stats.total_balance),
        summary.stats.transaction_count,
        snap.records.len()
    );
    if let Some(err) = &snap.error {
        line.push_str(&format!(" | last sync failed: {err}"));
    }
    line
}

async fn run_sync(
    url: &str,
    interval: Duration,
    cfg: &Config,
    selection: &MonthYear,
    once: bool,
) -> Result<()> {
    let fetcher = SheetFetcher::new(url)?;
    println!("Syncing {} every {}s", fetcher.csv_url(), interval.as_secs());

    let poller = SheetPoller::new(fetcher, cfg.extract, interval);
    let mut rx = poller.subscribe();

    if once {
        poller.refresh_once().await?;
        println!("{}", snapshot_line(&rx.borrow(), selection));
        return Ok(());
    }

    let printer = async {
        while rx.changed().await.is_ok() {
            let snap = rx.borrow_and_update().clone();
            println!("{}", snapshot_line(&snap, selection));
        }
    };

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    tokio::select! {
        _ = poller.run(shutdown) => {}
        _ = printer => {}
    }

    Ok(())
}
