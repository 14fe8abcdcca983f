//! Moodscope CLI
//!
//! Terminal view of the mood journal history:
//! - Load entries from the journal API
//! - Filter by date window
//! - Show mood over time, mood distribution and weekly/monthly averages

use anyhow::Context;
use clap::{Parser, Subcommand};
use moodscope::config::{generate_default_config, Config, LoggingConfig};
use moodscope::{EntriesClient, HistorySession, HistoryView, RefreshOutcome};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "moodscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mood journal history in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/moodscope/config.toml, then ./moodscope.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Journal API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show mood history
    History {
        /// First day to include (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::History { ref start, ref end } => {
            let mut config = Config::resolve(cli.config.as_deref())?;
            if let Some(url) = &cli.api_url {
                config.api.base_url = url.clone();
            }
            init_logging(&config.logging)?;

            tracing::info!("Moodscope v{}", env!("CARGO_PKG_VERSION"));

            let zone = config.display_zone()?;
            let client = EntriesClient::new(config.api.client_config())
                .context("Failed to create HTTP client")?;
            let session = HistorySession::new(Arc::new(client), zone);

            if let Some(start) = start {
                session.set_start(start.as_str()).await;
            }
            if let Some(end) = end {
                session.set_end(end.as_str()).await;
            }
            if let Some(reason) = session.bounds().await.rejection() {
                eprintln!("Note: {} (showing no entries)", reason);
            }

            if let RefreshOutcome::Failed { error } = session.refresh().await {
                eprintln!("Could not load entries from {}", config.api.base_url);
                eprintln!("Error: {}", error);
                eprintln!();
            }

            let view = session.view().await;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&view)?),
                _ => print_view(&view, !cli.no_color),
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("moodscope={}", config.level)));

    let writer = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}

fn print_view(view: &HistoryView, color: bool) {
    if view.is_empty() {
        println!("No entries for the selected dates");
        return;
    }

    println!("Mood Over Time ({} entries)", view.entry_count);
    println!("{:<20} | {:>8}", "Date", "Compound");
    println!("{}", "-".repeat(31));
    for point in &view.series {
        println!(
            "{:<20} | {:>8.3}",
            point.date.format("%Y-%m-%d %H:%M").to_string(),
            point.compound
        );
    }

    println!();
    println!("Mood Distribution");
    println!("{}", "-".repeat(31));
    let widest = view.distribution.iter().map(|r| r.value).max().unwrap_or(1);
    for row in &view.distribution {
        let bar = "#".repeat((row.value * 20).div_ceil(widest));
        let (on, off) = if color {
            (mood_color(&row.name), "\x1b[0m")
        } else {
            ("", "")
        };
        println!(
            "{:<10} {:>4}  {}{}{}",
            capitalize(&row.name),
            row.value,
            on,
            bar,
            off
        );
    }

    println!();
    println!("Weekly Average Mood");
    println!("{:<12} | {:>8}", "Week of", "Average");
    println!("{}", "-".repeat(23));
    for row in &view.weekly {
        println!("{:<12} | {:>8.3}", row.week_start, row.average);
    }

    println!();
    println!("Monthly Average Mood");
    println!("{:<12} | {:>8}", "Month", "Average");
    println!("{}", "-".repeat(23));
    for row in &view.monthly {
        println!("{:<12} | {:>8.3}", row.month, row.average);
    }
}

/// ANSI color for a mood label; unknown labels are grey
fn mood_color(label: &str) -> &'static str {
    match label.to_lowercase().as_str() {
        "happy" => "\x1b[32m",
        "neutral" => "\x1b[33m",
        "sad" => "\x1b[31m",
        _ => "\x1b[90m",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
