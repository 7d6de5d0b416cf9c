//! Carousel Shell - Line-Oriented Surface for the Carousel Manager
//!
//! Reads commands from stdin, forwards them to the carousel manager as
//! intents and prints every snapshot the manager publishes.
//!
//! # Usage
//!
//! ```bash
//! # Start with defaults (~/.config/carousel/carousel.toml if present)
//! carousel-shell
//!
//! # Custom generator endpoint, export to a file
//! carousel-shell --endpoint http://localhost:8000/carousel --clipboard-file /tmp/carousel.txt
//!
//! # Verbose logging (to stderr)
//! RUST_LOG=debug carousel-shell
//! ```
//!
//! # Environment Variables
//!
//! - `CAROUSEL_CONFIG`: Configuration file path
//! - `CAROUSEL_GENERATOR_URL`: Content generator endpoint
//! - `CAROUSEL_GENERATION_TIMEOUT`: Generation timeout in seconds
//! - `CAROUSEL_NOTIFY_TTL_MS`: Notification lifetime in milliseconds
//! - `RUST_LOG`: Log filter (overrides `--log-level`)

mod clipboard;
mod commands;
mod generator;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use carousel_core::config::{load_config, load_config_from_path, ConfigOverrides};
use carousel_core::{CarouselIntent, CarouselManager, ClipboardSink, ManagerConfig};

use clipboard::{FileClipboard, StdoutClipboard};
use commands::{parse_command, Command, HELP};
use generator::{HttpGenerator, DEFAULT_ENDPOINT};
use render::render_snapshot;

/// Carousel Shell - edit and generate social media carousels from a terminal
#[derive(Parser, Debug)]
#[command(name = "carousel-shell")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "CAROUSEL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Content generator endpoint (overrides config and environment)
    #[arg(short = 'e', long, value_name = "URL")]
    endpoint: Option<String>,

    /// Generation timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    generation_timeout: Option<u64>,

    /// Notification lifetime in milliseconds
    #[arg(long, value_name = "MS")]
    notify_ttl: Option<u64>,

    /// Write exported text to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    clipboard_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "CAROUSEL_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ref endpoint) = self.endpoint {
            overrides = overrides.with_endpoint(endpoint.clone());
        }
        if let Some(secs) = self.generation_timeout {
            overrides = overrides.with_generation_timeout_secs(secs);
        }
        if let Some(ms) = self.notify_ttl {
            overrides = overrides.with_notification_ttl_ms(ms);
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging on stderr so snapshots own stdout
    let level = &args.log_level;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("carousel_shell={level}").parse()?)
                .add_directive(format!("carousel_core={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let mut config = match args.config {
        Some(ref path) => load_config_from_path(Some(path.clone())),
        None => load_config(),
    }
    .context("Failed to load configuration")?;

    args.overrides().apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let endpoint = config
        .endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let generator = HttpGenerator::new(endpoint)?;

    info!(
        source = ?config.source(),
        endpoint = generator.endpoint(),
        "Starting carousel shell"
    );

    match args.clipboard_file {
        Some(path) => run_shell(generator, FileClipboard::new(path), config).await,
        None => run_shell(generator, StdoutClipboard, config).await,
    }
}

/// What the input loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    /// Keep reading
    Continue,
    /// Leave the shell
    Quit,
}

/// Parse one input line and forward it to the manager
///
/// `slide_count` is the slide count from the latest snapshot.
async fn dispatch_line(
    line: &str,
    slide_count: usize,
    intent_tx: &mpsc::Sender<CarouselIntent>,
) -> LineOutcome {
    match parse_command(line, slide_count) {
        Ok(None) => LineOutcome::Continue,
        Ok(Some(Command::Help)) => {
            println!("{HELP}");
            LineOutcome::Continue
        }
        Ok(Some(Command::Quit)) => LineOutcome::Quit,
        Ok(Some(Command::Intent(intent))) => {
            if intent_tx.send(intent).await.is_err() {
                warn!("Manager stopped, leaving shell");
                LineOutcome::Quit
            } else {
                LineOutcome::Continue
            }
        }
        Err(e) => {
            eprintln!("{e}");
            LineOutcome::Continue
        }
    }
}

/// Wire stdin, the manager and the snapshot printer together
async fn run_shell<C>(generator: HttpGenerator, clipboard: C, config: ManagerConfig) -> Result<()>
where
    C: ClipboardSink + 'static,
{
    let (snapshot_tx, mut snapshot_rx) = mpsc::channel(100);
    let (intent_tx, intent_rx) = mpsc::channel(100);

    let manager = CarouselManager::new(generator, clipboard, config, snapshot_tx);
    let (count_tx, count_rx) = watch::channel(manager.state().slides().len());
    let manager_task = tokio::spawn(manager.run(intent_rx));

    let printer = tokio::spawn(async move {
        while let Some(snapshot) = snapshot_rx.recv().await {
            count_tx.send_replace(snapshot.slides.len());
            println!("{}", render_snapshot(&snapshot));
        }
    });

    println!("{HELP}\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let slide_count = *count_rx.borrow();
        if dispatch_line(&line, slide_count, &intent_tx).await == LineOutcome::Quit {
            break;
        }
    }

    // Closing the intent channel stops the manager, which closes the
    // snapshot channel and lets the printer finish.
    drop(intent_tx);
    manager_task.await.context("Manager task panicked")??;
    printer.await.context("Printer task panicked")?;

    info!("Carousel shell stopped");
    Ok(())
}
