//! # QuickCart CLI
//!
//! Runs one checkout against a demo store and prints the result.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      QuickCart Startup                                  │
//! │                                                                         │
//! │  1. init_tracing()     RUST_LOG or "info,quickcart=debug", to stderr   │
//! │  2. Args::parse()      --config, --json, --help                        │
//! │  3. AppConfig::load()  defaults → TOML file → QUICKCART_* env          │
//! │                        no --config: load errors fall back to defaults  │
//! │  4. DemoStore::new()   catalog + customer                              │
//! │  5. checkout           shipment notice, then receipt, on stdout        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod console;
pub mod demo;
pub mod error;

use chrono::Utc;
use quickcart_core::{Cart, Receipt, RecordedShipments};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::console::ConsoleShipping;
use crate::demo::DemoStore;
use crate::error::{AppError, AppResult};

pub const USAGE: &str = "\
QuickCart checkout demo

Usage: quickcart [OPTIONS]

Options:
  -c, --config <PATH>  Config file (default: platform config dir, quickcart/config.toml)
      --json           Print the receipt as JSON
  -h, --help           Show this help message";

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` for development
/// - `RUST_LOG=info` for production
///
/// Logs go to stderr; stdout carries only the notice and receipt.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quickcart=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub json: bool,
    pub help: bool,
}

impl Args {
    /// Parses arguments, excluding the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> AppResult<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| AppError::Config("--config requires a path".into()))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--json" => parsed.json = true,
                "--help" | "-h" => parsed.help = true,
                other => warn!(arg = other, "Ignoring unknown argument"),
            }
        }

        Ok(parsed)
    }
}

// =============================================================================
// Run
// =============================================================================

/// Loads config, runs the demo checkout, and writes the output to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> AppResult<()> {
    if args.help {
        writeln!(out, "{}", USAGE)?;
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => AppConfig::load(Some(path.clone()))?,
        None => AppConfig::load_or_default(None),
    };
    info!(
        store = %config.store.name,
        shipping_fee = %config.checkout.shipping_fee,
        stock_check = %config.checkout.stock_check,
        "Configuration loaded"
    );

    let mut store = DemoStore::new(&config, Utc::now())?;
    let cart = Cart::new().with_policy(config.checkout);

    if args.json {
        let mut shipping = RecordedShipments::new();
        let receipt = store.checkout(cart, &mut shipping)?;
        writeln!(out, "{}", serde_json::to_string_pretty(&receipt)?)?;
    } else {
        writeln!(out, "== {} ==", config.store.name)?;
        let mut shipping = ConsoleShipping::new(&mut *out);
        let receipt = store.checkout(cart, &mut shipping)?;
        print_receipt(out, &receipt)?;
    }

    Ok(())
}

fn print_receipt(out: &mut impl Write, receipt: &Receipt) -> io::Result<()> {
    writeln!(out, "{}", receipt)
}
