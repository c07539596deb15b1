//! QuickCart entry point.
//!
//! ## Usage
//! ```bash
//! cargo run -p quickcart-cli
//! cargo run -p quickcart-cli -- --json
//! cargo run -p quickcart-cli -- --config ./quickcart.toml
//! QUICKCART_CUSTOMER_BALANCE=10000 cargo run -p quickcart-cli
//! ```

use quickcart_cli::error::AppError;
use quickcart_cli::{init_tracing, run, Args};
use std::io;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    init_tracing();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => return fail(&e, false),
    };

    match run(&args, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e, args.json),
    }
}

/// Reports `err` and returns a failing exit code. With `--json` the error
/// report also goes to stdout.
fn fail(err: &AppError, json: bool) -> ExitCode {
    error!(code = ?err.code(), "{}", err);

    if json {
        if let Ok(report) = serde_json::to_string_pretty(&err.report()) {
            println!("{}", report);
        }
    }
    eprintln!("Error: {}", err);

    ExitCode::FAILURE
}
