//! `smartcity-admin` entry point.

use clap::Parser;
use smartcity_cli::{Cli, connect, exit_code, run};
use smartcity_client::EventBanner;
use smartcity_core::DELETE_PROMPT;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match connect(&cli) {
        Ok(api) => run(&cli, api, confirm_delete).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("Error: {}", err.user_message());
            std::process::exit(exit_code(&err));
        }
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "smartcity=debug"
    } else {
        "smartcity=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn confirm_delete(banner: &EventBanner) -> bool {
    print!("{DELETE_PROMPT} (#{} {}) [y/N] ", banner.id, banner.title);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "có" | "c")
}
