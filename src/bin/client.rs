// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use cotacao::config::Config;
use cotacao::logging::init_tracing;

/// Fetch the USD/BRL bid from the relay and write it to a file
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Relay endpoint
    #[arg(long)]
    url: Option<String>,

    /// Deadline for the whole request, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// File to write, replaced on every run
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    let url = args.url.unwrap_or(config.relay_url.clone());
    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(config.client_timeout());
    let output = args.output.unwrap_or(config.output_path.clone());

    match cotacao::client::run(&url, timeout, &output).await {
        Ok(bid) => {
            tracing::info!(bid = %bid, "✅ Quote written to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
