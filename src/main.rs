// Copyright 2025 Planfact Sheets Sync Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod config;
mod grid;
mod metrics;
mod sheets;
mod sync;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_env_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one synchronization pass: fetch metric records and write them
    /// into the plan/fact columns of the target spreadsheet
    Sync {
        /// URL of the internal reporting API returning metric records
        #[arg(long, env = "INTERNAL_API_URL")]
        api_url: String,

        /// Target Google spreadsheet ID
        #[arg(long, env = "SPREADSHEET_ID")]
        spreadsheet_id: String,

        /// Path to the Google service account key file
        #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
        key_file: PathBuf,

        /// Preview planned cell updates without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Parser)]
#[command(name = "planfact-sheets-sync")]
#[command(about = "Synchronize plan/fact metric records into Google Sheets")]
#[command(version)]
struct Cli {
    /// Controls verbosity of log output (overrides RUST_LOG when provided)
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Commands,
}

fn init_logging(level: &LogLevel) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level.as_env_filter()))?;

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize default crypto provider for rustls
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Sync {
            api_url,
            spreadsheet_id,
            key_file,
            dry_run,
        } => {
            handle_sync_command(api_url, spreadsheet_id, key_file, dry_run).await?;
        }
    }

    Ok(())
}

async fn handle_sync_command(
    api_url: String,
    spreadsheet_id: String,
    key_file: PathBuf,
    dry_run: bool,
) -> anyhow::Result<()> {
    if dry_run {
        info!("🔍 Running in dry-run mode - no changes will be made");
    }

    info!("📡 Internal API URL: {}", api_url);
    info!("📊 Spreadsheet ID: {}", spreadsheet_id);
    info!("🔑 Service account key: {:?}", key_file);

    let config = Config::new(api_url, spreadsheet_id, key_file, dry_run);

    match sync::synchronize(&config).await {
        Ok(summary) => {
            info!("✅ {}", summary.message);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(err) if err.is_precondition() => {
            anyhow::bail!(
                "❌ Synchronization aborted before any sheet was touched: {}\n\n\
                Troubleshooting tips:\n\
                • Check that INTERNAL_API_URL and SPREADSHEET_ID are set\n\
                • Verify the internal reporting API is reachable\n\
                • Verify the service account key file exists and is readable",
                err
            );
        }
        Err(err) => {
            anyhow::bail!("❌ Synchronization failed: {}", err);
        }
    }
}
