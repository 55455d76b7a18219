//! CLI module for the HelpMeAnytime command-line interface.
//!
//! Without a subcommand the binary starts the server. Subcommands talk to a
//! running server or inspect local files:
//! - `status` - Show server health and store contents
//! - `config check` - Validate configuration file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "helpmeanytime")]
#[command(author, version, about = "Municipal civic-engagement service", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "helpmeanytime.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// API URL to connect to (default: http://localhost:3000)
    #[arg(long, env = "HELPMEANYTIME_API_URL", default_value = "http://localhost:3000")]
    pub api_url: String,

    /// Subcommand to run (if none, starts the server)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show server status (health and stored records)
    Status,

    /// Configuration management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration file
    Check,
}

// ============================================================================
// API Response Types
// ============================================================================

/// Row count of one table from /api/debug
#[derive(Debug, Deserialize)]
pub struct TableCount {
    pub count: usize,
}

/// Store summary from /api/debug
#[derive(Debug, Deserialize)]
pub struct DebugInfo {
    pub timestamp: String,
    pub stores: BTreeMap<String, TableCount>,
}

// ============================================================================
// CLI Command Handlers
// ============================================================================

fn create_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Run a CLI command
pub async fn run_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Status) => cmd_status(cli).await,
        Some(Commands::Config(ConfigCommands::Check)) => cmd_config_check(cli).await,
        None => {
            // No subcommand means start the server - this is handled in main.rs
            Ok(())
        }
    }
}

/// Display server status
async fn cmd_status(cli: &Cli) -> Result<()> {
    let client = create_client()?;
    let base_url = &cli.api_url;

    println!("Connecting to {}...", base_url);

    let health_response = client
        .get(endpoint(base_url, "/health"))
        .send()
        .await
        .context("Failed to connect to server. Is HelpMeAnytime running?")?;

    if !health_response.status().is_success() {
        let status = health_response.status();
        let body = health_response.text().await.unwrap_or_default();
        anyhow::bail!("Server returned error {}: {}", status, body);
    }

    let debug: Option<DebugInfo> = match client.get(endpoint(base_url, "/api/debug")).send().await
    {
        Ok(resp) if resp.status().is_success() => resp.json().await.ok(),
        _ => None,
    };

    println!();
    println!("=== HelpMeAnytime Server Status ===");
    println!();
    println!("Status:     [OK] Healthy");

    match debug {
        Some(info) => {
            println!("As of:      {}", info.timestamp);
            println!();
            println!("Store:");
            for line in format_counts(&info.stores) {
                println!("  {}", line);
            }
        }
        None => {
            println!();
            println!("[!] Store summary unavailable");
        }
    }

    println!();
    Ok(())
}

/// Validate and summarize the configuration file
async fn cmd_config_check(cli: &Cli) -> Result<()> {
    use crate::config::Config;

    let config_path = &cli.config;

    println!("Checking configuration file: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[!!] Configuration file not found: {}",
            config_path.display()
        );
        println!();
        println!("A default configuration will be used when starting the server.");
        return Ok(());
    }

    match Config::load(config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid!");
            println!();
            println!("=== Configuration Summary ===");
            println!();
            println!("Server:");
            println!("  Host:         {}", config.server.host);
            println!("  Port:         {}", config.server.port);
            println!("  CORS:         {}", enabled(config.server.cors_permissive));
            println!();
            println!("Bookings:");
            println!(
                "  Default Duration: {}h",
                config.bookings.default_duration_hours
            );
            println!(
                "  Double Booking Guard: {}",
                enabled(config.bookings.reject_double_booking)
            );
            println!();
            println!("Pricing:");
            println!(
                "  Subsidy:      {:.0}%",
                config.pricing.subsidy_rate * 100.0
            );
            println!(
                "  Default Rate: {:.2} EUR/h",
                config.pricing.default_hourly_rate
            );
            println!();
            println!("Demo Data:    {}", enabled(config.seed.enabled));
            println!();

            if !config.bookings.reject_double_booking {
                println!("Warnings:");
                println!("  [!] Double booking guard is off - two citizens can book the same slot");
                println!();
            }

            Ok(())
        }
        Err(e) => {
            println!("[!!] Configuration file is invalid!");
            println!();
            println!("Error: {:#}", e);
            println!();
            println!("Please check the configuration file syntax and try again.");
            anyhow::bail!("Invalid configuration file");
        }
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

/// One aligned `name: count` line per table
fn format_counts(stores: &BTreeMap<String, TableCount>) -> Vec<String> {
    let width = stores.keys().map(|k| k.len()).max().unwrap_or(0) + 1;
    stores
        .iter()
        .map(|(name, table)| {
            let label = format!("{}:", name);
            format!("{:<width$}  {}", label, table.count, width = width)
        })
        .collect()
}
