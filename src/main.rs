//! freshdesk - command-line access to a Freshdesk helpdesk
//!
//! Checks connectivity and optionally runs one read-only command, printing
//! the result as JSON on stdout.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `FRESHDESK_BASE_URL`: Base URL of the helpdesk
//! - `FRESHDESK_USER`: Agent email or API key
//! - `FRESHDESK_PASSWORD`: Password (optional)
//!
//! # Usage
//!
//! ```bash
//! ./freshdesk                          # connection test only
//! ./freshdesk ticket 42
//! ./freshdesk contact jane@example.com
//! ./freshdesk groups
//! ./freshdesk company-tickets 100 1 30
//! ```

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use freshdesk::{client, config};

const USAGE: &str = "usage: freshdesk [ticket <id> | contact <email> | groups | company-tickets <company_id> [page] [per_page]]";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the JSON output
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("freshdesk=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting freshdesk v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!("Configuration loaded, base_url: {}", config.base_url);

    let client =
        client::FreshdeskClient::new(&config).context("Failed to create Freshdesk client")?;

    tracing::info!("Testing connection to Freshdesk...");
    if let Err(e) = client.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        tracing::warn!(
            "Commands will still be attempted but may not reach Freshdesk. \
             Check configuration and network connectivity."
        );
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] => Ok(()),
        ["ticket", id] => {
            let id = parse_number(id, "ticket id")?;
            print_json(&client.get_ticket_with_conversations(id).await?)
        }
        ["contact", email] => print_json(&client.find_contact_by_email(email).await?),
        ["groups"] => print_json(&client.get_all_groups().await?),
        ["company-tickets", company_id, rest @ ..] if rest.len() <= 2 => {
            let company_id = parse_number(company_id, "company id")?;
            let page = match rest.first() {
                Some(raw) => parse_number(raw, "page")?,
                None => 1,
            };
            let per_page = match rest.get(1) {
                Some(raw) => parse_number(raw, "per_page")?,
                None => 30,
            };
            print_json(
                &client
                    .get_tickets_by_company_id(company_id, per_page, page)
                    .await?,
            )
        }
        _ => bail!(USAGE),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("invalid {}: {:?}", what, raw))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{}", json);
    Ok(())
}
