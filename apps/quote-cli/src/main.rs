//! Quotation command-line front end
//!
//! Renders a quotation record into the branded PDF, emails it through SES, or
//! allocates the next quote number.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use quote_mailer::{Dispatcher, MailerConfig, SesTransport};
use quote_pdf::{QuotationRenderer, RendererConfig};
use quote_types::QuotationRecord;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "quote-cli")]
#[command(version, about = "Render and email elevator quotations")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a quotation record to PDF
    Render {
        /// Quotation record as JSON
        #[arg(long)]
        record: PathBuf,

        /// Output PDF path
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        assets: AssetArgs,
    },

    /// Email a quotation PDF, rendering it first when none is given
    Send {
        #[arg(long)]
        record: PathBuf,

        /// Recipient address
        #[arg(long)]
        to: String,

        /// Previously rendered PDF to attach
        #[arg(long)]
        pdf: Option<PathBuf>,

        #[command(flatten)]
        assets: AssetArgs,
    },

    /// Print the next quote number
    NextNumber {
        /// Year to number within, defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Quote numbers already assigned
        existing: Vec<String>,
    },
}

/// Overrides for the environment-provided renderer config
#[derive(clap::Args, Debug, Default)]
struct AssetArgs {
    /// Nine-page template PDF
    #[arg(long)]
    template: Option<PathBuf>,

    /// PNG logo
    #[arg(long)]
    logo: Option<PathBuf>,
}

impl AssetArgs {
    fn renderer_config(&self) -> RendererConfig {
        let mut config = RendererConfig::from_env();
        if let Some(template) = &self.template {
            config.template_path = template.clone();
        }
        if let Some(logo) = &self.logo {
            config.logo_path = logo.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Command::Render {
            record,
            out,
            assets,
        } => {
            let record = read_record(&record)?;
            let pdf = render(&record, &assets)?;
            std::fs::write(&out, &pdf)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            tracing::info!(path = %out.display(), bytes = pdf.len(), "Quotation written");
        }
        Command::Send {
            record,
            to,
            pdf,
            assets,
        } => {
            if !quote_mailer::is_bare_address(to.trim()) {
                anyhow::bail!("Invalid recipient address: {}", to);
            }
            let record = read_record(&record)?;
            let pdf = match pdf {
                Some(path) => std::fs::read(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => render(&record, &assets)?,
            };

            let config = MailerConfig::from_env();
            let transport = SesTransport::from_env(config.configuration_set.clone()).await;
            let dispatcher = Dispatcher::new(transport, config);

            let outcome = dispatcher
                .send(&record, &to, &pdf)
                .await
                .context("Failed to send quotation")?;
            println!("{} {}", outcome.receipt.message_id, outcome.status);
        }
        Command::NextNumber { year, existing } => {
            let year = year.unwrap_or_else(|| chrono::Local::now().year());
            println!(
                "{}",
                quote_types::next_quote_number(existing.iter().map(String::as_str), year)
            );
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output, logs go to stderr
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_record(path: &Path) -> Result<QuotationRecord> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid record {}", path.display()))
}

fn render(record: &QuotationRecord, assets: &AssetArgs) -> Result<Vec<u8>> {
    let renderer = QuotationRenderer::from_config(&assets.renderer_config())?;
    Ok(renderer.generate(record)?)
}
