//! # Cobranca — WhatsApp payment-reminder batch sender
//!
//! Reads a spreadsheet of billing contacts and sends each one a
//! personalized reminder, spaced out over time.
//!
//! Usage:
//!   cobranca                          # Use ~/.cobranca/config.toml
//!   cobranca --input contatos.csv     # Override the input file
//!   cobranca --dry-run                # Print instead of sending

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cobranca_channels::{ConsoleChannel, WhatsAppChannel};
use cobranca_core::{CobrancaConfig, MessageTemplate, ReminderSender, load_records};
use cobranca_scheduler::{DispatchOptions, SlotCursor, run_batch};

#[derive(Parser)]
#[command(
    name = "cobranca",
    version,
    about = "📨 Cobranca — WhatsApp payment-reminder batch sender"
)]
struct Cli {
    /// Contact spreadsheet (overrides the configured path)
    #[arg(short, long)]
    input: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<String>,

    /// Print messages instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "cobranca=debug" } else { "cobranca=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => CobrancaConfig::load_from(&expand_path(path))?,
        None => CobrancaConfig::load()?,
    };

    let input = cli
        .input
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(|| config.input_path());

    // Load contacts. Fatal on any failure — nothing is sent.
    let records = match load_records(&input) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Erro ao carregar arquivo de contatos: {e}");
            std::process::exit(1);
        }
    };

    if records.is_empty() {
        println!("Nenhum contato encontrado em {}", input.display());
        return Ok(());
    }

    // Pick the channel and establish its session up front.
    let mut channel: Box<dyn ReminderSender> = if cli.dry_run {
        Box::new(ConsoleChannel)
    } else {
        Box::new(WhatsAppChannel::new(config.whatsapp.clone()))
    };
    channel.connect().await?;

    let template = MessageTemplate::new(config.template.clone());
    let cursor = SlotCursor::starting_now(config.lead_minutes, config.step_minutes);
    let opts = DispatchOptions {
        country_code: config.country_code.clone(),
        interval_secs: if cli.dry_run { 0 } else { config.interval_secs },
        wait_secs: if cli.dry_run { 0 } else { config.wait_secs },
    };

    println!("Iniciando envio de mensagens...");
    tracing::info!(
        "Batch of {} contact(s) via '{}', one every {} minute(s)",
        records.len(),
        channel.name(),
        config.step_minutes
    );

    let report = run_batch(channel.as_ref(), &records, &template, cursor, &opts).await;

    println!(
        "Processo concluído! {} enviada(s), {} falha(s).",
        report.sent(),
        report.failed()
    );
    Ok(())
}
