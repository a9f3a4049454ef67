//! # CEP CLI
//!
//! Resolves each code given on the command line and prints one JSON document
//! per lookup: the address on stdout, the aggregated error on stderr.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Every lookup resolved |
//! | 1 | At least one lookup failed |
//! | 2 | Setup failed (bad `--json-input`, logging, configuration) |

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use cep_lookup::config::parse_provider_list;
use cep_lookup::{CepLookupApi, CepLookupConfig, CepLookupService, RawInput};
use cep_telemetry::{init_logging, TelemetryConfig};

/// cep: resolve Brazilian postal codes
#[derive(Parser, Debug)]
#[command(name = "cep")]
#[command(about = "Resolve Brazilian postal codes by racing Correios and ViaCEP")]
#[command(version)]
pub struct Args {
    /// Postal codes to resolve (e.g. 01310-930)
    #[arg(required = true, allow_negative_numbers = true)]
    pub codes: Vec<String>,

    /// Comma separated providers to race (overrides CEP_PROVIDERS)
    #[arg(short, long)]
    pub providers: Option<String>,

    /// Parse each code as a JSON literal (930, "01310-930", null)
    #[arg(long)]
    pub json_input: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Log filter override (e.g. debug, cep_lookup=trace)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// Turn one command-line argument into lookup input.
pub fn parse_input(arg: &str, json_input: bool) -> Result<RawInput> {
    if !json_input {
        return Ok(RawInput::from(arg));
    }
    let value: serde_json::Value =
        serde_json::from_str(arg).with_context(|| format!("invalid JSON input: {arg}"))?;
    Ok(value.into())
}

/// Serialize a lookup outcome.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Resolve configuration, honoring the `--providers` override.
pub fn lookup_config(args: &Args) -> Result<CepLookupConfig> {
    let mut config = CepLookupConfig::from_env().context("invalid CEP lookup configuration")?;
    if let Some(list) = &args.providers {
        config.providers = parse_provider_list(list).context("invalid --providers value")?;
    }
    Ok(config)
}

/// Look up each input in turn, printing one JSON document per outcome.
///
/// Returns whether every lookup resolved.
pub async fn lookup_all<S: CepLookupApi + ?Sized>(
    service: &S,
    inputs: Vec<RawInput>,
    pretty: bool,
) -> Result<bool> {
    let mut all_resolved = true;
    for raw in inputs {
        match service.lookup(raw).await {
            Ok(address) => println!("{}", render(&address, pretty)?),
            Err(err) => {
                all_resolved = false;
                eprintln!("{}", render(&err, pretty)?);
            }
        }
    }
    Ok(all_resolved)
}

/// Run every lookup. Returns whether all of them resolved.
///
/// Arguments are parsed before logging is installed, so a bad
/// `--json-input` value fails without touching global state.
pub async fn run(args: Args) -> Result<bool> {
    let inputs = args
        .codes
        .iter()
        .map(|code| parse_input(code, args.json_input))
        .collect::<Result<Vec<_>>>()?;

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &args.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    init_logging(&telemetry).context("failed to initialize logging")?;

    let config = lookup_config(&args)?;
    debug!(providers = ?config.providers, "starting CEP lookups");
    let service = CepLookupService::from_config(&config).context("failed to build providers")?;

    lookup_all(&service, inputs, args.pretty).await
}
