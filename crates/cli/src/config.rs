//! Runtime configuration from the environment (optionally seeded by `.env`).

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{Local, NaiveDate};

use factura_invoicing::Capabilities;
use factura_observability::LogFormat;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory the PDF is written to (`FACTURA_OUTPUT_DIR`, default `.`).
    pub output_dir: PathBuf,
    /// `FACTURA_PROFILE`: `extended` (default) or `simple`.
    pub capabilities: Capabilities,
    /// Date a new invoice starts with (`FACTURA_DATE`, default today).
    pub today: NaiveDate,
    /// `FACTURA_LOG_FORMAT`: `json` (default) or `text`.
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and empty values take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let output_dir = get("FACTURA_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let capabilities = match get("FACTURA_PROFILE").as_deref().map(str::trim) {
            None | Some("extended") => Capabilities::extended(),
            Some("simple") => Capabilities::simple(),
            Some(other) => bail!("FACTURA_PROFILE must be `extended` or `simple`, got `{other}`"),
        };

        let today = match get("FACTURA_DATE") {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("FACTURA_DATE is not an ISO date: {raw}"))?,
            None => Local::now().date_naive(),
        };

        let log_format = match get("FACTURA_LOG_FORMAT") {
            Some(raw) => LogFormat::parse(&raw)
                .with_context(|| format!("FACTURA_LOG_FORMAT must be `json` or `text`, got `{raw}`"))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            output_dir,
            capabilities,
            today,
            log_format,
        })
    }
}
