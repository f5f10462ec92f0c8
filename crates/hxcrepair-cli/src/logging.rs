// crates/hxcrepair-cli/src/logging.rs

use std::env::{self, VarError};
use std::io::IsTerminal;

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; stdout carries only the repaired document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

impl LogFormat {
    pub const ENV: &'static str = "HXCREPAIR_LOG_FORMAT";

    pub fn from_env() -> Result<Option<Self>> {
        match env::var(Self::ENV) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => bail!("{} contains non-UTF-8 bytes", Self::ENV),
        }
    }

    fn parse(value: &str) -> Result<Self> {
        if value.eq_ignore_ascii_case("human") {
            Ok(Self::Human)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            bail!("invalid {}={value:?}; expected human or json", Self::ENV)
        }
    }
}

fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_logging() -> Result<LogFormat> {
    let format = LogFormat::from_env()?.unwrap_or(LogFormat::Human);

    match format {
        LogFormat::Human => tracing_subscriber::fmt()
            .with_env_filter(default_env_filter())
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .without_time()
            .compact()
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to initialize human logger: {err}"))?,
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_env_filter(default_env_filter())
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to initialize JSON logger: {err}"))?,
    }

    Ok(format)
}
