use super::{
    DEFAULT_COUNTRIES_ENDPOINT, DEFAULT_EXCHANGE_RATE_ENDPOINT, DEFAULT_SUBDIVISIONS_ENDPOINT,
    MAX_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::domain::model::TargetCurrencies;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_currency_code, validate_non_empty_string, validate_range, validate_url, Validate,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "country-selector")]
#[command(about = "Pick a country, state and city; see its calling code, currency and exchange rates")]
pub struct CliConfig {
    #[arg(long, env = "COUNTRIES_ENDPOINT", default_value = DEFAULT_COUNTRIES_ENDPOINT)]
    pub countries_endpoint: String,

    #[arg(long, env = "SUBDIVISIONS_ENDPOINT", default_value = DEFAULT_SUBDIVISIONS_ENDPOINT)]
    pub subdivisions_endpoint: String,

    #[arg(long, env = "EXCHANGE_RATE_ENDPOINT", default_value = DEFAULT_EXCHANGE_RATE_ENDPOINT)]
    pub exchange_rate_endpoint: String,

    #[arg(long, env = "EXCHANGE_RATE_API_KEY", hide_env_values = true)]
    #[serde(skip_serializing)]
    pub exchange_rate_api_key: Option<String>,

    #[arg(long, default_value = "INR")]
    pub primary_currency: String,

    #[arg(long, default_value = "USD")]
    pub secondary_currency: String,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Read service settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Select this country and print the form")]
    pub country: Option<String>,

    #[arg(long, requires = "country")]
    pub state: Option<String>,

    #[arg(long, requires = "state")]
    pub city: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 有指定 --country 時以單次模式執行
    pub fn is_preset(&self) -> bool {
        self.country.is_some()
    }
}

impl ConfigProvider for CliConfig {
    fn countries_endpoint(&self) -> &str {
        &self.countries_endpoint
    }

    fn subdivisions_endpoint(&self) -> &str {
        &self.subdivisions_endpoint
    }

    fn exchange_rate_endpoint(&self) -> &str {
        &self.exchange_rate_endpoint
    }

    fn exchange_rate_api_key(&self) -> Option<&str> {
        self.exchange_rate_api_key.as_deref()
    }

    fn target_currencies(&self) -> TargetCurrencies {
        TargetCurrencies {
            primary: self.primary_currency.clone(),
            secondary: self.secondary_currency.clone(),
        }
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("countries_endpoint", &self.countries_endpoint)?;
        validate_url("subdivisions_endpoint", &self.subdivisions_endpoint)?;
        validate_url("exchange_rate_endpoint", &self.exchange_rate_endpoint)?;
        if let Some(key) = &self.exchange_rate_api_key {
            validate_non_empty_string("exchange_rate_api_key", key)?;
        }
        validate_currency_code("primary_currency", &self.primary_currency)?;
        validate_currency_code("secondary_currency", &self.secondary_currency)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        Ok(())
    }
}
