use super::{
    DEFAULT_COUNTRIES_ENDPOINT, DEFAULT_EXCHANGE_RATE_ENDPOINT, DEFAULT_SUBDIVISIONS_ENDPOINT,
    DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::domain::model::TargetCurrencies;
use crate::utils::error::{Result, SelectorError};
use crate::utils::validation::{
    validate_currency_code, validate_non_empty_string, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub currencies: CurrencyConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default)]
    pub countries: EndpointConfig,
    #[serde(default)]
    pub subdivisions: EndpointConfig,
    #[serde(default)]
    pub exchange_rates: ExchangeRateConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeRateConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_primary_currency")]
    pub primary: String,
    #[serde(default = "default_secondary_currency")]
    pub secondary: String,
}

fn default_primary_currency() -> String {
    TargetCurrencies::default().primary
}

fn default_secondary_currency() -> String {
    TargetCurrencies::default().secondary
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            primary: default_primary_currency(),
            secondary: default_secondary_currency(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SelectorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EXCHANGE_RATE_API_KEY})；未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        placeholder_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("services.countries.endpoint", self.countries_endpoint())?;
        validate_url("services.subdivisions.endpoint", self.subdivisions_endpoint())?;
        validate_url("services.exchange_rates.endpoint", self.exchange_rate_endpoint())?;

        // 金鑰仍是 ${VAR} 代表環境變數沒設定
        if let Some(key) = &self.services.exchange_rates.api_key {
            if let Some(caps) = placeholder_pattern().captures(key) {
                return Err(SelectorError::MissingConfigError {
                    field: format!("services.exchange_rates.api_key (environment variable {})", &caps[1]),
                });
            }
            validate_non_empty_string("services.exchange_rates.api_key", key)?;
        }

        validate_currency_code("currencies.primary", &self.currencies.primary)?;
        validate_currency_code("currencies.secondary", &self.currencies.secondary)?;
        validate_range("http.timeout_seconds", self.timeout_seconds(), 1, MAX_TIMEOUT_SECONDS)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn countries_endpoint(&self) -> &str {
        self.services
            .countries
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_COUNTRIES_ENDPOINT)
    }

    fn subdivisions_endpoint(&self) -> &str {
        self.services
            .subdivisions
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_SUBDIVISIONS_ENDPOINT)
    }

    fn exchange_rate_endpoint(&self) -> &str {
        self.services
            .exchange_rates
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_EXCHANGE_RATE_ENDPOINT)
    }

    fn exchange_rate_api_key(&self) -> Option<&str> {
        self.services
            .exchange_rates
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
    }

    fn target_currencies(&self) -> TargetCurrencies {
        TargetCurrencies {
            primary: self.currencies.primary.clone(),
            secondary: self.currencies.secondary.clone(),
        }
    }

    fn timeout_seconds(&self) -> u64 {
        self.http.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
