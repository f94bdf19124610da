#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};
pub use toml_config::TomlConfig;

pub const DEFAULT_COUNTRIES_ENDPOINT: &str =
    "https://restcountries.com/v3.1/all?fields=name,idd,currencies";
pub const DEFAULT_SUBDIVISIONS_ENDPOINT: &str = "https://countriesnow.space/api/v0.1/countries";
pub const DEFAULT_EXCHANGE_RATE_ENDPOINT: &str = "https://v6.exchangerate-api.com/v6";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;
