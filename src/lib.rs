pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};
pub use config::TomlConfig;

pub use adapters::http::{CountriesNowClient, ExchangeRateApiClient, RestCountriesClient};
pub use crate::core::{form::CascadingForm, gateway::RemoteDataGateway, selection::SelectionState};
pub use utils::error::{GatewayError, Result, SelectorError};

/// 以 HTTP 客戶端組成的表單
pub type HttpForm = CascadingForm<RestCountriesClient, CountriesNowClient, ExchangeRateApiClient>;

/// 依配置建立連到真實服務的表單
pub fn build_http_form<C: crate::core::ConfigProvider + ?Sized>(config: &C) -> HttpForm {
    let gateway = RemoteDataGateway::with_targets(
        RestCountriesClient::from_config(config),
        CountriesNowClient::from_config(config),
        ExchangeRateApiClient::from_config(config),
        config.target_currencies(),
    );
    CascadingForm::new(gateway)
}
