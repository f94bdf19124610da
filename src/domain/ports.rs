use crate::domain::model::{RemoteCountry, TargetCurrencies};
use crate::utils::error::GatewayResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// 國家資料服務
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    async fn fetch_countries(&self) -> GatewayResult<Vec<RemoteCountry>>;
}

/// 行政區（州、城市）服務
#[async_trait]
pub trait SubdivisionDirectory: Send + Sync {
    async fn fetch_states(&self, country: &str) -> GatewayResult<Vec<String>>;
    async fn fetch_cities(&self, country: &str, state: &str) -> GatewayResult<Vec<String>>;
}

/// 匯率服務，回傳以 `base` 為基準的完整換算表
#[async_trait]
pub trait RateQuoter: Send + Sync {
    async fn fetch_conversion_rates(&self, base: &str) -> GatewayResult<HashMap<String, f64>>;
}

pub trait ConfigProvider: Send + Sync {
    fn countries_endpoint(&self) -> &str;
    fn subdivisions_endpoint(&self) -> &str;
    fn exchange_rate_endpoint(&self) -> &str;
    fn exchange_rate_api_key(&self) -> Option<&str>;
    fn target_currencies(&self) -> TargetCurrencies;
    fn timeout_seconds(&self) -> u64;
}
