use super::{build_client, join_url, parse_json, read_body};
use crate::domain::ports::{ConfigProvider, RateQuoter};
use crate::utils::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

const SERVICE: &str = "exchange rate service";

#[derive(Debug, Deserialize)]
struct LatestRates {
    #[serde(default)]
    result: Option<String>,
    #[serde(rename = "error-type", default)]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rates: Option<HashMap<String, f64>>,
}

/// exchangerate-api.com v6 客戶端，金鑰放在路徑中
pub struct ExchangeRateApiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ExchangeRateApiClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout_seconds: u64) -> Self {
        Self {
            client: build_client(timeout_seconds),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(
            config.exchange_rate_endpoint(),
            config.exchange_rate_api_key().map(str::to_string),
            config.timeout_seconds(),
        )
    }

    fn latest_url(&self, base: &str) -> String {
        let path = format!("latest/{}", base);
        match self.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => join_url(&join_url(&self.endpoint, key), &path),
            None => join_url(&self.endpoint, &path),
        }
    }
}

#[async_trait]
impl RateQuoter for ExchangeRateApiClient {
    async fn fetch_conversion_rates(&self, base: &str) -> GatewayResult<HashMap<String, f64>> {
        // 不記錄完整 URL，避免金鑰出現在日誌
        tracing::debug!("Fetching conversion rates for base currency: {}", base);

        let response = self
            .client
            .get(self.latest_url(base))
            .send()
            .await
            .map_err(|source| GatewayError::Network {
                service: SERVICE,
                source,
            })?;

        let body = read_body(SERVICE, response).await?;
        let latest: LatestRates = parse_json(SERVICE, &body)?;

        if latest.result.as_deref() == Some("error") {
            return Err(GatewayError::Remote {
                service: SERVICE,
                message: latest
                    .error_type
                    .unwrap_or_else(|| "unknown-error".to_string()),
                body: Some(body),
            });
        }

        latest.conversion_rates.ok_or_else(|| GatewayError::Malformed {
            service: SERVICE,
            message: "response has no conversion_rates".to_string(),
        })
    }
}
