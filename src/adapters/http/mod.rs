pub mod countries;
pub mod rates;
pub mod subdivisions;

pub use countries::RestCountriesClient;
pub use rates::ExchangeRateApiClient;
pub use subdivisions::CountriesNowClient;

use crate::utils::error::{GatewayError, GatewayResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub(crate) fn build_client(timeout_seconds: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        })
}

/// 讀取回應內容；非 2xx 時保留遠端錯誤內容
pub(crate) async fn read_body(service: &'static str, response: Response) -> GatewayResult<String> {
    let status = response.status();
    tracing::debug!("{} response status: {}", service, status);

    let body = response
        .text()
        .await
        .map_err(|source| GatewayError::Network { service, source })?;

    if !status.is_success() {
        return Err(GatewayError::Status {
            service,
            status: status.as_u16(),
            body: Some(body),
        });
    }

    Ok(body)
}

pub(crate) fn parse_json<T: DeserializeOwned>(service: &'static str, body: &str) -> GatewayResult<T> {
    serde_json::from_str(body).map_err(|e| GatewayError::Malformed {
        service,
        message: e.to_string(),
    })
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
