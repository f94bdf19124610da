use super::{build_client, join_url, parse_json, read_body};
use crate::domain::ports::{ConfigProvider, SubdivisionDirectory};
use crate::utils::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "subdivision service";

/// countriesnow.space 的共同回應格式
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    msg: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct StatesData {
    #[serde(default)]
    states: Vec<StateRecord>,
}

#[derive(Debug, Deserialize)]
struct StateRecord {
    name: String,
}

pub struct CountriesNowClient {
    client: Client,
    base_url: String,
}

impl CountriesNowClient {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            client: build_client(timeout_seconds),
            base_url: base_url.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.subdivisions_endpoint(), config.timeout_seconds())
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> GatewayResult<T> {
        let url = join_url(&self.base_url, path);
        tracing::debug!("POST {} with payload: {}", url, payload);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|source| GatewayError::Network {
                service: SERVICE,
                source,
            })?;

        let body = read_body(SERVICE, response).await?;
        let envelope: Envelope<T> = parse_json(SERVICE, &body)?;

        if envelope.error {
            return Err(GatewayError::Remote {
                service: SERVICE,
                message: envelope
                    .msg
                    .unwrap_or_else(|| "request was rejected".to_string()),
                body: Some(body),
            });
        }

        envelope.data.ok_or_else(|| GatewayError::Malformed {
            service: SERVICE,
            message: "response has no data field".to_string(),
        })
    }
}

#[async_trait]
impl SubdivisionDirectory for CountriesNowClient {
    async fn fetch_states(&self, country: &str) -> GatewayResult<Vec<String>> {
        let data: StatesData = self
            .post("states", serde_json::json!({ "country": country }))
            .await?;
        Ok(data.states.into_iter().map(|s| s.name).collect())
    }

    async fn fetch_cities(&self, country: &str, state: &str) -> GatewayResult<Vec<String>> {
        self.post(
            "state/cities",
            serde_json::json!({ "country": country, "state": state }),
        )
        .await
    }
}
