use super::{build_client, parse_json, read_body};
use crate::domain::model::RemoteCountry;
use crate::domain::ports::{ConfigProvider, CountryDirectory};
use crate::utils::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use reqwest::Client;

const SERVICE: &str = "country metadata service";

/// restcountries.com v3.1 客戶端
pub struct RestCountriesClient {
    client: Client,
    endpoint: String,
}

impl RestCountriesClient {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            client: build_client(timeout_seconds),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.countries_endpoint(), config.timeout_seconds())
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesClient {
    async fn fetch_countries(&self) -> GatewayResult<Vec<RemoteCountry>> {
        tracing::debug!("Fetching country list from: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|source| GatewayError::Network {
                service: SERVICE,
                source,
            })?;

        let body = read_body(SERVICE, response).await?;
        let countries: Vec<RemoteCountry> = parse_json(SERVICE, &body)?;

        tracing::debug!("Received {} country records", countries.len());
        Ok(countries)
    }
}
