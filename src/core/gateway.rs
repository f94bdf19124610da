use crate::domain::model::{
    CityOption, CountryOption, ExchangeRates, PlaceOption, RemoteCountry, StateOption,
    TargetCurrencies,
};
use crate::domain::ports::{CountryDirectory, RateQuoter, SubdivisionDirectory};
use crate::utils::error::GatewayResult;
use chrono::Utc;

/// 將三個外部服務的回應整理成選單可用的選項
pub struct RemoteDataGateway<C, S, R> {
    countries: C,
    subdivisions: S,
    rates: R,
    targets: TargetCurrencies,
}

impl<C, S, R> RemoteDataGateway<C, S, R>
where
    C: CountryDirectory,
    S: SubdivisionDirectory,
    R: RateQuoter,
{
    pub fn new(countries: C, subdivisions: S, rates: R) -> Self {
        Self::with_targets(countries, subdivisions, rates, TargetCurrencies::default())
    }

    pub fn with_targets(countries: C, subdivisions: S, rates: R, targets: TargetCurrencies) -> Self {
        Self {
            countries,
            subdivisions,
            rates,
            targets,
        }
    }

    pub fn targets(&self) -> &TargetCurrencies {
        &self.targets
    }

    pub async fn list_countries(&self) -> GatewayResult<Vec<CountryOption>> {
        let records = self.countries.fetch_countries().await?;
        Ok(records.iter().map(country_option).collect())
    }

    pub async fn list_states(&self, country_name: &str) -> GatewayResult<Vec<StateOption>> {
        let names = self.subdivisions.fetch_states(country_name).await?;
        Ok(names.into_iter().map(PlaceOption::named).collect())
    }

    pub async fn list_cities(
        &self,
        country_name: &str,
        state_name: &str,
    ) -> GatewayResult<Vec<CityOption>> {
        let names = self
            .subdivisions
            .fetch_cities(country_name, state_name)
            .await?;
        Ok(names.into_iter().map(PlaceOption::named).collect())
    }

    /// 幣別為空時不發出請求，回傳 `None`
    pub async fn get_exchange_rates(&self, base_currency: &str) -> GatewayResult<Option<ExchangeRates>> {
        if base_currency.is_empty() {
            return Ok(None);
        }

        let table = self.rates.fetch_conversion_rates(base_currency).await?;
        Ok(Some(ExchangeRates {
            base: Some(base_currency.to_string()),
            primary: table.get(&self.targets.primary).copied(),
            secondary: table.get(&self.targets.secondary).copied(),
            stale: false,
            fetched_at: Some(Utc::now()),
        }))
    }
}

pub fn country_option(record: &RemoteCountry) -> CountryOption {
    CountryOption {
        value: record.name.common.clone(),
        label: record.name.common.clone(),
        calling_code: calling_code(record),
        currency_code: currency_code(record),
    }
}

/// 國際撥號根碼加上第一個後綴
pub fn calling_code(record: &RemoteCountry) -> String {
    let root = record.idd.root.as_deref().unwrap_or_default();
    let suffix = record
        .idd
        .suffixes
        .as_ref()
        .and_then(|s| s.first())
        .map(String::as_str)
        .unwrap_or_default();
    format!("{}{}", root, suffix)
}

/// 幣別表的第一個鍵（保留原始順序）
pub fn currency_code(record: &RemoteCountry) -> String {
    record
        .currencies
        .as_ref()
        .and_then(|c| c.keys().next())
        .cloned()
        .unwrap_or_default()
}
