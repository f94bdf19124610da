use crate::core::gateway::RemoteDataGateway;
use crate::core::selection::{SelectionState, TierState};
use crate::core::view;
use crate::domain::model::{SelectOption, TargetCurrencies, Tier};
use crate::domain::ports::{CountryDirectory, RateQuoter, SubdivisionDirectory};
use crate::utils::error::{GatewayError, Result, SelectorError};

/// 級聯表單：處理選擇事件並觸發對應的遠端請求
pub struct CascadingForm<C, S, R> {
    gateway: RemoteDataGateway<C, S, R>,
    state: SelectionState,
}

impl<C, S, R> CascadingForm<C, S, R>
where
    C: CountryDirectory,
    S: SubdivisionDirectory,
    R: RateQuoter,
{
    pub fn new(gateway: RemoteDataGateway<C, S, R>) -> Self {
        Self {
            gateway,
            state: SelectionState::new(),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn targets(&self) -> &TargetCurrencies {
        self.gateway.targets()
    }

    pub fn is_enabled(&self, tier: Tier) -> bool {
        self.state.is_enabled(tier)
    }

    pub fn render(&self) -> String {
        view::render_form(&self.state, self.gateway.targets())
    }

    /// 以 JSON 輸出目前的選擇狀態
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    /// 載入國家清單
    pub async fn mount(&mut self) {
        let ticket = self.state.begin_countries();
        let result = self.gateway.list_countries().await;

        match &result {
            Ok(countries) => tracing::info!("🌍 Loaded {} countries", countries.len()),
            Err(e) => log_gateway_error("country", e),
        }
        self.state.apply_countries(ticket, result);
    }

    pub async fn select_country(&mut self, name: &str) -> Result<()> {
        let option = lookup(&self.state.countries, Tier::Country, name)?;
        tracing::info!(
            "Selected country: {} (code {}, currency {})",
            option.label,
            option.calling_code,
            option.currency_code
        );

        let country_name = option.label.clone();
        let currency = option.currency_code.clone();
        let change = self.state.begin_country(option);

        // 州清單與匯率互不相依，同時發出
        let gateway = &self.gateway;
        let (states, rates) = tokio::join!(
            gateway.list_states(&country_name),
            gateway.get_exchange_rates(&currency)
        );

        match &states {
            Ok(list) => tracing::debug!("{} has {} states", country_name, list.len()),
            Err(e) => log_gateway_error("state", e),
        }
        self.state.apply_states(change.states, states);

        if let Err(e) = &rates {
            log_gateway_error("exchange rate", e);
        }
        self.state.apply_rates(change.rates, rates);

        Ok(())
    }

    pub async fn select_state(&mut self, name: &str) -> Result<()> {
        if !self.state.is_enabled(Tier::State) {
            return Err(SelectorError::InertSelector { tier: Tier::State });
        }
        let option = lookup(&self.state.states, Tier::State, name)?;
        let country_name = match &self.state.countries.selected {
            Some(country) => country.label.clone(),
            None => return Err(SelectorError::InertSelector { tier: Tier::State }),
        };
        tracing::info!("Selected state: {}", option.label);

        let state_name = option.label.clone();
        let ticket = self.state.begin_state(option)?;
        let cities = self.gateway.list_cities(&country_name, &state_name).await;

        match &cities {
            Ok(list) => tracing::debug!("{} has {} cities", state_name, list.len()),
            Err(e) => log_gateway_error("city", e),
        }
        self.state.apply_cities(ticket, cities);

        Ok(())
    }

    pub fn select_city(&mut self, name: &str) -> Result<()> {
        if !self.state.is_enabled(Tier::City) {
            return Err(SelectorError::InertSelector { tier: Tier::City });
        }
        let option = lookup(&self.state.cities, Tier::City, name)?;
        tracing::info!("Selected city: {}", option.label);
        self.state.select_city(option)
    }
}

fn lookup<T: SelectOption + Clone>(options: &TierState<T>, tier: Tier, name: &str) -> Result<T> {
    options
        .find(name)
        .cloned()
        .ok_or_else(|| SelectorError::UnknownOption {
            tier,
            value: name.trim().to_string(),
        })
}

fn log_gateway_error(what: &str, error: &GatewayError) {
    tracing::error!(service = error.service(), "❌ Error fetching {} data: {}", what, error);
    if let Some(body) = error.remote_body() {
        tracing::error!("Error details: {}", body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::TierPhase;
    use crate::domain::model::RemoteCountry;
    use crate::utils::error::GatewayResult;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    type CallLog = Arc<Mutex<Vec<String>>>;

    struct FakeCountries {
        payload: Option<serde_json::Value>,
    }

    #[async_trait]
    impl CountryDirectory for FakeCountries {
        async fn fetch_countries(&self) -> GatewayResult<Vec<RemoteCountry>> {
            match &self.payload {
                Some(json) => Ok(serde_json::from_value(json.clone()).unwrap()),
                None => Err(GatewayError::Malformed {
                    service: "countries",
                    message: "offline".to_string(),
                }),
            }
        }
    }

    struct FakeSubdivisions {
        calls: CallLog,
        states: HashMap<String, Vec<String>>,
        cities: HashMap<String, Vec<String>>,
    }

    #[async_trait]
    impl SubdivisionDirectory for FakeSubdivisions {
        async fn fetch_states(&self, country: &str) -> GatewayResult<Vec<String>> {
            self.calls.lock().await.push(format!("states:{}", country));
            self.states.get(country).cloned().ok_or(GatewayError::Remote {
                service: "subdivisions",
                message: "country not found".to_string(),
                body: Some(r#"{"error":true,"msg":"country not found"}"#.to_string()),
            })
        }

        async fn fetch_cities(&self, country: &str, state: &str) -> GatewayResult<Vec<String>> {
            self.calls
                .lock()
                .await
                .push(format!("cities:{}/{}", country, state));
            self.cities.get(state).cloned().ok_or(GatewayError::Remote {
                service: "subdivisions",
                message: "state not found".to_string(),
                body: Some(r#"{"error":true,"msg":"state not found"}"#.to_string()),
            })
        }
    }

    struct FakeRates {
        calls: CallLog,
        fail: bool,
    }

    #[async_trait]
    impl RateQuoter for FakeRates {
        async fn fetch_conversion_rates(&self, base: &str) -> GatewayResult<HashMap<String, f64>> {
            self.calls.lock().await.push(format!("rates:{}", base));
            if self.fail {
                return Err(GatewayError::Status {
                    service: "rates",
                    status: 500,
                    body: None,
                });
            }
            Ok(HashMap::from([
                ("INR".to_string(), 61.2),
                ("USD".to_string(), 0.73),
            ]))
        }
    }

    fn countries_payload() -> serde_json::Value {
        serde_json::json!([
            {"name": {"common": "Canada"}, "idd": {"root": "+1", "suffixes": [""]}, "currencies": {"CAD": {}}},
            {"name": {"common": "Antarctica"}, "idd": {}},
            {"name": {"common": "Bahamas"}, "idd": {"root": "+1", "suffixes": ["242"]}, "currencies": {"BSD": {}, "USD": {}}}
        ])
    }

    fn form_with(
        payload: Option<serde_json::Value>,
        rates_fail: bool,
    ) -> (
        CascadingForm<FakeCountries, FakeSubdivisions, FakeRates>,
        CallLog,
    ) {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let subdivisions = FakeSubdivisions {
            calls: calls.clone(),
            states: HashMap::from([
                ("Canada".to_string(), vec!["Ontario".to_string(), "Quebec".to_string()]),
                ("Bahamas".to_string(), vec![]),
            ]),
            cities: HashMap::from([(
                "Ontario".to_string(),
                vec!["Toronto".to_string(), "Ottawa".to_string()],
            )]),
        };
        let rates = FakeRates {
            calls: calls.clone(),
            fail: rates_fail,
        };
        let gateway = RemoteDataGateway::new(FakeCountries { payload }, subdivisions, rates);
        (CascadingForm::new(gateway), calls)
    }

    #[tokio::test]
    async fn test_mount_loads_every_country() {
        let (mut form, _) = form_with(Some(countries_payload()), false);
        form.mount().await;

        let countries = &form.state().countries;
        assert_eq!(countries.phase, TierPhase::Populated);
        assert_eq!(countries.options.len(), 3);
        assert!(countries.options.iter().all(|c| c.label == c.value));
        assert_eq!(countries.options[2].calling_code, "+1242");
        assert_eq!(countries.options[2].currency_code, "BSD");
    }

    #[tokio::test]
    async fn test_mount_failure_leaves_countries_empty() {
        let (mut form, _) = form_with(None, false);
        form.mount().await;

        assert!(form.state().countries.options.is_empty());
        assert_eq!(form.state().countries.phase, TierPhase::Error);
    }

    #[tokio::test]
    async fn test_select_canada_fetches_states_and_rates() {
        let (mut form, calls) = form_with(Some(countries_payload()), false);
        form.mount().await;
        form.select_country("Canada").await.unwrap();

        let state = form.state();
        assert_eq!(state.calling_code, "+1");
        assert_eq!(state.currency_code, "CAD");
        assert_eq!(state.states.options.len(), 2);
        assert_eq!(state.exchange_rates.primary, Some(61.2));
        assert_eq!(state.exchange_rates.base.as_deref(), Some("CAD"));

        let mut log = calls.lock().await.clone();
        log.sort();
        assert_eq!(log, vec!["rates:CAD", "states:Canada"]);
    }

    #[tokio::test]
    async fn test_country_without_currency_skips_rate_fetch() {
        let (mut form, calls) = form_with(Some(countries_payload()), false);
        form.mount().await;
        form.select_country("Antarctica").await.unwrap();

        assert_eq!(form.state().currency_code, "");
        assert_eq!(form.state().calling_code, "");
        let log = calls.lock().await.clone();
        assert!(!log.iter().any(|c| c.starts_with("rates:")));
        // 州清單請求失敗，清單為空並標記錯誤
        assert_eq!(form.state().states.phase, TierPhase::Error);
        assert!(form.state().states.options.is_empty());
    }

    #[tokio::test]
    async fn test_full_cascade_and_reselection_clears_downstream() {
        let (mut form, calls) = form_with(Some(countries_payload()), false);
        form.mount().await;
        form.select_country("Canada").await.unwrap();
        form.select_state("Ontario").await.unwrap();
        form.select_city("Toronto").unwrap();

        assert_eq!(
            form.state().cities.selected.as_ref().map(|c| c.value.as_str()),
            Some("Toronto")
        );
        assert!(calls
            .lock()
            .await
            .contains(&"cities:Canada/Ontario".to_string()));

        form.select_country("Bahamas").await.unwrap();
        let state = form.state();
        assert!(state.states.selected.is_none());
        assert!(state.cities.selected.is_none());
        assert!(state.cities.options.is_empty());
        assert_eq!(state.states.phase, TierPhase::Populated);
        assert!(!form.is_enabled(Tier::City));
    }

    #[tokio::test]
    async fn test_city_failure_empties_list_and_keeps_state() {
        let (mut form, calls) = form_with(Some(countries_payload()), false);
        form.mount().await;
        form.select_country("Canada").await.unwrap();
        form.select_state("Quebec").await.unwrap();

        let state = form.state();
        assert!(calls
            .lock()
            .await
            .contains(&"cities:Canada/Quebec".to_string()));
        assert!(state.cities.options.is_empty());
        assert_eq!(state.cities.phase, TierPhase::Error);
        assert_eq!(
            state.states.selected.as_ref().map(|s| s.value.as_str()),
            Some("Quebec")
        );
        assert!(form.render().contains("[unavailable]"));
    }

    #[tokio::test]
    async fn test_snapshot_json_reflects_selection() {
        let (mut form, _) = form_with(Some(countries_payload()), false);
        form.mount().await;
        form.select_country("Canada").await.unwrap();

        let snapshot: serde_json::Value = serde_json::from_str(&form.snapshot_json().unwrap()).unwrap();
        assert_eq!(snapshot["countries"]["selected"]["value"], "Canada");
        assert_eq!(snapshot["calling_code"], "+1");
        assert_eq!(snapshot["states"]["phase"], "populated");
    }

    #[tokio::test]
    async fn test_selecting_city_makes_no_remote_call() {
        let (mut form, calls) = form_with(Some(countries_payload()), false);
        form.mount().await;
        form.select_country("Canada").await.unwrap();
        form.select_state("Ontario").await.unwrap();
        let before = calls.lock().await.len();

        form.select_city("Ottawa").unwrap();
        assert_eq!(calls.lock().await.len(), before);
    }

    #[tokio::test]
    async fn test_inert_and_unknown_selections_are_refused() {
        let (mut form, calls) = form_with(Some(countries_payload()), false);
        form.mount().await;

        let err = form.select_state("Ontario").await.unwrap_err();
        assert!(matches!(err, SelectorError::InertSelector { tier: Tier::State }));
        let err = form.select_city("Toronto").unwrap_err();
        assert!(matches!(err, SelectorError::InertSelector { tier: Tier::City }));

        let err = form.select_country("Atlantis").await.unwrap_err();
        assert!(matches!(err, SelectorError::UnknownOption { tier: Tier::Country, .. }));
        assert!(calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_rate_failure_hides_conversion() {
        let (mut form, _) = form_with(Some(countries_payload()), true);
        form.mount().await;
        form.select_country("Canada").await.unwrap();

        assert_eq!(form.state().states.options.len(), 2);
        assert!(!form.state().exchange_rates.is_displayable());
        assert!(!form.state().exchange_rates.stale);
        assert!(!form.render().contains(" = "));
    }
}
