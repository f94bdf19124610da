use crate::domain::model::{
    CityOption, CountryOption, ExchangeRates, SelectOption, StateOption, Tier,
};
use crate::utils::error::{GatewayResult, Result, SelectorError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierPhase {
    Unselected,
    Loading,
    Populated,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierState<T> {
    pub options: Vec<T>,
    pub selected: Option<T>,
    pub phase: TierPhase,
}

impl<T> Default for TierState<T> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            selected: None,
            phase: TierPhase::Unselected,
        }
    }
}

impl<T: SelectOption> TierState<T> {
    /// 先比對完全相同的值，找不到再忽略大小寫
    pub fn find(&self, value: &str) -> Option<&T> {
        let value = value.trim();
        self.options
            .iter()
            .find(|o| o.value() == value)
            .or_else(|| {
                self.options
                    .iter()
                    .find(|o| o.value().eq_ignore_ascii_case(value))
            })
    }

    fn reset(&mut self) {
        self.options.clear();
        self.selected = None;
        self.phase = TierPhase::Unselected;
    }

    fn start_loading(&mut self) {
        self.options.clear();
        self.selected = None;
        self.phase = TierPhase::Loading;
    }

    fn settle(&mut self, result: GatewayResult<Vec<T>>) {
        match result {
            Ok(options) => {
                self.options = options;
                self.phase = TierPhase::Populated;
            }
            Err(_) => {
                self.options.clear();
                self.phase = TierPhase::Error;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Countries,
    States,
    Cities,
    Rates,
}

/// 發出請求時的世代標記；回應到達時世代不符即丟棄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryChange {
    pub states: RequestTicket,
    pub rates: RequestTicket,
}

#[derive(Debug, Clone, Default)]
struct Generations {
    countries: u64,
    states: u64,
    cities: u64,
    rates: u64,
}

impl Generations {
    fn bump(&mut self, kind: RequestKind) -> RequestTicket {
        let slot = match kind {
            RequestKind::Countries => &mut self.countries,
            RequestKind::States => &mut self.states,
            RequestKind::Cities => &mut self.cities,
            RequestKind::Rates => &mut self.rates,
        };
        *slot += 1;
        RequestTicket {
            kind,
            generation: *slot,
        }
    }

    fn current(&self, kind: RequestKind) -> u64 {
        match kind {
            RequestKind::Countries => self.countries,
            RequestKind::States => self.states,
            RequestKind::Cities => self.cities,
            RequestKind::Rates => self.rates,
        }
    }
}

/// 表單的唯一狀態容器
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectionState {
    pub countries: TierState<CountryOption>,
    pub states: TierState<StateOption>,
    pub cities: TierState<CityOption>,
    pub calling_code: String,
    pub currency_code: String,
    pub exchange_rates: ExchangeRates,
    #[serde(skip)]
    generations: Generations,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, tier: Tier) -> bool {
        match tier {
            Tier::Country => true,
            Tier::State => self.countries.selected.is_some(),
            Tier::City => self.states.selected.is_some(),
        }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.generations.current(ticket.kind) == ticket.generation
    }

    pub fn begin_countries(&mut self) -> RequestTicket {
        self.countries.phase = TierPhase::Loading;
        self.generations.bump(RequestKind::Countries)
    }

    pub fn apply_countries(
        &mut self,
        ticket: RequestTicket,
        result: GatewayResult<Vec<CountryOption>>,
    ) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.countries.settle(result);
        true
    }

    /// 選擇國家：更新衍生欄位、清除州與城市，並讓州清單與匯率重新載入
    pub fn begin_country(&mut self, option: CountryOption) -> CountryChange {
        self.calling_code = option.calling_code.clone();
        self.currency_code = option.currency_code.clone();
        self.countries.selected = Some(option);

        self.states.start_loading();
        self.cities.reset();
        self.generations.bump(RequestKind::Cities);

        CountryChange {
            states: self.generations.bump(RequestKind::States),
            rates: self.generations.bump(RequestKind::Rates),
        }
    }

    pub fn apply_states(
        &mut self,
        ticket: RequestTicket,
        result: GatewayResult<Vec<StateOption>>,
    ) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.states.settle(result);
        true
    }

    pub fn begin_state(&mut self, option: StateOption) -> Result<RequestTicket> {
        if !self.is_enabled(Tier::State) {
            return Err(SelectorError::InertSelector { tier: Tier::State });
        }
        self.states.selected = Some(option);
        self.cities.start_loading();
        Ok(self.generations.bump(RequestKind::Cities))
    }

    pub fn apply_cities(
        &mut self,
        ticket: RequestTicket,
        result: GatewayResult<Vec<CityOption>>,
    ) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.cities.settle(result);
        true
    }

    pub fn select_city(&mut self, option: CityOption) -> Result<()> {
        if !self.is_enabled(Tier::City) {
            return Err(SelectorError::InertSelector { tier: Tier::City });
        }
        self.cities.selected = Some(option);
        Ok(())
    }

    /// 失敗時保留上次的匯率並標記為過期；`Ok(None)` 表示沒有發出請求
    pub fn apply_rates(
        &mut self,
        ticket: RequestTicket,
        result: GatewayResult<Option<ExchangeRates>>,
    ) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        match result {
            Ok(Some(rates)) => self.exchange_rates = rates,
            Ok(None) => {}
            Err(_) => {
                let rates = &mut self.exchange_rates;
                rates.stale = rates.primary.is_some() || rates.secondary.is_some();
            }
        }
        true
    }

    fn accept(&self, ticket: RequestTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            tracing::debug!(
                "Discarding stale {:?} response (generation {} < {})",
                ticket.kind,
                ticket.generation,
                self.generations.current(ticket.kind)
            );
        }
        current
    }
}
