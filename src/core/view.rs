use crate::core::selection::{SelectionState, TierPhase, TierState};
use crate::domain::model::{ExchangeRates, SelectOption, TargetCurrencies, Tier};
use std::fmt::Write;

const TITLE: &str = "Country, State, and City Selector with Code and Currency Converter";

/// 將目前的選擇狀態畫成文字表單
pub fn render_form(state: &SelectionState, targets: &TargetCurrencies) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));

    render_selector(&mut out, "Country", &state.countries, state.is_enabled(Tier::Country));
    render_selector(&mut out, "State", &state.states, state.is_enabled(Tier::State));
    render_selector(&mut out, "City", &state.cities, state.is_enabled(Tier::City));

    let _ = writeln!(out, "{:<14}{}", "Country Code", state.calling_code);
    let _ = writeln!(out, "{:<14}{}", "Currency", state.currency_code);

    for line in conversion_lines(&state.exchange_rates, targets) {
        let _ = writeln!(out, "{}", line);
    }

    out
}

/// 兩個匯率都有值才輸出換算行，否則回傳空
pub fn conversion_lines(rates: &ExchangeRates, targets: &TargetCurrencies) -> Vec<String> {
    let (Some(primary), Some(secondary)) = (rates.primary, rates.secondary) else {
        return Vec::new();
    };

    let base = rates.base.as_deref().unwrap_or_default();
    let marker = if rates.stale { " (stale)" } else { "" };

    vec![
        format!("1 {} = {} {}{}", base, primary, targets.primary, marker),
        format!("1 {} = {} {}{}", base, secondary, targets.secondary, marker),
    ]
}

fn render_selector<T: SelectOption>(
    out: &mut String,
    title: &str,
    tier: &TierState<T>,
    enabled: bool,
) {
    let selected = tier
        .selected
        .as_ref()
        .map(|o| o.label().to_string())
        .unwrap_or_else(|| "Select...".to_string());

    let status = match tier.phase {
        TierPhase::Unselected => String::new(),
        TierPhase::Loading => " [loading]".to_string(),
        TierPhase::Populated => format!(" [{} options]", tier.options.len()),
        TierPhase::Error => " [unavailable]".to_string(),
    };

    let disabled = if enabled { "" } else { " (disabled)" };
    let _ = writeln!(out, "{:<14}{}{}{}", title, selected, status, disabled);
}
