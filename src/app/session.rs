use crate::core::form::CascadingForm;
use crate::core::selection::TierState;
use crate::core::{CountryDirectory, RateQuoter, SubdivisionDirectory};
use crate::domain::model::{CountryOption, SelectOption, Tier};
use crate::utils::error::{Result, SelectorError};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands:
  countries [filter]   list countries
  states [filter]      list states of the selected country
  cities [filter]      list cities of the selected state
  country <name>       select a country
  state <name>         select a state
  city <name>          select a city
  show                 print the form
  help                 show this help
  quit                 leave";

/// 單次模式要依序套用的選擇
#[derive(Debug, Clone, Default)]
pub struct Preset {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

pub async fn apply_preset<C, S, R>(form: &mut CascadingForm<C, S, R>, preset: &Preset) -> Result<()>
where
    C: CountryDirectory,
    S: SubdivisionDirectory,
    R: RateQuoter,
{
    if let Some(country) = &preset.country {
        form.select_country(country).await?;
    }
    if let Some(state) = &preset.state {
        form.select_state(state).await?;
    }
    if let Some(city) = &preset.city {
        form.select_city(city)?;
    }
    Ok(())
}

/// 互動模式：逐行讀取指令直到 quit 或輸入結束
pub async fn run_session<C, S, R, I, W>(
    form: &mut CascadingForm<C, S, R>,
    input: I,
    out: &mut W,
) -> Result<()>
where
    C: CountryDirectory,
    S: SubdivisionDirectory,
    R: RateQuoter,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", form.render())?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let outcome = match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{}", HELP)?;
                Ok(())
            }
            "show" => {
                writeln!(out, "{}", form.render())?;
                Ok(())
            }
            "countries" => {
                list_countries(out, &form.state().countries, argument)?;
                Ok(())
            }
            "states" => list_places(out, form, Tier::State, argument),
            "cities" => list_places(out, form, Tier::City, argument),
            "country" => select(out, form, Tier::Country, argument).await,
            "state" => select(out, form, Tier::State, argument).await,
            "city" => select(out, form, Tier::City, argument).await,
            other => {
                writeln!(out, "Unknown command '{}'. Type 'help' for commands.", other)?;
                Ok(())
            }
        };

        // 操作錯誤只提示，不結束互動
        if let Err(e) = outcome {
            match e {
                SelectorError::InertSelector { .. } | SelectorError::UnknownOption { .. } => {
                    writeln!(out, "⚠️  {}", e.user_friendly_message())?;
                    writeln!(out, "💡 {}", e.recovery_suggestion())?;
                }
                other => return Err(other),
            }
        }
    }

    Ok(())
}

async fn select<C, S, R, W>(
    out: &mut W,
    form: &mut CascadingForm<C, S, R>,
    tier: Tier,
    name: &str,
) -> Result<()>
where
    C: CountryDirectory,
    S: SubdivisionDirectory,
    R: RateQuoter,
    W: Write,
{
    if name.is_empty() {
        writeln!(out, "Usage: {} <name>", tier)?;
        return Ok(());
    }

    match tier {
        Tier::Country => form.select_country(name).await?,
        Tier::State => form.select_state(name).await?,
        Tier::City => form.select_city(name)?,
    }
    writeln!(out, "{}", form.render())?;
    Ok(())
}

fn list_places<C, S, R, W>(
    out: &mut W,
    form: &CascadingForm<C, S, R>,
    tier: Tier,
    filter: &str,
) -> Result<()>
where
    C: CountryDirectory,
    S: SubdivisionDirectory,
    R: RateQuoter,
    W: Write,
{
    if !form.is_enabled(tier) {
        return Err(SelectorError::InertSelector { tier });
    }
    let options = match tier {
        Tier::City => &form.state().cities,
        _ => &form.state().states,
    };
    let shown = matching(options, filter);
    for option in &shown {
        writeln!(out, "  - {}", option.label())?;
    }
    writeln!(out, "{} of {} {} option(s)", shown.len(), options.options.len(), tier)?;
    Ok(())
}

fn list_countries<W: Write>(
    out: &mut W,
    countries: &TierState<CountryOption>,
    filter: &str,
) -> Result<()> {
    let shown = matching(countries, filter);
    for country in &shown {
        writeln!(
            out,
            "  - {} ({}, {})",
            country.label,
            if country.calling_code.is_empty() { "-" } else { country.calling_code.as_str() },
            if country.currency_code.is_empty() { "-" } else { country.currency_code.as_str() },
        )?;
    }
    writeln!(out, "{} of {} country option(s)", shown.len(), countries.options.len())?;
    Ok(())
}

fn matching<'a, T: SelectOption>(tier: &'a TierState<T>, filter: &str) -> Vec<&'a T> {
    let needle = filter.to_lowercase();
    tier.options
        .iter()
        .filter(|o| needle.is_empty() || o.label().to_lowercase().contains(&needle))
        .collect()
}
