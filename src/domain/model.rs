use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 三層級聯選擇的層級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Country,
    State,
    City,
}

impl Tier {
    pub fn parent(&self) -> Option<Tier> {
        match self {
            Tier::Country => None,
            Tier::State => Some(Tier::Country),
            Tier::City => Some(Tier::State),
        }
    }

    pub fn parent_label(&self) -> &'static str {
        match self.parent() {
            Some(Tier::Country) => "country",
            Some(Tier::State) => "state",
            _ => "parent",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Country => write!(f, "country"),
            Tier::State => write!(f, "state"),
            Tier::City => write!(f, "city"),
        }
    }
}

/// 可選項目的共同介面
pub trait SelectOption {
    fn value(&self) -> &str;
    fn label(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryOption {
    pub value: String,
    pub label: String,
    pub calling_code: String,
    pub currency_code: String,
}

/// 州與城市共用的選項格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOption {
    pub value: String,
    pub label: String,
}

pub type StateOption = PlaceOption;
pub type CityOption = PlaceOption;

impl PlaceOption {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            value: name,
        }
    }
}

impl SelectOption for CountryOption {
    fn value(&self) -> &str {
        &self.value
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl SelectOption for PlaceOption {
    fn value(&self) -> &str {
        &self.value
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// 兩個目標幣別的匯率
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub base: Option<String>,
    pub primary: Option<f64>,
    pub secondary: Option<f64>,
    /// 上次更新失敗，保留的是舊值
    pub stale: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ExchangeRates {
    /// 兩個匯率都有值才顯示換算
    pub fn is_displayable(&self) -> bool {
        self.primary.is_some() && self.secondary.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCurrencies {
    pub primary: String,
    pub secondary: String,
}

impl Default for TargetCurrencies {
    fn default() -> Self {
        Self {
            primary: "INR".to_string(),
            secondary: "USD".to_string(),
        }
    }
}

/// restcountries 回傳的單筆國家資料（只取用到的欄位）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteCountry {
    pub name: RemoteName,
    #[serde(default)]
    pub idd: RemoteIdd,
    #[serde(default)]
    pub currencies: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteName {
    pub common: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteIdd {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub suffixes: Option<Vec<String>>,
}
