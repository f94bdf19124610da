pub mod form;
pub mod gateway;
pub mod selection;
pub mod view;

pub use crate::domain::model::{
    CityOption, CountryOption, ExchangeRates, PlaceOption, StateOption, TargetCurrencies, Tier,
};
pub use crate::domain::ports::{ConfigProvider, CountryDirectory, RateQuoter, SubdivisionDirectory};
pub use crate::utils::error::Result;
