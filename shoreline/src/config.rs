//! Property configuration loading.
//!
//! Listing defaults live in a `config.yaml` inside the data directory
//! and can be overridden per-field with `SHORELINE_*` environment
//! variables. All fields are optional; anything unset falls back to
//! house defaults.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pricing;

/// Listing id used when neither the configuration nor the booking
/// names one.
pub const DEFAULT_LISTING_ID: i64 = 49_599_459;

/// Default settlement currency for payment intents.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Property configuration.
///
/// # Examples
///
/// ```
/// use shoreline::config::Config;
///
/// let config: Config = serde_yaml::from_str("listing_id: 7\ncurrency: eur\n").unwrap();
/// assert_eq!(config.listing_id, Some(7));
/// assert_eq!(config.effective_currency(), "eur");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The listing bookings default to.
    pub listing_id: Option<i64>,

    /// Settlement currency for payment intents.
    pub currency: Option<String>,

    /// Default nightly rate when a booking does not name one.
    pub nightly_rate: Option<Decimal>,

    /// Cleaning fee applied to every booking.
    pub cleaning_fee: Option<Decimal>,

    /// Service fee applied to every booking.
    pub service_fee: Option<Decimal>,

    /// External calendar to sync reservations to.
    pub calendar_id: Option<String>,
}

impl Config {
    /// Loads configuration from a YAML file, if it exists.
    ///
    /// A missing file yields the default (empty) configuration;
    /// a present but malformed file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration from the data directory's `config.yaml`,
    /// then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an override cannot be parsed.
    pub fn load_with_env(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load(&data_dir.join("config.yaml"))?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Applies `SHORELINE_*` environment variable overrides in place.
    ///
    /// Recognized variables: `SHORELINE_LISTING_ID`, `SHORELINE_CURRENCY`,
    /// `SHORELINE_NIGHTLY_RATE`, `SHORELINE_CLEANING_FEE`,
    /// `SHORELINE_SERVICE_FEE`, `SHORELINE_CALENDAR_ID`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("SHORELINE_LISTING_ID") {
            self.listing_id = Some(value.parse().map_err(|_| Error::Validation {
                field: "SHORELINE_LISTING_ID".into(),
                message: format!("'{value}' is not a valid listing id"),
            })?);
        }
        if let Ok(value) = std::env::var("SHORELINE_CURRENCY") {
            self.currency = Some(value);
        }
        if let Ok(value) = std::env::var("SHORELINE_NIGHTLY_RATE") {
            self.nightly_rate = Some(parse_money("SHORELINE_NIGHTLY_RATE", &value)?);
        }
        if let Ok(value) = std::env::var("SHORELINE_CLEANING_FEE") {
            self.cleaning_fee = Some(parse_money("SHORELINE_CLEANING_FEE", &value)?);
        }
        if let Ok(value) = std::env::var("SHORELINE_SERVICE_FEE") {
            self.service_fee = Some(parse_money("SHORELINE_SERVICE_FEE", &value)?);
        }
        if let Ok(value) = std::env::var("SHORELINE_CALENDAR_ID") {
            self.calendar_id = Some(value);
        }
        Ok(())
    }

    /// The listing id to book against, defaulted.
    #[must_use]
    pub fn effective_listing_id(&self) -> i64 {
        self.listing_id.unwrap_or(DEFAULT_LISTING_ID)
    }

    /// The settlement currency, defaulted.
    #[must_use]
    pub fn effective_currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    /// The cleaning fee, defaulted to the house standard.
    #[must_use]
    pub fn effective_cleaning_fee(&self) -> Decimal {
        self.cleaning_fee
            .unwrap_or_else(pricing::default_cleaning_fee)
    }

    /// The service fee; there is none unless configured.
    #[must_use]
    pub fn effective_service_fee(&self) -> Decimal {
        self.service_fee.unwrap_or(Decimal::ZERO)
    }
}

fn parse_money(field: &str, value: &str) -> Result<Decimal> {
    value.parse().map_err(|_| Error::Validation {
        field: field.into(),
        message: format!("'{value}' is not a valid amount"),
    })
}
