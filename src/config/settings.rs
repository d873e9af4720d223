//! User settings for the ledger
//!
//! Display preferences (currency, theme) and the owner id that scopes every
//! stored transaction. Settings are an explicit value handed to whatever
//! formats output; nothing reads them from global state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// Display currency. Formatting only, amounts are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Ron,
    Eur,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ron => "RON",
            Self::Eur => "EUR",
            Self::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ron => "RON",
            Self::Eur => "€",
            Self::Usd => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RON" => Ok(Self::Ron),
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            other => Err(LedgerError::Validation(format!(
                "Unsupported currency '{}' (expected RON, EUR or USD)",
                other
            ))),
        }
    }
}

/// Format an amount for display in the given currency
///
/// RON puts the code after the number, EUR and USD prefix their symbol.
/// Always two decimals.
pub fn format_money(amount: f64, currency: Currency) -> String {
    match currency {
        Currency::Ron => format!("{:.2} {}", amount, currency.symbol()),
        _ => format!("{}{:.2}", currency.symbol(), amount),
    }
}

/// Colour theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub theme: Theme,

    /// Owner id stamped on every transaction written from this profile
    #[serde(default = "default_owner_id")]
    pub owner_id: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_owner_id() -> String {
    "local".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: Currency::default(),
            theme: Theme::default(),
            owner_id: default_owner_id(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        log::debug!("Settings saved to {}", paths.settings_file().display());
        Ok(())
    }

    pub fn format_money(&self, amount: f64) -> String {
        format_money(amount, self.currency)
    }
}
