//! Config CLI commands
//!
//! Show paths and settings, and change display preferences.

use clap::Subcommand;

use crate::config::{Currency, LedgerPaths, Settings, Theme};
use crate::error::LedgerResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Set the display currency (RON, EUR, USD)
    Currency {
        currency: Currency,
    },

    /// Set the theme, or toggle it when no value is given
    Theme {
        #[arg(value_parser = parse_theme)]
        theme: Option<Theme>,
    },
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    match s.trim().to_lowercase().as_str() {
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
    }
}

/// Handle a config command
pub fn handle_config_command(
    paths: &LedgerPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> LedgerResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("Ledger Configuration");
            println!("====================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!("Budgets file:      {}", paths.budgets_file().display());
            println!();
            println!("Settings:");
            println!("  Currency: {}", settings.currency);
            println!("  Theme:    {}", settings.theme);
            println!("  Owner:    {}", settings.owner_id);
        }

        ConfigCommands::Currency { currency } => {
            settings.currency = currency;
            settings.save(paths)?;
            println!("Currency set to {}", currency);
        }

        ConfigCommands::Theme { theme } => {
            settings.theme = theme.unwrap_or_else(|| settings.theme.toggled());
            settings.save(paths)?;
            println!("Theme set to {}", settings.theme);
        }
    }

    Ok(())
}
