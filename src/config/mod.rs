//! Configuration module
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence
//! - Display preferences (currency, theme)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{format_money, Currency, Settings, Theme};
