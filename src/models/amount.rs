//! Amount coercion
//!
//! Rows coming from storage or other external sources may carry their amount
//! as a number or as text. `Amount::coerce` turns either into a finite `f64`,
//! or `None` when the value cannot take part in a sum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A permissive amount: already numeric, or text still to be parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Finite numeric value, or `None` for NaN, infinities and unparsable text
    ///
    /// No rounding or clamping; negative values pass through.
    pub fn coerce(&self) -> Option<f64> {
        match self {
            Self::Number(n) => finite(*n),
            Self::Text(s) => parse_amount(s),
        }
    }
}

/// Parse decimal text (`"12.5"`, `" -3 "`, `"1e3"`) into a finite number
///
/// Surrounding whitespace is ignored. Blank text is rejected.
pub fn parse_amount(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().and_then(finite)
}

fn finite(n: f64) -> Option<f64> {
    n.is_finite().then_some(n)
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Amount {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}
