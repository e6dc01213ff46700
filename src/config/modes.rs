//! Library query window strategies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the requested date range is split into library queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStrategy {
    /// One query per calendar day, newest first (default).
    #[default]
    Daily,
    /// A single query spanning the whole range.
    Single,
}

impl fmt::Display for WindowStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowStrategy::Daily => write!(f, "daily"),
            WindowStrategy::Single => write!(f, "single"),
        }
    }
}

impl FromStr for WindowStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(WindowStrategy::Daily),
            "single" => Ok(WindowStrategy::Single),
            _ => Err(format!("Unknown window strategy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        assert_eq!("daily".parse::<WindowStrategy>(), Ok(WindowStrategy::Daily));
        assert_eq!("SINGLE".parse::<WindowStrategy>(), Ok(WindowStrategy::Single));
        assert!("weekly".parse::<WindowStrategy>().is_err());
    }
}
