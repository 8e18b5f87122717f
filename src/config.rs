use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::calc_engine::number::{
    Limits, DEFAULT_MAX_DIGITS, DEFAULT_MAX_MAGNITUDE, DEFAULT_SCIENTIFIC_DIGITS,
};

/// Largest digit ceiling; past it an `f64` can no longer carry the answer exactly.
pub const MAX_DIGITS_LIMIT: u32 = 15;
/// Largest magnitude ceiling that keeps every normalized value a finite `f64`.
pub const MAX_MAGNITUDE_LIMIT: i32 = 307;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max digits must be between 1 and 15, got {0}")]
    MaxDigits(u32),
    #[error("max magnitude must be between 1 and 307, got {0}")]
    MaxMagnitude(i32),
    #[error("unknown strategy '{0}' (expected 'exact' or 'scientific')")]
    UnknownStrategy(String),
}

/// Numeric representation used while evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Exact fractions of bounded integers.
    #[default]
    ExactFraction,
    /// Rounded mantissa with a bounded decimal exponent.
    Scientific,
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "fraction" => Ok(Strategy::ExactFraction),
            "scientific" | "sci" => Ok(Strategy::Scientific),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::ExactFraction => "exact",
            Strategy::Scientific => "scientific",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    strategy: Strategy,
    limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(Strategy::default())
    }
}

impl Config {
    /// Default ceilings for `strategy`: 15 digits for exact fractions,
    /// 12 digits and `10^300` for scientific values.
    pub fn new(strategy: Strategy) -> Self {
        let max_digits = match strategy {
            Strategy::ExactFraction => DEFAULT_MAX_DIGITS,
            Strategy::Scientific => DEFAULT_SCIENTIFIC_DIGITS,
        };
        Config {
            strategy,
            limits: Limits {
                max_digits,
                max_magnitude: DEFAULT_MAX_MAGNITUDE,
            },
        }
    }

    pub fn with_max_digits(mut self, max_digits: u32) -> Result<Self, ConfigError> {
        if !(1..=MAX_DIGITS_LIMIT).contains(&max_digits) {
            return Err(ConfigError::MaxDigits(max_digits));
        }
        self.limits.max_digits = max_digits;
        Ok(self)
    }

    pub fn with_max_magnitude(mut self, max_magnitude: i32) -> Result<Self, ConfigError> {
        if !(1..=MAX_MAGNITUDE_LIMIT).contains(&max_magnitude) {
            return Err(ConfigError::MaxMagnitude(max_magnitude));
        }
        self.limits.max_magnitude = max_magnitude;
        Ok(self)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }
}
