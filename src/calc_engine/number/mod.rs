//! Numeric values produced by evaluation.
//!
//! Two interchangeable strategies implement [`Number`]: [`Fraction`] keeps an
//! exact ratio of two bounded integers, [`Scientific`] keeps a rounded
//! mantissa and a bounded decimal exponent. Both refuse to grow past the
//! configured [`Limits`] and fail with [`EvalError::Overflow`] instead.

mod fraction;
mod scientific;

use std::fmt;

pub use fraction::Fraction;
pub use scientific::Scientific;

use super::error::EvalError;

pub const DEFAULT_MAX_DIGITS: u32 = 15;
pub const DEFAULT_SCIENTIFIC_DIGITS: u32 = 12;
pub const DEFAULT_MAX_MAGNITUDE: i32 = 300;

/// Ceilings every literal, intermediate and final value must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_digits: u32,
    pub max_magnitude: i32,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_digits: DEFAULT_MAX_DIGITS,
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
        }
    }
}

/// Arithmetic an evaluation strategy has to provide.
///
/// Addition and subtraction only ever see magnitudes: the tree normalizes
/// mixed signs before calling [`Number::add_magnitudes`] or
/// [`Number::sub_magnitudes`], so implementations never handle signed
/// subtraction themselves.
pub trait Number: Clone + fmt::Debug + fmt::Display {
    fn zero() -> Self;

    /// Appends a decimal digit to a non-negative literal, checking the ceiling first.
    fn push_digit(&self, digit: u32, limits: &Limits) -> Result<Self, EvalError>;

    fn is_zero(&self) -> bool;

    fn is_negative(&self) -> bool;

    fn negate(self) -> Self;

    /// `|self| + |rhs|`
    fn add_magnitudes(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError>;

    /// `|self| - |rhs|`, negative when `rhs` is the larger magnitude.
    fn sub_magnitudes(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError>;

    fn mul(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError>;

    /// Callers check `rhs.is_zero()` first; implementations still refuse a zero divisor.
    fn div(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError>;

    fn to_f64(&self) -> f64;

    /// Converts a finished evaluation into the answer handed to callers.
    fn finish(&self, limits: &Limits) -> Result<f64, EvalError>;
}

/// Rounds `value` to `digits` significant decimal digits.
///
/// Goes through decimal text so that `11.000000000000002`
/// becomes exactly `11.0` rather than another binary neighbour.
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let precision = digits.saturating_sub(1) as usize;
    format!("{value:.precision$e}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_significant_digits() {
        assert_eq!(round_significant(11.000000000000002, 12), 11.0);
        assert_eq!(round_significant(0.9999999999999, 12), 1.0);
        assert_eq!(round_significant(-2.4e-7, 1), -2e-7);
        assert_eq!(round_significant(123456.0, 3), 123000.0);
        assert_eq!(round_significant(0.0, 12), 0.0);
    }
}
