use std::fmt;

use super::{round_significant, Limits, Number};
use crate::calc_engine::error::{Ceiling, EvalError};

/// `mantissa × 10^magnitude` with `1 ≤ |mantissa| < 10`, or zero.
///
/// Intermediate values keep one guard digit past `max_digits`; the final
/// rounding in [`Number::finish`] drops it, which is what turns a repeating
/// `0.9999…` into `1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scientific {
    mantissa: f64,
    magnitude: i32,
}

fn overflow(limits: &Limits) -> EvalError {
    EvalError::Overflow(Ceiling::Magnitude(limits.max_magnitude))
}

/// `value × 10^exponent`, dividing for negative exponents to stay exact on round numbers.
fn scale(value: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        value * 10f64.powi(exponent)
    } else {
        value / 10f64.powi(-exponent)
    }
}

impl Scientific {
    /// Normalizes `value`, rounded to `digits` significant digits.
    pub fn from_raw(value: f64, digits: u32, limits: &Limits) -> Result<Self, EvalError> {
        if value == 0.0 {
            return Ok(Scientific::zero());
        }
        if !value.is_finite() {
            return Err(overflow(limits));
        }

        let mut magnitude = value.abs().log10().floor() as i32;
        if magnitude.abs() > limits.max_magnitude {
            return Err(overflow(limits));
        }

        let mut mantissa = scale(value, -magnitude);
        // log10 may land one off next to a power of ten
        if mantissa.abs() >= 10.0 {
            mantissa /= 10.0;
            magnitude += 1;
        } else if mantissa.abs() < 1.0 {
            mantissa *= 10.0;
            magnitude -= 1;
        }

        let precision = 10f64.powi(digits.saturating_sub(1) as i32);
        mantissa = (mantissa * precision).round() / precision;
        if mantissa.abs() >= 10.0 {
            mantissa /= 10.0;
            magnitude += 1;
        }

        if magnitude.abs() > limits.max_magnitude {
            return Err(overflow(limits));
        }
        Ok(Scientific { mantissa, magnitude })
    }

    pub fn mantissa(&self) -> f64 {
        self.mantissa
    }

    pub fn magnitude(&self) -> i32 {
        self.magnitude
    }

    fn raw(&self) -> f64 {
        scale(self.mantissa, self.magnitude)
    }
}

fn working_digits(limits: &Limits) -> u32 {
    limits.max_digits + 1
}

impl Number for Scientific {
    fn zero() -> Self {
        Scientific { mantissa: 0.0, magnitude: 0 }
    }

    fn push_digit(&self, digit: u32, limits: &Limits) -> Result<Self, EvalError> {
        let value = self.raw() * 10.0 + f64::from(digit);
        Scientific::from_raw(value, working_digits(limits), limits)
    }

    fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    fn is_negative(&self) -> bool {
        self.mantissa < 0.0
    }

    fn negate(self) -> Self {
        if self.is_zero() {
            return self;
        }
        Scientific { mantissa: -self.mantissa, ..self }
    }

    fn add_magnitudes(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError> {
        let sum = self.raw().abs() + rhs.raw().abs();
        Scientific::from_raw(sum, working_digits(limits), limits)
    }

    fn sub_magnitudes(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError> {
        let difference = self.raw().abs() - rhs.raw().abs();
        Scientific::from_raw(difference, working_digits(limits), limits)
    }

    fn mul(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError> {
        // the product's magnitude is the sum, or one more; from_raw catches the latter
        if (self.magnitude + rhs.magnitude).abs() > limits.max_magnitude {
            return Err(overflow(limits));
        }
        Scientific::from_raw(self.raw() * rhs.raw(), working_digits(limits), limits)
    }

    fn div(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        if (self.magnitude - rhs.magnitude).abs() > limits.max_magnitude {
            return Err(overflow(limits));
        }
        Scientific::from_raw(self.raw() / rhs.raw(), working_digits(limits), limits)
    }

    fn to_f64(&self) -> f64 {
        self.raw()
    }

    fn finish(&self, limits: &Limits) -> Result<f64, EvalError> {
        let answer = Scientific::from_raw(self.raw(), limits.max_digits, limits)?;
        Ok(round_significant(answer.raw(), limits.max_digits))
    }
}

impl fmt::Display for Scientific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (-5..16).contains(&self.magnitude) {
            write!(f, "{}", round_significant(self.raw(), 16))
        } else {
            write!(f, "{}e{}", self.mantissa, self.magnitude)
        }
    }
}
