use std::fmt;

use num_integer::Integer;

use super::{round_significant, Limits, Number};
use crate::calc_engine::error::{Ceiling, EvalError};

/// Exact ratio `numerator / denominator` with the sign kept apart.
///
/// Always in lowest terms, denominator non-zero, and zero is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    numerator: u64,
    denominator: u64,
    negative: bool,
}

impl Fraction {
    pub fn new(numerator: u64, denominator: u64, negative: bool) -> Self {
        debug_assert!(denominator != 0);
        let divisor = numerator.gcd(&denominator).max(1);
        Fraction {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
            negative: negative && numerator != 0,
        }
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }
}

fn overflow(limits: &Limits) -> EvalError {
    EvalError::Overflow(Ceiling::Digits(limits.max_digits))
}

fn digit_count(value: u64) -> u32 {
    value.checked_ilog10().map_or(1, |log| log + 1)
}

fn is_bounded(value: u64, limits: &Limits) -> bool {
    digit_count(value) <= limits.max_digits
}

/// `a * b` under the digit ceiling.
///
/// A product has either `digits(a) + digits(b)` or one fewer digits, so the
/// counts settle every case except that one, which is multiplied and measured.
fn bounded_product(a: u64, b: u64, limits: &Limits) -> Result<u64, EvalError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    let digits = digit_count(a) + digit_count(b);
    if digits > limits.max_digits + 1 {
        return Err(overflow(limits));
    }
    let product = a.checked_mul(b).ok_or_else(|| overflow(limits))?;
    if digits > limits.max_digits && !is_bounded(product, limits) {
        return Err(overflow(limits));
    }
    Ok(product)
}

impl Fraction {
    /// Cross-multiplied numerators over the common denominator.
    fn cross(&self, rhs: &Fraction, limits: &Limits) -> Result<(u64, u64, u64), EvalError> {
        let left = bounded_product(self.numerator, rhs.denominator, limits)?;
        let right = bounded_product(self.denominator, rhs.numerator, limits)?;
        let denominator = bounded_product(self.denominator, rhs.denominator, limits)?;
        Ok((left, right, denominator))
    }
}

impl Number for Fraction {
    fn zero() -> Self {
        Fraction::new(0, 1, false)
    }

    fn push_digit(&self, digit: u32, limits: &Limits) -> Result<Self, EvalError> {
        let numerator = self
            .numerator
            .checked_mul(10)
            .and_then(|n| n.checked_add(u64::from(digit)))
            .filter(|n| is_bounded(*n, limits))
            .ok_or_else(|| overflow(limits))?;
        Ok(Fraction::new(numerator, 1, false))
    }

    fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    fn is_negative(&self) -> bool {
        self.negative
    }

    fn negate(self) -> Self {
        Fraction::new(self.numerator, self.denominator, !self.negative)
    }

    fn add_magnitudes(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError> {
        let (left, right, denominator) = self.cross(rhs, limits)?;
        // both terms are under the ceiling, so their sum fits in u64
        let numerator = left.checked_add(right).ok_or_else(|| overflow(limits))?;
        if !is_bounded(numerator, limits) {
            return Err(overflow(limits));
        }
        Ok(Fraction::new(numerator, denominator, false))
    }

    fn sub_magnitudes(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError> {
        let (left, right, denominator) = self.cross(rhs, limits)?;
        let fraction = if right <= left {
            Fraction::new(left - right, denominator, false)
        } else {
            Fraction::new(right - left, denominator, true)
        };
        Ok(fraction)
    }

    fn mul(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError> {
        // reduce crosswise so the ceiling applies to the lowest-terms product
        let left = self.numerator.gcd(&rhs.denominator).max(1);
        let right = rhs.numerator.gcd(&self.denominator).max(1);

        let numerator = bounded_product(self.numerator / left, rhs.numerator / right, limits)?;
        let denominator = bounded_product(self.denominator / right, rhs.denominator / left, limits)?;
        Ok(Fraction::new(numerator, denominator, self.negative ^ rhs.negative))
    }

    fn div(&self, rhs: &Self, limits: &Limits) -> Result<Self, EvalError> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        let reciprocal = Fraction {
            numerator: rhs.denominator,
            denominator: rhs.numerator,
            negative: rhs.negative,
        };
        self.mul(&reciprocal, limits)
    }

    fn to_f64(&self) -> f64 {
        let value = self.numerator as f64 / self.denominator as f64;
        if self.negative {
            -value
        } else {
            value
        }
    }

    fn finish(&self, limits: &Limits) -> Result<f64, EvalError> {
        Ok(round_significant(self.to_f64(), limits.max_digits))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(max_digits: u32) -> Limits {
        Limits { max_digits, ..Limits::default() }
    }

    fn literal(text: &str, limits: &Limits) -> Result<Fraction, EvalError> {
        text.chars()
            .try_fold(Fraction::zero(), |acc, c| acc.push_digit(c.to_digit(10).unwrap(), limits))
    }

    #[test]
    fn literal_respects_digit_ceiling() {
        let limits = limits(15);
        assert_eq!(literal("999999999999999", &limits).unwrap().numerator(), 999_999_999_999_999);
        assert_eq!(
            literal("1000000000000000", &limits).unwrap_err(),
            EvalError::Overflow(Ceiling::Digits(15))
        );
        assert_eq!(literal("0000000000000000000000320", &limits).unwrap().numerator(), 320);
    }

    #[test]
    fn keeps_lowest_terms_and_positive_zero() {
        let f = Fraction::new(6, 8, true);
        assert_eq!((f.numerator(), f.denominator(), f.is_negative()), (3, 4, true));
        assert!(!Fraction::zero().negate().is_negative());
        assert_eq!(Fraction::new(0, 7, false).denominator(), 1);
    }

    #[test]
    fn magnitude_arithmetic() {
        let limits = limits(15);
        let third = Fraction::new(1, 3, false);
        let half = Fraction::new(1, 2, true);

        assert_eq!(third.add_magnitudes(&half, &limits).unwrap(), Fraction::new(5, 6, false));
        assert_eq!(third.sub_magnitudes(&half, &limits).unwrap(), Fraction::new(1, 6, true));
        assert_eq!(half.sub_magnitudes(&third, &limits).unwrap(), Fraction::new(1, 6, false));
        assert_eq!(third.mul(&half, &limits).unwrap(), Fraction::new(1, 6, true));
        assert_eq!(third.div(&half, &limits).unwrap(), Fraction::new(2, 3, true));
        assert_eq!(third.mul(&Fraction::new(3, 1, false), &limits).unwrap().to_f64(), 1.0);
    }

    #[test]
    fn refuses_products_past_the_ceiling() {
        let limits = limits(6);
        let big = Fraction::new(1000, 1, false);
        assert_eq!(big.mul(&big, &limits).unwrap_err(), EvalError::Overflow(Ceiling::Digits(6)));
        assert!(Fraction::new(999, 1, false).mul(&Fraction::new(999, 1, false), &limits).is_ok());

        let sum = Fraction::new(999_999, 1, false).add_magnitudes(&Fraction::new(1, 1, false), &limits);
        assert_eq!(sum.unwrap_err(), EvalError::Overflow(Ceiling::Digits(6)));
    }

    #[test]
    fn fifteen_digit_operands_stay_usable() {
        let limits = limits(15);
        let largest = Fraction::new(999_999_999_999_999, 1, false);
        let one = Fraction::new(1, 1, false);

        assert_eq!(
            Fraction::new(999_999_999_999_998, 1, false).add_magnitudes(&one, &limits).unwrap(),
            largest
        );
        assert_eq!(largest.mul(&one, &limits).unwrap(), largest);
        assert_eq!(
            largest.sub_magnitudes(&one, &limits).unwrap(),
            Fraction::new(999_999_999_999_998, 1, false)
        );
        assert_eq!(largest.add_magnitudes(&Fraction::zero(), &limits).unwrap(), largest);
        assert_eq!(
            largest.add_magnitudes(&one, &limits).unwrap_err(),
            EvalError::Overflow(Ceiling::Digits(15))
        );
        assert_eq!(
            largest.mul(&Fraction::new(2, 1, false), &limits).unwrap_err(),
            EvalError::Overflow(Ceiling::Digits(15))
        );
    }

    #[test]
    fn products_are_reduced_before_the_ceiling_applies() {
        let limits = limits(15);
        let wide = Fraction::new(999_999_999, 2, false);
        let narrow = Fraction::new(2, 999_999_999, false);
        assert_eq!(wide.mul(&narrow, &limits).unwrap(), Fraction::new(1, 1, false));
        assert_eq!(wide.div(&wide, &limits).unwrap(), Fraction::new(1, 1, false));
        assert_eq!(Fraction::zero().mul(&narrow, &limits).unwrap(), Fraction::zero());

        let largest = Fraction::new(999_999_999_999_999, 7, false);
        let inverse = Fraction::new(7, 999_999_999_999_999, true);
        assert_eq!(largest.mul(&inverse, &limits).unwrap(), Fraction::new(1, 1, true));
    }

    #[test]
    fn division_by_zero_is_refused() {
        let limits = limits(15);
        assert_eq!(
            Fraction::new(1, 1, false).div(&Fraction::zero(), &limits).unwrap_err(),
            EvalError::DivisionByZero
        );
    }

    #[test]
    fn displays_sign_and_ratio() {
        assert_eq!(Fraction::new(7, 3, true).to_string(), "-7/3");
        assert_eq!(Fraction::new(42, 1, false).to_string(), "42");
    }
}
