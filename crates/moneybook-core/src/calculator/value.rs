use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MAX_SCALE: u32 = 28;

/// A decimal held as `integer_part / scale_factor`, where the scale factor is
/// a power of ten. Backed by [`Decimal`], whose mantissa and scale are exactly
/// that pair, so keypad arithmetic never goes through binary floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScaledValue(Decimal);

/// Why an arithmetic step could not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    DivisionByZero,
    Overflow,
}

impl ScaledValue {
    pub const ZERO: ScaledValue = ScaledValue(Decimal::ZERO);

    /// `None` when the pair does not fit (mantissa beyond 96 bits or more than 28 fractional digits).
    pub fn new(integer_part: i128, scale: u32) -> Option<Self> {
        Decimal::try_from_i128_with_scale(integer_part, scale)
            .ok()
            .map(Self)
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Expands an existing amount into its digits, e.g. `12.5` becomes `125 / 10`.
    /// Non-finite or out-of-range amounts become zero.
    pub fn from_f64(amount: f64) -> Self {
        Decimal::from_f64(amount)
            .map(|value| Self(value.normalize()))
            .unwrap_or_default()
    }

    pub fn integer_part(&self) -> i128 {
        self.0.mantissa()
    }

    /// Number of fractional digits; the scale factor is `10^scale`.
    pub fn scale(&self) -> u32 {
        self.0.scale()
    }

    pub fn scale_factor(&self) -> i128 {
        10i128.pow(self.scale())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Appends a keypad digit. In fraction mode the scale grows with it.
    pub(crate) fn push_digit(self, digit: u8, fraction: bool) -> Option<Self> {
        let digit = i128::from(digit);
        let shifted = self.integer_part().checked_mul(10)?;
        let mantissa = if shifted < 0 || self.0.is_sign_negative() {
            shifted.checked_sub(digit)?
        } else {
            shifted.checked_add(digit)?
        };
        let scale = if fraction { self.scale() + 1 } else { self.scale() };
        if scale > MAX_SCALE {
            return None;
        }
        Self::new(mantissa, scale)
    }

    /// The `00` key: two zero digits on the integer part, scale untouched.
    pub(crate) fn push_double_zero(self) -> Option<Self> {
        Self::new(self.integer_part().checked_mul(100)?, self.scale())
    }

    /// Drops the last typed digit; a fractional digit also shrinks the scale.
    pub(crate) fn drop_digit(self) -> Self {
        let mantissa = self.integer_part() / 10;
        let scale = self.scale().saturating_sub(1);
        Self::new(mantissa, scale).unwrap_or(Self::ZERO)
    }

    /// Digit entry on a quotient: the whole value moves one place left and
    /// the digit lands in the units, e.g. `0.875` then `1` gives `9.75`.
    pub(crate) fn shift_in_digit(self, digit: u8) -> Option<Self> {
        let digit = Decimal::from(digit);
        let shifted = self.0.checked_mul(Decimal::TEN)?;
        let next = if shifted.is_sign_negative() {
            shifted.checked_sub(digit)?
        } else {
            shifted.checked_add(digit)?
        };
        Some(Self(next.normalize()))
    }

    pub(crate) fn shift_in_double_zero(self) -> Option<Self> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|value| Self(value.normalize()))
    }

    /// Backspace on a quotient drops its last whole digit and any fraction.
    pub(crate) fn drop_whole_digit(self) -> Self {
        Self((self.0 / Decimal::TEN).trunc())
    }

    pub(crate) fn add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(ArithmeticError::Overflow)
    }

    pub(crate) fn subtract(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(ArithmeticError::Overflow)
    }

    pub(crate) fn multiply(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_mul(rhs.0)
            .map(Self)
            .ok_or(ArithmeticError::Overflow)
    }

    pub(crate) fn divide(self, rhs: Self) -> Result<Self, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.0
            .checked_div(rhs.0)
            .map(|value| Self(value.normalize()))
            .ok_or(ArithmeticError::Overflow)
    }
}

impl fmt::Display for ScaledValue {
    /// No grouping separators; trailing zeros follow the scale.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_zero() {
            return write!(f, "{}", Decimal::new(0, self.scale()));
        }
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn digits_build_the_scaled_pair() {
        let value = ScaledValue::ZERO
            .push_digit(1, false)
            .and_then(|v| v.push_digit(2, false))
            .and_then(|v| v.push_digit(5, true))
            .unwrap();
        assert_eq!(value.integer_part(), 125);
        assert_eq!(value.scale_factor(), 10);
        assert_eq!(value.to_string(), "12.5");
    }

    #[test]
    fn trailing_typed_zeros_are_displayed() {
        let value = ScaledValue::new(1250, 2).unwrap();
        assert_eq!(value.to_string(), "12.50");
        assert_eq!(ScaledValue::new(0, 2).unwrap().to_string(), "0.00");
    }

    #[test]
    fn addition_aligns_scales() {
        let a = ScaledValue::from_decimal(dec!(0.1));
        let b = ScaledValue::from_decimal(dec!(0.25));
        let sum = a.add(b).unwrap();
        assert_eq!(sum.as_decimal(), dec!(0.35));
        assert_eq!(sum.scale(), 2);
    }

    #[test]
    fn division_by_zero_is_an_error_value() {
        let seven = ScaledValue::new(7, 0).unwrap();
        assert_eq!(
            seven.divide(ScaledValue::ZERO),
            Err(ArithmeticError::DivisionByZero)
        );
        let eighth = seven.divide(ScaledValue::new(8, 0).unwrap()).unwrap();
        assert_eq!(eighth.to_string(), "0.875");
    }

    #[test]
    fn from_f64_expands_fraction_digits() {
        let value = ScaledValue::from_f64(12.5);
        assert_eq!(value.integer_part(), 125);
        assert_eq!(value.scale(), 1);
        assert_eq!(ScaledValue::from_f64(f64::NAN), ScaledValue::ZERO);
    }

    #[test]
    fn quotient_digits_shift_the_whole_value() {
        let quotient = ScaledValue::from_decimal(dec!(0.875));
        assert_eq!(quotient.shift_in_digit(1).unwrap().to_string(), "9.75");
        assert_eq!(
            ScaledValue::from_decimal(dec!(-0.875))
                .shift_in_digit(1)
                .unwrap()
                .to_string(),
            "-9.75"
        );
        assert_eq!(quotient.drop_whole_digit().to_string(), "0");
        assert_eq!(
            ScaledValue::from_decimal(dec!(123.4)).drop_whole_digit().to_string(),
            "12"
        );
    }

    #[test]
    fn negative_values_grow_away_from_zero() {
        let value = ScaledValue::new(-5, 0).unwrap().push_digit(3, false).unwrap();
        assert_eq!(value.integer_part(), -53);
    }
}
