// Exact rational arithmetic
//
// Every folded numeric value is a `Rational`: an arbitrary-precision
// numerator over a positive denominator, always in lowest terms.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Pow, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

/// Largest exponent or shift amount folded at compile time
pub const MAX_EXPONENT: u32 = 4096;

/// Largest numerator or denominator, in bits, a folded value may have
pub const MAX_BITS: u64 = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("operand is not an integer")]
    NotIntegral,

    #[error("exponent, shift amount or result out of range")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    /// `None` when `denominator` is zero
    pub fn new(numerator: BigInt, denominator: BigInt) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        Some(Rational(BigRational::new(numerator, denominator)))
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Rational(BigRational::from_integer(value.into()))
    }

    pub fn zero() -> Self {
        Rational(BigRational::zero())
    }

    /// Parse a numeric literal as written in source:
    /// `42`, `0xff`, `2.5`, `1e18`, `2.5e-3`.
    pub fn from_literal(text: &str) -> Option<Self> {
        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            return BigInt::parse_bytes(hex.as_bytes(), 16)
                .map(Rational::from_integer)
                .filter(Rational::fits);
        }

        let (mantissa, exponent) = match text.find(['e', 'E']) {
            Some(pos) => (&text[..pos], text[pos + 1..].parse::<i64>().ok()?),
            None => (text, 0),
        };
        if exponent.unsigned_abs() > u64::from(MAX_EXPONENT) {
            return None;
        }

        let (whole, fraction) = match mantissa.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (mantissa, ""),
        };
        if whole.is_empty() || !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits = format!("{}{}", whole, fraction);
        let numerator = BigInt::parse_bytes(digits.as_bytes(), 10)?;
        let scale = exponent - fraction.len() as i64;
        let ten = BigInt::from(10u32);
        let value = if scale >= 0 {
            BigRational::from_integer(numerator * Pow::pow(&ten, scale as u32))
        } else {
            BigRational::new(numerator, Pow::pow(&ten, scale.unsigned_abs() as u32))
        };
        Some(Rational(value)).filter(Rational::fits)
    }

    pub fn numerator(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denominator(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_integral(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_fractional(&self) -> bool {
        !self.is_integral()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Whether numerator and denominator both stay within `MAX_BITS`
    pub fn fits(&self) -> bool {
        self.numerator().bits() <= MAX_BITS && self.denominator().bits() <= MAX_BITS
    }

    fn bounded(self) -> Result<Rational, ArithmeticError> {
        if self.fits() {
            Ok(self)
        } else {
            Err(ArithmeticError::OutOfRange)
        }
    }

    pub fn checked_add(&self, rhs: &Rational) -> Result<Rational, ArithmeticError> {
        (self + rhs).bounded()
    }

    pub fn checked_sub(&self, rhs: &Rational) -> Result<Rational, ArithmeticError> {
        (self - rhs).bounded()
    }

    pub fn checked_mul(&self, rhs: &Rational) -> Result<Rational, ArithmeticError> {
        (self * rhs).bounded()
    }

    /// The integral part, rounding toward zero
    pub fn truncate(&self) -> Rational {
        Rational::from_integer(self.numerator() / self.denominator())
    }

    pub fn checked_div(&self, rhs: &Rational) -> Result<Rational, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Rational(&self.0 / &rhs.0).bounded()
    }

    /// Remainder with the sign of the dividend.
    ///
    /// Integral operands use the integer remainder of truncating division;
    /// otherwise `self - trunc(self / rhs) * rhs`.
    pub fn checked_rem(&self, rhs: &Rational) -> Result<Rational, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        if self.is_integral() && rhs.is_integral() {
            return Ok(Rational::from_integer(self.numerator() % rhs.numerator()));
        }
        let quotient = self.checked_div(rhs)?.truncate();
        self.checked_sub(&quotient.checked_mul(rhs)?)
    }

    // Bitwise operators act on the numerators; callers only pass integral values.

    pub fn bit_or(&self, rhs: &Rational) -> Rational {
        Rational::from_integer(self.numerator() | rhs.numerator())
    }

    pub fn bit_and(&self, rhs: &Rational) -> Rational {
        Rational::from_integer(self.numerator() & rhs.numerator())
    }

    pub fn bit_xor(&self, rhs: &Rational) -> Rational {
        Rational::from_integer(self.numerator() ^ rhs.numerator())
    }

    /// Two's complement NOT, i.e. `-x - 1`
    pub fn checked_bit_not(&self) -> Result<Rational, ArithmeticError> {
        if !self.is_integral() {
            return Err(ArithmeticError::NotIntegral);
        }
        Rational::from_integer(!self.numerator().clone()).bounded()
    }

    pub fn checked_pow(&self, exponent: &Rational) -> Result<Rational, ArithmeticError> {
        if !exponent.is_integral() {
            return Err(ArithmeticError::NotIntegral);
        }
        let magnitude = exponent
            .numerator()
            .abs()
            .to_u32()
            .filter(|e| *e <= MAX_EXPONENT)
            .ok_or(ArithmeticError::OutOfRange)?;
        if exponent.is_negative() && self.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        // A base of b bits raised to m has at least (b - 1) * m + 1 bits
        let too_large = |base: &BigInt| {
            base.bits().saturating_sub(1).saturating_mul(u64::from(magnitude)) >= MAX_BITS
        };
        if too_large(self.numerator()) || too_large(self.denominator()) {
            return Err(ArithmeticError::OutOfRange);
        }

        let numer = Pow::pow(self.numerator(), magnitude);
        let denom = Pow::pow(self.denominator(), magnitude);
        let value = if exponent.is_negative() {
            BigRational::new(denom, numer)
        } else {
            BigRational::new(numer, denom)
        };
        Rational(value).bounded()
    }

    fn shift_amount(&self, amount: &Rational) -> Result<usize, ArithmeticError> {
        if !self.is_integral() || !amount.is_integral() {
            return Err(ArithmeticError::NotIntegral);
        }
        amount
            .numerator()
            .to_u32()
            .filter(|a| *a <= MAX_EXPONENT)
            .map(|a| a as usize)
            .ok_or(ArithmeticError::OutOfRange)
    }

    pub fn checked_shl(&self, amount: &Rational) -> Result<Rational, ArithmeticError> {
        let amount = self.shift_amount(amount)?;
        Rational::from_integer(self.numerator() << amount).bounded()
    }

    /// Arithmetic right shift, rounding toward negative infinity
    pub fn checked_shr(&self, amount: &Rational) -> Result<Rational, ArithmeticError> {
        let amount = self.shift_amount(amount)?;
        Ok(Rational::from_integer(self.numerator() >> amount))
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        Rational(&self.0 * &rhs.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Rational::from_integer(value)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integral() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}
