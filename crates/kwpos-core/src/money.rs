//! # Money Module
//!
//! Provides the `Money` type for handling Kuwaiti-dinar values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Fils                                         │
//! │    The Kuwaiti dinar has a 1/1000 minor unit (fils), so every       │
//! │    amount is an i64 count of fils: KD 15.500 = 15500 fils.          │
//! │    All arithmetic is exact; the single rounding point is the        │
//! │    percentage-discount division, which rounds half up.              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kwpos_core::money::Money;
//!
//! // Create from fils (preferred)
//! let price = Money::from_fils(15_500); // KD 15.500
//!
//! // Arithmetic operations
//! let doubled = price * 2;                        // KD 31.000
//! let total = price + Money::from_fils(500);      // KD 16.000
//!
//! // Wire form is a 3-decimal string, never a binary float
//! assert_eq!(price.to_decimal_string(), "15.500");
//! assert_eq!("15.500".parse::<Money>().unwrap(), price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// How many fils make one dinar. Drives the 3-decimal wire format.
pub const FILS_PER_DINAR: i64 = 1_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in fils, the 1/1000 minor unit of the KWD.
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative intermediate values (e.g. change)
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support; serializes as the raw fils integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from fils (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use kwpos_core::money::Money;
    ///
    /// let price = Money::from_fils(15_500); // KD 15.500
    /// assert_eq!(price.fils(), 15_500);
    /// ```
    #[inline]
    pub const fn from_fils(fils: i64) -> Self {
        Money(fils)
    }

    /// Creates a Money value from dinars and fils.
    ///
    /// For negative amounts only the dinar part should be negative:
    /// `from_dinars_fils(-5, 250)` = KD -5.250.
    #[inline]
    pub const fn from_dinars_fils(dinars: i64, fils: i64) -> Self {
        if dinars < 0 {
            Money(dinars * FILS_PER_DINAR - fils)
        } else {
            Money(dinars * FILS_PER_DINAR + fils)
        }
    }

    /// Returns the value in fils.
    #[inline]
    pub const fn fils(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dinar portion.
    #[inline]
    pub const fn dinars(&self) -> i64 {
        self.0 / FILS_PER_DINAR
    }

    /// Returns the fils portion (always 0-999, absolute value).
    #[inline]
    pub const fn fils_part(&self) -> i64 {
        (self.0 % FILS_PER_DINAR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kwpos_core::money::Money;
    ///
    /// let unit_price = Money::from_fils(15_500); // KD 15.500 per CBM
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.fils(), 31_000); // KD 31.000
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns `percent_bps / 10000` of this amount, rounded half up.
    ///
    /// ## Arguments
    /// * `percent_bps` - percentage in basis points (1000 = 10.00%)
    ///
    /// ## Rounding
    /// `(fils * bps + 5000) / 10000` — the +5000 rounds the half case up.
    /// This is the ONLY place monetary rounding happens; the same value is
    /// used by client preview and server recomputation, so the two can never
    /// disagree.
    ///
    /// ## Example
    /// ```rust
    /// use kwpos_core::money::Money;
    ///
    /// let subtotal = Money::from_fils(31_000); // KD 31.000
    /// let discount = subtotal.percentage(1000); // 10%
    /// assert_eq!(discount.fils(), 3_100); // KD 3.100
    /// ```
    pub fn percentage(&self, percent_bps: u32) -> Money {
        // i128 to prevent overflow on large amounts
        let part = (self.0 as i128 * percent_bps as i128 + 5_000) / 10_000;
        Money::from_fils(part as i64)
    }

    /// Clamps the value into `[lo, hi]`.
    #[inline]
    pub fn clamp(&self, lo: Money, hi: Money) -> Money {
        Money(self.0.clamp(lo.0, hi.0))
    }

    /// Formats as a bare 3-decimal string, e.g. `27.900`.
    ///
    /// This is the wire and CSV representation of every money field:
    /// a fixed-precision decimal string, never a binary float.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:03}", sign, self.dinars().abs(), self.fils_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with the currency prefix, for logs and receipts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KD {}", self.to_decimal_string())
    }
}

/// Parses the 3-decimal wire form: `"15.500"`, `"10"`, `"10.5"`.
///
/// At most three fractional digits are accepted; anything finer would be
/// sub-fils and cannot be represented.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: "must be a decimal with at most 3 fractional digits".to_string(),
        };

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() || whole.chars().any(|c| !c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 3 || frac.chars().any(|c| !c.is_ascii_digit()) {
            return Err(invalid());
        }

        let dinars: i64 = whole.parse().map_err(|_| invalid())?;
        // Right-pad the fraction to fils: "5" -> 500, "50" -> 500, "500" -> 500
        let mut fils_part: i64 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| invalid())?
        };
        for _ in frac.len()..3 {
            fils_part *= 10;
        }

        let fils = dinars * FILS_PER_DINAR + fils_part;
        Ok(Money(if negative { -fils } else { fils }))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
