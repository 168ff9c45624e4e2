//! # Money Module
//!
//! Provides the `Money` type for naira amounts held as integer kobo.
//!
//! ## Why Integer Kobo?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a cart in floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart with dozens of lines accumulates that drift on every add.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Kobo (1 naira = 100 kobo)                        │
//! │    ₦800 row + 2 × ₦200 = 80000 + 40000 = 120000 kobo, exactly          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use jobica_core::money::Money;
//!
//! let row = Money::from_naira(800);
//! let unit = Money::from_kobo(20_000); // ₦200
//!
//! let subtotal = row + unit * 2_i64;
//! assert_eq!(subtotal, Money::from_naira(1200));
//! assert_eq!(subtotal.to_string(), "₦1,200");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

/// Kobo per naira.
pub const KOBO_PER_NAIRA: i64 = 100;

/// Default display symbol.
pub const NAIRA_SYMBOL: &str = "₦";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in kobo (the naira minor unit).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.selling_price_kobo ──┬──► PricingConfig.unit_price            │
/// │  Product.row_price_kobo ──────┤                                        │
/// │  Product.half_row_price_kobo ─┘         │                              │
/// │                                          ▼                              │
/// │                              PricingCalculator ──► LineItem.subtotal    │
/// │                                                         │               │
/// │                                 Cart.total() ◄──────────┘               │
/// │                                      │                                  │
/// │                                      ▼                                  │
/// │                      "*Total: ₦4,350*" in the WhatsApp order            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kobo.
    #[inline]
    pub const fn from_kobo(kobo: i64) -> Self {
        Money(kobo)
    }

    /// Creates a Money value from whole naira.
    ///
    /// ```rust
    /// use jobica_core::money::Money;
    ///
    /// assert_eq!(Money::from_naira(800).kobo(), 80_000);
    /// ```
    #[inline]
    pub const fn from_naira(naira: i64) -> Self {
        Money(naira * KOBO_PER_NAIRA)
    }

    /// Returns the value in kobo.
    #[inline]
    pub const fn kobo(&self) -> i64 {
        self.0
    }

    /// Returns the whole-naira portion (truncated toward zero).
    #[inline]
    pub const fn naira(&self) -> i64 {
        self.0 / KOBO_PER_NAIRA
    }

    /// Returns the kobo portion (always 0-99).
    #[inline]
    pub const fn kobo_part(&self) -> i64 {
        (self.0 % KOBO_PER_NAIRA).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity, or `None` on overflow.
    ///
    /// ```rust
    /// use jobica_core::money::Money;
    ///
    /// let unit = Money::from_naira(500);
    /// assert_eq!(unit.checked_mul(3), Some(Money::from_naira(1500)));
    /// assert_eq!(Money::from_kobo(i64::MAX).checked_mul(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(kobo) => Some(Money(kobo)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(kobo) => Some(Money(kobo)),
            None => None,
        }
    }

    /// Formats the amount with the given currency symbol.
    ///
    /// Whole naira get thousands separators; kobo are only shown when
    /// non-zero, matching how prices are printed on the shop's order slips.
    ///
    /// ```rust
    /// use jobica_core::money::Money;
    ///
    /// assert_eq!(Money::from_naira(12_500).format_with("₦"), "₦12,500");
    /// assert_eq!(Money::from_kobo(1_250).format_with("₦"), "₦12.50");
    /// assert_eq!(Money::from_naira(-40).format_with("$"), "-$40");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = group_thousands(self.naira().unsigned_abs());
        if self.kobo_part() == 0 {
            format!("{sign}{symbol}{whole}")
        } else {
            format!("{sign}{symbol}{whole}.{:02}", self.kobo_part())
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(NAIRA_SYMBOL))
    }
}

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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Cart totals are sums of line subtotals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_naira_and_kobo() {
        let money = Money::from_naira(1_200);
        assert_eq!(money.kobo(), 120_000);
        assert_eq!(money.naira(), 1_200);
        assert_eq!(money.kobo_part(), 0);

        let odd = Money::from_kobo(1_099);
        assert_eq!(odd.naira(), 10);
        assert_eq!(odd.kobo_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_naira(800).to_string(), "₦800");
        assert_eq!(Money::from_naira(1_200).to_string(), "₦1,200");
        assert_eq!(Money::from_naira(1_234_567).to_string(), "₦1,234,567");
        assert_eq!(Money::from_kobo(5).to_string(), "₦0.05");
        assert_eq!(Money::zero().to_string(), "₦0");
        assert_eq!(Money::from_kobo(-150_050).to_string(), "-₦1,500.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_naira(1_000);
        let b = Money::from_naira(500);

        assert_eq!(a + b, Money::from_naira(1_500));
        assert_eq!(a - b, Money::from_naira(500));
        assert_eq!(a * 3_i64, Money::from_naira(3_000));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let big = Money::from_kobo(i64::MAX / 2 + 1);
        assert_eq!(big.checked_mul(999), None);
        assert_eq!(big.checked_add(big), None);
        assert_eq!(
            Money::from_naira(200).checked_mul(4),
            Some(Money::from_naira(800))
        );
        assert_eq!(
            Money::from_naira(800).checked_add(Money::from_naira(400)),
            Some(Money::from_naira(1_200))
        );
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_kobo(1).is_positive());
        assert!(Money::from_kobo(-1).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }

    /// Summing many fractional amounts stays exact; the float version drifts.
    #[test]
    fn test_sum_has_no_drift() {
        let ten_kobo = Money::from_kobo(10);
        let total: Money = std::iter::repeat(ten_kobo).take(1_000).sum();
        assert_eq!(total, Money::from_naira(100));

        let float_total: f64 = std::iter::repeat(0.1_f64).take(1_000).sum();
        assert_ne!(float_total, 100.0);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_naira(200)).unwrap();
        assert_eq!(json, "20000");
    }
}
