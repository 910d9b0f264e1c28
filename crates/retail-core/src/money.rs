//! # Money Module
//!
//! VND amounts and vi-VN number formatting.
//!
//! ## Why Whole Dong?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE WIRE SENDS FLOATS, THE SCREEN SHOWS WHOLE DONG                     │
//! │                                                                         │
//! │  Backend (BigDecimal) ──► JSON number ──► f64 in the DTOs              │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                                     Money::from_f64 (rounded)           │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                                     "1.234.567 ₫" in the table          │
//! │                                                                         │
//! │  The dong has no minor unit in circulation, so amounts are shown       │
//! │  with zero fraction digits and grouped with '.'                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use retail_core::money::{format_vnd, Money};
//!
//! let price = Money::from_dong(1_234_567);
//! assert_eq!(price.to_string(), "1.234.567 ₫");
//! assert_eq!(format_vnd(None), "0 ₫");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Currency symbol appended after the amount.
pub const VND_SYMBOL: &str = "₫";

// =============================================================================
// Money Type
// =============================================================================

/// An amount in whole Vietnamese dong.
///
/// ## Where Money is Used
/// ```text
/// Product.retail_price (f64) ──► Money::from_f64 ──► product table column
/// StockRow.retail_price      ──► Money::from_f64 ──► stock table column
/// VoucherCampaign.min_order_value ──► campaign table column
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole dong.
    #[inline]
    pub const fn from_dong(dong: i64) -> Self {
        Money(dong)
    }

    /// Converts a wire amount to whole dong, rounding half away from zero.
    ///
    /// Non-finite input (NaN, infinities) becomes zero, the same way a missing
    /// amount displays as "0 ₫".
    ///
    /// ## Example
    /// ```rust
    /// use retail_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(9_999.5).dong(), 10_000);
    /// assert_eq!(Money::from_f64(f64::NAN).dong(), 0);
    /// ```
    pub fn from_f64(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money(amount.round() as i64)
    }

    /// Returns the amount in whole dong.
    #[inline]
    pub const fn dong(&self) -> i64 {
        self.0
    }

    /// Returns zero dong.
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies the amount by a quantity (e.g. units × conversion rate).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Groups the digits of a non-negative integer with '.' every three places.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an optional wire amount as VND, e.g. `1.234.567 ₫`.
///
/// Missing or non-finite amounts display as `0 ₫`.
pub fn format_vnd(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value.is_finite() => Money::from_f64(value).to_string(),
        _ => format!("0 {}", VND_SYMBOL),
    }
}

/// Formats a number with vi-VN grouping: '.' for thousands, ',' for decimals.
///
/// Up to three fraction digits are kept and trailing zeros are dropped.
/// Missing or non-finite values display as `0`.
///
/// ## Example
/// ```rust
/// use retail_core::money::format_number;
///
/// assert_eq!(format_number(Some(1234567.5)), "1.234.567,5");
/// assert_eq!(format_number(Some(42.0)), "42");
/// ```
pub fn format_number(value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return "0".to_string(),
    };

    let scaled = (value.abs() * 1000.0).round() as u64;
    let whole = scaled / 1000;
    let fraction = scaled % 1000;
    let sign = if value < 0.0 && scaled != 0 { "-" } else { "" };

    let mut out = format!("{}{}", sign, group_thousands(whole));
    if fraction != 0 {
        let digits = format!("{:03}", fraction);
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays the amount the way the vi-VN currency formatter does.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{} {}",
            sign,
            group_thousands(self.0.unsigned_abs()),
            VND_SYMBOL
        )
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
