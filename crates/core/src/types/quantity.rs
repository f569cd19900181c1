//! Cart line quantities.
//!
//! Quantity inputs on the cart page are free text. [`parse_quantity_input`]
//! coerces that text the way the product page reads it (integer prefix,
//! default 1, no clamping) and [`Quantity`] is the clamped, always-positive
//! value the cart page stores and displays.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Quantity used when an input is blank or has no integer prefix.
pub const DEFAULT_QUANTITY: i32 = 1;

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    NotPositive(i32),
}

/// Parse a quantity input value.
///
/// Reads an optionally signed integer prefix after leading whitespace
/// (`"3 boxes"` is 3, `"2.7"` is 2). Blank input or input with no integer
/// prefix yields [`DEFAULT_QUANTITY`]. Out-of-range values saturate to the
/// `i32` bounds. No minimum is enforced here.
///
/// ```
/// use cartwire_core::parse_quantity_input;
///
/// assert_eq!(parse_quantity_input(""), 1);
/// assert_eq!(parse_quantity_input("abc"), 1);
/// assert_eq!(parse_quantity_input(" 4"), 4);
/// assert_eq!(parse_quantity_input("-2"), -2);
/// ```
#[must_use]
pub fn parse_quantity_input(text: &str) -> i32 {
    integer_prefix(text).unwrap_or(DEFAULT_QUANTITY)
}

fn integer_prefix(text: &str) -> Option<i32> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, s.get(1..)?),
        Some(b'+') => (false, s.get(1..)?),
        _ => (false, s),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let magnitude = digits.get(..len)?.bytes().fold(0_i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };

    Some(saturate_i32(value))
}

fn saturate_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// A cart line quantity, always at least 1.
///
/// ## Examples
///
/// ```
/// use cartwire_core::Quantity;
///
/// assert_eq!(Quantity::from_input("0").get(), 1);
/// assert_eq!(Quantity::from_input("5").get(), 5);
/// assert_eq!(Quantity::MIN.decrement(), Quantity::MIN);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    /// The smallest quantity a cart line can hold.
    pub const MIN: Self = Self(1);

    /// Create a quantity, rejecting values below 1.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] if `value` is zero or negative.
    pub const fn new(value: i32) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Create a quantity, raising anything below 1 to 1.
    #[must_use]
    pub const fn clamped(value: i32) -> Self {
        if value < 1 { Self::MIN } else { Self(value) }
    }

    /// Parse a quantity input and clamp it to at least 1.
    #[must_use]
    pub fn from_input(text: &str) -> Self {
        Self::clamped(parse_quantity_input(text))
    }

    /// One more than this quantity.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One less than this quantity, never below 1.
    #[must_use]
    pub const fn decrement(self) -> Self {
        Self::clamped(self.0 - 1)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}
