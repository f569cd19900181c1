//! Type-safe price representation using decimal arithmetic.
//!
//! The cart page renders prices as currency text (`$19.98`). Prices are held
//! as decimals everywhere and the text is only a projection: [`Price::display`]
//! renders it and [`Price::parse_display`] reads it back for markup that only
//! carries the rendered text.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::quantity::Quantity;

/// Number of fraction digits in rendered currency text.
const DISPLAY_SCALE: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, DISPLAY_SCALE), currency_code)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Line total for `quantity` units at this price.
    ///
    /// Saturates at `Decimal::MAX` (or `MIN`) instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity.get()))
            .unwrap_or_else(|| saturated(self.amount.is_sign_negative()));
        Self::new(amount, self.currency_code)
    }

    /// Sum a set of prices into a single amount in `currency_code`.
    ///
    /// Saturates like [`Price::times`].
    #[must_use]
    pub fn sum<I>(prices: I, currency_code: CurrencyCode) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let amount = prices.into_iter().fold(Decimal::ZERO, |total, p| {
            total
                .checked_add(p.amount)
                .unwrap_or_else(|| saturated(p.amount.is_sign_negative()))
        });
        Self::new(amount, currency_code)
    }

    /// The amount as rendered: rounded to two fraction digits, half away
    /// from zero.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
            self.currency_code,
        )
    }

    /// Format for display (e.g., "$19.99").
    ///
    /// Always renders exactly two fraction digits, rounding half away from
    /// zero.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.rounded().amount)
    }

    /// Parse rendered currency text back into a price.
    ///
    /// Strips surrounding whitespace and a leading currency symbol, then reads
    /// the longest decimal prefix of what remains. Text with no numeric prefix
    /// parses as zero.
    #[must_use]
    pub fn parse_display(text: &str, currency_code: CurrencyCode) -> Self {
        let trimmed = text.trim();
        let unprefixed = trimmed
            .strip_prefix(currency_code.symbol())
            .unwrap_or(trimmed)
            .trim();

        let amount = Decimal::from_str(decimal_prefix(unprefixed)).unwrap_or(Decimal::ZERO);
        Self::new(amount, currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// The bound an overflowing amount is clamped to.
const fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits]`.
fn decimal_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            end = frac_end;
        }
    }

    s.get(..end).unwrap_or("")
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Symbol prefixed to rendered amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}
