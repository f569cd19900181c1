//! Cart page view model.
//!
//! Each [`CartRow`] keeps its unit price and line total as [`Price`] values;
//! the currency text in the table is rendered from them. The quantity input
//! is the one piece of free text, since it holds whatever the user or a
//! pending update last wrote.
//!
//! # Two-phase updates
//!
//! An update first writes the candidate quantity into the input and takes a
//! [`RequestToken`]. When the response arrives it is applied only if its
//! token is still the row's latest; otherwise a newer request owns the row
//! and the response is dropped. A failed latest request puts the last
//! server-confirmed quantity back into the input.

use core::fmt;

use cartwire_core::{CartItemId, CartSummary, CurrencyCode, Price, Quantity};

/// Identifies one update request issued for a row.
///
/// Tokens come from a page-wide counter, so they increase monotonically for
/// every row and survive a reload of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Get the underlying counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One row of the cart table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    id: CartItemId,
    quantity_input: String,
    confirmed: Quantity,
    unit_price: Price,
    line_total: Option<Price>,
    latest: Option<RequestToken>,
}

impl CartRow {
    /// A row for `quantity` units at `unit_price`, with a line total cell.
    #[must_use]
    pub fn new(id: CartItemId, unit_price: Price, quantity: Quantity) -> Self {
        Self {
            id,
            quantity_input: quantity.to_string(),
            confirmed: quantity,
            unit_price,
            line_total: Some(unit_price.times(quantity)),
            latest: None,
        }
    }

    /// A row read back from server-rendered markup.
    ///
    /// `id` comes from the row's [`CART_ITEM_ID_ATTR`], `quantity_input`
    /// from its [`QTY_INPUT_CLASS`] input. `price_text` is the text of cell
    /// [`PRICE_COLUMN`] and `line_total_text` that of the
    /// [`LINE_TOTAL_CLASS`] cell, or `None` when the row has none.
    ///
    /// [`CART_ITEM_ID_ATTR`]: crate::dom::CART_ITEM_ID_ATTR
    /// [`QTY_INPUT_CLASS`]: crate::dom::QTY_INPUT_CLASS
    /// [`PRICE_COLUMN`]: crate::dom::PRICE_COLUMN
    /// [`LINE_TOTAL_CLASS`]: crate::dom::LINE_TOTAL_CLASS
    #[must_use]
    pub fn from_markup(
        id: CartItemId,
        quantity_input: &str,
        price_text: &str,
        line_total_text: Option<&str>,
        currency_code: CurrencyCode,
    ) -> Self {
        Self {
            id,
            quantity_input: quantity_input.to_string(),
            confirmed: Quantity::from_input(quantity_input),
            unit_price: Price::parse_display(price_text, currency_code),
            line_total: line_total_text.map(|text| Price::parse_display(text, currency_code)),
            latest: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> CartItemId {
        self.id
    }

    /// Current text of the quantity input.
    #[must_use]
    pub fn quantity_input(&self) -> &str {
        &self.quantity_input
    }

    /// The quantity the input currently stands for (default 1, at least 1).
    #[must_use]
    pub fn current_quantity(&self) -> Quantity {
        Quantity::from_input(&self.quantity_input)
    }

    /// The quantity the server last confirmed for this row.
    #[must_use]
    pub const fn confirmed_quantity(&self) -> Quantity {
        self.confirmed
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// The line total, or `None` if the row has no line total cell.
    #[must_use]
    pub const fn line_total(&self) -> Option<Price> {
        self.line_total
    }

    /// Rendered line total cell text.
    #[must_use]
    pub fn line_total_text(&self) -> Option<String> {
        self.line_total.map(|total| total.display())
    }

    /// Whether an update request for this row has been issued and not settled.
    #[must_use]
    pub const fn has_pending_update(&self) -> bool {
        self.latest.is_some()
    }

    /// Overwrite the quantity input without starting an update.
    pub fn set_quantity_input(&mut self, value: impl Into<String>) {
        self.quantity_input = value.into();
    }

    /// Apply a confirmed quantity if `token` is the row's latest request.
    ///
    /// Returns `false` (and changes nothing) for a superseded response.
    pub(crate) fn confirm_update(&mut self, token: RequestToken, echoed: Quantity) -> bool {
        if self.latest != Some(token) {
            return false;
        }
        self.latest = None;
        self.confirmed = echoed;
        self.quantity_input = echoed.to_string();
        if self.line_total.is_some() {
            self.line_total = Some(self.unit_price.times(echoed));
        }
        true
    }

    /// Roll the input back to the confirmed quantity if `token` is the row's
    /// latest request.
    ///
    /// Returns `false` (and changes nothing) for a superseded response.
    pub(crate) fn reject_update(&mut self, token: RequestToken) -> bool {
        if self.latest != Some(token) {
            return false;
        }
        self.latest = None;
        self.quantity_input = self.confirmed.to_string();
        true
    }
}

/// The cart table body plus the page subtotal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPage {
    rows: Vec<CartRow>,
    currency_code: CurrencyCode,
    /// `None` when the page has no subtotal element.
    subtotal: Option<Price>,
    next_token: u64,
}

impl CartPage {
    /// A cart page with a subtotal element, showing `rows`.
    #[must_use]
    pub fn new(rows: Vec<CartRow>, currency_code: CurrencyCode) -> Self {
        let mut page = Self {
            rows,
            currency_code,
            subtotal: Some(Price::zero(currency_code)),
            next_token: 0,
        };
        page.recompute_subtotal();
        page
    }

    /// Build the page the server would render for `summary`.
    #[must_use]
    pub fn from_summary(summary: &CartSummary, currency_code: CurrencyCode) -> Self {
        let rows = summary
            .items
            .iter()
            .map(|item| {
                CartRow::new(
                    item.id,
                    item.product.unit_price(currency_code),
                    item.quantity,
                )
            })
            .collect();
        Self::new(rows, currency_code)
    }

    /// Drop the subtotal element from the page.
    #[must_use]
    pub fn without_subtotal_display(mut self) -> Self {
        self.subtotal = None;
        self
    }

    #[must_use]
    pub fn rows(&self) -> &[CartRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, id: CartItemId) -> Option<&CartRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub(crate) fn row_mut(&mut self, id: CartItemId) -> Option<&mut CartRow> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// The value shown in the subtotal element, if the page has one.
    #[must_use]
    pub const fn subtotal(&self) -> Option<Price> {
        self.subtotal
    }

    /// Rendered subtotal element text.
    #[must_use]
    pub fn subtotal_text(&self) -> Option<String> {
        self.subtotal.map(|subtotal| subtotal.display())
    }

    /// Remove the row for `id` from the table.
    pub fn remove_row(&mut self, id: CartItemId) -> Option<CartRow> {
        let index = self.rows.iter().position(|row| row.id == id)?;
        Some(self.rows.remove(index))
    }

    /// Sum every row that has a line total, as each is rendered, and show it
    /// in the subtotal element, if there is one. Returns the sum either way.
    pub fn recompute_subtotal(&mut self) -> Price {
        let sum = Price::sum(
            self.rows
                .iter()
                .filter_map(CartRow::line_total)
                .map(Price::rounded),
            self.currency_code,
        );
        if self.subtotal.is_some() {
            self.subtotal = Some(sum);
        }
        sum
    }

    /// Replace the rows with those of `fresh`, keeping this page's token
    /// counter so responses to requests issued before the reload stay stale.
    pub fn reload_from(&mut self, fresh: Self) {
        self.rows = fresh.rows;
        self.currency_code = fresh.currency_code;
        self.recompute_subtotal();
    }

    /// Write `candidate` into the row's input and issue a request token.
    ///
    /// Returns `None` if the row is not on the page.
    pub(crate) fn begin_update(
        &mut self,
        id: CartItemId,
        candidate: Quantity,
    ) -> Option<RequestToken> {
        let token = RequestToken(self.next_token + 1);
        let row = self.row_mut(id)?;
        row.quantity_input = candidate.to_string();
        row.latest = Some(token);
        self.next_token = token.0;
        Some(token)
    }
}

impl fmt::Display for CartPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(
                f,
                "{:>6}  {:>10}  x{:<5}  {:>10}",
                row.id.as_i32(),
                row.unit_price.display(),
                row.quantity_input,
                row.line_total_text().unwrap_or_default(),
            )?;
        }
        if let Some(subtotal) = self.subtotal_text() {
            writeln!(f, "{:>6}  {:>30}", "", format!("Subtotal {subtotal}"))?;
        }
        Ok(())
    }
}
