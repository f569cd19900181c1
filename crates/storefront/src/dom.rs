//! Markup contract between the server-rendered pages and the controllers.
//!
//! The cart page markup is rendered by the backend; these are the ids,
//! classes and attributes the controllers read. Events carry the class list
//! of the element they fired on, and [`ClickTarget::from_class_list`] routes
//! them the way the delegated table-body listener does.

/// Id of the product page "add to cart" button.
pub const ADD_TO_CART_BUTTON_ID: &str = "btn-add-to-cart";
/// Attribute on the add-to-cart button holding the product id.
pub const PRODUCT_ID_ATTR: &str = "data-product-id";
/// Id of the product page quantity input.
pub const PRODUCT_QTY_INPUT_ID: &str = "product-qty";

/// Id of the cart table body the cart listeners are delegated from.
pub const CART_ITEMS_BODY_ID: &str = "cart-items-body";
/// Attribute on each cart row holding the cart item id.
pub const CART_ITEM_ID_ATTR: &str = "data-cart-item-id";
/// Class of the per-row quantity input.
pub const QTY_INPUT_CLASS: &str = "qty-input";
/// Class of the per-row line total cell.
pub const LINE_TOTAL_CLASS: &str = "line-total";
/// Column (1-based) of the per-row unit price cell.
pub const PRICE_COLUMN: usize = 2;
/// Id of the page subtotal element.
pub const CART_SUBTOTAL_ID: &str = "cart-subtotal";

/// Class of the per-row remove button.
pub const REMOVE_ITEM_CLASS: &str = "btn-remove-item";
/// Class of the decrement stepper.
pub const MINUS_CLASS: &str = "minus";
/// Class of the increment stepper.
pub const PLUS_CLASS: &str = "plus";

/// What a click inside the cart table body landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// The row's remove button.
    Remove,
    /// The row's decrement stepper.
    Decrement,
    /// The row's increment stepper.
    Increment,
    /// Anything else; the click is ignored.
    Other,
}

impl ClickTarget {
    /// Route a click by the target element's `class` attribute.
    ///
    /// Remove wins over the steppers, and decrement over increment, when an
    /// element carries more than one marker class.
    #[must_use]
    pub fn from_class_list(classes: &str) -> Self {
        if has_class(classes, REMOVE_ITEM_CLASS) {
            Self::Remove
        } else if has_class(classes, MINUS_CLASS) {
            Self::Decrement
        } else if has_class(classes, PLUS_CLASS) {
            Self::Increment
        } else {
            Self::Other
        }
    }
}

/// Whether a whitespace-separated class list contains `class`.
#[must_use]
pub fn has_class(classes: &str, class: &str) -> bool {
    classes.split_ascii_whitespace().any(|c| c == class)
}
