//! # Orders & Contact
//!
//! The shop takes orders over WhatsApp. Checkout turns the cart into a
//! plain-text order slip and a `wa.me` deep-link that opens a chat with the
//! slip pre-filled.
//!
//! ## Order Slip Layout
//! ```text
//! Hello JOBICA FOODS, I'd like to place an order:
//!
//! *Larsor Chicken Seasoning* (Larsor)
//! Quantity: 7
//! Subtotal: ₦1,200
//!
//! *Local Rice* (Generic)
//! Quantity: 1
//! Subtotal: ₦85,000
//!
//! *Total: ₦86,200*
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Characters left as-is by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const WHATSAPP_BASE_URL: &str = "https://wa.me";

// =============================================================================
// Order Message
// =============================================================================

/// A checkout ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderMessage {
    /// The slip text, unencoded.
    pub text: String,
    pub total: Money,
    pub line_count: usize,
}

impl OrderMessage {
    /// Builds the order slip for a cart.
    ///
    /// ## Errors
    /// `EmptyCart` when there is nothing to order.
    pub fn from_cart(store_name: &str, currency_symbol: &str, cart: &Cart) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let lines = cart
            .items()
            .iter()
            .map(|item| {
                format!(
                    "*{}* ({})\nQuantity: {}\nSubtotal: {}",
                    item.name,
                    item.brand_or_generic(),
                    item.quantity,
                    item.subtotal.format_with(currency_symbol)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let total = cart.total();
        let text = format!(
            "Hello {store_name}, I'd like to place an order:\n\n{lines}\n\n*Total: {}*",
            total.format_with(currency_symbol)
        );

        Ok(OrderMessage {
            text,
            total,
            line_count: cart.item_count(),
        })
    }

    /// Deep-link that opens the slip in a chat with `number`.
    pub fn whatsapp_link(&self, number: &str) -> String {
        whatsapp_link(number, &self.text)
    }
}

// =============================================================================
// Contact Messages
// =============================================================================

/// Greeting used by the "Chat with us" button.
pub fn general_inquiry(store_name: &str) -> String {
    format!("Hello {store_name}, I'm interested in your products")
}

/// Greeting used by the "Ask about this product" button.
pub fn product_inquiry(store_name: &str, product_name: &str) -> String {
    format!("Hello {store_name}, I'm interested in *{product_name}*")
}

/// Builds `https://wa.me/{number}?text={text}` with the text encoded the
/// way browsers encode a URI component.
///
/// ```rust
/// use jobica_core::order::whatsapp_link;
///
/// let link = whatsapp_link("2347065096131", "Hi there!");
/// assert_eq!(link, "https://wa.me/2347065096131?text=Hi%20there!");
/// ```
pub fn whatsapp_link(number: &str, text: &str) -> String {
    format!(
        "{WHATSAPP_BASE_URL}/{number}?text={}",
        utf8_percent_encode(text, URI_COMPONENT)
    )
}

/// A message and the link that sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ContactLink {
    pub message: String,
    pub url: String,
}

impl ContactLink {
    pub fn new(number: &str, message: String) -> Self {
        let url = whatsapp_link(number, &message);
        ContactLink { message, url }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingCalculator;
    use crate::types::tests::sample_product;

    fn two_line_cart() -> Cart {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();

        cart.add_item(&calc, &sample_product("larsor"), 7).unwrap();

        let mut rice = sample_product("rice");
        rice.name = "Local Rice".to_string();
        rice.brand = None;
        rice.selling_price_kobo = 8_500_000;
        rice.row_price_kobo = None;
        cart.add_item(&calc, &rice, 1).unwrap();

        cart
    }

    #[test]
    fn test_order_slip_text() {
        let order = OrderMessage::from_cart("JOBICA FOODS", "₦", &two_line_cart()).unwrap();

        let expected = "Hello JOBICA FOODS, I'd like to place an order:\n\n\
            *Larsor Chicken Seasoning* (Larsor)\nQuantity: 7\nSubtotal: ₦1,200\n\n\
            *Local Rice* (Generic)\nQuantity: 1\nSubtotal: ₦85,000\n\n\
            *Total: ₦86,200*";
        assert_eq!(order.text, expected);
        assert_eq!(order.total, Money::from_naira(86_200));
        assert_eq!(order.line_count, 2);
    }

    #[test]
    fn test_empty_cart_cannot_check_out() {
        let result = OrderMessage::from_cart("JOBICA FOODS", "₦", &Cart::new());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_link_encodes_like_encode_uri_component() {
        let link = whatsapp_link("2347065096131", "*Total: ₦800*\nA&B (x)");
        assert_eq!(
            link,
            "https://wa.me/2347065096131?text=*Total%3A%20%E2%82%A6800*%0AA%26B%20(x)"
        );
    }

    #[test]
    fn test_inquiry_messages() {
        assert_eq!(
            general_inquiry("JOBICA FOODS"),
            "Hello JOBICA FOODS, I'm interested in your products"
        );
        assert_eq!(
            product_inquiry("JOBICA FOODS", "Gino Tomato Paste"),
            "Hello JOBICA FOODS, I'm interested in *Gino Tomato Paste*"
        );

        let contact = ContactLink::new("2347065096131", general_inquiry("JOBICA FOODS"));
        assert!(contact.url.starts_with("https://wa.me/2347065096131?text=Hello%20JOBICA%20FOODS"));
        assert!(contact.url.contains("I'm%20interested"));
    }
}
