//! # Cart Module
//!
//! The shopping cart: ordered lines, one per product, each priced by the
//! [`PricingCalculator`].
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Cart Method             Line Change           │
//! │  ──────────────           ───────────             ───────────           │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_item() ──────────► push or qty += n     │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ───► qty = n, or remove   │
//! │                                                     when n <= 0         │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ───────► items.remove(i)      │
//! │                                                                         │
//! │  Clear cart ─────────────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  Every quantity change re-runs the calculator, so a line's subtotal     │
//! │  is never stale.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{PriceBreakdown, PricingCalculator, PricingConfig};
use crate::types::{Product, ProductUnit};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// One product in the cart.
///
/// ## Design Notes
/// Product fields are a snapshot taken when the product was last added.
/// Adding the same product again refreshes the snapshot, so an admin price
/// change shows up the next time the shopper taps "add".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    pub name: String,
    pub brand: Option<String>,
    pub unit: ProductUnit,
    pub image_url: String,
    pub pricing: PricingConfig,
    pub quantity: i64,
    pub subtotal: Money,
    pub breakdown: PriceBreakdown,
}

impl LineItem {
    fn new(calc: &PricingCalculator, product: &Product, quantity: i64) -> CoreResult<Self> {
        let pricing = product.pricing();
        let breakdown = calc.breakdown(&pricing, &product.name, quantity)?;
        Ok(LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            unit: product.unit,
            image_url: product.image_url.clone(),
            pricing,
            quantity,
            subtotal: breakdown.subtotal,
            breakdown,
        })
    }

    /// Sets the quantity and recomputes the subtotal.
    fn reprice(&mut self, calc: &PricingCalculator, quantity: i64) -> CoreResult<()> {
        let breakdown = calc.breakdown(&self.pricing, &self.name, quantity)?;
        self.quantity = quantity;
        self.subtotal = breakdown.subtotal;
        self.breakdown = breakdown;
        Ok(())
    }

    /// Brand for order slips; unbranded goods print as "Generic".
    pub fn brand_or_generic(&self) -> &str {
        self.brand.as_deref().unwrap_or("Generic")
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product increases quantity)
/// - Every line has quantity >= 1 (setting 0 or less removes the line)
/// - Maximum lines: [`MAX_CART_ITEMS`]
/// - Maximum quantity per line: [`MAX_ITEM_QUANTITY`]
/// - The sum of line subtotals fits in an `i64` kobo amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Adds `quantity` units of a product, merging with an existing line.
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is not positive
    /// - `QuantityTooLarge` if the line would exceed [`MAX_ITEM_QUANTITY`]
    /// - `CartTooLarge` if a new line would exceed [`MAX_CART_ITEMS`]
    /// - `CartTotalTooLarge` if the cart total would overflow
    pub fn add_item(
        &mut self,
        calc: &PricingCalculator,
        product: &Product,
        quantity: i64,
    ) -> CoreResult<&LineItem> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if let Some(index) = self.position(&product.id) {
            let new_qty = self.items[index].quantity + quantity;
            check_quantity(new_qty)?;

            let line = LineItem::new(calc, product, new_qty)?;
            self.check_total_with(Some(index), &line)?;
            self.items[index] = line;
            return Ok(&self.items[index]);
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        check_quantity(quantity)?;

        let line = LineItem::new(calc, product, quantity)?;
        self.check_total_with(None, &line)?;
        self.items.push(line);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Sets a line's quantity.
    ///
    /// A quantity of zero or less removes the line and returns `Ok(None)`.
    pub fn update_quantity(
        &mut self,
        calc: &PricingCalculator,
        product_id: &str,
        quantity: i64,
    ) -> CoreResult<Option<&LineItem>> {
        if quantity <= 0 {
            self.remove_item(product_id)?;
            return Ok(None);
        }
        check_quantity(quantity)?;

        let index = self
            .position(product_id)
            .ok_or_else(|| CoreError::ItemNotInCart(product_id.to_string()))?;
        let mut line = self.items[index].clone();
        line.reprice(calc, quantity)?;
        self.check_total_with(Some(index), &line)?;
        self.items[index] = line;
        Ok(Some(&self.items[index]))
    }

    /// Removes a line and returns it.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<LineItem> {
        let index = self
            .position(product_id)
            .ok_or_else(|| CoreError::ItemNotInCart(product_id.to_string()))?;
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line subtotals. Mutations that would overflow it are refused.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| &i.subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fails if the cart total overflows once `line` replaces the line at
    /// `replacing` (or is appended when `None`).
    fn check_total_with(&self, replacing: Option<usize>, line: &LineItem) -> CoreResult<()> {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != replacing)
            .try_fold(line.subtotal, |acc, (_, item)| acc.checked_add(item.subtotal))
            .map(|_| ())
            .ok_or(CoreError::CartTotalTooLarge)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product_id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

fn check_quantity(quantity: i64) -> CoreResult<()> {
    if quantity > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_items: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_items: cart.total_items(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PricingPolicy, PricingTier};
    use crate::types::tests::sample_product;

    fn product(id: &str, unit_naira: i64, row_naira: Option<i64>) -> Product {
        let mut product = sample_product(id);
        product.name = format!("Product {id}");
        product.selling_price_kobo = unit_naira * 100;
        product.row_price_kobo = row_naira.map(|n| n * 100);
        product.half_row_price_kobo = None;
        product
    }

    #[test]
    fn test_add_item_prices_line() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();

        let line = cart.add_item(&calc, &product("a", 200, Some(800)), 7).unwrap();

        assert_eq!(line.subtotal, Money::from_naira(1_200));
        assert_eq!(line.breakdown.tier, PricingTier::Row);
        assert_eq!(cart.total(), Money::from_naira(1_200));
    }

    #[test]
    fn test_add_same_product_merges_and_reprices() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();
        let p = product("a", 200, Some(800));

        cart.add_item(&calc, &p, 3).unwrap();
        assert_eq!(cart.total(), Money::from_naira(600));

        cart.add_item(&calc, &p, 2).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total(), Money::from_naira(800));
    }

    #[test]
    fn test_re_adding_refreshes_snapshot() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();
        let mut p = product("a", 200, None);

        cart.add_item(&calc, &p, 1).unwrap();
        p.selling_price_kobo = 25_000;
        cart.add_item(&calc, &p, 1).unwrap();

        assert_eq!(cart.total(), Money::from_naira(500));
    }

    #[test]
    fn test_update_quantity_reprices() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();
        cart.add_item(&calc, &product("a", 200, Some(800)), 1).unwrap();

        let line = cart.update_quantity(&calc, "a", 10).unwrap().unwrap();
        assert_eq!(line.subtotal, Money::from_naira(1_600));
        assert_eq!(line.breakdown.describe(), "2 rows");
    }

    #[test]
    fn test_update_quantity_zero_or_less_removes() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();
        cart.add_item(&calc, &product("a", 200, None), 2).unwrap();
        cart.add_item(&calc, &product("b", 300, None), 1).unwrap();

        assert!(cart.update_quantity(&calc, "a", 0).unwrap().is_none());
        assert!(cart.update_quantity(&calc, "b", -3).unwrap().is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_line_errors() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();

        assert!(matches!(
            cart.update_quantity(&calc, "missing", 2),
            Err(CoreError::ItemNotInCart(_))
        ));
        assert!(matches!(cart.remove_item("missing"), Err(CoreError::ItemNotInCart(_))));
    }

    #[test]
    fn test_quantity_limits() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();
        let p = product("a", 100, None);

        assert!(matches!(cart.add_item(&calc, &p, 0), Err(CoreError::Validation(_))));

        cart.add_item(&calc, &p, MAX_ITEM_QUANTITY).unwrap();
        assert!(matches!(
            cart.add_item(&calc, &p, 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert_eq!(cart.total_items(), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_cart_line_limit() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(&calc, &product(&i.to_string(), 100, None), 1).unwrap();
        }

        let overflow = cart.add_item(&calc, &product("one-more", 100, None), 1);
        assert!(matches!(overflow, Err(CoreError::CartTooLarge { .. })));
    }

    #[test]
    fn test_overflowing_total_is_refused_and_cart_unchanged() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();
        let mut pricey = product("pricey", 0, None);
        pricey.selling_price_kobo = i64::MAX / 4;

        cart.add_item(&calc, &pricey, 3).unwrap();
        let before = cart.total();

        let mut other = product("other", 0, None);
        other.selling_price_kobo = i64::MAX / 4;
        assert!(matches!(
            cart.add_item(&calc, &other, 2),
            Err(CoreError::CartTotalTooLarge)
        ));

        cart.add_item(&calc, &other, 1).unwrap();
        assert!(matches!(
            cart.update_quantity(&calc, "pricey", 4),
            Err(CoreError::CartTotalTooLarge)
        ));
        assert!(matches!(
            cart.add_item(&calc, &pricey, 1),
            Err(CoreError::CartTotalTooLarge)
        ));

        assert_eq!(cart.get("pricey").unwrap().quantity, 3);
        assert_eq!(cart.total(), before + Money::from_kobo(i64::MAX / 4));
        assert!(cart.total().is_positive());
    }

    #[test]
    fn test_totals_sum_exactly() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();
        cart.add_item(&calc, &product("a", 200, Some(800)), 7).unwrap();
        cart.add_item(&calc, &product("b", 500, None), 3).unwrap();

        let mut half = product("c", 150, None);
        half.half_row_price_kobo = Some(40_000);
        cart.add_item(&calc, &half, 4).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.total_items, 14);
        assert_eq!(totals.total, Money::from_naira(1_200 + 1_500 + 550));
    }

    #[test]
    fn test_legacy_policy_applies_to_lines() {
        let calc = PricingCalculator::new(PricingPolicy::LegacyNameOverride);
        let mut cart = Cart::new();
        let mut p = product("larsor", 350, None);
        p.name = "Larsor Chicken Seasoning".to_string();

        let line = cart.add_item(&calc, &p, 6).unwrap();
        assert_eq!(line.subtotal, Money::from_naira(1_000));
    }

    #[test]
    fn test_clear() {
        let calc = PricingCalculator::default();
        let mut cart = Cart::new();
        cart.add_item(&calc, &product("a", 100, None), 2).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }
}
