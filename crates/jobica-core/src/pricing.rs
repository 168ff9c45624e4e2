//! # Pricing Module
//!
//! Tiered quantity pricing: the only non-trivial business rule of the shop.
//!
//! ## Tier Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PricingCalculator::breakdown                         │
//! │                                                                         │
//! │  quantity < 0 ─────────────────────────────► InvalidQuantity           │
//! │  unit_price < 0 ───────────────────────────► InvalidPricingConfig      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  row_price active?  ──yes──► rows = q / 5, rem = q % 5                 │
//! │       │ no                   rows × row_price + rem × unit_price       │
//! │       ▼                                                                 │
//! │  half_row_price active  ──yes──► halves = q / 3, rem = q % 3           │
//! │  AND q >= 3?                     halves × half_row + rem × unit        │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  flat: unit_price × q                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bundle tier is *active* only when its price is present and greater than
//! zero. A zero or negative bundle price behaves exactly like a missing one.
//!
//! ## Example
//! ```rust
//! use jobica_core::money::Money;
//! use jobica_core::pricing::{PricingCalculator, PricingConfig};
//!
//! let calc = PricingCalculator::default();
//! let pricing = PricingConfig::flat(Money::from_naira(200)).with_row(Money::from_naira(800));
//!
//! // One row of 5 plus two loose units
//! let subtotal = calc.subtotal(&pricing, "Larsor Chicken", 7).unwrap();
//! assert_eq!(subtotal, Money::from_naira(1_200));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Units in a row bundle.
pub const ROW_SIZE: i64 = 5;

/// Units in a half-row bundle.
pub const HALF_ROW_SIZE: i64 = 3;

/// Legacy hard-coded bundle: 5 units for ₦800.
pub const LEGACY_BUNDLE_PRICE: Money = Money::from_naira(800);

/// Legacy hard-coded price for units outside a full bundle.
pub const LEGACY_UNIT_PRICE: Money = Money::from_naira(200);

// =============================================================================
// Pricing Config
// =============================================================================

/// Pricing fields of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// Price of one unit. Must be >= 0.
    pub unit_price: Money,

    /// Price of a row bundle (5 units).
    pub row_price: Option<Money>,

    /// Price of a half-row bundle (3 units).
    pub half_row_price: Option<Money>,
}

impl PricingConfig {
    /// Unit price only, no bundles.
    pub const fn flat(unit_price: Money) -> Self {
        PricingConfig {
            unit_price,
            row_price: None,
            half_row_price: None,
        }
    }

    pub const fn with_row(mut self, row_price: Money) -> Self {
        self.row_price = Some(row_price);
        self
    }

    pub const fn with_half_row(mut self, half_row_price: Money) -> Self {
        self.half_row_price = Some(half_row_price);
        self
    }

    /// Row price, if the row tier is active.
    pub fn active_row_price(&self) -> Option<Money> {
        if is_active_tier(self.row_price) {
            self.row_price
        } else {
            None
        }
    }

    /// Half-row price, if the half-row tier is active.
    pub fn active_half_row_price(&self) -> Option<Money> {
        if is_active_tier(self.half_row_price) {
            self.half_row_price
        } else {
            None
        }
    }
}

/// True when a bundle price is present and strictly positive.
///
/// ```rust
/// use jobica_core::money::Money;
/// use jobica_core::pricing::is_active_tier;
///
/// assert!(is_active_tier(Some(Money::from_naira(800))));
/// assert!(!is_active_tier(Some(Money::zero())));
/// assert!(!is_active_tier(None));
/// ```
#[inline]
pub fn is_active_tier(price: Option<Money>) -> bool {
    matches!(price, Some(p) if p.is_positive())
}

// =============================================================================
// Breakdown
// =============================================================================

/// Which rule produced a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum PricingTier {
    Row,
    HalfRow,
    Flat,
    LegacyBundle,
}

/// How a line's subtotal was composed.
///
/// The cart view renders this as e.g. "2 rows + 1 unit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub tier: PricingTier,
    pub quantity: i64,
    /// Number of full bundles (0 for flat pricing).
    pub bundles: i64,
    /// Units per bundle (0 for flat pricing).
    pub bundle_size: i64,
    pub bundle_price: Option<Money>,
    /// Units charged at `unit_price`.
    pub remainder_units: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

impl PriceBreakdown {
    /// Human-readable composition of the line.
    ///
    /// ```rust
    /// use jobica_core::money::Money;
    /// use jobica_core::pricing::{PricingCalculator, PricingConfig};
    ///
    /// let pricing = PricingConfig::flat(Money::from_naira(200)).with_row(Money::from_naira(800));
    /// let breakdown = PricingCalculator::default().breakdown(&pricing, "", 11).unwrap();
    /// assert_eq!(breakdown.describe(), "2 rows + 1 unit");
    /// ```
    pub fn describe(&self) -> String {
        let bundle_word = match self.tier {
            PricingTier::Row => "row",
            PricingTier::HalfRow => "half row",
            PricingTier::LegacyBundle => "bundle",
            PricingTier::Flat => return plural(self.quantity, "unit"),
        };

        match (self.bundles, self.remainder_units) {
            (0, rem) => plural(rem, "unit"),
            (bundles, 0) => plural(bundles, bundle_word),
            (bundles, rem) => format!(
                "{} + {}",
                plural(bundles, bundle_word),
                plural(rem, "unit")
            ),
        }
    }
}

fn plural(count: i64, word: &str) -> String {
    if count == 1 {
        format!("1 {word}")
    } else {
        format!("{count} {word}s")
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Pricing rule set chosen when the application is assembled.
///
/// Exactly one policy is in force for a calculator; the tiered algorithm is
/// the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PricingPolicy {
    /// Row, then half-row, then flat pricing from the product's fields.
    #[default]
    Tiered,

    /// Products named like "Larsor Chicken" are sold 5 for ₦800 with loose
    /// units at ₦200, whatever their configured fields say. Every other
    /// product is priced with the tiered rules.
    LegacyNameOverride,
}

/// Computes line subtotals. Pure and `Copy`; share it freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingCalculator {
    policy: PricingPolicy,
}

impl PricingCalculator {
    pub const fn new(policy: PricingPolicy) -> Self {
        PricingCalculator { policy }
    }

    pub const fn policy(&self) -> PricingPolicy {
        self.policy
    }

    /// Subtotal for `quantity` units.
    ///
    /// `name_hint` is the product name; only the legacy policy looks at it.
    pub fn subtotal(
        &self,
        pricing: &PricingConfig,
        name_hint: &str,
        quantity: i64,
    ) -> CoreResult<Money> {
        Ok(self.breakdown(pricing, name_hint, quantity)?.subtotal)
    }

    /// Subtotal together with the tier and bundle split that produced it.
    pub fn breakdown(
        &self,
        pricing: &PricingConfig,
        name_hint: &str,
        quantity: i64,
    ) -> CoreResult<PriceBreakdown> {
        if quantity < 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        if self.policy == PricingPolicy::LegacyNameOverride && is_legacy_bundle_name(name_hint) {
            return bundled(
                name_hint,
                PricingTier::LegacyBundle,
                quantity,
                ROW_SIZE,
                LEGACY_BUNDLE_PRICE,
                LEGACY_UNIT_PRICE,
            );
        }

        if pricing.unit_price.is_negative() {
            return Err(CoreError::InvalidPricingConfig {
                product: name_hint.to_string(),
                reason: format!("unit price {} is negative", pricing.unit_price),
            });
        }

        if let Some(row_price) = pricing.active_row_price() {
            return bundled(
                name_hint,
                PricingTier::Row,
                quantity,
                ROW_SIZE,
                row_price,
                pricing.unit_price,
            );
        }

        if let Some(half_row_price) = pricing.active_half_row_price() {
            if quantity >= HALF_ROW_SIZE {
                return bundled(
                    name_hint,
                    PricingTier::HalfRow,
                    quantity,
                    HALF_ROW_SIZE,
                    half_row_price,
                    pricing.unit_price,
                );
            }
        }

        Ok(PriceBreakdown {
            tier: PricingTier::Flat,
            quantity,
            bundles: 0,
            bundle_size: 0,
            bundle_price: None,
            remainder_units: quantity,
            unit_price: pricing.unit_price,
            subtotal: pricing
                .unit_price
                .checked_mul(quantity)
                .ok_or_else(|| overflow(name_hint))?,
        })
    }
}

fn bundled(
    name_hint: &str,
    tier: PricingTier,
    quantity: i64,
    bundle_size: i64,
    bundle_price: Money,
    unit_price: Money,
) -> CoreResult<PriceBreakdown> {
    let bundles = quantity / bundle_size;
    let remainder_units = quantity % bundle_size;
    let subtotal = bundle_price
        .checked_mul(bundles)
        .zip(unit_price.checked_mul(remainder_units))
        .and_then(|(full, loose)| full.checked_add(loose))
        .ok_or_else(|| overflow(name_hint))?;

    Ok(PriceBreakdown {
        tier,
        quantity,
        bundles,
        bundle_size,
        bundle_price: Some(bundle_price),
        remainder_units,
        unit_price,
        subtotal,
    })
}

fn overflow(product: &str) -> CoreError {
    CoreError::InvalidPricingConfig {
        product: product.to_string(),
        reason: "subtotal does not fit in an i64 kobo amount".to_string(),
    }
}

fn is_legacy_bundle_name(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("larsor") && name.contains("chicken")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn naira(n: i64) -> Money {
        Money::from_naira(n)
    }

    fn tiered(pricing: &PricingConfig, quantity: i64) -> Money {
        PricingCalculator::default()
            .subtotal(pricing, "Any Product", quantity)
            .unwrap()
    }

    #[test]
    fn test_shop_scenarios() {
        let row = PricingConfig::flat(naira(200)).with_row(naira(800));
        assert_eq!(tiered(&row, 5), naira(800));
        assert_eq!(tiered(&row, 7), naira(1_200));

        let half = PricingConfig::flat(naira(150)).with_half_row(naira(400));
        assert_eq!(tiered(&half, 3), naira(400));
        assert_eq!(tiered(&half, 4), naira(550));
        assert_eq!(tiered(&half, 2), naira(300));

        assert_eq!(tiered(&PricingConfig::flat(naira(500)), 3), naira(1_500));
    }

    #[test]
    fn test_zero_quantity_is_free_in_every_tier() {
        let configs = [
            PricingConfig::flat(naira(500)),
            PricingConfig::flat(naira(200)).with_row(naira(800)),
            PricingConfig::flat(naira(150)).with_half_row(naira(400)),
        ];
        for pricing in configs {
            assert_eq!(tiered(&pricing, 0), Money::zero());
        }
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let result = PricingCalculator::default().subtotal(&PricingConfig::flat(naira(100)), "x", -1);
        assert!(matches!(result, Err(CoreError::InvalidQuantity(-1))));
    }

    #[test]
    fn test_negative_unit_price_is_rejected() {
        let pricing = PricingConfig::flat(Money::from_kobo(-1));
        let result = PricingCalculator::default().subtotal(&pricing, "Broken", 2);
        assert!(matches!(result, Err(CoreError::InvalidPricingConfig { .. })));
    }

    #[test]
    fn test_subtotal_overflow_is_an_error_in_every_tier() {
        let huge = Money::from_kobo(i64::MAX / 2);
        let configs = [
            PricingConfig::flat(huge),
            PricingConfig::flat(huge).with_row(huge),
            PricingConfig::flat(huge).with_half_row(huge),
        ];
        for pricing in configs {
            let result = PricingCalculator::default().breakdown(&pricing, "Gold Bar", 999);
            assert!(
                matches!(&result, Err(CoreError::InvalidPricingConfig { product, .. }) if product == "Gold Bar"),
                "expected overflow error, got {result:?}"
            );
        }
    }

    #[test]
    fn test_largest_allowed_price_fits_at_max_quantity() {
        let top = Money::from_kobo(crate::MAX_PRICE_KOBO);
        let pricing = PricingConfig::flat(top).with_row(top);
        let subtotal = PricingCalculator::default()
            .subtotal(&pricing, "Top Shelf", crate::MAX_ITEM_QUANTITY)
            .unwrap();
        assert!(subtotal.is_positive());
    }

    #[test]
    fn test_unpriced_product_totals_zero() {
        assert_eq!(tiered(&PricingConfig::flat(Money::zero()), 12), Money::zero());
    }

    #[test]
    fn test_non_positive_bundle_price_is_ignored() {
        let zero_row = PricingConfig::flat(naira(200)).with_row(Money::zero());
        assert_eq!(tiered(&zero_row, 5), naira(1_000));

        let negative_half = PricingConfig::flat(naira(150)).with_half_row(naira(-400));
        assert_eq!(tiered(&negative_half, 3), naira(450));
    }

    #[test]
    fn test_row_wins_over_half_row() {
        let both = PricingConfig::flat(naira(150))
            .with_row(naira(600))
            .with_half_row(naira(400));

        let breakdown = PricingCalculator::default().breakdown(&both, "", 6).unwrap();
        assert_eq!(breakdown.tier, PricingTier::Row);
        assert_eq!(breakdown.subtotal, naira(750));
    }

    #[test]
    fn test_tiered_policy_ignores_product_name() {
        let pricing = PricingConfig::flat(naira(250));
        let subtotal = PricingCalculator::default()
            .subtotal(&pricing, "Larsor Chicken Seasoning", 5)
            .unwrap();
        assert_eq!(subtotal, naira(1_250));
    }

    #[test]
    fn test_legacy_policy_overrides_matching_names() {
        let calc = PricingCalculator::new(PricingPolicy::LegacyNameOverride);
        let pricing = PricingConfig::flat(naira(250)).with_half_row(naira(600));

        let breakdown = calc.breakdown(&pricing, "LARSOR chicken 10g", 7).unwrap();
        assert_eq!(breakdown.tier, PricingTier::LegacyBundle);
        assert_eq!(breakdown.subtotal, naira(1_200));

        // Only one of the two words: normal tiered pricing.
        let other = calc.subtotal(&pricing, "Larsor Beef", 3).unwrap();
        assert_eq!(other, naira(600));
    }

    #[test]
    fn test_breakdown_describe() {
        let calc = PricingCalculator::default();
        let row = PricingConfig::flat(naira(200)).with_row(naira(800));
        let half = PricingConfig::flat(naira(150)).with_half_row(naira(400));

        assert_eq!(calc.breakdown(&row, "", 10).unwrap().describe(), "2 rows");
        assert_eq!(calc.breakdown(&row, "", 6).unwrap().describe(), "1 row + 1 unit");
        assert_eq!(calc.breakdown(&row, "", 3).unwrap().describe(), "3 units");
        assert_eq!(calc.breakdown(&half, "", 4).unwrap().describe(), "1 half row + 1 unit");
        assert_eq!(calc.breakdown(&half, "", 1).unwrap().describe(), "1 unit");
    }

    #[test]
    fn test_breakdown_serializes_camel_case() {
        let pricing = PricingConfig::flat(naira(150)).with_half_row(naira(400));
        let breakdown = PricingCalculator::default().breakdown(&pricing, "", 4).unwrap();
        let json = serde_json::to_value(breakdown).unwrap();

        assert_eq!(json["tier"], "halfRow");
        assert_eq!(json["remainderUnits"], 1);
        assert_eq!(json["subtotal"], 55_000);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    proptest! {
        #[test]
        fn flat_pricing_is_unit_times_quantity(u in 0i64..1_000_000, q in 0i64..=2_000) {
            let unit = Money::from_kobo(u);
            prop_assert_eq!(tiered(&PricingConfig::flat(unit), q), unit * q);
        }

        #[test]
        fn whole_rows_cost_row_price(u in 0i64..1_000_000, r in 1i64..5_000_000, rows in 0i64..=400) {
            let pricing = PricingConfig::flat(Money::from_kobo(u)).with_row(Money::from_kobo(r));
            prop_assert_eq!(tiered(&pricing, rows * ROW_SIZE), Money::from_kobo(r) * rows);
        }

        #[test]
        fn row_remainder_is_charged_per_unit(u in 0i64..1_000_000, r in 1i64..5_000_000, q in 0i64..=2_000) {
            let pricing = PricingConfig::flat(Money::from_kobo(u)).with_row(Money::from_kobo(r));
            let expected = Money::from_kobo(r) * (q / ROW_SIZE) + Money::from_kobo(u) * (q % ROW_SIZE);
            prop_assert_eq!(tiered(&pricing, q), expected);
        }

        #[test]
        fn half_row_needs_three_units(u in 0i64..1_000_000, h in 1i64..3_000_000, q in 0i64..HALF_ROW_SIZE) {
            let unit = Money::from_kobo(u);
            let pricing = PricingConfig::flat(unit).with_half_row(Money::from_kobo(h));
            prop_assert_eq!(tiered(&pricing, q), unit * q);
        }

        #[test]
        fn row_takes_precedence(u in 0i64..1_000_000, r in 1i64..5_000_000, h in 1i64..3_000_000, q in 0i64..=2_000) {
            let row_only = PricingConfig::flat(Money::from_kobo(u)).with_row(Money::from_kobo(r));
            let both = row_only.with_half_row(Money::from_kobo(h));
            prop_assert_eq!(tiered(&both, q), tiered(&row_only, q));
        }

        #[test]
        fn subtotal_never_decreases_with_quantity(
            u in 0i64..100_000,
            row_extra in proptest::option::of(0i64..100_000),
            half_extra in proptest::option::of(0i64..100_000),
            q in 0i64..1_000,
        ) {
            // Bundles never undercut the loose units they replace.
            let mut pricing = PricingConfig::flat(Money::from_kobo(u));
            pricing.row_price = row_extra.map(|e| Money::from_kobo(4 * u + e));
            pricing.half_row_price = half_extra.map(|e| Money::from_kobo(2 * u + e));

            prop_assert!(tiered(&pricing, q + 1) >= tiered(&pricing, q));
        }
    }
}
