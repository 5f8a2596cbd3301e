//! Display price calculation for products with a promotion.

use serde::Serialize;

use crate::domain::product::Product;
use crate::domain::types::{DiscountPercent, Price};

/// Prices rendered next to a product card.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct DisplayPrice {
    pub list_price: Price,
    pub final_price: Price,
    pub savings: Price,
    pub discount_percent: u8,
}

impl DisplayPrice {
    pub fn has_promotion(&self) -> bool {
        self.savings.minor_units() > 0
    }
}

/// Applies the discount, rounding the discounted amount half-up to the
/// nearest minor unit.
pub fn display_price(list_price: Price, discount: Option<DiscountPercent>) -> DisplayPrice {
    let percent = discount.map_or(0, DiscountPercent::get);
    let cents = i128::from(list_price.minor_units());
    // Savings never exceed the list price, so they fit back into i64.
    let savings = ((cents * i128::from(percent) + 50) / 100).min(cents);
    let savings = i64::try_from(savings).unwrap_or_default();
    let final_cents = list_price.minor_units() - savings;

    DisplayPrice {
        list_price,
        final_price: Price::new(final_cents).unwrap_or(list_price),
        savings: Price::new(savings).unwrap_or_default(),
        discount_percent: percent,
    }
}

impl Product {
    pub fn display_price(&self) -> DisplayPrice {
        display_price(self.price, self.discount_percent)
    }
}
