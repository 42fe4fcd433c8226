//! Shopping Cart Domain Models
//!
//! This module contains the cart shapes exchanged with the coupon engine.
//! Cart-level totals and per-item discounts are outputs: whatever the caller
//! sends for them is ignored and recomputed from the items. Money goes over
//! the wire as exact JSON numbers (see [`super::money`]).

use super::helpers::{compute_totals, CartTotals};
use crate::error::{CouponError, CouponResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Opaque product reference carried by cart lines and coupon parameters
pub type ProductId = u64;

/// Returns the default quantity (1) for cart items
fn default_quantity() -> u32 {
    1
}

/// A single line in the cart. Lines are identified by position only; several
/// lines may reference the same product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product this line refers to
    pub product_id: ProductId,

    /// Quantity of this line (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Unit price
    #[serde(with = "super::money")]
    pub price: Decimal,

    /// Discount attributed to this line by the last applied coupon
    #[serde(
        default,
        skip_deserializing,
        serialize_with = "super::money::serialize"
    )]
    pub total_discount: Decimal,
}

impl CartItem {
    /// Creates a line with no discount attributed yet
    pub fn new(product_id: ProductId, quantity: u32, price: Decimal) -> Self {
        Self {
            product_id,
            quantity,
            price,
            total_discount: Decimal::ZERO,
        }
    }
}

/// Cart with its derived totals.
///
/// After any rule mutation `final_price == total_price - total_discount`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Lines in display order
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Raw subtotal, sum of price x quantity
    #[serde(
        default,
        skip_deserializing,
        serialize_with = "super::money::serialize"
    )]
    pub total_price: Decimal,

    /// Discount granted on this cart
    #[serde(
        default,
        skip_deserializing,
        serialize_with = "super::money::serialize"
    )]
    pub total_discount: Decimal,

    /// Amount payable after discount
    #[serde(
        default,
        skip_deserializing,
        serialize_with = "super::money::serialize"
    )]
    pub final_price: Decimal,
}

impl Cart {
    /// Builds a cart from its lines with totals already reconciled
    pub fn with_items(items: Vec<CartItem>) -> CouponResult<Self> {
        let mut cart = Self {
            items,
            ..Self::default()
        };
        cart.recompute_totals()?;
        Ok(cart)
    }

    /// Rewrites the three cart-level totals from the current item state.
    /// Nothing is written when a total is out of range.
    pub fn recompute_totals(&mut self) -> CouponResult<()> {
        let totals = compute_totals(&self.items)?;
        self.set_totals(totals);
        Ok(())
    }

    /// Swaps in new lines and their totals, or leaves the cart as it was
    pub fn replace_items(&mut self, items: Vec<CartItem>) -> CouponResult<()> {
        let totals = compute_totals(&items)?;
        self.items = items;
        self.set_totals(totals);
        Ok(())
    }

    fn set_totals(&mut self, totals: CartTotals) {
        self.total_price = totals.total_price;
        self.total_discount = totals.total_discount;
        self.final_price = totals.final_price;
    }
}

/// Request body carrying a cart (`{"cart": {...}}`)
#[derive(Debug, Deserialize)]
pub struct CartInput {
    pub cart: Cart,
}

impl CartInput {
    /// Validates the lines and reconciles the totals, so callers never see
    /// the values supplied on input.
    pub fn into_cart(self) -> CouponResult<Cart> {
        for (index, item) in self.cart.items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CouponError::InvalidCart(format!(
                    "item {index}: quantity must be positive"
                )));
            }
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(CouponError::InvalidCart(format!(
                    "item {index}: price must not be negative"
                )));
            }
        }

        Cart::with_items(self.cart.items)
    }
}

/// Response for the apply endpoint
#[derive(Debug, Serialize)]
pub struct UpdatedCartResponse {
    pub updated_cart: Cart,
}
