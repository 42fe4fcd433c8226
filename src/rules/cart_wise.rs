//! Cart-wise rule: percentage off the whole cart above a subtotal threshold

use rust_decimal::Decimal;

use super::DiscountRule;
use crate::cart::helpers::{percent_of, raw_subtotal};
use crate::cart::models::Cart;
use crate::coupon::models::{ParamBag, CART_WISE};
use crate::coupon::params;
use crate::error::{CouponError, CouponResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CartWiseRule {
    /// Subtotal the cart must strictly exceed
    pub threshold: Decimal,
    /// Percentage points off the subtotal
    pub percent: Decimal,
}

impl CartWiseRule {
    pub fn from_params(details: &ParamBag) -> CouponResult<Self> {
        Ok(Self {
            threshold: params::decimal(details, "threshold")?,
            percent: params::decimal(details, "discount")?,
        })
    }
}

impl DiscountRule for CartWiseRule {
    fn kind(&self) -> &'static str {
        CART_WISE
    }

    fn is_applicable(&self, cart: &Cart) -> CouponResult<bool> {
        Ok(raw_subtotal(&cart.items)? > self.threshold)
    }

    fn calculate_discount(&self, cart: &Cart) -> CouponResult<Decimal> {
        let subtotal = raw_subtotal(&cart.items)?;
        if subtotal <= self.threshold {
            return Ok(Decimal::ZERO);
        }
        percent_of(subtotal, self.percent)
            .ok_or_else(|| CouponError::malformed("discount", "discount amount out of range"))
    }

    /// Sets the cart-level totals directly; items are left untouched.
    fn apply(&self, cart: &mut Cart) -> CouponResult<()> {
        let discount = self.calculate_discount(cart)?;
        let subtotal = raw_subtotal(&cart.items)?;
        let final_price = subtotal
            .checked_sub(discount)
            .ok_or(CouponError::AmountOutOfRange)?;

        tracing::debug!(%subtotal, %discount, "Applying cart-wise discount");

        cart.total_price = subtotal;
        cart.total_discount = discount;
        cart.final_price = final_price;
        Ok(())
    }
}
