//! Product-wise rule: percentage off the lines of one product

use rust_decimal::Decimal;

use super::DiscountRule;
use crate::cart::helpers::{line_cost, percent_of};
use crate::cart::models::{Cart, ProductId};
use crate::coupon::models::{ParamBag, PRODUCT_WISE};
use crate::coupon::params;
use crate::error::{CouponError, CouponResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ProductWiseRule {
    /// Target product; a coupon without one never applies
    pub product_id: Option<ProductId>,
    /// Percentage points off the product's line cost
    pub percent: Decimal,
}

impl ProductWiseRule {
    pub fn from_params(details: &ParamBag) -> CouponResult<Self> {
        Ok(Self {
            product_id: params::product_ref(details, "product_id")?,
            percent: params::decimal(details, "discount")?,
        })
    }

    fn targets(&self, product_id: ProductId) -> bool {
        self.product_id == Some(product_id)
    }
}

impl DiscountRule for ProductWiseRule {
    fn kind(&self) -> &'static str {
        PRODUCT_WISE
    }

    fn is_applicable(&self, cart: &Cart) -> CouponResult<bool> {
        Ok(cart.items.iter().any(|item| self.targets(item.product_id)))
    }

    /// Priced on the first matching line only.
    fn calculate_discount(&self, cart: &Cart) -> CouponResult<Decimal> {
        let Some(item) = cart.items.iter().find(|item| self.targets(item.product_id)) else {
            return Ok(Decimal::ZERO);
        };
        percent_of(line_cost(item)?, self.percent)
            .ok_or_else(|| CouponError::malformed("discount", "discount amount out of range"))
    }

    /// Every matching line gets the computed amount, replacing any discount
    /// it already carried.
    fn apply(&self, cart: &mut Cart) -> CouponResult<()> {
        let discount = self.calculate_discount(cart)?;
        if discount.is_zero() {
            return Ok(());
        }

        tracing::debug!(product_id = ?self.product_id, %discount, "Applying product-wise discount");

        let mut items = cart.items.clone();
        for item in items
            .iter_mut()
            .filter(|item| self.targets(item.product_id))
        {
            item.total_discount = discount;
        }

        cart.replace_items(items)
    }
}
