//! Coupon Evaluation Engine
//!
//! The two entry points used by the HTTP boundary:
//! - [`list_applicable`] evaluates every stored coupon against a cart without
//!   touching it.
//! - [`apply_coupon`] applies one coupon, mutating the cart in place.
//!
//! Storage is only seen through [`CouponSource`].

use crate::cart::models::Cart;
use crate::coupon::models::{ApplicableCoupon, Coupon, CouponId};
use crate::error::{CouponError, CouponResult};
use crate::rules::{DiscountRule, Rule};

/// Read access to the coupon catalog
pub trait CouponSource {
    /// Point lookup by id
    fn get(&self, id: CouponId) -> Option<Coupon>;

    /// Every stored coupon in storage iteration order
    fn list_all(&self) -> Vec<Coupon>;
}

/// Lists the coupons that apply to `cart` with the discount each would grant.
///
/// Storage order is preserved. A coupon whose kind has no rule, or whose
/// parameters are malformed, fails the whole listing. So does a discount
/// outside the decimal range.
pub fn list_applicable<S>(source: &S, cart: &Cart) -> CouponResult<Vec<ApplicableCoupon>>
where
    S: CouponSource + ?Sized,
{
    let mut applicable = Vec::new();

    for coupon in source.list_all() {
        let rule = Rule::for_coupon(&coupon.kind, &coupon.details)?;

        if !rule.is_applicable(cart)? {
            tracing::debug!(coupon_id = coupon.id, kind = %coupon.kind, "Coupon not applicable");
            continue;
        }

        let discount = rule.calculate_discount(cart)?;
        tracing::debug!(coupon_id = coupon.id, kind = %coupon.kind, %discount, "Coupon applicable");

        applicable.push(ApplicableCoupon {
            coupon_id: coupon.id,
            kind: coupon.kind,
            discount,
        });
    }

    Ok(applicable)
}

/// Applies coupon `id` to `cart`.
///
/// Returns whether the coupon applied. A coupon that does not apply leaves
/// the cart as it was; on error the cart is never touched.
pub fn apply_coupon<S>(source: &S, id: CouponId, cart: &mut Cart) -> CouponResult<bool>
where
    S: CouponSource + ?Sized,
{
    let coupon = source.get(id).ok_or(CouponError::NotFound(id))?;
    let rule = Rule::for_coupon(&coupon.kind, &coupon.details)?;

    if !rule.is_applicable(cart)? {
        tracing::debug!(coupon_id = id, kind = %coupon.kind, "Coupon not applicable, cart unchanged");
        return Ok(false);
    }

    rule.apply(cart)?;
    Ok(true)
}
