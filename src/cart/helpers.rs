//! Cart Aggregation Helpers
//!
//! Pure functions deriving cart totals from item-level price, quantity and
//! discount. They never mutate a cart; [`Cart::recompute_totals`] is the one
//! place the results are written back.
//!
//! [`Cart::recompute_totals`]: super::models::Cart::recompute_totals

use super::models::CartItem;
use crate::error::{CouponError, CouponResult};
use rust_decimal::prelude::*;

/// Monetary values are rounded to 2 decimal places, half-up
pub const DECIMAL_PLACES: u32 = 2;

/// Totals derived from a cart's lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    pub total_price: Decimal,
    pub total_discount: Decimal,
    pub final_price: Decimal,
}

/// Checked addition of two amounts
pub fn add_amounts(a: Decimal, b: Decimal) -> CouponResult<Decimal> {
    a.checked_add(b).ok_or(CouponError::AmountOutOfRange)
}

/// Checked `price x count`
pub fn times(price: Decimal, count: u32) -> CouponResult<Decimal> {
    price
        .checked_mul(Decimal::from(count))
        .ok_or(CouponError::AmountOutOfRange)
}

/// Raw cost of a line: unit price x quantity
#[inline]
pub fn line_cost(item: &CartItem) -> CouponResult<Decimal> {
    times(item.price, item.quantity)
}

/// Sum of raw line costs, computed fresh from the items
pub fn raw_subtotal(items: &[CartItem]) -> CouponResult<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| add_amounts(sum, line_cost(item)?))
}

/// Derives all cart totals from the lines.
///
/// Idempotent: same items, same totals.
pub fn compute_totals(items: &[CartItem]) -> CouponResult<CartTotals> {
    let (total_price, total_discount) = items.iter().try_fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(raw, discount), item| -> CouponResult<_> {
            Ok((
                add_amounts(raw, line_cost(item)?)?,
                add_amounts(discount, item.total_discount)?,
            ))
        },
    )?;

    let final_price = total_price
        .checked_sub(total_discount)
        .ok_or(CouponError::AmountOutOfRange)?;

    Ok(CartTotals {
        total_price,
        total_discount,
        final_price,
    })
}

/// `amount x percent / 100`, rounded to cents (half-up).
///
/// `None` when the result does not fit in a `Decimal`.
pub fn percent_of(amount: Decimal, percent: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(percent)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        // Dividing first keeps large amounts in range when the result fits
        .or_else(|| {
            amount
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|hundredth| hundredth.checked_mul(percent))
        })
        .map(|value| {
            value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        })
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"6x #1 @ 50, 1x #3 @ 9.99"`.
pub fn format_item_summary(items: &[CartItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x #{} @ {}", i.quantity, i.product_id, i.price))
        .collect::<Vec<_>>()
        .join(", ")
}
