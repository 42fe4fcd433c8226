//! Parameter Extraction
//!
//! Typed accessors over a coupon's [`ParamBag`]. Rules call these once when
//! they are built, so the rule logic itself only ever sees typed values.
//!
//! Numeric keys accept JSON integers, floats and decimal strings. Absent (or
//! `null`) numeric keys fall back to a default; a value of the wrong shape is
//! [`CouponError::MalformedParameters`].

use super::models::ParamBag;
use crate::cart::models::ProductId;
use crate::error::{CouponError, CouponResult};
use rust_decimal::prelude::*;
use serde_json::{Number, Value};

/// Product set and per-repetition quantity read from a bundle product list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPool {
    pub product_ids: Vec<ProductId>,
    /// Taken from the first entry of the list; 1 when the list is empty
    pub quantity_per_repetition: u32,
}

impl ProductPool {
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.product_ids.contains(&product_id)
    }
}

/// Looks up a key, treating JSON `null` the same as an absent key
fn lookup<'a>(bag: &'a ParamBag, key: &str) -> Option<&'a Value> {
    bag.get(key).filter(|v| !v.is_null())
}

/// Reads a decimal, defaulting to zero when the key is absent
pub fn decimal(bag: &ParamBag, key: &str) -> CouponResult<Decimal> {
    decimal_or(bag, key, Decimal::ZERO)
}

/// Reads a decimal with an explicit default for an absent key
pub fn decimal_or(bag: &ParamBag, key: &str, default: Decimal) -> CouponResult<Decimal> {
    lookup(bag, key).map_or(Ok(default), |value| to_decimal(key, value))
}

/// Reads a non-negative whole count with an explicit default for an absent key
pub fn count_or(bag: &ParamBag, key: &str, default: u32) -> CouponResult<u32> {
    lookup(bag, key).map_or(Ok(default), |value| to_count(key, value))
}

/// Reads an optional product reference
pub fn product_ref(bag: &ParamBag, key: &str) -> CouponResult<Option<ProductId>> {
    lookup(bag, key)
        .map(|value| to_product_id(key, value))
        .transpose()
}

/// Reads a list of `{product_id, quantity}` mappings.
///
/// The list itself is required. Only the first entry's quantity is used as the
/// per-repetition quantity.
pub fn product_pool(bag: &ParamBag, key: &str) -> CouponResult<ProductPool> {
    let entries = match lookup(bag, key) {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(CouponError::malformed(key, "expected a list of products")),
        None => return Err(CouponError::malformed(key, "missing product list")),
    };

    let mut product_ids = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry
            .as_object()
            .ok_or_else(|| CouponError::malformed(key, "product entry must be an object"))?;
        let product_id = lookup(entry, "product_id")
            .ok_or_else(|| CouponError::malformed(key, "product entry without product_id"))?;
        product_ids.push(to_product_id(key, product_id)?);
    }

    let quantity_per_repetition = match entries.first().and_then(Value::as_object) {
        Some(first) => {
            let quantity = lookup(first, "quantity")
                .ok_or_else(|| CouponError::malformed(key, "product entry without quantity"))?;
            to_count(key, quantity)?
        }
        None => 1,
    };

    Ok(ProductPool {
        product_ids,
        quantity_per_repetition,
    })
}

// =============================================================================
// Coercions
// =============================================================================

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(i) = number.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Some(Decimal::from(u));
    }
    // Go through the shortest textual form so 0.1 stays 0.1
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn to_decimal(key: &str, value: &Value) -> CouponResult<Decimal> {
    match value {
        Value::Number(number) => number_to_decimal(number)
            .ok_or_else(|| CouponError::malformed(key, format!("{number} is out of range"))),
        Value::String(text) => Decimal::from_str(text.trim())
            .map_err(|_| CouponError::malformed(key, format!("'{text}' is not a number"))),
        other => Err(CouponError::malformed(
            key,
            format!("expected a number, got {other}"),
        )),
    }
}

fn to_count(key: &str, value: &Value) -> CouponResult<u32> {
    let amount = to_decimal(key, value)?;
    if amount.is_sign_negative() || !amount.fract().is_zero() {
        return Err(CouponError::malformed(
            key,
            format!("expected a non-negative whole number, got {amount}"),
        ));
    }
    amount
        .to_u32()
        .ok_or_else(|| CouponError::malformed(key, format!("{amount} is too large")))
}

fn to_product_id(key: &str, value: &Value) -> CouponResult<ProductId> {
    let parsed = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| CouponError::malformed(key, format!("invalid product reference {value}")))
}
