//! Coupon Domain Models
//!
//! A coupon is a kind tag plus a loosely-typed parameter bag. The engine only
//! reads both; it never modifies a stored coupon.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Coupon Kinds
// =============================================================================

/// Percentage off the whole cart once its subtotal exceeds a threshold
pub const CART_WISE: &str = "cart-wise";
/// Percentage off the lines of one product
pub const PRODUCT_WISE: &str = "product-wise";
/// Buy X get Y free
pub const BXGY: &str = "bxgy";

// =============================================================================
// Coupon Models
// =============================================================================

/// Identifier assigned by the coupon store
pub type CouponId = u64;

/// Untyped coupon parameters as received on the wire
pub type ParamBag = Map<String, Value>;

fn default_active() -> bool {
    true
}

/// A stored coupon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    pub id: CouponId,

    /// Kind tag selecting the discount rule (e.g. "cart-wise")
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub details: ParamBag,

    /// Stored for the catalog; not enforced by the engine
    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
}

/// Body for creating or replacing a coupon
#[derive(Debug, Clone, Deserialize)]
pub struct CouponInput {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub details: ParamBag,

    #[serde(default = "default_active", alias = "active")]
    pub is_active: bool,
}

impl CouponInput {
    /// Attaches a store-assigned identifier
    pub fn into_coupon(self, id: CouponId) -> Coupon {
        Coupon {
            id,
            kind: self.kind,
            details: self.details,
            is_active: self.is_active,
        }
    }
}

/// One entry of the applicability listing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApplicableCoupon {
    pub coupon_id: CouponId,

    #[serde(rename = "type")]
    pub kind: String,

    /// Discount the coupon would grant on the evaluated cart
    #[serde(serialize_with = "crate::cart::money::serialize")]
    pub discount: Decimal,
}

/// Response for the applicability listing
#[derive(Debug, Serialize)]
pub struct ApplicableCouponsResponse {
    pub applicable_coupons: Vec<ApplicableCoupon>,
}
