//! Discount rule implementations
//!
//! Each rule implements the `DiscountRule` trait for one coupon kind. Rules
//! are built from a coupon's parameter bag once, then evaluated against a
//! cart. `is_applicable` and `calculate_discount` are read-only; `apply` is
//! the only operation that mutates the cart, and it writes nothing when it
//! fails.

use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;

use crate::cart::models::Cart;
use crate::coupon::models::{ParamBag, BXGY, CART_WISE, PRODUCT_WISE};
use crate::error::{CouponError, CouponResult};

mod bxgy;
mod cart_wise;
mod product_wise;

pub use bxgy::BxGyRule;
pub use cart_wise::CartWiseRule;
pub use product_wise::ProductWiseRule;

/// Contract shared by every discount rule
#[enum_dispatch]
pub trait DiscountRule {
    /// Kind tag this rule evaluates
    fn kind(&self) -> &'static str;

    /// Whether the rule's conditions are met by the cart
    fn is_applicable(&self, cart: &Cart) -> CouponResult<bool>;

    /// Discount the rule would grant on the cart; zero when not applicable
    fn calculate_discount(&self, cart: &Cart) -> CouponResult<Decimal>;

    /// Writes the discount into the cart and reconciles its totals
    fn apply(&self, cart: &mut Cart) -> CouponResult<()>;
}

/// Rule enum - dispatches to concrete rule implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(DiscountRule)]
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    CartWise(CartWiseRule),
    ProductWise(ProductWiseRule),
    BxGy(BxGyRule),
}

/// Kind tags with a registered rule, in dispatch order
pub const SUPPORTED_KINDS: [&str; 3] = [CART_WISE, PRODUCT_WISE, BXGY];

/// Case-insensitive exact match of a coupon kind against a rule's tag
pub fn supports(tag: &str, kind: &str) -> bool {
    tag.eq_ignore_ascii_case(kind)
}

impl Rule {
    /// Selects the rule for a coupon kind and builds it from the parameters.
    ///
    /// This is the ONLY place with a match on kind tags; the first
    /// supporting rule wins.
    pub fn for_coupon(kind: &str, details: &ParamBag) -> CouponResult<Self> {
        let tag = SUPPORTED_KINDS
            .into_iter()
            .find(|tag| supports(tag, kind))
            .ok_or_else(|| CouponError::UnsupportedKind(kind.to_string()))?;

        let rule: Rule = match tag {
            CART_WISE => CartWiseRule::from_params(details)?.into(),
            PRODUCT_WISE => ProductWiseRule::from_params(details)?.into(),
            BXGY => BxGyRule::from_params(details)?.into(),
            _ => return Err(CouponError::UnsupportedKind(kind.to_string())),
        };
        Ok(rule)
    }
}
