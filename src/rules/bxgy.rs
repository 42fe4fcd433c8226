//! Buy-X-get-Y rule
//!
//! ```text
//! buy_count     = Σ quantity of lines whose product is in buy_products
//! repetitions   = min(buy_count / buy_qty, repetition_limit)   (0 if buy_qty == 0)
//! free_items    = repetitions x get_qty
//!
//! get-eligible lines, cheapest first (stable on ties)
//!   ├── line A  price 10  qty 2  → 2 free
//!   ├── line B  price 15  qty 3  → 1 free   (free_items = 3 reached)
//!   └── line C  price 40  qty 1  → untouched
//! ```
//!
//! If the eligible lines run out before `free_items` is reached, the
//! shortfall is simply not discounted.

use rust_decimal::Decimal;

use super::DiscountRule;
use crate::cart::helpers::{add_amounts, times};
use crate::cart::models::Cart;
use crate::coupon::models::{ParamBag, BXGY};
use crate::coupon::params::{self, ProductPool};
use crate::error::CouponResult;

/// Parameter key for the repetition cap (spelling is part of the wire format)
const REPETITION_LIMIT_KEY: &str = "repition_limit";

#[derive(Debug, Clone, PartialEq)]
pub struct BxGyRule {
    pub buy: ProductPool,
    pub get: ProductPool,
    pub repetition_limit: u32,
}

/// Units of one cart line made free
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FreeAllocation {
    /// Position of the line in the cart
    index: usize,
    count: u32,
}

impl BxGyRule {
    pub fn from_params(details: &ParamBag) -> CouponResult<Self> {
        Ok(Self {
            buy: params::product_pool(details, "buy_products")?,
            get: params::product_pool(details, "get_products")?,
            repetition_limit: params::count_or(details, REPETITION_LIMIT_KEY, 1)?,
        })
    }

    /// How many times the buy condition is met, capped by the limit
    pub fn repetitions(&self, cart: &Cart) -> u64 {
        let needed = u64::from(self.buy.quantity_per_repetition);
        if needed == 0 {
            return 0;
        }

        let buy_count: u64 = cart
            .items
            .iter()
            .filter(|item| self.buy.contains(item.product_id))
            .map(|item| u64::from(item.quantity))
            .sum();

        (buy_count / needed).min(u64::from(self.repetition_limit))
    }

    /// Walks the get-eligible lines cheapest first, assigning free units
    fn free_allocations(&self, cart: &Cart) -> Vec<FreeAllocation> {
        let total_free = self.repetitions(cart) * u64::from(self.get.quantity_per_repetition);
        if total_free == 0 {
            return Vec::new();
        }

        let mut eligible: Vec<usize> = cart
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.get.contains(item.product_id))
            .map(|(index, _)| index)
            .collect();
        // Stable sort keeps cart order among equal prices
        eligible.sort_by_key(|&index| cart.items[index].price);

        let mut allocations = Vec::new();
        let mut discounted_so_far: u64 = 0;
        for index in eligible {
            if discounted_so_far >= total_free {
                break;
            }
            let remaining = total_free - discounted_so_far;
            let count = u64::from(cart.items[index].quantity).min(remaining);
            discounted_so_far += count;
            // count <= item quantity, which is a u32
            allocations.push(FreeAllocation {
                index,
                count: count as u32,
            });
        }
        allocations
    }
}

impl DiscountRule for BxGyRule {
    fn kind(&self) -> &'static str {
        BXGY
    }

    fn is_applicable(&self, cart: &Cart) -> CouponResult<bool> {
        Ok(self.repetitions(cart) > 0)
    }

    fn calculate_discount(&self, cart: &Cart) -> CouponResult<Decimal> {
        self.free_allocations(cart)
            .iter()
            .try_fold(Decimal::ZERO, |sum, a| {
                add_amounts(sum, times(cart.items[a.index].price, a.count)?)
            })
    }

    /// Each touched line's discount is replaced by the value of its free
    /// units; untouched lines keep theirs.
    fn apply(&self, cart: &mut Cart) -> CouponResult<()> {
        let repetitions = self.repetitions(cart);
        if repetitions == 0 {
            return Ok(());
        }

        let allocations = self.free_allocations(cart);
        tracing::debug!(repetitions, lines = allocations.len(), "Applying bxgy discount");

        let mut items = cart.items.clone();
        for allocation in allocations {
            let item = &mut items[allocation.index];
            item.total_discount = times(item.price, allocation.count)?;
        }

        cart.replace_items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::models::CartItem;
    use serde_json::{json, Value};

    fn rule_from(details: Value) -> BxGyRule {
        BxGyRule::from_params(details.as_object().unwrap()).unwrap()
    }

    fn pool(product_ids: Vec<u64>, quantity: u32) -> ProductPool {
        ProductPool {
            product_ids,
            quantity_per_repetition: quantity,
        }
    }

    #[test]
    fn test_buy_three_get_one_same_product() {
        let mut cart = Cart::with_items(vec![CartItem::new(1, 6, Decimal::from(50))]).unwrap();
        let rule = rule_from(json!({
            "buy_products": [{ "product_id": 1, "quantity": 3 }],
            "get_products": [{ "product_id": 1, "quantity": 1 }],
            "repition_limit": 2
        }));

        assert_eq!(rule.repetitions(&cart), 2);
        assert!(rule.is_applicable(&cart).unwrap());
        assert_eq!(rule.calculate_discount(&cart).unwrap(), Decimal::from(100));

        rule.apply(&mut cart).unwrap();

        assert_eq!(cart.items[0].total_discount, Decimal::from(100));
        assert_eq!(cart.total_price, Decimal::from(300));
        assert_eq!(cart.total_discount, Decimal::from(100));
        assert_eq!(cart.final_price, Decimal::from(200));
    }

    #[test]
    fn test_repetitions_capped_by_limit() {
        let cart = Cart::with_items(vec![CartItem::new(1, 30, Decimal::from(5))]).unwrap();
        let rule = BxGyRule {
            buy: pool(vec![1], 2),
            get: pool(vec![1], 1),
            repetition_limit: 3,
        };
        assert_eq!(rule.repetitions(&cart), 3);
        assert_eq!(rule.calculate_discount(&cart).unwrap(), Decimal::from(15));
    }

    #[test]
    fn test_limit_defaults_to_one() {
        let rule = rule_from(json!({
            "buy_products": [{ "product_id": 1, "quantity": 1 }],
            "get_products": [{ "product_id": 2, "quantity": 1 }]
        }));
        assert_eq!(rule.repetition_limit, 1);
    }

    #[test]
    fn test_buy_count_sums_across_buy_products() {
        let cart = Cart::with_items(vec![
            CartItem::new(1, 2, Decimal::from(50)),
            CartItem::new(2, 2, Decimal::from(30)),
            CartItem::new(3, 1, Decimal::from(25)),
        ])
        .unwrap();
        let rule = BxGyRule {
            buy: pool(vec![1, 2], 2),
            get: pool(vec![3], 1),
            repetition_limit: 5,
        };
        assert_eq!(rule.repetitions(&cart), 2);
        // Only one unit of product 3 exists, the second free unit is lost
        assert_eq!(rule.calculate_discount(&cart).unwrap(), Decimal::from(25));
    }

    #[test]
    fn test_not_applicable_below_buy_quantity() {
        let mut cart = Cart::with_items(vec![
            CartItem::new(1, 2, Decimal::from(50)),
            CartItem::new(3, 1, Decimal::from(25)),
        ])
        .unwrap();
        let rule = BxGyRule {
            buy: pool(vec![1], 3),
            get: pool(vec![3], 1),
            repetition_limit: 2,
        };
        let before = cart.clone();

        assert!(!rule.is_applicable(&cart).unwrap());
        assert_eq!(rule.calculate_discount(&cart).unwrap(), Decimal::ZERO);
        rule.apply(&mut cart).unwrap();
        assert_eq!(cart, before);
    }

    #[test]
    fn test_zero_buy_quantity_never_applies() {
        let cart = Cart::with_items(vec![CartItem::new(1, 10, Decimal::from(5))]).unwrap();
        let rule = BxGyRule {
            buy: pool(vec![1], 0),
            get: pool(vec![1], 1),
            repetition_limit: 5,
        };
        assert_eq!(rule.repetitions(&cart), 0);
        assert!(!rule.is_applicable(&cart).unwrap());
    }

    #[test]
    fn test_cheapest_items_discounted_first() {
        let mut cart = Cart::with_items(vec![
            CartItem::new(10, 1, Decimal::from(40)),
            CartItem::new(11, 3, Decimal::from(15)),
            CartItem::new(12, 2, Decimal::from(10)),
            CartItem::new(1, 6, Decimal::from(20)),
        ])
        .unwrap();
        let rule = BxGyRule {
            buy: pool(vec![1], 2),
            get: pool(vec![10, 11, 12], 1),
            repetition_limit: 3,
        };

        // 3 free units: both 10s, then one 15
        assert_eq!(rule.calculate_discount(&cart).unwrap(), Decimal::from(35));

        rule.apply(&mut cart).unwrap();

        assert!(cart.items[0].total_discount.is_zero());
        assert_eq!(cart.items[1].total_discount, Decimal::from(15));
        assert_eq!(cart.items[2].total_discount, Decimal::from(20));
        assert_eq!(cart.total_discount, Decimal::from(35));
        assert_eq!(cart.final_price, cart.total_price - cart.total_discount);
    }

    #[test]
    fn test_equal_prices_keep_cart_order() {
        let mut cart = Cart::with_items(vec![
            CartItem::new(1, 2, Decimal::from(10)),
            CartItem::new(7, 1, Decimal::from(10)),
            CartItem::new(8, 1, Decimal::from(10)),
        ])
        .unwrap();
        let rule = BxGyRule {
            buy: pool(vec![1], 2),
            get: pool(vec![7, 8], 1),
            repetition_limit: 1,
        };

        rule.apply(&mut cart).unwrap();

        assert_eq!(cart.items[1].total_discount, Decimal::from(10));
        assert!(cart.items[2].total_discount.is_zero());
    }

    #[test]
    fn test_apply_overwrites_previous_line_discount() {
        let mut cart = Cart::with_items(vec![CartItem::new(1, 6, Decimal::from(50))]).unwrap();
        cart.items[0].total_discount = Decimal::from(7);
        let rule = BxGyRule {
            buy: pool(vec![1], 3),
            get: pool(vec![1], 1),
            repetition_limit: 1,
        };

        rule.apply(&mut cart).unwrap();

        assert_eq!(cart.items[0].total_discount, Decimal::from(50));
        assert_eq!(cart.final_price, Decimal::from(250));
    }

    #[test]
    fn test_free_items_never_exceed_eligible_quantity() {
        let cart = Cart::with_items(vec![
            CartItem::new(1, 100, Decimal::from(1)),
            CartItem::new(2, 2, Decimal::from(3)),
        ])
        .unwrap();
        let rule = BxGyRule {
            buy: pool(vec![1], 1),
            get: pool(vec![2], 4),
            repetition_limit: 50,
        };
        let free: u32 = rule.free_allocations(&cart).iter().map(|a| a.count).sum();
        assert_eq!(free, 2);
        assert_eq!(rule.calculate_discount(&cart).unwrap(), Decimal::from(6));
    }
}
