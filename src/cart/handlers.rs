//! REST API handlers for evaluating coupons against a cart
//!
//! Both endpoints take the cart in the request body; nothing about the cart
//! is stored between calls.

use super::{helpers::format_item_summary, models::*};
use crate::coupon::models::{ApplicableCouponsResponse, CouponId};
use crate::coupon::state::SharedState;
use crate::engine;
use crate::error::CouponResult;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};

/// Creates routes for cart evaluation operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/applicable-coupons", post(applicable_coupons))
        .route("/apply-coupon/:id", post(apply_coupon))
}

/// Endpoint: POST /applicable-coupons
/// Lists every stored coupon that applies to the cart with its potential discount.
async fn applicable_coupons(
    State(state): State<SharedState>,
    Json(payload): Json<CartInput>,
) -> CouponResult<Json<ApplicableCouponsResponse>> {
    let cart = payload.into_cart()?;

    let applicable_coupons = engine::list_applicable(state.as_ref(), &cart)?;

    tracing::info!(
        items = %format_item_summary(&cart.items),
        applicable = applicable_coupons.len(),
        "Evaluated applicable coupons"
    );

    Ok(Json(ApplicableCouponsResponse { applicable_coupons }))
}

/// Endpoint: POST /apply-coupon/:id
/// Applies one coupon and returns the updated cart.
async fn apply_coupon(
    State(state): State<SharedState>,
    Path(coupon_id): Path<CouponId>,
    Json(payload): Json<CartInput>,
) -> CouponResult<Json<UpdatedCartResponse>> {
    let mut cart = payload.into_cart()?;

    let applied = engine::apply_coupon(state.as_ref(), coupon_id, &mut cart)?;

    tracing::info!(
        coupon_id,
        applied,
        total_discount = %cart.total_discount,
        final_price = %cart.final_price,
        "Applied coupon to cart"
    );

    Ok(Json(UpdatedCartResponse { updated_cart: cart }))
}
