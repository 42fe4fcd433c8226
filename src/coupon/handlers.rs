//! REST API handlers for the coupon catalog

use super::{models::*, state::SharedState};
use crate::error::{CouponError, CouponResult};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

/// Creates routes for coupon catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/coupons", post(create_coupon).get(list_coupons))
        .route(
            "/coupons/:id",
            get(get_coupon).put(update_coupon).delete(delete_coupon),
        )
}

/// Endpoint: POST /coupons
async fn create_coupon(
    State(state): State<SharedState>,
    Json(payload): Json<CouponInput>,
) -> Json<Coupon> {
    Json(state.create(payload))
}

/// Endpoint: GET /coupons
async fn list_coupons(State(state): State<SharedState>) -> Json<Vec<Coupon>> {
    Json(state.list_all())
}

/// Endpoint: GET /coupons/:id
async fn get_coupon(
    State(state): State<SharedState>,
    Path(id): Path<CouponId>,
) -> CouponResult<Json<Coupon>> {
    state.get(id).map(Json).ok_or(CouponError::NotFound(id))
}

/// Endpoint: PUT /coupons/:id
async fn update_coupon(
    State(state): State<SharedState>,
    Path(id): Path<CouponId>,
    Json(payload): Json<CouponInput>,
) -> CouponResult<Json<Coupon>> {
    state.update(id, payload).map(Json)
}

/// Endpoint: DELETE /coupons/:id
async fn delete_coupon(
    State(state): State<SharedState>,
    Path(id): Path<CouponId>,
) -> CouponResult<Json<Coupon>> {
    state.delete(id).map(Json)
}
