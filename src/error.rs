//! Coupon Engine Errors
//!
//! Every failure the engine can report is a deterministic data error: a
//! missing coupon, a kind with no rule, a parameter bag of the wrong shape, a
//! cart line that is not a valid purchase, or an amount beyond the decimal
//! range. A coupon that simply does not apply to a cart is never an error.

use crate::coupon::models::CouponId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised while evaluating or applying coupons.
#[derive(Debug, Error, PartialEq)]
pub enum CouponError {
    /// No coupon is stored under the requested identifier.
    #[error("Coupon not found with ID: {0}")]
    NotFound(CouponId),

    /// No discount rule claims the coupon's kind.
    #[error("Unknown coupon type: {0}")]
    UnsupportedKind(String),

    /// A parameter the rule requires is missing or has the wrong shape.
    #[error("Malformed coupon parameter `{key}`: {reason}")]
    MalformedParameters { key: String, reason: String },

    /// A cart line carries a zero quantity or a negative price.
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    /// A monetary computation left the representable decimal range.
    #[error("Amount out of range")]
    AmountOutOfRange,
}

impl CouponError {
    /// Shorthand for building a [`CouponError::MalformedParameters`].
    pub fn malformed(key: &str, reason: impl Into<String>) -> Self {
        CouponError::MalformedParameters {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            CouponError::NotFound(_) => "coupon_not_found",
            CouponError::UnsupportedKind(_) => "unsupported_coupon_type",
            CouponError::MalformedParameters { .. } => "malformed_coupon_parameters",
            CouponError::InvalidCart(_) => "invalid_cart",
            CouponError::AmountOutOfRange => "amount_out_of_range",
        }
    }

    /// HTTP status the boundary reports for this error.
    pub fn http_status(&self) -> StatusCode {
        match self {
            CouponError::NotFound(_) => StatusCode::NOT_FOUND,
            CouponError::UnsupportedKind(_)
            | CouponError::MalformedParameters { .. }
            | CouponError::InvalidCart(_)
            | CouponError::AmountOutOfRange => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for CouponError {
    fn into_response(self) -> Response {
        let status = self.http_status();

        tracing::warn!(
            code = self.code(),
            status = status.as_u16(),
            error = %self,
            "Coupon request rejected"
        );

        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for Results with CouponError.
pub type CouponResult<T> = Result<T, CouponError>;
