//! Coupon Service Library
//!
//! This library provides the coupon discount engine and the HTTP service
//! around it: a coupon catalog, three discount rules (cart-wise,
//! product-wise, buy-X-get-Y) and endpoints to list and apply coupons to a
//! cart.

// Domain modules
pub mod cart;
pub mod coupon;
pub mod engine;
pub mod rules;

// Infrastructure
pub mod config;
pub mod error;
pub mod logger;
pub mod router;
