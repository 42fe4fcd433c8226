//! Shopping Cart Domain Module
//!
//! This module contains the cart side of coupon evaluation, including:
//! - Domain models (Cart, CartItem, request/response wrappers)
//! - The cart aggregator (pure total computation)
//! - Exact decimal wire encoding for money
//! - REST API handlers for listing and applying coupons

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod money;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Cart, CartItem, ProductId};
