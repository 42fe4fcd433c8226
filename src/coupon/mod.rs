//! Coupon Catalog Module
//!
//! This module contains the coupon side of the service, including:
//! - Domain models (Coupon, kind tags, listing responses)
//! - Typed extraction from the loosely-typed parameter bag
//! - The in-memory coupon store
//! - REST API handlers for coupon CRUD

pub mod handlers;
pub mod models;
pub mod params;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Coupon, CouponId, CouponInput};
pub use state::{AppState, SharedState};
