//! Coupon Store State Management
//!
//! This module manages the application state: an in-memory coupon catalog
//! keyed by coupon id, plus optional seeding from a JSON file at startup.

use super::models::{Coupon, CouponId, CouponInput};
use crate::config::ConfigError;
use crate::engine::CouponSource;
use crate::error::{CouponError, CouponResult};
use dashmap::DashMap;
use std::{
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing the coupon catalog
pub struct AppState {
    /// In-memory storage for coupons, keyed by coupon id.
    /// DashMap allows concurrent access without external Mutexes.
    pub coupons: DashMap<CouponId, Coupon>,

    /// Next identifier to hand out; ids start at 1 and are never reused.
    next_id: AtomicU64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new AppState with an empty catalog
    pub fn new() -> Self {
        Self {
            coupons: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Stores a new coupon under a freshly assigned id
    pub fn create(&self, input: CouponInput) -> Coupon {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let coupon = input.into_coupon(id);
        self.coupons.insert(id, coupon.clone());

        tracing::info!(coupon_id = id, kind = %coupon.kind, "Created coupon");
        coupon
    }

    /// Looks up a coupon by id
    pub fn get(&self, id: CouponId) -> Option<Coupon> {
        self.coupons.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns every coupon in ascending id order
    pub fn list_all(&self) -> Vec<Coupon> {
        let mut coupons: Vec<Coupon> = self
            .coupons
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        coupons.sort_by_key(|c| c.id);
        coupons
    }

    /// Replaces kind, details and active flag of an existing coupon
    pub fn update(&self, id: CouponId, input: CouponInput) -> CouponResult<Coupon> {
        let mut entry = self.coupons.get_mut(&id).ok_or(CouponError::NotFound(id))?;
        *entry = input.into_coupon(id);

        tracing::info!(coupon_id = id, kind = %entry.kind, "Updated coupon");
        Ok(entry.clone())
    }

    /// Removes a coupon, returning what was stored
    pub fn delete(&self, id: CouponId) -> CouponResult<Coupon> {
        let (_, coupon) = self.coupons.remove(&id).ok_or(CouponError::NotFound(id))?;

        tracing::info!(coupon_id = id, "Deleted coupon");
        Ok(coupon)
    }

    /// Bulk-creates coupons in the given order, returning how many were stored
    pub fn seed(&self, inputs: Vec<CouponInput>) -> usize {
        let count = inputs.len();
        for input in inputs {
            self.create(input);
        }
        count
    }

    /// Reads a JSON array of coupon definitions and stores them
    pub async fn load_seed_file(&self, path: &Path) -> Result<usize, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::SeedFile {
                path: path.to_path_buf(),
                source,
            })?;

        let inputs: Vec<CouponInput> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::SeedFormat {
                path: path.to_path_buf(),
                source,
            })?;

        let count = self.seed(inputs);
        tracing::info!(path = %path.display(), count, "Seeded coupon catalog");
        Ok(count)
    }
}

impl CouponSource for AppState {
    fn get(&self, id: CouponId) -> Option<Coupon> {
        AppState::get(self, id)
    }

    fn list_all(&self) -> Vec<Coupon> {
        AppState::list_all(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(kind: &str) -> CouponInput {
        serde_json::from_value(json!({
            "type": kind,
            "details": { "threshold": 100, "discount": 10 }
        }))
        .unwrap()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let state = AppState::new();
        let first = state.create(input("cart-wise"));
        let second = state.create(input("product-wise"));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.is_active);
        assert_eq!(state.get(2).unwrap().kind, "product-wise");
    }

    #[test]
    fn test_list_all_is_ordered_by_id() {
        let state = AppState::new();
        state.seed((0..20).map(|_| input("cart-wise")).collect());

        let ids: Vec<CouponId> = state.list_all().iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let state = AppState::new();
        let coupon = state.create(input("cart-wise"));

        let replacement: CouponInput = serde_json::from_value(json!({
            "type": "bxgy",
            "details": {},
            "active": false
        }))
        .unwrap();
        let updated = state.update(coupon.id, replacement).unwrap();

        assert_eq!(updated.kind, "bxgy");
        assert!(updated.details.is_empty());
        assert!(!updated.is_active);
        assert_eq!(state.get(coupon.id), Some(updated));
    }

    #[test]
    fn test_update_and_delete_missing_coupon() {
        let state = AppState::new();
        assert_eq!(
            state.update(9, input("cart-wise")),
            Err(CouponError::NotFound(9))
        );
        assert_eq!(state.delete(9), Err(CouponError::NotFound(9)));
    }

    #[test]
    fn test_delete_removes_and_does_not_reuse_id() {
        let state = AppState::new();
        let coupon = state.create(input("cart-wise"));
        assert_eq!(state.delete(coupon.id).unwrap(), coupon);
        assert!(state.get(coupon.id).is_none());

        let next = state.create(input("cart-wise"));
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_load_seed_file_missing_path() {
        let state = AppState::new();
        let result = state
            .load_seed_file(Path::new("/nonexistent/coupons.json"))
            .await;
        assert!(matches!(result, Err(ConfigError::SeedFile { .. })));
    }

    #[tokio::test]
    async fn test_load_seed_file_stores_coupons_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coupons.json");
        std::fs::write(
            &path,
            json!([
                { "type": "cart-wise", "details": { "threshold": 100, "discount": 10 } },
                { "type": "product-wise", "details": { "product_id": 1, "discount": 20 } },
                { "type": "bxgy", "details": { "buy_products": [], "get_products": [] }, "is_active": false }
            ])
            .to_string(),
        )
        .unwrap();

        let state = AppState::new();
        let count = state.load_seed_file(&path).await.unwrap();

        assert_eq!(count, 3);
        let coupons = state.list_all();
        let summary: Vec<(CouponId, &str, bool)> = coupons
            .iter()
            .map(|c| (c.id, c.kind.as_str(), c.is_active))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "cart-wise", true),
                (2, "product-wise", true),
                (3, "bxgy", false)
            ]
        );

        // Ids handed out after seeding continue the sequence
        assert_eq!(state.create(input("cart-wise")).id, 4);
    }

    #[tokio::test]
    async fn test_load_seed_file_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coupons.json");
        std::fs::write(&path, r#"{ "type": "cart-wise", "details": {} }"#).unwrap();

        let state = AppState::new();
        let result = state.load_seed_file(&path).await;

        assert!(matches!(result, Err(ConfigError::SeedFormat { .. })));
        assert!(state.list_all().is_empty());
    }
}
