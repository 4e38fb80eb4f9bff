use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Product;

/// In-process cache for single-product recommendation lists.
///
/// Entries stay valid until explicitly invalidated; callers must invalidate
/// whenever associations or stock for involved products change.
#[derive(Clone, Default)]
pub struct RecommendationCache {
    inner: Arc<RwLock<HashMap<Uuid, Vec<Product>>>>,
}

impl RecommendationCache {
    pub async fn get(&self, product_id: Uuid) -> Option<Vec<Product>> {
        self.inner.read().await.get(&product_id).cloned()
    }

    pub async fn put(&self, product_id: Uuid, products: Vec<Product>) {
        self.inner.write().await.insert(product_id, products);
    }

    /// Drop the entry for a single source product.
    pub async fn invalidate(&self, product_id: Uuid) {
        if self.inner.write().await.remove(&product_id).is_some() {
            tracing::debug!(%product_id, "recommendation cache entry invalidated");
        }
    }

    /// Drop every entry. Used for catalog-wide changes where reverse
    /// association edges are not tracked.
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        if !guard.is_empty() {
            tracing::debug!(entries = guard.len(), "recommendation cache cleared");
        }
        guard.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn product(name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price: Decimal::new(1999, 2),
            image_url: None,
            category: "Accessories".to_string(),
            stock: 5,
            rating: 4.2,
            review_count: 10,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn get_returns_what_was_put() {
        let cache = RecommendationCache::default();
        let key = Uuid::new_v4();

        assert!(cache.get(key).await.is_none());

        cache.put(key, vec![product("a"), product("b")]).await;
        let hit = cache.get(key).await.unwrap();
        assert_eq!(hit.len(), 2);
        assert_eq!(hit[0].name, "a");
    }

    #[tokio::test]
    async fn invalidate_drops_only_that_entry() {
        let cache = RecommendationCache::default();
        let keep = Uuid::new_v4();
        let stale = Uuid::new_v4();

        cache.put(keep, vec![product("keep")]).await;
        cache.put(stale, vec![product("stale")]).await;

        cache.invalidate(stale).await;
        assert!(cache.get(stale).await.is_none());
        assert!(cache.get(keep).await.is_some());
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = RecommendationCache::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        cache.put(a, vec![product("a")]).await;
        cache.put(b, vec![product("b")]).await;
        cache.clear().await;

        assert!(cache.get(a).await.is_none());
        assert!(cache.get(b).await.is_none());
    }
}
