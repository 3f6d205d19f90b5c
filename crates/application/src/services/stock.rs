//! Stock validation port and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

/// Answers whether a quantity of a product is currently available.
///
/// A positive answer is a point-in-time check, not a reservation.
#[async_trait]
pub trait StockValidationService: Send + Sync {
    /// Returns `Ok(false)` for unknown products.
    async fn is_product_in_stock(&self, product_id: &str, requested_amount: u32) -> Result<bool>;
}

/// Stock table held in memory.
///
/// Used by tests and by the server when no inventory service is configured.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockService {
    stock: Arc<RwLock<HashMap<String, u32>>>,
}

impl InMemoryStockService {
    /// Creates a service that knows no products.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service from `(product_id, available)` pairs.
    pub fn with_stock<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        let stock = entries
            .into_iter()
            .map(|(product_id, available)| (product_id.into(), available))
            .collect();
        Self {
            stock: Arc::new(RwLock::new(stock)),
        }
    }

    /// The demo catalogue served when no inventory backend is configured.
    pub fn demo() -> Self {
        Self::with_stock([("12345", 10), ("67890", 0), ("54321", 5), ("99999", 0)])
    }

    /// Sets the available quantity of a product.
    pub async fn set_stock(&self, product_id: impl Into<String>, available: u32) {
        self.stock.write().await.insert(product_id.into(), available);
    }

    /// Returns the available quantity, if the product is known.
    pub async fn available(&self, product_id: &str) -> Option<u32> {
        self.stock.read().await.get(product_id).copied()
    }
}

#[async_trait]
impl StockValidationService for InMemoryStockService {
    async fn is_product_in_stock(&self, product_id: &str, requested_amount: u32) -> Result<bool> {
        Ok(self
            .available(product_id)
            .await
            .is_some_and(|available| available >= requested_amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_product_with_enough_stock() {
        let service = InMemoryStockService::with_stock([("12345", 10)]);

        assert!(service.is_product_in_stock("12345", 2).await.unwrap());
        assert!(service.is_product_in_stock("12345", 10).await.unwrap());
        assert!(!service.is_product_in_stock("12345", 11).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_product_is_out_of_stock() {
        let service = InMemoryStockService::new();

        assert!(!service.is_product_in_stock("12345", 0).await.unwrap());
    }

    #[tokio::test]
    async fn test_demo_catalogue() {
        let service = InMemoryStockService::demo();

        assert_eq!(service.available("12345").await, Some(10));
        assert_eq!(service.available("67890").await, Some(0));
        assert_eq!(service.available("54321").await, Some(5));
        assert_eq!(service.available("99999").await, Some(0));
        assert!(!service.is_product_in_stock("67890", 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_stock_is_shared_between_clones() {
        let service = InMemoryStockService::new();
        let clone = service.clone();

        clone.set_stock("12345", 3).await;

        assert!(service.is_product_in_stock("12345", 3).await.unwrap());
    }
}
