//! Stock adjustments with an audit trail.

use std::sync::Arc;

use parts_commerce::prelude::*;
use serde_json::json;

use crate::catalog::CatalogRepository;
use crate::client::RowApi;
use crate::error::DataError;
use crate::query::RowQuery;
use crate::records::{NewInventoryTransactionRecord, INVENTORY_TRANSACTIONS, PRODUCTS};

/// Why a stock adjustment did not take effect.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Failed to read product {product_id}: {source}")]
    Read {
        product_id: ProductId,
        #[source]
        source: DataError,
    },

    #[error("Failed to update stock for product {product_id}: {source}")]
    Update {
        product_id: ProductId,
        #[source]
        source: DataError,
    },

    /// The audit row failed and the previous quantity was put back.
    #[error("Failed to record adjustment for product {product_id}; stock was restored: {source}")]
    Restored {
        product_id: ProductId,
        #[source]
        source: DataError,
    },

    /// The audit row failed and restoring the quantity failed too.
    #[error("Failed to record adjustment for product {product_id} and could not restore stock: {source} (restore: {restore})")]
    RestoreFailed {
        product_id: ProductId,
        #[source]
        source: DataError,
        restore: DataError,
    },
}

/// Applies stock changes to `products` and logs each one to
/// `inventory_transactions`.
#[derive(Clone)]
pub struct InventoryService {
    api: Arc<dyn RowApi>,
    catalog: CatalogRepository,
}

impl InventoryService {
    pub fn new(api: Arc<dyn RowApi>) -> Self {
        Self {
            catalog: CatalogRepository::new(api.clone()),
            api,
        }
    }

    /// Shift a product's stock by `delta`, never below zero.
    ///
    /// A plan that changes nothing is returned without writing.
    pub async fn adjust(
        &self,
        product_id: ProductId,
        delta: i64,
        reason: AdjustmentReason,
        notes: Option<String>,
    ) -> Result<AdjustmentPlan, InventoryError> {
        let product = self
            .catalog
            .product(product_id)
            .await
            .map_err(|source| InventoryError::Read { product_id, source })?;

        let plan = product.inventory().plan_adjustment(delta, reason);
        if plan.is_noop() {
            tracing::debug!(product_id = %product_id, delta, "Adjustment changes nothing");
            return Ok(plan);
        }

        let by_id = RowQuery::new().eq("id", product_id);
        let updated = self
            .api
            .update(PRODUCTS, &by_id, stock_patch(plan.new_quantity))
            .await
            .and_then(|rows| {
                if rows.is_empty() {
                    Err(DataError::NotFound(format!("product {}", product_id)))
                } else {
                    Ok(rows)
                }
            });
        if let Err(source) = updated {
            tracing::error!(product_id = %product_id, error = %source, "Failed to update stock");
            return Err(InventoryError::Update { product_id, source });
        }

        let record = NewInventoryTransactionRecord::new(product_id, &plan, notes);
        let logged = match serde_json::to_value(&record) {
            Ok(row) => self.api.insert(INVENTORY_TRANSACTIONS, row).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };

        if let Err(source) = logged {
            tracing::error!(product_id = %product_id, error = %source, "Failed to record adjustment, restoring stock");
            return match self
                .api
                .update(PRODUCTS, &by_id, stock_patch(plan.previous_quantity))
                .await
            {
                Ok(_) => Err(InventoryError::Restored { product_id, source }),
                Err(restore) => Err(InventoryError::RestoreFailed {
                    product_id,
                    source,
                    restore,
                }),
            };
        }

        tracing::info!(
            product_id = %product_id,
            reason = plan.reason.as_str(),
            previous = plan.previous_quantity,
            new = plan.new_quantity,
            "Stock adjusted"
        );
        Ok(plan)
    }
}

fn stock_patch(quantity: i64) -> serde_json::Value {
    json!({ "quantity": quantity, "in_stock": quantity > 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRowApi;

    fn product_row(quantity: i64) -> serde_json::Value {
        json!({"id": 3, "name": "Fan Belt", "category": "Engine", "price": 420, "quantity": quantity})
    }

    #[tokio::test]
    async fn test_sale_updates_stock_and_logs() {
        let mut api = MockRowApi::new();
        api.expect_select().returning(|_, _| Ok(vec![product_row(2)]));
        api.expect_update()
            .withf(|table, _, patch| table == PRODUCTS && patch["quantity"] == 0 && patch["in_stock"] == false)
            .times(1)
            .returning(|_, _, patch| Ok(vec![patch]));
        api.expect_insert()
            .withf(|table, row| table == INVENTORY_TRANSACTIONS && row["quantity_change"] == -2)
            .times(1)
            .returning(|_, row| Ok(vec![row]));

        let plan = InventoryService::new(Arc::new(api))
            .adjust(ProductId::new(3), -5, AdjustmentReason::Sale, None)
            .await
            .unwrap();

        assert_eq!(plan.new_quantity, 0);
        assert!(!plan.in_stock);
    }

    #[tokio::test]
    async fn test_failed_log_restores_previous_quantity() {
        let mut api = MockRowApi::new();
        api.expect_select().returning(|_, _| Ok(vec![product_row(4)]));
        api.expect_update()
            .withf(|_, _, patch| patch["quantity"] == 14)
            .times(1)
            .returning(|_, _, patch| Ok(vec![patch]));
        api.expect_update()
            .withf(|_, _, patch| patch["quantity"] == 4 && patch["in_stock"] == true)
            .times(1)
            .returning(|_, _, patch| Ok(vec![patch]));
        api.expect_insert()
            .returning(|_, _| Err(DataError::Connection("reset".to_string())));

        let err = InventoryService::new(Arc::new(api))
            .adjust(ProductId::new(3), 10, AdjustmentReason::Restock, Some("PO-118".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, InventoryError::Restored { .. }));
    }

    #[tokio::test]
    async fn test_noop_adjustment_writes_nothing() {
        let mut api = MockRowApi::new();
        api.expect_select().returning(|_, _| Ok(vec![product_row(0)]));
        api.expect_update().never();
        api.expect_insert().never();

        let plan = InventoryService::new(Arc::new(api))
            .adjust(ProductId::new(3), -1, AdjustmentReason::Damaged, None)
            .await
            .unwrap();
        assert!(plan.is_noop());
    }

    #[tokio::test]
    async fn test_product_gone_before_update_writes_no_log() {
        let mut api = MockRowApi::new();
        api.expect_select().returning(|_, _| Ok(vec![product_row(6)]));
        api.expect_update().times(1).returning(|_, _, _| Ok(vec![]));
        api.expect_insert().never();

        let err = InventoryService::new(Arc::new(api))
            .adjust(ProductId::new(3), 4, AdjustmentReason::Restock, None)
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Update { source: DataError::NotFound(_), .. }));
    }

    #[tokio::test]
    async fn test_missing_product_is_a_read_error() {
        let mut api = MockRowApi::new();
        api.expect_select().returning(|_, _| Ok(vec![]));

        let err = InventoryService::new(Arc::new(api))
            .adjust(ProductId::new(3), 1, AdjustmentReason::Return, None)
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Read { source: DataError::NotFound(_), .. }));
    }
}
