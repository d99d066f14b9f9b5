//! Order placement.
//!
//! An order is two writes: the `orders` header, then its `order_items`. The
//! backend offers no transaction across them, so a failed item write is
//! compensated by deleting the header it would have belonged to.

use std::sync::Arc;

use parts_commerce::checkout::{OrderDraft, PlacedOrder, ValidatedCheckout};
use parts_commerce::prelude::*;
use parts_store::CartStore;
use serde_json::Value;

use crate::client::RowApi;
use crate::error::DataError;
use crate::query::RowQuery;
use crate::records::{InsertedId, NewOrderItemRecord, NewOrderRecord, ORDERS, ORDER_ITEMS};

/// Why an order was not placed.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// The checkout or cart cannot form an order; nothing was written.
    #[error("Order is not valid: {0}")]
    Invalid(#[from] CommerceError),

    /// The header insert failed; nothing was written.
    #[error("Failed to create order: {0}")]
    Header(#[source] DataError),

    /// The items insert failed and the header was deleted again.
    #[error("Failed to save items for order {order_id}; the order was withdrawn: {source}")]
    ItemsRolledBack {
        order_id: OrderId,
        #[source]
        source: DataError,
    },

    /// The items insert failed and so did deleting the header, leaving an
    /// order without items in the backend.
    #[error("Failed to save items for order {order_id} and could not withdraw it: {source} (rollback: {rollback})")]
    RollbackFailed {
        order_id: OrderId,
        #[source]
        source: DataError,
        rollback: DataError,
    },
}

impl OrderError {
    /// Whether the backend may hold a partial order.
    pub fn left_orphan(&self) -> bool {
        matches!(self, OrderError::RollbackFailed { .. })
    }
}

/// Writes orders to the backend.
#[derive(Clone)]
pub struct OrderService {
    api: Arc<dyn RowApi>,
}

impl OrderService {
    pub fn new(api: Arc<dyn RowApi>) -> Self {
        Self { api }
    }

    /// Place an order for the persisted cart.
    ///
    /// The cart is cleared only after both writes succeed. Failing to clear
    /// it afterwards is logged but does not undo the order.
    pub async fn place_order(
        &self,
        checkout: &ValidatedCheckout,
        cart: &mut CartStore,
    ) -> Result<PlacedOrder, OrderError> {
        let draft = OrderDraft::from_checkout(checkout, cart.cart())?;
        let placed = self.place_draft(&draft).await?;

        if let Err(e) = cart.clear() {
            tracing::warn!(order_id = %placed.id, error = %e, "Order placed but cart was not cleared");
        }
        Ok(placed)
    }

    /// Write a prepared draft: header, then items, compensating on failure.
    pub async fn place_draft(&self, draft: &OrderDraft) -> Result<PlacedOrder, OrderError> {
        let header = serde_json::to_value(NewOrderRecord::from(draft))
            .map_err(|e| OrderError::Header(e.into()))?;

        let order_id = match self.api.insert(ORDERS, header).await {
            Ok(rows) => inserted_id(rows).map_err(OrderError::Header)?,
            Err(e) => {
                tracing::error!(order_number = %draft.order_number, error = %e, "Failed to create order");
                return Err(OrderError::Header(e));
            }
        };

        let items = NewOrderItemRecord::for_order(order_id, draft);
        let items_result = match serde_json::to_value(&items) {
            Ok(payload) => self.api.insert(ORDER_ITEMS, payload).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };

        if let Err(source) = items_result {
            tracing::error!(order_id = %order_id, error = %source, "Failed to save order items, withdrawing order");
            let query = RowQuery::new().eq("id", order_id);
            return match self.api.delete(ORDERS, &query).await {
                Ok(()) => Err(OrderError::ItemsRolledBack { order_id, source }),
                Err(rollback) => {
                    tracing::error!(order_id = %order_id, error = %rollback, "Failed to withdraw order");
                    Err(OrderError::RollbackFailed {
                        order_id,
                        source,
                        rollback,
                    })
                }
            };
        }

        tracing::info!(
            order_id = %order_id,
            order_number = %draft.order_number,
            total = %draft.total.display(),
            items = draft.lines.len(),
            "Order placed"
        );

        Ok(PlacedOrder {
            id: order_id,
            order_number: draft.order_number.clone(),
            total: draft.total,
            item_count: draft.item_count(),
        })
    }
}

fn inserted_id(rows: Vec<Value>) -> Result<OrderId, DataError> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| DataError::invalid_row(ORDERS, "insert returned no row"))?;
    let inserted: InsertedId =
        serde_json::from_value(row).map_err(|e| DataError::invalid_row(ORDERS, e.to_string()))?;
    Ok(OrderId::new(inserted.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRowApi;
    use parts_store::MemoryStore;
    use serde_json::json;

    fn checkout() -> ValidatedCheckout {
        ValidatedCheckout {
            contact: ContactInfo {
                first_name: "Jun".to_string(),
                last_name: "Dela Cruz".to_string(),
                email: "jun@example.ph".to_string(),
                phone: "09171234567".to_string(),
            },
            delivery: DeliveryMethod::Pickup {
                store_id: StoreId::new(2),
            },
            address: None,
            payment: PaymentMethod::CashOnDelivery,
            notes: None,
        }
    }

    fn cart_with_pads() -> CartStore {
        let mut cart = CartStore::open(Arc::new(MemoryStore::new())).unwrap();
        cart.add(&CartProduct {
            id: ProductId::new(5),
            name: "Brake Pads".to_string(),
            category: "Brakes".to_string(),
            unit_price: Money::new(150_000, Currency::PHP),
            image_url: None,
        })
        .unwrap();
        cart
    }

    #[tokio::test]
    async fn test_place_order_writes_header_then_items_and_clears_cart() {
        let mut api = MockRowApi::new();
        api.expect_insert()
            .withf(|table, _| table == ORDERS)
            .times(1)
            .returning(|_, _| Ok(vec![json!({"id": 77})]));
        api.expect_insert()
            .withf(|table, rows| {
                table == ORDER_ITEMS && rows[0]["order_id"] == 77 && rows[0]["price_at_purchase"] == 1500.0
            })
            .times(1)
            .returning(|_, rows| Ok(rows.as_array().cloned().unwrap_or_default()));
        api.expect_delete().never();

        let mut cart = cart_with_pads();
        let placed = OrderService::new(Arc::new(api))
            .place_order(&checkout(), &mut cart)
            .await
            .unwrap();

        assert_eq!(placed.id, OrderId::new(77));
        assert_eq!(placed.total, Money::new(150_000, Currency::PHP));
        assert!(cart.cart().is_empty());
    }

    #[tokio::test]
    async fn test_item_failure_deletes_header_and_keeps_cart() {
        let mut api = MockRowApi::new();
        api.expect_insert()
            .withf(|table, _| table == ORDERS)
            .returning(|_, _| Ok(vec![json!({"id": 78})]));
        api.expect_insert()
            .withf(|table, _| table == ORDER_ITEMS)
            .returning(|_, _| Err(DataError::Connection("reset".to_string())));
        api.expect_delete()
            .withf(|table, query| table == ORDERS && query.filter_pairs() == vec![("id".to_string(), "eq.78".to_string())])
            .times(1)
            .returning(|_, _| Ok(()));

        let mut cart = cart_with_pads();
        let result = OrderService::new(Arc::new(api))
            .place_order(&checkout(), &mut cart)
            .await;

        match result {
            Err(OrderError::ItemsRolledBack { order_id, .. }) => assert_eq!(order_id, OrderId::new(78)),
            other => panic!("expected rollback, got {:?}", other),
        }
        assert_eq!(cart.cart().item_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_rollback_is_reported() {
        let mut api = MockRowApi::new();
        api.expect_insert()
            .withf(|table, _| table == ORDERS)
            .returning(|_, _| Ok(vec![json!({"id": 79})]));
        api.expect_insert()
            .withf(|table, _| table == ORDER_ITEMS)
            .returning(|_, _| Err(DataError::Timeout("/rest/v1/order_items".to_string())));
        api.expect_delete()
            .returning(|_, _| Err(DataError::Timeout("/rest/v1/orders".to_string())));

        let mut cart = cart_with_pads();
        let err = OrderService::new(Arc::new(api))
            .place_order(&checkout(), &mut cart)
            .await
            .unwrap_err();

        assert!(err.left_orphan());
    }

    #[tokio::test]
    async fn test_header_failure_writes_nothing_else() {
        let mut api = MockRowApi::new();
        api.expect_insert()
            .times(1)
            .returning(|_, _| Err(DataError::Http {
                status: 400,
                resource: ORDERS.to_string(),
                message: "bad request".to_string(),
            }));
        api.expect_delete().never();

        let mut cart = cart_with_pads();
        let err = OrderService::new(Arc::new(api))
            .place_order(&checkout(), &mut cart)
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Header(_)));
        assert!(!cart.cart().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_never_reaches_backend() {
        let api = MockRowApi::new();
        let mut cart = CartStore::open(Arc::new(MemoryStore::new())).unwrap();

        let err = OrderService::new(Arc::new(api))
            .place_order(&checkout(), &mut cart)
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Invalid(CommerceError::EmptyCart)));
    }
}
