//! Storefront flows against an in-memory backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parts_commerce::prelude::*;
use parts_data::{
    CatalogRepository, DataError, InventoryError, InventoryService, OrderError, OrderService,
    RowApi, RowQuery,
};
use parts_store::{CartStore, FileStore, KvStore};
use serde_json::{json, Value};

/// Tables as JSON rows; supports `eq.` filters only.
#[derive(Default)]
struct FakeBackend {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    next_id: Mutex<i64>,
    failing_inserts: Vec<&'static str>,
}

impl FakeBackend {
    fn seeded() -> Self {
        let backend = Self::default();
        backend.seed(
            "products",
            vec![
                json!({"id": 1, "name": "Ceramic Brake Pads", "category": "Brakes", "price": 500, "quantity": 10, "compatible_vehicles": [1]}),
                json!({"id": 2, "name": "Brake Caliper", "category": "Brakes", "price": 1000, "quantity": 3}),
            ],
        );
        backend.seed(
            "vehicles",
            vec![json!({"id": 1, "make": "Toyota", "model": "Vios", "year_start": 2013, "year_end": 2018})],
        );
        backend
    }

    fn failing_on(mut self, table: &'static str) -> Self {
        self.failing_inserts.push(table);
        self
    }

    fn seed(&self, table: &str, rows: Vec<Value>) {
        self.tables.lock().unwrap().insert(table.to_string(), rows);
    }

    fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.lock().unwrap().get(table).cloned().unwrap_or_default()
    }

    fn matches(row: &Value, query: &RowQuery) -> bool {
        query.filter_pairs().iter().all(|(column, filter)| {
            let expected = filter.strip_prefix("eq.").unwrap_or(filter);
            match &row[column.as_str()] {
                Value::String(s) => s == expected,
                other => other.to_string() == expected,
            }
        })
    }
}

#[async_trait]
impl RowApi for FakeBackend {
    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Value>, DataError> {
        Ok(self
            .rows(table)
            .into_iter()
            .filter(|row| Self::matches(row, query))
            .collect())
    }

    async fn insert(&self, table: &str, rows: Value) -> Result<Vec<Value>, DataError> {
        if self.failing_inserts.iter().any(|t| *t == table) {
            return Err(DataError::Connection(format!("{} unavailable", table)));
        }

        let new_rows = match rows {
            Value::Array(rows) => rows,
            row => vec![row],
        };
        let mut inserted = Vec::new();
        let mut tables = self.tables.lock().unwrap();
        for mut row in new_rows {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            row["id"] = json!(*next_id + 1000);
            tables.entry(table.to_string()).or_default().push(row.clone());
            inserted.push(row);
        }
        Ok(inserted)
    }

    async fn update(&self, table: &str, query: &RowQuery, patch: Value) -> Result<Vec<Value>, DataError> {
        let mut tables = self.tables.lock().unwrap();
        let mut updated = Vec::new();
        for row in tables.entry(table.to_string()).or_default().iter_mut() {
            if Self::matches(row, query) {
                if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
                    for (key, value) in fields {
                        target.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, query: &RowQuery) -> Result<(), DataError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| !Self::matches(row, query));
        }
        Ok(())
    }

    async fn upload(&self, bucket: &str, path: &str, _: Vec<u8>, _: &str) -> Result<String, DataError> {
        Ok(format!("memory://{}/{}", bucket, path))
    }
}

fn checkout() -> ValidatedCheckout {
    let mut flow = CheckoutFlow::new();
    flow.set_contact(ContactInfo {
        first_name: "Maricel".to_string(),
        last_name: "Tan".to_string(),
        email: "maricel@example.ph".to_string(),
        phone: "09190001111".to_string(),
    });
    flow.set_delivery(DeliveryMethod::Standard);
    flow.set_address(ShippingAddress {
        street: "12 Rizal St".to_string(),
        barangay: "San Roque".to_string(),
        city: "Marikina".to_string(),
        province: "Metro Manila".to_string(),
        postal_code: "1800".to_string(),
        landmark: Some("Near the church".to_string()),
    });
    flow.set_payment(PaymentMethod::Gcash);
    flow.validate().unwrap()
}

async fn filled_cart(catalog: &CatalogRepository, kv: Arc<dyn KvStore>) -> CartStore {
    let mut cart = CartStore::open(kv).unwrap();
    let products = catalog.products().await.unwrap();
    for product in &products {
        cart.add(&product.cart_product()).unwrap();
    }
    let pads = products.iter().find(|p| p.id == ProductId::new(1)).unwrap();
    cart.add(&pads.cart_product()).unwrap();
    cart
}

#[tokio::test]
async fn order_from_catalog_to_backend() {
    let backend = Arc::new(FakeBackend::seeded());
    let api: Arc<dyn RowApi> = backend.clone();
    let catalog = CatalogRepository::new(api.clone());
    let dir = tempfile::tempdir().unwrap();
    let kv: Arc<dyn KvStore> = Arc::new(FileStore::open(dir.path()).unwrap());

    let mut cart = filled_cart(&catalog, kv.clone()).await;
    let placed = OrderService::new(api).place_order(&checkout(), &mut cart).await.unwrap();

    assert_eq!(placed.total.display(), "\u{20b1}2150.00");
    assert_eq!(placed.item_count, 3);

    let orders = backend.rows("orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["payment_method"], "gcash");
    assert_eq!(orders[0]["shipping_fee"], 150.0);
    assert_eq!(backend.rows("order_items").len(), 2);

    // The emptied cart is what a fresh session sees.
    assert!(CartStore::open(kv).unwrap().cart().is_empty());
}

#[tokio::test]
async fn failed_items_leave_no_orphan_and_keep_cart() {
    let backend = Arc::new(FakeBackend::seeded().failing_on("order_items"));
    let api: Arc<dyn RowApi> = backend.clone();
    let catalog = CatalogRepository::new(api.clone());
    let kv: Arc<dyn KvStore> = Arc::new(parts_store::MemoryStore::new());

    let mut cart = filled_cart(&catalog, kv).await;
    let err = OrderService::new(api).place_order(&checkout(), &mut cart).await.unwrap_err();

    assert!(matches!(err, OrderError::ItemsRolledBack { .. }));
    assert!(backend.rows("orders").is_empty());
    assert_eq!(cart.cart().item_count(), 3);
}

#[tokio::test]
async fn inventory_restored_when_audit_row_fails() {
    let backend = Arc::new(FakeBackend::seeded().failing_on("inventory_transactions"));
    let service = InventoryService::new(backend.clone());

    let err = service
        .adjust(ProductId::new(2), -3, AdjustmentReason::Sale, None)
        .await
        .unwrap_err();

    assert!(matches!(err, InventoryError::Restored { .. }));
    let products = backend.rows("products");
    assert_eq!(products[1]["quantity"], 3);
    assert_eq!(products[1]["in_stock"], true);
}

#[tokio::test]
async fn inventory_adjustment_is_logged() {
    let backend = Arc::new(FakeBackend::seeded());
    let service = InventoryService::new(backend.clone());

    let plan = service
        .adjust(ProductId::new(2), -3, AdjustmentReason::Sale, Some("walk-in".to_string()))
        .await
        .unwrap();

    assert!(!plan.in_stock);
    assert_eq!(backend.rows("products")[1]["quantity"], 0);
    let log = backend.rows("inventory_transactions");
    assert_eq!(log[0]["reason"], "sale");
    assert_eq!(log[0]["notes"], "walk-in");
}

#[tokio::test]
async fn fitment_from_backend_vehicles() {
    let api: Arc<dyn RowApi> = Arc::new(FakeBackend::seeded());
    let catalog = CatalogRepository::new(api);

    let mut selector = FitmentSelector::new(2025);
    selector.begin_loading();
    selector.finish_loading(catalog.vehicle_catalog().await);
    selector.choose_make("Toyota").unwrap();
    selector.choose_model("Vios").unwrap();
    selector.choose_year(2016).unwrap();

    let vehicle = selector.search().unwrap().cloned().unwrap();
    let products = catalog.products().await.unwrap();
    let fitting = ProductQuery::new().with_filter(Filter::fits(vehicle.id)).run(&products);

    // The caliper lists no vehicles, so it fits everything.
    assert_eq!(fitting.items.len(), 2);
}
