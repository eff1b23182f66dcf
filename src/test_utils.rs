//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database, creating products and sales
//! with sensible defaults, and building in-memory sales for the pure
//! aggregation tests.

use crate::{
    core::{
        product,
        sale::{self, Sale, SaleItemInput, SaleLine},
        widget::SummaryStore,
    },
    entities,
    errors::Result,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::DatabaseConnection;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product priced at 1000.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, name, 1000).await
}

/// Creates a test product with a custom price.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: i64,
) -> Result<entities::product::Model> {
    product::create_product(db, name, price).await
}

/// Records a sale from `(product_id, quantity)` pairs.
pub async fn record_test_sale(
    db: &DatabaseConnection,
    sold_at: NaiveDateTime,
    items: &[(i64, i32)],
) -> Result<Sale> {
    let inputs: Vec<SaleItemInput> = items
        .iter()
        .map(|&(product_id, quantity)| SaleItemInput {
            product_id,
            quantity,
        })
        .collect();
    sale::record_sale(db, sold_at, &inputs).await
}

/// Midnight of the given date.
///
/// # Panics
/// Panics on an invalid date.
#[allow(clippy::unwrap_used)]
pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_time(NaiveTime::MIN)
}

/// An in-memory product that never touches the database.
pub fn test_product(id: i64, name: &str, price: i64) -> Arc<entities::product::Model> {
    let now = at(2025, 1, 1);
    Arc::new(entities::product::Model {
        id,
        name: name.to_string(),
        price,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    })
}

/// A line item with an explicit price snapshot.
pub fn line(product: &Arc<entities::product::Model>, quantity: i32, price: i64) -> SaleLine {
    SaleLine::new(Arc::clone(product), quantity, Some(price))
}

/// An in-memory sale.
pub fn sale_on(id: i64, sold_at: NaiveDateTime, items: Vec<SaleLine>) -> Sale {
    Sale { id, sold_at, items }
}

/// [`SummaryStore`] kept in a `HashMap`.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl SummaryStore for MemoryStore {
    #[allow(clippy::unwrap_used)]
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    #[allow(clippy::unwrap_used)]
    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
