//! Sale business logic - Recording, loading and deleting sales.
//!
//! A sale is stored as one `sales` row plus its `sale_items` rows. In memory it
//! is hydrated into [`Sale`], whose line items share the referenced product
//! through an `Arc`. Totals are computed from the line items on demand and are
//! never stored.

use crate::{
    core::report::format_money,
    entities::{Product, SaleItem, product, sale, sale_item},
    errors::{Error, Result},
};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// One product sold within a sale.
///
/// Quantity is at least 1 and the unit price is a snapshot taken when the
/// line was created. Neither can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    product: Arc<product::Model>,
    quantity: i32,
    price_at_sale: i64,
}

impl SaleLine {
    /// Creates a line item, clamping the quantity to at least 1.
    ///
    /// Without an explicit `price_at_sale` the product's current price is used.
    #[must_use]
    pub fn new(product: Arc<product::Model>, quantity: i32, price_at_sale: Option<i64>) -> Self {
        let price_at_sale = price_at_sale.unwrap_or(product.price).max(0);
        Self {
            product,
            quantity: quantity.max(1),
            price_at_sale,
        }
    }

    /// The product sold
    #[must_use]
    pub fn product(&self) -> &product::Model {
        &self.product
    }

    /// Units sold
    #[must_use]
    pub const fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Unit price when the sale was recorded
    #[must_use]
    pub const fn price_at_sale(&self) -> i64 {
        self.price_at_sale
    }

    /// `price_at_sale × quantity`, saturating at `i64::MAX`
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.price_at_sale.saturating_mul(i64::from(self.quantity))
    }

    /// `price_at_sale × quantity`, or `None` when it does not fit in an `i64`
    #[must_use]
    pub fn checked_subtotal(&self) -> Option<i64> {
        self.price_at_sale.checked_mul(i64::from(self.quantity))
    }
}

/// A customer transaction with its line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    /// Database id of the sale
    pub id: i64,
    /// Local date and time of the sale
    pub sold_at: NaiveDateTime,
    /// Line items in the order they were recorded
    pub items: Vec<SaleLine>,
}

impl Sale {
    /// Total price of the sale, always derived from the line items.
    #[must_use]
    pub fn total_price(&self) -> i64 {
        self.items
            .iter()
            .map(SaleLine::subtotal)
            .fold(0, i64::saturating_add)
    }

    /// Summary such as `"Es Teh × 2 @ Rp5.000, Bakso × 1 @ Rp15.000"`.
    #[must_use]
    pub fn product_details(&self, currency: &str) -> String {
        self.items
            .iter()
            .map(|item| {
                format!(
                    "{} × {} @ {}",
                    item.product().name,
                    item.quantity(),
                    format_money(item.price_at_sale(), currency)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A requested line item when recording a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleItemInput {
    /// Product to sell
    pub product_id: i64,
    /// Units sold, clamped to at least 1
    pub quantity: i32,
}

/// Start (inclusive) and end (exclusive) of the calendar month containing `reference`.
#[must_use]
pub fn month_bounds(reference: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let first = reference - Days::new(u64::from(reference.day0()));
    let next = first + Months::new(1);
    (first.and_time(NaiveTime::MIN), next.and_time(NaiveTime::MIN))
}

/// The first day of the month before the one containing `reference`.
#[must_use]
pub fn previous_month(reference: NaiveDate) -> NaiveDate {
    let first = reference - Days::new(u64::from(reference.day0()));
    first - Months::new(1)
}

/// Records a sale and its line items in a single database transaction.
///
/// Each line snapshots the product's current price. Repeated product ids share
/// one product lookup.
///
/// # Errors
/// Returns an error if:
/// - `items` is empty
/// - A referenced product does not exist or is deleted
/// - The sale total does not fit in an `i64`
/// - Any database operation fails (nothing is written in that case)
pub async fn record_sale(
    db: &DatabaseConnection,
    sold_at: NaiveDateTime,
    items: &[SaleItemInput],
) -> Result<Sale> {
    if items.is_empty() {
        return Err(Error::InvalidSale {
            message: "A sale needs at least one item".to_string(),
        });
    }

    let txn = db.begin().await?;

    let sale_row = sale::ActiveModel {
        sold_at: Set(sold_at),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut products: HashMap<i64, Arc<product::Model>> = HashMap::new();
    let mut lines = Vec::with_capacity(items.len());
    let mut total: i64 = 0;

    for input in items {
        let product = if let Some(found) = products.get(&input.product_id) {
            Arc::clone(found)
        } else {
            let found = Product::find_by_id(input.product_id)
                .one(&txn)
                .await?
                .filter(|p| !p.is_deleted)
                .map(Arc::new)
                .ok_or_else(|| Error::ProductNotFound {
                    name: input.product_id.to_string(),
                })?;
            products.insert(input.product_id, Arc::clone(&found));
            found
        };

        let line = SaleLine::new(product, input.quantity, None);
        total = line
            .checked_subtotal()
            .and_then(|subtotal| total.checked_add(subtotal))
            .ok_or_else(|| Error::InvalidSale {
                message: format!(
                    "Sale total is too large ({} × {})",
                    line.product().name,
                    line.quantity()
                ),
            })?;
        sale_item::ActiveModel {
            sale_id: Set(sale_row.id),
            product_id: Set(line.product().id),
            quantity: Set(line.quantity()),
            price_at_sale: Set(line.price_at_sale()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        lines.push(line);
    }

    txn.commit().await?;

    let sale = Sale {
        id: sale_row.id,
        sold_at: sale_row.sold_at,
        items: lines,
    };
    info!(
        "Recorded sale {} with {} item(s), total {total}",
        sale.id,
        sale.items.len()
    );
    Ok(sale)
}

/// Turns sale rows and their item rows into [`Sale`] values.
///
/// Products are fetched once and shared between all lines that reference them.
async fn hydrate<C>(db: &C, rows: Vec<(sale::Model, Vec<sale_item::Model>)>) -> Result<Vec<Sale>>
where
    C: ConnectionTrait,
{
    let product_ids: BTreeSet<i64> = rows
        .iter()
        .flat_map(|(_, items)| items.iter().map(|item| item.product_id))
        .collect();

    let products: HashMap<i64, Arc<product::Model>> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        Product::find()
            .filter(product::Column::Id.is_in(product_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, Arc::new(p)))
            .collect()
    };

    let mut sales = Vec::with_capacity(rows.len());
    for (sale_row, mut item_rows) in rows {
        item_rows.sort_by_key(|item| item.id);
        let mut items = Vec::with_capacity(item_rows.len());
        for item in item_rows {
            let product = products
                .get(&item.product_id)
                .ok_or_else(|| Error::ProductNotFound {
                    name: item.product_id.to_string(),
                })?;
            items.push(SaleLine::new(
                Arc::clone(product),
                item.quantity,
                Some(item.price_at_sale),
            ));
        }
        sales.push(Sale {
            id: sale_row.id,
            sold_at: sale_row.sold_at,
            items,
        });
    }

    sales.sort_by_key(|s| (s.sold_at, s.id));
    Ok(sales)
}

/// Loads one sale with its line items.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_sale(db: &DatabaseConnection, sale_id: i64) -> Result<Option<Sale>> {
    let rows = crate::entities::Sale::find_by_id(sale_id)
        .find_with_related(SaleItem)
        .all(db)
        .await?;
    Ok(hydrate(db, rows).await?.into_iter().next())
}

/// Loads all sales with `start <= sold_at < end`, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_sales_between(
    db: &DatabaseConnection,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<Sale>> {
    let rows = crate::entities::Sale::find()
        .filter(sale::Column::SoldAt.gte(start))
        .filter(sale::Column::SoldAt.lt(end))
        .order_by_asc(sale::Column::SoldAt)
        .find_with_related(SaleItem)
        .all(db)
        .await?;
    debug!("Loaded {} sale(s) between {start} and {end}", rows.len());
    hydrate(db, rows).await
}

/// Loads all sales in the calendar month containing `reference`.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_sales_for_month(
    db: &DatabaseConnection,
    reference: NaiveDate,
) -> Result<Vec<Sale>> {
    let (start, end) = month_bounds(reference);
    get_sales_between(db, start, end).await
}

/// Deletes a sale together with all of its line items.
///
/// # Errors
/// Returns an error if the sale does not exist or a database operation fails.
pub async fn delete_sale(db: &DatabaseConnection, sale_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let sale_row = crate::entities::Sale::find_by_id(sale_id)
        .one(&txn)
        .await?
        .ok_or(Error::SaleNotFound { id: sale_id })?;

    let removed = SaleItem::delete_many()
        .filter(sale_item::Column::SaleId.eq(sale_id))
        .exec(&txn)
        .await?;
    sale_row.delete(&txn).await?;

    txn.commit().await?;
    info!(
        "Deleted sale {sale_id} and {} line item(s)",
        removed.rows_affected
    );
    Ok(())
}

/// Sales made on `day` whose product details contain `search` (case-insensitive).
///
/// An empty search matches every sale of the day.
#[must_use]
pub fn sales_for_day<'a>(
    sales: &'a [Sale],
    day: NaiveDate,
    search: &str,
    currency: &str,
) -> Vec<&'a Sale> {
    let needle = search.trim().to_lowercase();
    sales
        .iter()
        .filter(|sale| sale.sold_at.date() == day)
        .filter(|sale| {
            needle.is_empty()
                || sale
                    .product_details(currency)
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}

/// Returns whether `date` lies in the same calendar month as `reference`.
#[must_use]
pub fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}
