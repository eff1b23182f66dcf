//! Product business logic - Handles all product-related operations.
//!
//! Products are the items a shop sells. Each has a name and a whole-unit price.
//! A negative price is clamped to zero rather than rejected. Deleting a
//! product only hides it, so sales that already reference it keep their name
//! and price history intact.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Normalises a user-supplied product name, rejecting empty ones.
fn validated_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Retrieves all active (non-deleted) products, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsDeleted.eq(false))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an active product by its exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name.trim()))
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by id, including soft-deleted ones.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product. The name is trimmed and a negative price becomes 0.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    price: i64,
) -> Result<product::Model> {
    let name = validated_name(name)?;
    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        name: Set(name),
        price: Set(price.max(0)),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = product.insert(db).await?;
    info!(
        "Created product '{}' (id {}) at price {}",
        created.name, created.id, created.price
    );
    Ok(created)
}

/// Updates an existing product's name and price.
///
/// Line items already recorded keep their own `price_at_sale`, so this never
/// changes the totals of past sales.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The product does not exist or is deleted
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: &str,
    new_price: i64,
) -> Result<product::Model> {
    let new_name = validated_name(new_name)?;

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    product.name = Set(new_name);
    product.price = Set(new_price.max(0));
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = product.update(db).await?;
    debug!("Updated product {} to price {}", updated.id, updated.price);
    Ok(updated)
}

/// Soft deletes a product, preserving sales history.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist or is already deleted
/// - The database update operation fails
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    product.is_deleted = Set(true);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    let deleted = product.update(db).await?;
    info!("Deleted product '{}' (id {})", deleted.name, deleted.id);
    Ok(deleted)
}

/// Filters products by a case-insensitive substring of their name.
///
/// An empty or whitespace-only query returns every product.
#[must_use]
pub fn search_products<'a>(
    products: &'a [product::Model],
    query: &str,
) -> Vec<&'a product::Model> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}
