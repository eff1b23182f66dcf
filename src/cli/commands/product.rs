//! Product commands - `product add`, `list`, `update` and `delete`.

use crate::{
    cli::{AppContext, ProductCommand},
    core::{product, report::format_money},
    errors::{Error, Result},
};
use tracing::warn;

/// Runs a product subcommand.
pub async fn handle(ctx: &AppContext, command: ProductCommand) -> Result<()> {
    let db = &ctx.database;
    let currency = ctx.settings.currency_symbol.as_str();

    match command {
        ProductCommand::Add { name, price } => {
            if price < 0 {
                warn!("Negative price {price} for '{name}' clamped to 0");
            }
            match product::create_product(db, &name, price).await {
                Ok(created) => println!(
                    "✅ Added product #{} '{}' at {}",
                    created.id,
                    created.name,
                    format_money(created.price, currency)
                ),
                Err(Error::Config { message }) => println!("❌ {message}"),
                Err(e) => return Err(e),
            }
        }
        ProductCommand::List { search } => {
            let products = product::get_all_active_products(db).await?;
            let matching = product::search_products(&products, search.as_deref().unwrap_or(""));
            if matching.is_empty() {
                println!("No products found.");
            }
            for p in matching {
                println!("#{:<4} {:<24} {}", p.id, p.name, format_money(p.price, currency));
            }
        }
        ProductCommand::Update { id, name, price } => {
            match product::update_product(db, id, &name, price).await {
                Ok(updated) => println!(
                    "✅ Updated product #{} to '{}' at {}",
                    updated.id,
                    updated.name,
                    format_money(updated.price, currency)
                ),
                Err(Error::Config { message }) => println!("❌ {message}"),
                Err(Error::ProductNotFound { name }) => println!("❌ Product {name} not found."),
                Err(e) => return Err(e),
            }
        }
        ProductCommand::Delete { id } => match product::delete_product(db, id).await {
            Ok(deleted) => println!("✅ Deleted product '{}'", deleted.name),
            Err(Error::ProductNotFound { name }) => println!("❌ Product {name} not found."),
            Err(e) => return Err(e),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_update_delete_product() -> Result<()> {
        let ctx = AppContext::new(setup_test_db().await?, Settings::default());

        handle(
            &ctx,
            ProductCommand::Add {
                name: "Kopi".to_string(),
                price: 8000,
            },
        )
        .await?;
        let kopi = product::get_product_by_name(&ctx.database, "Kopi")
            .await?
            .ok_or(Error::ProductNotFound {
                name: "Kopi".to_string(),
            })?;
        assert_eq!(kopi.price, 8000);

        handle(
            &ctx,
            ProductCommand::Update {
                id: kopi.id,
                name: "Kopi Susu".to_string(),
                price: 10000,
            },
        )
        .await?;
        handle(&ctx, ProductCommand::List { search: None }).await?;
        handle(&ctx, ProductCommand::Delete { id: kopi.id }).await?;

        assert!(product::get_all_active_products(&ctx.database).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_input_is_reported_not_raised() -> Result<()> {
        let ctx = AppContext::new(setup_test_db().await?, Settings::default());

        handle(
            &ctx,
            ProductCommand::Add {
                name: "  ".to_string(),
                price: 1000,
            },
        )
        .await?;
        handle(&ctx, ProductCommand::Delete { id: 42 }).await?;

        assert!(product::get_all_active_products(&ctx.database).await?.is_empty());
        Ok(())
    }
}
