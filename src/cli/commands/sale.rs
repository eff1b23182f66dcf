//! Sale commands - `sale record`, `list` and `delete`.

use crate::{
    cli::{AppContext, SaleCommand},
    core::{
        aggregator::monthly_total,
        report::format_money,
        sale::{self, Sale},
    },
    errors::{Error, Result},
};
use chrono::{Days, Local, NaiveTime};

/// Runs a sale subcommand.
pub async fn handle(ctx: &AppContext, command: SaleCommand) -> Result<()> {
    let db = &ctx.database;
    let currency = ctx.settings.currency_symbol.as_str();

    match command {
        SaleCommand::Record { items, date, time } => {
            let now = Local::now().naive_local();
            let sold_at = date
                .unwrap_or_else(|| now.date())
                .and_time(time.unwrap_or_else(|| now.time()));

            match sale::record_sale(db, sold_at, &items).await {
                Ok(recorded) => println!(
                    "✅ Recorded sale #{} on {}: {} ({})",
                    recorded.id,
                    recorded.sold_at.format("%d/%m/%Y %H:%M"),
                    format_money(recorded.total_price(), currency),
                    recorded.product_details(currency)
                ),
                Err(Error::InvalidSale { message }) => println!("❌ {message}"),
                Err(Error::ProductNotFound { name }) => println!("❌ Product {name} not found."),
                Err(e) => return Err(e),
            }
        }
        SaleCommand::List { date, search } => {
            let day = date.unwrap_or_else(|| Local::now().date_naive());
            let start = day.and_time(NaiveTime::MIN);
            let end = (day + Days::new(1)).and_time(NaiveTime::MIN);
            let sales = sale::get_sales_between(db, start, end).await?;
            let search = search.as_deref().unwrap_or("");
            let matching: Vec<Sale> = sale::sales_for_day(&sales, day, search, currency)
                .into_iter()
                .cloned()
                .collect();

            println!(
                "Sales on {}: {}",
                day.format("%d/%m/%Y"),
                format_money(monthly_total(&matching), currency)
            );
            if matching.is_empty() {
                println!("No sales for this date.");
            }
            for (index, s) in matching.iter().enumerate() {
                println!(
                    "{:>3}. #{:<4} {} {:>14}  {}",
                    index + 1,
                    s.id,
                    s.sold_at.format("%H:%M"),
                    format_money(s.total_price(), currency),
                    s.product_details(currency)
                );
            }
        }
        SaleCommand::Delete { id } => match sale::delete_sale(db, id).await {
            Ok(()) => println!("✅ Deleted sale #{id}"),
            Err(Error::SaleNotFound { id }) => println!("❌ Sale #{id} not found."),
            Err(e) => return Err(e),
        },
    }

    Ok(())
}
