//! Recap command - prints the monthly recap, optionally exporting it and
//! publishing the widget summary.

use crate::{
    cli::{AppContext, RecapArgs},
    core::{
        export::export_recap,
        report::{generate_monthly_recap, render_recap},
        widget::{MonthlyRevenueSummary, SystemStateStore, publish_summary},
    },
    errors::Result,
};
use chrono::Local;
use tracing::error;

/// Runs the recap command.
pub async fn handle(ctx: &AppContext, args: RecapArgs) -> Result<()> {
    let settings = &ctx.settings;
    let today = Local::now().date_naive();
    let month = args.month.unwrap_or(today);
    let limit = args.limit.unwrap_or(settings.top_products_limit);

    let recap = generate_monthly_recap(&ctx.database, month, limit).await?;
    print!("{}", render_recap(&recap, &settings.currency_symbol));

    if let Some(path) = args.export {
        match export_recap(&path, &recap, &settings.currency_symbol) {
            Ok(()) => println!("✅ Exported recap to {}", path.display()),
            Err(e) => {
                error!("Recap export failed: {e}");
                eprintln!("❌ Could not export the recap: {e}");
            }
        }
    }

    if args.publish {
        let summary = MonthlyRevenueSummary::from_recap(&recap, today);
        let store = SystemStateStore::new(&ctx.database);
        publish_summary(&store, &settings.widget_key, &summary).await?;
        println!("✅ Widget summary updated");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::core::widget::{SummaryStore, load_summary};
    use crate::test_utils::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_recap_exports_and_publishes() -> Result<()> {
        let ctx = AppContext::new(setup_test_db().await?, Settings::default());
        let kopi = create_custom_product(&ctx.database, "Kopi", 1000).await?;
        record_test_sale(&ctx.database, at(2025, 4, 2), &[(kopi.id, 1)]).await?;
        record_test_sale(&ctx.database, at(2025, 5, 2), &[(kopi.id, 3)]).await?;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("recap.txt");
        let month = NaiveDate::from_ymd_opt(2025, 5, 1);

        handle(
            &ctx,
            RecapArgs {
                month,
                limit: None,
                export: Some(path.clone()),
                publish: true,
            },
        )
        .await?;

        assert!(std::fs::read_to_string(&path)?.contains("Kopi"));

        let store = SystemStateStore::new(&ctx.database);
        assert!(store.read(&ctx.settings.widget_key).await?.is_some());
        let today = Local::now().date_naive();
        let summary = load_summary(&store, &ctx.settings.widget_key, today).await;
        assert_eq!(summary.amount, 3000);
        assert_eq!(summary.previous_amount, 1000);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_export_is_reported_not_raised() -> Result<()> {
        let ctx = AppContext::new(setup_test_db().await?, Settings::default());
        let dir = tempfile::tempdir()?;

        handle(
            &ctx,
            RecapArgs {
                month: None,
                limit: Some(3),
                export: Some(dir.path().join("missing").join("recap.txt")),
                publish: false,
            },
        )
        .await?;

        Ok(())
    }
}
