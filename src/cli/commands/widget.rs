//! Widget command - shows what the widget reader would display.

use crate::{
    cli::AppContext,
    core::widget::{SystemStateStore, load_summary, render_widget},
    errors::Result,
};
use chrono::Local;

/// Loads the shared summary (or the placeholder) and prints the widget text.
pub async fn handle(ctx: &AppContext) -> Result<()> {
    let store = SystemStateStore::new(&ctx.database);
    let summary = load_summary(&store, &ctx.settings.widget_key, Local::now().date_naive()).await;
    println!("{}", render_widget(&summary, &ctx.settings.currency_symbol));
    Ok(())
}
