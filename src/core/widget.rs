//! Widget bridge - the monthly revenue summary shared with another process.
//!
//! The app writes a small JSON record under a fixed key and a separate reader
//! (the home-screen widget) picks it up on its own schedule. The store is
//! passed in through [`SummaryStore`]; [`SystemStateStore`] backs it with the
//! `system_state` table so any process opening the same database sees it.
//!
//! Reading never fails: missing or unreadable records turn into
//! [`MonthlyRevenueSummary::placeholder`].

use crate::{
    core::{
        report::{MonthlyRecap, format_growth, format_money, group_thousands},
        sale::same_month,
    },
    entities::{SystemState, system_state},
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Key the summary is stored under unless configured otherwise.
pub const DEFAULT_WIDGET_KEY: &str = "monthlyRevenue";

/// Revenue summary record exported for the widget.
///
/// `previousAmount` and `isLatestMonth` were added after the first release,
/// so records without them still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueSummary {
    /// Revenue of the summarised month
    pub amount: i64,
    /// Revenue growth versus the previous month, in percent
    pub growth: f64,
    /// Reference date of the summarised month
    pub date: NaiveDate,
    /// Revenue of the previous month
    #[serde(default)]
    pub previous_amount: i64,
    /// Whether the summary is for the current calendar month
    #[serde(default)]
    pub is_latest_month: bool,
}

impl MonthlyRevenueSummary {
    /// Empty summary shown when nothing usable is stored.
    #[must_use]
    pub const fn placeholder(today: NaiveDate) -> Self {
        Self {
            amount: 0,
            growth: 0.0,
            date: today,
            previous_amount: 0,
            is_latest_month: false,
        }
    }

    /// Builds the summary for `recap`, flagged as latest when it covers `today`'s month.
    #[must_use]
    pub fn from_recap(recap: &MonthlyRecap, today: NaiveDate) -> Self {
        Self {
            amount: recap.total_revenue,
            growth: recap.revenue_growth,
            date: recap.month,
            previous_amount: recap.previous_revenue,
            is_latest_month: same_month(recap.month, today),
        }
    }
}

/// Narrow key-value interface to the store shared with the widget.
#[allow(async_fn_in_trait)]
pub trait SummaryStore {
    /// Returns the value stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// [`SummaryStore`] backed by the `system_state` table.
pub struct SystemStateStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SystemStateStore<'a> {
    /// Wraps a database connection.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SummaryStore for SystemStateStore<'_> {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let state = SystemState::find()
            .filter(system_state::Column::Key.eq(key))
            .one(self.db)
            .await?;
        Ok(state.map(|s| s.value))
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let model = system_state::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        // Single statement, so concurrent writers of a new key cannot both insert
        SystemState::insert(model)
            .on_conflict(
                OnConflict::column(system_state::Column::Key)
                    .update_columns([system_state::Column::Value, system_state::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }
}

/// Serialises `summary` and writes it under `key`.
///
/// # Errors
/// Returns an error if serialisation or the store write fails.
pub async fn publish_summary<S>(
    store: &S,
    key: &str,
    summary: &MonthlyRevenueSummary,
) -> Result<()>
where
    S: SummaryStore,
{
    let json = serde_json::to_string(summary)?;
    store.write(key, &json).await?;
    info!(
        "Published widget summary for {} (amount {})",
        summary.date, summary.amount
    );
    Ok(())
}

/// Decodes a stored summary record.
///
/// # Errors
/// Returns an error if `json` is not a valid summary record.
pub fn decode_summary(json: &str) -> Result<MonthlyRevenueSummary> {
    serde_json::from_str(json).map_err(Into::into)
}

/// Reads the summary under `key`, falling back to a placeholder.
pub async fn load_summary<S>(store: &S, key: &str, today: NaiveDate) -> MonthlyRevenueSummary
where
    S: SummaryStore,
{
    match store.read(key).await {
        Ok(Some(json)) => decode_summary(&json).unwrap_or_else(|e| {
            warn!("Stored widget summary is malformed, using placeholder: {e}");
            MonthlyRevenueSummary::placeholder(today)
        }),
        Ok(None) => {
            debug!("No widget summary stored under '{key}'");
            MonthlyRevenueSummary::placeholder(today)
        }
        Err(e) => {
            warn!("Failed to read widget summary, using placeholder: {e}");
            MonthlyRevenueSummary::placeholder(today)
        }
    }
}

/// Text shown by the widget: label, amount and the change versus last month.
///
/// Works for any decoded record, including amounts at the `i64` limits.
#[must_use]
pub fn render_widget(summary: &MonthlyRevenueSummary, currency: &str) -> String {
    let difference = summary.amount.saturating_sub(summary.previous_amount);
    let arrow = if difference < 0 { '▼' } else { '▲' };
    let period = if summary.is_latest_month {
        "This month".to_string()
    } else {
        summary.date.format("%B %Y").to_string()
    };

    format!(
        "Total revenue ({period})\n{}\n{arrow} {} ({})",
        format_money(summary.amount, currency),
        format!("{currency}{}", group_thousands(difference.unsigned_abs())),
        format_growth(summary.growth)
    )
}
