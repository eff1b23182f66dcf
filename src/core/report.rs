//! Report generation business logic.
//!
//! Builds the monthly recap from the aggregator outputs and renders it for
//! display or export. [`build_monthly_recap`] is pure; [`generate_monthly_recap`]
//! only adds the database load in front of it.

use crate::{
    core::{
        aggregator::{
            RankedProduct, WeeklyMetric, WeeklyPoint, bucket_by_week, filter_by_month,
            growth_percent, monthly_total, top_products, weekly_series,
        },
        sale::{Sale, get_sales_between, month_bounds, previous_month},
    },
    errors::Result,
};
use chrono::{Datelike, NaiveDate};
use sea_orm::DatabaseConnection;
use std::fmt;

/// Everything shown on the recap screen for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRecap {
    /// First day of the reported month
    pub month: NaiveDate,
    /// Revenue of the reported month
    pub total_revenue: i64,
    /// Revenue of the month before
    pub previous_revenue: i64,
    /// Revenue change versus the month before, in percent
    pub revenue_growth: f64,
    /// Number of sales in the reported month
    pub order_count: i64,
    /// Number of sales in the month before
    pub previous_order_count: i64,
    /// Order count change versus the month before, in percent
    pub order_growth: f64,
    /// Revenue per week bucket
    pub weekly_revenue: Vec<WeeklyPoint>,
    /// Sales count per week bucket
    pub weekly_orders: Vec<WeeklyPoint>,
    /// Best-selling products by revenue
    pub top_products: Vec<RankedProduct>,
}

/// Builds the recap for the month containing `reference` from any set of sales.
///
/// Sales outside the reported and previous months are ignored.
#[must_use]
pub fn build_monthly_recap(sales: &[Sale], reference: NaiveDate, limit: usize) -> MonthlyRecap {
    let current = filter_by_month(sales, reference);
    let previous = filter_by_month(sales, previous_month(reference));

    let total_revenue = monthly_total(&current);
    let previous_revenue = monthly_total(&previous);

    let orders = bucket_by_week(&current, WeeklyMetric::Orders);
    let order_count: i64 = orders.values().sum();
    let previous_order_count: i64 = bucket_by_week(&previous, WeeklyMetric::Orders)
        .values()
        .sum();

    MonthlyRecap {
        month: month_bounds(reference).0.date(),
        total_revenue,
        previous_revenue,
        revenue_growth: growth_percent(total_revenue, previous_revenue),
        order_count,
        previous_order_count,
        order_growth: growth_percent(order_count, previous_order_count),
        weekly_revenue: weekly_series(&bucket_by_week(&current, WeeklyMetric::Revenue)),
        weekly_orders: weekly_series(&orders),
        top_products: top_products(&current, limit),
    }
}

/// Loads the reported and previous month from the database and builds the recap.
///
/// # Errors
/// Returns an error if loading the sales fails.
pub async fn generate_monthly_recap(
    db: &DatabaseConnection,
    reference: NaiveDate,
    limit: usize,
) -> Result<MonthlyRecap> {
    let (start, _) = month_bounds(previous_month(reference));
    let (_, end) = month_bounds(reference);
    let sales = get_sales_between(db, start, end).await?;
    tracing::debug!(
        "Building recap for {}-{:02} from {} sale(s)",
        reference.year(),
        reference.month(),
        sales.len()
    );
    Ok(build_monthly_recap(&sales, reference, limit))
}

/// Groups thousands with dots: `1234567` becomes `"1.234.567"`.
#[must_use]
pub fn format_price(value: i64) -> String {
    let grouped = group_thousands(value.unsigned_abs());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Digit grouping shared by the signed and unsigned formatters.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Prefixes a formatted price with the currency, e.g. `"Rp15.000"`.
#[must_use]
pub fn format_money(value: i64, currency: &str) -> String {
    let amount = format_price(value);
    match amount.strip_prefix('-') {
        Some(digits) => format!("-{currency}{digits}"),
        None => format!("{currency}{amount}"),
    }
}

/// Signed percentage with one decimal, e.g. `"+20.0%"` or `"-12.5%"`.
#[must_use]
pub fn format_growth(growth: f64) -> String {
    format!("{growth:+.1}%")
}

/// Plain-text layout of a recap, used for the terminal and for export.
pub struct RecapDocument<'a> {
    recap: &'a MonthlyRecap,
    currency: &'a str,
}

impl<'a> RecapDocument<'a> {
    /// Wraps a recap for rendering with the given currency prefix.
    #[must_use]
    pub const fn new(recap: &'a MonthlyRecap, currency: &'a str) -> Self {
        Self { recap, currency }
    }
}

impl fmt::Display for RecapDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recap = self.recap;
        let money = |value| format_money(value, self.currency);

        writeln!(f, "Recap {}", recap.month.format("%B %Y"))?;
        writeln!(f)?;
        writeln!(
            f,
            "Total revenue: {} ({} vs {})",
            money(recap.total_revenue),
            format_growth(recap.revenue_growth),
            money(recap.previous_revenue)
        )?;
        writeln!(
            f,
            "Orders:        {} ({} vs {})",
            recap.order_count,
            format_growth(recap.order_growth),
            recap.previous_order_count
        )?;

        writeln!(f)?;
        writeln!(f, "Weekly revenue / orders")?;
        for (revenue, orders) in recap.weekly_revenue.iter().zip(&recap.weekly_orders) {
            writeln!(
                f,
                "  {:<8} {:>16} {:>6}",
                revenue.label,
                money(revenue.value),
                orders.value
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Top products")?;
        if recap.top_products.is_empty() {
            writeln!(f, "  No sales this month.")?;
        }
        for product in &recap.top_products {
            writeln!(
                f,
                "  {:>2}. {:<24} {:>16} x{}",
                product.rank,
                product.name,
                money(product.revenue),
                product.quantity
            )?;
        }
        Ok(())
    }
}

/// Renders the recap as a plain-text document.
#[must_use]
pub fn render_recap(recap: &MonthlyRecap, currency: &str) -> String {
    RecapDocument::new(recap, currency).to_string()
}
