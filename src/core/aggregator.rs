//! Sales aggregation - pure reporting transforms over in-memory sales.
//!
//! Every function here is a total function of its inputs: no I/O, no clock, no
//! shared state. Calling one twice with the same sales returns the same output.

use crate::core::sale::{Sale, same_month};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Default length of the ranked product list.
pub const DEFAULT_TOP_PRODUCTS: usize = 10;

/// Number of week buckets in every month.
pub const WEEKS_PER_MONTH: u32 = 4;

/// Which value a week bucket accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeeklyMetric {
    /// Sum of sale totals
    Revenue,
    /// Number of sales
    Orders,
}

/// A labelled week value ready for charting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPoint {
    /// Display label, e.g. `"Week 2"`
    pub label: String,
    /// Aggregated value for that week
    pub value: i64,
}

/// One entry of the top products ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedProduct {
    /// 1-based position in the ranking
    pub rank: usize,
    /// Product id
    pub product_id: i64,
    /// Product name
    pub name: String,
    /// Σ `price_at_sale × quantity`
    pub revenue: i64,
    /// Σ quantity
    pub quantity: i64,
}

/// Sales whose date falls in the same year and month as `reference`.
#[must_use]
pub fn filter_by_month(sales: &[Sale], reference: NaiveDate) -> Vec<Sale> {
    sales
        .iter()
        .filter(|sale| same_month(sale.sold_at.date(), reference))
        .cloned()
        .collect()
}

/// Sum of every sale's total. Zero for no sales, `i64::MAX` at most.
#[must_use]
pub fn monthly_total(sales: &[Sale]) -> i64 {
    sales
        .iter()
        .map(Sale::total_price)
        .fold(0, i64::saturating_add)
}

/// Percentage change from `previous` to `current`.
///
/// Returns 0.0 when `previous` is not positive.
#[must_use]
pub fn growth_percent(current: i64, previous: i64) -> f64 {
    if previous <= 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let growth = current.saturating_sub(previous) as f64 / previous as f64 * 100.0;
    growth
}

/// Week bucket (1..=4) for a day of month.
///
/// Days 1-7, 8-14 and 15-21 form weeks 1-3; day 22 onward is week 4.
#[must_use]
pub const fn week_of_month(day: u32) -> u32 {
    match day {
        0..=7 => 1,
        8..=14 => 2,
        15..=21 => 3,
        _ => 4,
    }
}

/// Aggregates sales into the four week buckets of their month.
///
/// The map always has exactly the keys 1 through 4, zero when a week has no sales.
#[must_use]
pub fn bucket_by_week(sales: &[Sale], metric: WeeklyMetric) -> BTreeMap<u32, i64> {
    let mut buckets: BTreeMap<u32, i64> = (1..=WEEKS_PER_MONTH).map(|week| (week, 0)).collect();

    for sale in sales {
        let week = week_of_month(sale.sold_at.day());
        let value = match metric {
            WeeklyMetric::Revenue => sale.total_price(),
            WeeklyMetric::Orders => 1,
        };
        let bucket = buckets.entry(week).or_insert(0);
        *bucket = bucket.saturating_add(value);
    }

    buckets
}

/// Turns week buckets into labelled points in week order.
#[must_use]
pub fn weekly_series(buckets: &BTreeMap<u32, i64>) -> Vec<WeeklyPoint> {
    buckets
        .iter()
        .map(|(week, value)| WeeklyPoint {
            label: format!("Week {week}"),
            value: *value,
        })
        .collect()
}

/// Ranks products by revenue across all line items of `sales`.
///
/// Equal revenues keep the order in which the products were first seen.
/// The result holds at most `limit` entries and is empty for no sales.
#[must_use]
pub fn top_products(sales: &[Sale], limit: usize) -> Vec<RankedProduct> {
    let mut ranked: Vec<RankedProduct> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for item in sales.iter().flat_map(|sale| &sale.items) {
        let product = item.product();
        let slot = *index.entry(product.id).or_insert_with(|| {
            ranked.push(RankedProduct {
                rank: 0,
                product_id: product.id,
                name: product.name.clone(),
                revenue: 0,
                quantity: 0,
            });
            ranked.len() - 1
        });
        let entry = &mut ranked[slot];
        entry.revenue = entry.revenue.saturating_add(item.subtotal());
        entry.quantity = entry.quantity.saturating_add(i64::from(item.quantity()));
    }

    // sort_by is stable
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranked.truncate(limit);
    for (position, entry) in ranked.iter_mut().enumerate() {
        entry.rank = position + 1;
    }
    ranked
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_monthly_total_empty_is_zero() {
        assert_eq!(monthly_total(&[]), 0);
    }

    #[test]
    fn test_huge_totals_saturate() {
        let gold = test_product(1, "Gold", 5_000_000_000_000_000_000);
        let sales = vec![
            sale_on(1, at(2025, 5, 3), vec![line(&gold, 1, 5_000_000_000_000_000_000)]),
            sale_on(2, at(2025, 5, 4), vec![line(&gold, 1, 5_000_000_000_000_000_000)]),
        ];

        assert_eq!(monthly_total(&sales), i64::MAX);
        assert_eq!(bucket_by_week(&sales, WeeklyMetric::Revenue)[&1], i64::MAX);

        let ranked = top_products(&sales, 10);
        assert_eq!(ranked[0].revenue, i64::MAX);
        assert_eq!(ranked[0].quantity, 2);
    }

    #[test]
    fn test_monthly_total_single_line() {
        let product = test_product(1, "Kopi", 1000);
        let sales = vec![sale_on(1, at(2025, 5, 3), vec![line(&product, 2, 1000)])];
        assert_eq!(monthly_total(&sales), 2000);
    }

    #[test]
    fn test_growth_percent() {
        assert_eq!(growth_percent(1200, 1000), 20.0);
        assert_eq!(growth_percent(800, 1000), -20.0);
        assert_eq!(growth_percent(500, 0), 0.0);
        assert_eq!(growth_percent(0, 0), 0.0);
    }

    #[test]
    fn test_filter_by_month_matches_year_and_month() {
        let product = test_product(1, "Kopi", 1000);
        let sales = vec![
            sale_on(1, at(2025, 5, 1), vec![line(&product, 1, 1000)]),
            sale_on(2, at(2024, 5, 1), vec![line(&product, 1, 1000)]),
            sale_on(3, at(2025, 6, 1), vec![line(&product, 1, 1000)]),
            sale_on(4, at(2025, 5, 31), vec![line(&product, 1, 1000)]),
        ];

        let may = filter_by_month(&sales, NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());
        let ids: Vec<i64> = may.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_week_of_month_ladder() {
        assert_eq!(week_of_month(1), 1);
        assert_eq!(week_of_month(7), 1);
        assert_eq!(week_of_month(8), 2);
        assert_eq!(week_of_month(14), 2);
        assert_eq!(week_of_month(15), 3);
        assert_eq!(week_of_month(21), 3);
        assert_eq!(week_of_month(22), 4);
        assert_eq!(week_of_month(31), 4);
    }

    #[test]
    fn test_bucket_by_week_tail_folds_into_week_four() {
        let product = test_product(1, "Kopi", 1000);
        let sales = vec![
            sale_on(1, at(2025, 1, 30), vec![line(&product, 1, 1000)]),
            sale_on(2, at(2025, 1, 30), vec![line(&product, 2, 1000)]),
        ];

        let revenue = bucket_by_week(&sales, WeeklyMetric::Revenue);
        assert_eq!(revenue.len(), 4);
        assert_eq!(revenue[&1], 0);
        assert_eq!(revenue[&2], 0);
        assert_eq!(revenue[&3], 0);
        assert_eq!(revenue[&4], 3000);

        let orders = bucket_by_week(&sales, WeeklyMetric::Orders);
        assert_eq!(orders[&4], 2);
    }

    #[test]
    fn test_bucket_by_week_empty_has_four_zero_buckets() {
        let buckets = bucket_by_week(&[], WeeklyMetric::Orders);
        assert_eq!(buckets.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(buckets.values().all(|v| *v == 0));
    }

    #[test]
    fn test_weekly_series_labels() {
        let product = test_product(1, "Kopi", 1000);
        let sales = vec![sale_on(1, at(2025, 2, 9), vec![line(&product, 1, 1000)])];

        let series = weekly_series(&bucket_by_week(&sales, WeeklyMetric::Revenue));
        assert_eq!(
            series,
            vec![
                WeeklyPoint { label: "Week 1".to_string(), value: 0 },
                WeeklyPoint { label: "Week 2".to_string(), value: 1000 },
                WeeklyPoint { label: "Week 3".to_string(), value: 0 },
                WeeklyPoint { label: "Week 4".to_string(), value: 0 },
            ]
        );
    }

    #[test]
    fn test_top_products_ranks_by_revenue_not_quantity() {
        let x = test_product(1, "X", 1000);
        let y = test_product(2, "Y", 100);
        let sales = vec![
            sale_on(1, at(2025, 5, 1), vec![line(&x, 2, 1000)]),
            sale_on(2, at(2025, 5, 2), vec![line(&x, 1, 1000), line(&y, 5, 100)]),
        ];

        let ranked = top_products(&sales, DEFAULT_TOP_PRODUCTS);
        assert_eq!(
            ranked,
            vec![
                RankedProduct {
                    rank: 1,
                    product_id: 1,
                    name: "X".to_string(),
                    revenue: 3000,
                    quantity: 3,
                },
                RankedProduct {
                    rank: 2,
                    product_id: 2,
                    name: "Y".to_string(),
                    revenue: 500,
                    quantity: 5,
                },
            ]
        );
    }

    #[test]
    fn test_top_products_uses_price_at_sale() {
        let x = test_product(1, "X", 9999);
        let sales = vec![sale_on(1, at(2025, 5, 1), vec![line(&x, 2, 1000)])];

        assert_eq!(top_products(&sales, 10)[0].revenue, 2000);
    }

    #[test]
    fn test_top_products_ties_keep_first_seen_order_and_truncate() {
        let a = test_product(1, "A", 100);
        let b = test_product(2, "B", 100);
        let c = test_product(3, "C", 100);
        let sales = vec![sale_on(
            1,
            at(2025, 5, 1),
            vec![line(&b, 1, 100), line(&a, 1, 100), line(&c, 3, 100)],
        )];

        let ranked = top_products(&sales, 2);
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B"]);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn test_top_products_empty() {
        assert!(top_products(&[], 10).is_empty());
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let x = test_product(1, "X", 1000);
        let sales = vec![
            sale_on(1, at(2025, 5, 1), vec![line(&x, 2, 1000)]),
            sale_on(2, at(2025, 5, 23), vec![line(&x, 1, 1000)]),
        ];

        assert_eq!(top_products(&sales, 10), top_products(&sales, 10));
        assert_eq!(
            bucket_by_week(&sales, WeeklyMetric::Revenue),
            bucket_by_week(&sales, WeeklyMetric::Revenue)
        );
        assert_eq!(monthly_total(&sales), monthly_total(&sales));
    }
}
