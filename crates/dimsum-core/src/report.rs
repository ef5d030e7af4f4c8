//! # Sales Reporting Aggregation
//!
//! Pure functions turning a list of persisted transactions into the
//! dashboard figures: overall statistics, a fixed 7-day revenue
//! series, and the top-seller ranking.
//!
//! ## Failure Semantics
//! The aggregator never fails. An empty transaction list yields zeroed
//! summaries and a zero-filled series, and a transaction whose
//! line-item list could not be decoded simply contributes no items
//! (see [`crate::transaction::StoredTransaction`]). Partial reporting
//! beats a broken dashboard.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::money::Money;
use crate::transaction::StoredTransaction;
use crate::{DAILY_SERIES_DAYS, TOP_ITEMS_LIMIT};

// =============================================================================
// Report Filters
// =============================================================================

/// The period presets offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    /// Since local midnight today.
    Today,
    /// Trailing 7 days.
    Week,
    /// Trailing 30 days.
    Month,
    /// No date filter.
    All,
    /// Explicit date range; both bounds are required.
    Custom,
}

/// A half-open `[start, end)` instant window. `None` bounds mean
/// unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateWindow {
    /// The unbounded window (the "Semua" preset).
    pub const fn unbounded() -> Self {
        DateWindow {
            start: None,
            end: None,
        }
    }

    /// Checks whether an instant falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| at >= s) && self.end.map_or(true, |e| at < e)
    }
}

impl ReportPeriod {
    /// Resolves the preset into a concrete window anchored at `now`.
    ///
    /// `Custom` requires both dates and is otherwise rejected; its end
    /// date is inclusive as a calendar day, so the exclusive bound is
    /// the following midnight.
    pub fn window(
        &self,
        now: DateTime<Utc>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<DateWindow, ReportError> {
        let window = match self {
            ReportPeriod::Today => DateWindow {
                start: start_of_day(now.date_naive()),
                end: None,
            },
            ReportPeriod::Week => DateWindow {
                start: Some(now - Duration::days(7)),
                end: None,
            },
            ReportPeriod::Month => DateWindow {
                start: Some(now - Duration::days(30)),
                end: None,
            },
            ReportPeriod::All => DateWindow::unbounded(),
            ReportPeriod::Custom => {
                let (start, end) = match (start_date, end_date) {
                    (Some(s), Some(e)) => (s, e),
                    _ => return Err(ReportError::IncompleteCustomRange),
                };
                DateWindow {
                    start: start_of_day(start),
                    end: start_of_day(end + Duration::days(1)),
                }
            }
        };
        Ok(window)
    }
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

// =============================================================================
// Summary Statistics
// =============================================================================

/// The dashboard's headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_revenue: Money,
    pub transaction_count: usize,
    /// Mean transaction total; zero when there are no transactions.
    pub average_ticket: Money,
}

/// Computes revenue, count, and average ticket over the filtered list.
pub fn compute_summary(transactions: &[StoredTransaction]) -> SalesSummary {
    let total_revenue: Money = transactions.iter().map(|t| t.total).sum();
    let transaction_count = transactions.len();
    let average_ticket = if transaction_count > 0 {
        Money::from_rupiah(total_revenue.rupiah() / transaction_count as i64)
    } else {
        Money::zero()
    };

    SalesSummary {
        total_revenue,
        transaction_count,
        average_ticket,
    }
}

// =============================================================================
// Daily Revenue Series
// =============================================================================

/// One bucket of the 7-day revenue chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    /// Axis label, e.g. "23 Aug".
    pub label: String,
    pub revenue: Money,
}

/// Computes the trailing 7-day revenue series ending on `today`.
///
/// Always returns exactly [`DAILY_SERIES_DAYS`] buckets ordered oldest
/// to newest, zero-filled for days without sales. A transaction counts
/// toward the bucket matching the calendar date of its `created_at`.
pub fn compute_daily_series(
    transactions: &[StoredTransaction],
    today: NaiveDate,
) -> Vec<DailyRevenue> {
    let mut series: Vec<DailyRevenue> = (0..DAILY_SERIES_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back as i64);
            DailyRevenue {
                date,
                label: date.format("%d %b").to_string(),
                revenue: Money::zero(),
            }
        })
        .collect();

    for tx in transactions {
        let date = tx.created_at.date_naive();
        if let Some(bucket) = series.iter_mut().find(|b| b.date == date) {
            bucket.revenue += tx.total;
        }
    }

    series
}

// =============================================================================
// Top Sellers
// =============================================================================

/// One entry of the top-seller ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItem {
    /// Composite display key: `name (variant)`.
    pub name: String,
    pub units_sold: u64,
    pub revenue: Money,
}

/// Ranks line items across all transactions by units sold.
///
/// Items are grouped by the `name (variant)` composite key. The sort
/// is stable and descending, so ties keep first-seen order, and at
/// most [`TOP_ITEMS_LIMIT`] entries are returned.
pub fn compute_top_items(transactions: &[StoredTransaction]) -> Vec<TopItem> {
    let mut ranked: Vec<TopItem> = Vec::new();

    for tx in transactions {
        for line in &tx.items {
            let key = format!("{} ({})", line.name, line.variant);
            match ranked.iter_mut().find(|entry| entry.name == key) {
                Some(entry) => {
                    entry.units_sold += line.quantity as u64;
                    entry.revenue += line.line_total();
                }
                None => ranked.push(TopItem {
                    name: key,
                    units_sold: line.quantity as u64,
                    revenue: line.line_total(),
                }),
            }
        }
    }

    ranked.sort_by(|a, b| b.units_sold.cmp(&a.units_sold));
    ranked.truncate(TOP_ITEMS_LIMIT);
    ranked
}

// =============================================================================
// Transaction Search
// =============================================================================

/// Case-insensitive order-number substring filter for the history list.
pub fn filter_by_order_number<'a>(
    transactions: &'a [StoredTransaction],
    term: &str,
) -> Vec<&'a StoredTransaction> {
    let needle = term.to_lowercase();
    transactions
        .iter()
        .filter(|t| t.order_number.to_lowercase().contains(&needle))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::checkout::PaymentMethod;
    use chrono::TimeZone;

    fn line(name: &str, variant: &str, price: i64, qty: u32) -> CartLine {
        CartLine {
            line_id: format!("{}-{}", name, variant),
            menu_item_id: name.to_string(),
            name: name.to_string(),
            variant: variant.to_string(),
            unit_price: Money::from_rupiah(price),
            quantity: qty,
        }
    }

    fn tx(order: &str, total: i64, created_at: DateTime<Utc>, items: Vec<CartLine>) -> StoredTransaction {
        StoredTransaction {
            id: format!("id-{}", order),
            order_number: order.to_string(),
            branch: "Outlet 1".to_string(),
            branch_id: "b1".to_string(),
            items,
            subtotal: Money::from_rupiah(total),
            tax: Money::zero(),
            total: Money::from_rupiah(total),
            payment_method: PaymentMethod::Cash,
            cash_amount: Money::from_rupiah(total),
            change_amount: Money::zero(),
            created_at,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_summary_revenue_count_average() {
        let txs = vec![
            tx("ORD-1", 10_000, at(2026, 8, 23, 9), vec![]),
            tx("ORD-2", 20_000, at(2026, 8, 23, 10), vec![]),
            tx("ORD-3", 30_000, at(2026, 8, 23, 11), vec![]),
        ];

        let summary = compute_summary(&txs);
        assert_eq!(summary.total_revenue, Money::from_rupiah(60_000));
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.average_ticket, Money::from_rupiah(20_000));
    }

    #[test]
    fn test_summary_empty_input_is_zeroed() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.total_revenue, Money::zero());
        assert_eq!(summary.transaction_count, 0);
        assert_eq!(summary.average_ticket, Money::zero());
    }

    #[test]
    fn test_daily_series_always_seven_buckets() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();

        let empty = compute_daily_series(&[], today);
        assert_eq!(empty.len(), 7);
        assert!(empty.iter().all(|b| b.revenue.is_zero()));

        // Oldest to newest, ending today.
        assert_eq!(empty[0].date, NaiveDate::from_ymd_opt(2026, 8, 17).unwrap());
        assert_eq!(empty[6].date, today);
        for pair in empty.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_daily_series_buckets_by_calendar_day() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let txs = vec![
            tx("ORD-1", 10_000, at(2026, 8, 23, 8), vec![]),
            tx("ORD-2", 20_000, at(2026, 8, 23, 21), vec![]),
            tx("ORD-3", 30_000, at(2026, 8, 20, 12), vec![]),
            // Outside the window entirely.
            tx("ORD-4", 99_000, at(2026, 8, 1, 12), vec![]),
        ];

        let series = compute_daily_series(&txs, today);
        assert_eq!(series.len(), 7);
        assert_eq!(series[6].revenue, Money::from_rupiah(30_000));
        assert_eq!(series[3].revenue, Money::from_rupiah(30_000));
        let total: Money = series.iter().map(|b| b.revenue).sum();
        assert_eq!(total, Money::from_rupiah(60_000));
    }

    #[test]
    fn test_top_items_ranking_and_limit() {
        let txs = vec![
            tx(
                "ORD-1",
                0,
                at(2026, 8, 23, 9),
                vec![
                    line("Dimsum Ayam", "Besar", 18_000, 3),
                    line("Dimsum Udang", "Kecil", 25_000, 1),
                ],
            ),
            tx(
                "ORD-2",
                0,
                at(2026, 8, 23, 10),
                vec![
                    line("Dimsum Ayam", "Besar", 18_000, 2),
                    line("Pangsit", "Goreng", 15_000, 4),
                    line("Es Teh", "Besar", 8_000, 1),
                    line("Es Jeruk", "Besar", 10_000, 1),
                    line("Siomay", "Kecil", 12_000, 1),
                ],
            ),
        ];

        let top = compute_top_items(&txs);
        assert!(top.len() <= 5);
        assert_eq!(top[0].name, "Dimsum Ayam (Besar)");
        assert_eq!(top[0].units_sold, 5);
        assert_eq!(top[0].revenue, Money::from_rupiah(90_000));
        assert_eq!(top[1].name, "Pangsit (Goreng)");

        // Non-increasing by units sold.
        for pair in top.windows(2) {
            assert!(pair[0].units_sold >= pair[1].units_sold);
        }
    }

    #[test]
    fn test_top_items_ties_keep_first_seen_order() {
        let txs = vec![tx(
            "ORD-1",
            0,
            at(2026, 8, 23, 9),
            vec![
                line("Es Teh", "Besar", 8_000, 1),
                line("Es Jeruk", "Besar", 10_000, 1),
            ],
        )];

        let top = compute_top_items(&txs);
        assert_eq!(top[0].name, "Es Teh (Besar)");
        assert_eq!(top[1].name, "Es Jeruk (Besar)");
    }

    #[test]
    fn test_top_items_same_name_different_variant_separate() {
        let txs = vec![tx(
            "ORD-1",
            0,
            at(2026, 8, 23, 9),
            vec![
                line("Dimsum Ayam", "Besar", 18_000, 2),
                line("Dimsum Ayam", "Kecil", 12_000, 1),
            ],
        )];

        let top = compute_top_items(&txs);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_transactions_without_items_contribute_nothing() {
        let txs = vec![tx("ORD-1", 50_000, at(2026, 8, 23, 9), vec![])];
        assert!(compute_top_items(&txs).is_empty());
    }

    #[test]
    fn test_period_windows() {
        let now = at(2026, 8, 23, 14);

        let today = ReportPeriod::Today.window(now, None, None).unwrap();
        assert_eq!(today.start, Some(at(2026, 8, 23, 0)));
        assert!(today.contains(now));
        assert!(!today.contains(at(2026, 8, 22, 23)));

        let week = ReportPeriod::Week.window(now, None, None).unwrap();
        assert_eq!(week.start, Some(now - Duration::days(7)));

        let all = ReportPeriod::All.window(now, None, None).unwrap();
        assert_eq!(all, DateWindow::unbounded());
        assert!(all.contains(at(2000, 1, 1, 0)));
    }

    #[test]
    fn test_custom_window_half_open_and_rejection() {
        let now = at(2026, 8, 23, 14);
        let start = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();

        let window = ReportPeriod::Custom
            .window(now, Some(start), Some(end))
            .unwrap();
        assert!(window.contains(at(2026, 8, 10, 23)));
        assert!(!window.contains(at(2026, 8, 11, 0)));

        assert!(matches!(
            ReportPeriod::Custom.window(now, Some(start), None),
            Err(ReportError::IncompleteCustomRange)
        ));
        assert!(matches!(
            ReportPeriod::Custom.window(now, None, None),
            Err(ReportError::IncompleteCustomRange)
        ));
    }

    #[test]
    fn test_filter_by_order_number() {
        let txs = vec![
            tx("ORD-20260823-0042", 10_000, at(2026, 8, 23, 9), vec![]),
            tx("ORD-20260823-0777", 20_000, at(2026, 8, 23, 10), vec![]),
        ];

        assert_eq!(filter_by_order_number(&txs, "0042").len(), 1);
        assert_eq!(filter_by_order_number(&txs, "ord-2026").len(), 2);
        assert!(filter_by_order_number(&txs, "9999").is_empty());
    }
}
