//! Spend statistics over finalized receipt extractions.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::receipt::{Category, ReceiptExtraction};

/// Time bucket for period aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Day of month, 1-31.
    Day,
    /// Calendar month, 1-12, merged across years.
    Month,
    /// Calendar year.
    Year,
}

impl Period {
    /// Parse a period name. Returns None for unknown names.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Some(Period::Day),
            "month" => Some(Period::Month),
            "year" => Some(Period::Year),
            _ => None,
        }
    }

    /// Lowercase period name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated spend for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    /// Category the receipts resolved to.
    pub category: Category,

    /// Sum of receipt totals in this category.
    pub total_amount: Decimal,

    /// Number of receipts in this category.
    pub receipt_count: usize,
}

/// Aggregated spend for one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSpend {
    /// Bucket key: day of month, month number, or year.
    pub period: i32,

    /// Sum of receipt totals in this bucket.
    pub total_amount: Decimal,
}

/// Sum receipt totals per category, largest spend first.
///
/// Ties keep the order categories first appear in the input.
pub fn spend_by_category(receipts: &[ReceiptExtraction]) -> Vec<CategorySpend> {
    let mut table: Vec<CategorySpend> = Vec::new();

    for receipt in receipts {
        match table.iter_mut().find(|s| s.category == receipt.category) {
            Some(spend) => {
                spend.total_amount += receipt.total_amount;
                spend.receipt_count += 1;
            }
            None => table.push(CategorySpend {
                category: receipt.category,
                total_amount: receipt.total_amount,
                receipt_count: 1,
            }),
        }
    }

    table.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    table
}

/// Sum receipt totals per time bucket, in ascending bucket order.
///
/// Month buckets merge the same calendar month across years, so August
/// 2024 and August 2025 land in one bucket. Day buckets do the same
/// with the day of month.
pub fn spend_by_period(receipts: &[ReceiptExtraction], period: Period) -> Vec<PeriodSpend> {
    let mut table: Vec<PeriodSpend> = Vec::new();

    for receipt in receipts {
        let key = match period {
            Period::Day => receipt.date.day() as i32,
            Period::Month => receipt.date.month() as i32,
            Period::Year => receipt.date.year(),
        };

        match table.iter_mut().find(|s| s.period == key) {
            Some(spend) => spend.total_amount += receipt.total_amount,
            None => table.push(PeriodSpend {
                period: key,
                total_amount: receipt.total_amount,
            }),
        }
    }

    table.sort_by_key(|s| s.period);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn receipt(category: Category, total: Decimal, date: (i32, u32, u32)) -> ReceiptExtraction {
        ReceiptExtraction {
            store_name: "Billa".to_string(),
            total_amount: total,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category,
            products: Vec::new(),
        }
    }

    #[test]
    fn test_category_table_sums_counts_and_orders() {
        let receipts = [
            receipt(Category::Transport, Decimal::new(200, 2), (2025, 8, 1)),
            receipt(Category::Food, Decimal::new(370, 2), (2025, 8, 9)),
            receipt(Category::Food, Decimal::new(130, 2), (2025, 8, 12)),
        ];

        let table = spend_by_category(&receipts);

        assert_eq!(
            table,
            vec![
                CategorySpend {
                    category: Category::Food,
                    total_amount: Decimal::new(500, 2),
                    receipt_count: 2,
                },
                CategorySpend {
                    category: Category::Transport,
                    total_amount: Decimal::new(200, 2),
                    receipt_count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_category_ties_keep_first_seen_order() {
        let receipts = [
            receipt(Category::Pharmacy, Decimal::new(500, 2), (2025, 1, 1)),
            receipt(Category::Food, Decimal::new(500, 2), (2025, 1, 2)),
        ];

        let table = spend_by_category(&receipts);

        assert_eq!(table[0].category, Category::Pharmacy);
        assert_eq!(table[1].category, Category::Food);
    }

    #[test]
    fn test_month_buckets_merge_across_years() {
        let receipts = [
            receipt(Category::Food, Decimal::new(100, 2), (2024, 8, 3)),
            receipt(Category::Food, Decimal::new(250, 2), (2025, 8, 9)),
            receipt(Category::Food, Decimal::new(400, 2), (2025, 9, 1)),
        ];

        let table = spend_by_period(&receipts, Period::Month);

        assert_eq!(
            table,
            vec![
                PeriodSpend {
                    period: 8,
                    total_amount: Decimal::new(350, 2),
                },
                PeriodSpend {
                    period: 9,
                    total_amount: Decimal::new(400, 2),
                },
            ]
        );
    }

    #[test]
    fn test_year_buckets_sort_ascending() {
        let receipts = [
            receipt(Category::Food, Decimal::new(300, 2), (2025, 2, 1)),
            receipt(Category::Food, Decimal::new(100, 2), (2024, 5, 1)),
        ];

        let table = spend_by_period(&receipts, Period::Year);

        assert_eq!(table[0].period, 2024);
        assert_eq!(table[1].period, 2025);
    }

    #[test]
    fn test_day_buckets_use_day_of_month() {
        let receipts = [
            receipt(Category::Food, Decimal::new(100, 2), (2025, 8, 9)),
            receipt(Category::Food, Decimal::new(200, 2), (2025, 7, 9)),
        ];

        let table = spend_by_period(&receipts, Period::Day);

        assert_eq!(
            table,
            vec![PeriodSpend {
                period: 9,
                total_amount: Decimal::new(300, 2),
            }]
        );
    }

    #[test]
    fn test_empty_input_gives_empty_tables() {
        assert!(spend_by_category(&[]).is_empty());
        assert!(spend_by_period(&[], Period::Month).is_empty());
    }

    #[test]
    fn test_period_names_round_trip() {
        for period in [Period::Day, Period::Month, Period::Year] {
            assert_eq!(Period::from_str(period.as_str()), Some(period));
        }
        assert_eq!(Period::from_str("week"), None);
    }
}
