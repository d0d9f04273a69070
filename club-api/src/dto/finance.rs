use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Years accepted by the period reports.
pub const REPORT_YEARS: std::ops::RangeInclusive<i32> = 2000..=2100;

/// Inclusive date range; either end may be left open.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatementQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// A whole year, or one month of it.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodQuery {
    pub year: i32,
    pub month: Option<u32>,
}

/// Defaults to the current month.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Defaults to the current year.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: Decimal,
    pub generated_at: DateTime<Utc>,
}
