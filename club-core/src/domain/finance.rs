//! Team-level money reports over a period: account statement, monthly
//! summary and the per-player payment grid.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::expense::Expense;
use super::player::PlayerId;
use super::reports::{expense_summary, CategorySummary, Ledger};
use crate::error::{CoreError, Result};

/// Time range `[start, end)`. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

fn start_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl Period {
    /// The whole history.
    pub fn all() -> Self {
        Self::default()
    }

    /// From the start of `from` through the end of `to`, both days included.
    pub fn between(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(CoreError::Validation(
                    "period start must not be after its end".to_string(),
                ));
            }
        }
        Ok(Self {
            start: from.map(start_of),
            end: to.and_then(|d| d.succ_opt()).map(start_of),
        })
    }

    /// One calendar month.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let invalid = || CoreError::Validation(format!("invalid month {}/{}", month, year));
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;

        Ok(Self {
            start: Some(start_of(first)),
            end: Some(start_of(next)),
        })
    }

    /// One calendar year.
    pub fn year(year: i32) -> Result<Self> {
        let invalid = || CoreError::Validation(format!("invalid year {}", year));
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
        let next = NaiveDate::from_ymd_opt(year + 1, 1, 1).ok_or_else(invalid)?;
        Ok(Self {
            start: Some(start_of(first)),
            end: Some(start_of(next)),
        })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at < end)
    }
}

/// Income and expenses of the whole team within a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamStatement {
    pub dues_income: Decimal,
    pub fines_income: Decimal,
    pub contributions_income: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// Income minus expenses within the period.
    pub balance: Decimal,
    pub expenses_by_category: Vec<CategorySummary>,
    pub period: Period,
    pub generated_at: DateTime<Utc>,
}

struct PeriodTotals {
    dues: Decimal,
    fines: Decimal,
    contributions: Decimal,
    expenses: Decimal,
}

impl PeriodTotals {
    /// Cash basis: every record counts on the day its money moved.
    fn compute(ledger: &Ledger<'_>, period: Period) -> Self {
        let amounts = ledger.cause_amounts();
        Self {
            dues: ledger
                .dues
                .iter()
                .filter(|d| period.contains(d.paid_at))
                .map(|d| d.amount)
                .sum(),
            fines: ledger
                .fines
                .iter()
                .filter(|f| f.paid && f.paid_at.map_or(false, |at| period.contains(at)))
                .map(|f| Ledger::fine_amount(&amounts, f))
                .sum(),
            contributions: ledger
                .contributions
                .iter()
                .filter(|c| period.contains(c.paid_at))
                .map(|c| c.amount)
                .sum(),
            expenses: ledger
                .expenses
                .iter()
                .filter(|e| period.contains(e.date))
                .map(|e| e.amount)
                .sum(),
        }
    }

    fn income(&self) -> Decimal {
        self.dues + self.fines + self.contributions
    }
}

impl TeamStatement {
    pub fn compute(ledger: &Ledger<'_>, period: Period) -> Self {
        let totals = PeriodTotals::compute(ledger, period);
        let expenses: Vec<Expense> = ledger
            .expenses
            .iter()
            .filter(|e| period.contains(e.date))
            .cloned()
            .collect();

        Self {
            dues_income: totals.dues,
            fines_income: totals.fines,
            contributions_income: totals.contributions,
            total_income: totals.income(),
            total_expenses: totals.expenses,
            balance: totals.income() - totals.expenses,
            expenses_by_category: expense_summary(ledger.categories, &expenses),
            period,
            generated_at: Utc::now(),
        }
    }
}

/// One month's movement next to the all-time balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub current_balance: Decimal,
    pub month_income: Decimal,
    pub month_expenses: Decimal,
    pub month_difference: Decimal,
}

impl MonthlySummary {
    pub fn compute(ledger: &Ledger<'_>, year: i32, month: u32) -> Result<Self> {
        let totals = PeriodTotals::compute(ledger, Period::month(year, month)?);
        Ok(Self {
            year,
            month,
            current_balance: ledger.total_income() - ledger.total_expenses(),
            month_income: totals.income(),
            month_expenses: totals.expenses,
            month_difference: totals.income() - totals.expenses,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthStatus {
    pub paid: bool,
    pub amount: Decimal,
    pub paid_at: Option<DateTime<Utc>>,
}

/// A player's row in the yearly dues grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerPaymentStatus {
    pub player_id: PlayerId,
    pub player_name: String,
    pub registration_name: String,
    pub account_in_good_standing: bool,
    /// Keyed by month number, 1 through 12.
    pub months: BTreeMap<u32, MonthStatus>,
    pub pending_fines_amount: Decimal,
}

/// Dues grid for `year`, one row per player ordered by name.
pub fn payment_status(ledger: &Ledger<'_>, year: i32) -> Vec<PlayerPaymentStatus> {
    let amounts = ledger.cause_amounts();
    let mut pending: HashMap<&str, Decimal> = HashMap::new();
    for fine in ledger.fines.iter().filter(|f| !f.paid) {
        *pending.entry(fine.player_id.as_str()).or_default() += Ledger::fine_amount(&amounts, fine);
    }

    let mut rows: Vec<PlayerPaymentStatus> = ledger
        .players
        .iter()
        .map(|player| {
            let months = (1..=12)
                .map(|month| {
                    let due = ledger
                        .dues
                        .iter()
                        .find(|d| d.player_id == player.national_id && d.covers(month, year));
                    let status = MonthStatus {
                        paid: due.is_some(),
                        amount: due.map(|d| d.amount).unwrap_or_default(),
                        paid_at: due.map(|d| d.paid_at),
                    };
                    (month, status)
                })
                .collect();

            PlayerPaymentStatus {
                player_id: player.national_id.clone(),
                player_name: player.full_name(),
                registration_name: player.registration_name.clone(),
                account_in_good_standing: player.account_in_good_standing,
                months,
                pending_fines_amount: pending
                    .get(player.national_id.as_str())
                    .copied()
                    .unwrap_or_default(),
            }
        })
        .collect();

    rows.sort_by_cached_key(|r| r.player_name.to_lowercase());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_between_includes_last_day() {
        let period = Period::between(Some(day(2024, 3, 1)), Some(day(2024, 3, 31))).unwrap();
        assert!(period.contains(start_of(day(2024, 3, 1))));
        assert!(period.contains(start_of(day(2024, 3, 31)) + chrono::Duration::hours(23)));
        assert!(!period.contains(start_of(day(2024, 4, 1))));
        assert!(!period.contains(start_of(day(2024, 2, 29))));
    }

    #[test]
    fn test_between_rejects_inverted_range() {
        assert!(Period::between(Some(day(2024, 4, 1)), Some(day(2024, 3, 1))).is_err());
        assert!(Period::all().contains(Utc::now()));
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let december = Period::month(2024, 12).unwrap();
        assert_eq!(december.end, Some(start_of(day(2025, 1, 1))));
        assert!(Period::month(2024, 13).is_err());
        assert!(Period::month(2024, 0).is_err());

        let year = Period::year(2024).unwrap();
        assert!(year.contains(start_of(day(2024, 12, 31))));
        assert!(!year.contains(start_of(day(2025, 1, 1))));
    }
}
