use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use club_core::{MonthlySummary, Period, TeamStatement};

use crate::{
    dto::*,
    error::{ApiError, ApiResult},
    AppState,
};

fn check_year(year: i32) -> ApiResult<i32> {
    if REPORT_YEARS.contains(&year) {
        Ok(year)
    } else {
        Err(ApiError::BadRequest(format!(
            "year must be between {} and {}",
            REPORT_YEARS.start(),
            REPORT_YEARS.end()
        )))
    }
}

fn check_month(month: u32) -> ApiResult<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(ApiError::BadRequest("month must be between 1 and 12".to_string()))
    }
}

/// Team account statement, over all history unless a date range is given.
pub async fn statement(
    State(state): State<AppState>,
    Query(range): Query<StatementQuery>,
) -> ApiResult<Json<TeamStatement>> {
    let period = Period::between(range.from, range.to)?;
    let snapshot = state.store.snapshot().await?;
    Ok(Json(TeamStatement::compute(&snapshot.ledger(), period)))
}

/// Team account statement for a year, or one month of it.
pub async fn period_statement(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<TeamStatement>> {
    let year = check_year(query.year)?;
    let period = match query.month {
        Some(month) => Period::month(year, check_month(month)?)?,
        None => Period::year(year)?,
    };

    let snapshot = state.store.snapshot().await?;
    Ok(Json(TeamStatement::compute(&snapshot.ledger(), period)))
}

pub async fn monthly_summary(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<MonthlySummary>> {
    let now = Utc::now();
    let year = check_year(query.year.unwrap_or_else(|| now.year()))?;
    let month = check_month(query.month.unwrap_or_else(|| now.month()))?;

    let snapshot = state.store.snapshot().await?;
    Ok(Json(MonthlySummary::compute(&snapshot.ledger(), year, month)?))
}

/// All-time income minus expenses.
pub async fn balance(State(state): State<AppState>) -> ApiResult<Json<BalanceResponse>> {
    let snapshot = state.store.snapshot().await?;
    let statement = TeamStatement::compute(&snapshot.ledger(), Period::all());
    Ok(Json(BalanceResponse {
        balance: statement.balance,
        generated_at: statement.generated_at,
    }))
}
