use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use club_core::{fine_ranking, payment_status, DashboardSummary, FineRankingEntry, PlayerPaymentStatus};

use crate::{
    dto::{RankingQuery, YearQuery, REPORT_YEARS},
    error::{ApiError, ApiResult},
    AppState,
};

const DEFAULT_RANKING_LIMIT: usize = 10;
const MAX_RANKING_LIMIT: usize = 100;

pub async fn summary(State(state): State<AppState>) -> ApiResult<Json<DashboardSummary>> {
    let snapshot = state.store.snapshot().await?;
    Ok(Json(DashboardSummary::compute(&snapshot.ledger())))
}

pub async fn fine_ranking_list(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> ApiResult<Json<Vec<FineRankingEntry>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RANKING_LIMIT)
        .clamp(1, MAX_RANKING_LIMIT);

    let snapshot = state.store.snapshot().await?;
    Ok(Json(fine_ranking(&snapshot.ledger(), limit)))
}

/// Which months each player has paid in a year, with pending fines.
pub async fn payment_status_grid(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<Vec<PlayerPaymentStatus>>> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    if !REPORT_YEARS.contains(&year) {
        return Err(ApiError::BadRequest(format!("year {} is out of range", year)));
    }

    let snapshot = state.store.snapshot().await?;
    Ok(Json(payment_status(&snapshot.ledger(), year)))
}
