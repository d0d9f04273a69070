use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use club_core::view::{FieldErrors, SortSpec};
use club_core::{
    Contribution, CoreError, Fine, FineDetail, MonthlyDue, PaymentKind, PaymentRecord, Player,
    PlayerId, Repository,
};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use validator::Validate;

use crate::{
    dto::*,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    response::{paginate, ListQuery, PaginatedResponse, PaginationParams},
    security::ValidatedForm,
    AppState,
};

/// Monthly dues and other contributions in one list, newest first by default.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    params: PaginationParams,
    Query(query): Query<ListQuery>,
    Query(filter): Query<PaymentFilter>,
) -> ApiResult<PaginatedResponse<PaymentRecord>> {
    let scope = user.own_player_scope()?;
    let players: HashMap<PlayerId, Player> = state
        .store
        .players
        .list()
        .await?
        .into_iter()
        .map(|p| (p.national_id.clone(), p))
        .collect();

    let dues = state.store.dues.list().await?;
    let contributions = state.store.contributions.list().await?;

    let mut records: Vec<PaymentRecord> = dues
        .iter()
        .map(|d| PaymentRecord::from_due(d, players.get(&d.player_id)))
        .chain(
            contributions
                .iter()
                .map(|c| PaymentRecord::from_contribution(c, players.get(&c.player_id))),
        )
        .collect();

    records.retain(|record| {
        scope.map_or(true, |id| record.player_id == id)
            && filter.player_id.as_ref().map_or(true, |id| &record.player_id == id)
            && filter.kind.map_or(true, |kind| record.kind == kind)
    });

    paginate(
        records,
        &query,
        &params,
        state.default_page_size,
        Some(SortSpec::desc("paid_at")),
        &uri,
    )
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<CreatePaymentRequest>,
) -> ApiResult<(StatusCode, Json<PaymentRecord>)> {
    let player = state
        .store
        .players
        .find_by_id(&payload.player_id)
        .await?
        .ok_or_else(|| ApiError::field("player_id", "Player not found"))?;

    let record = match payload.kind {
        PaymentKind::MonthlyDue => {
            let (month, year) = match (payload.month, payload.year) {
                (Some(month), Some(year)) => (month, year),
                (month, year) => {
                    let mut errors = FieldErrors::new();
                    if month.is_none() {
                        errors.insert("month".into(), "This field is required".into());
                    }
                    if year.is_none() {
                        errors.insert("year".into(), "This field is required".into());
                    }
                    return Err(ApiError::FieldErrors(errors));
                }
            };

            let amount = match payload.amount {
                Some(amount) => amount,
                None => state.store.monthly_due_for(&player).await?,
            };
            let due = MonthlyDue::new(player.national_id.clone(), month, year, amount);
            due.validate()?;

            let due = state.store.dues.record(&due).await?;
            tracing::info!(player = %player.national_id, month, year, "Monthly due recorded");
            PaymentRecord::from_due(&due, Some(&player))
        }
        PaymentKind::Contribution => {
            let concept = payload
                .concept
                .filter(|c| !c.trim().is_empty())
                .ok_or_else(|| ApiError::field("concept", "This field is required"))?;
            let amount = payload
                .amount
                .ok_or_else(|| ApiError::field("amount", "This field is required"))?;

            let contribution =
                Contribution::new(player.national_id.clone(), concept.trim().to_string(), amount);
            contribution.validate()?;

            let contribution = state.store.contributions.save(&contribution).await?;
            tracing::info!(player = %player.national_id, "Contribution recorded");
            PaymentRecord::from_contribution(&contribution, Some(&player))
        }
    };

    Ok((StatusCode::CREATED, Json(record)))
}

/// Pay several monthly dues and fines of one player at once. Every item is
/// checked before anything is written, and a failed write undoes the rest.
pub async fn create_combined(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<CombinedPaymentRequest>,
) -> ApiResult<(StatusCode, Json<CombinedPaymentReceipt>)> {
    let player = state
        .store
        .players
        .find_by_id(&payload.player_id)
        .await?
        .ok_or_else(|| ApiError::field("player_id", "Player not found"))?;
    if payload.months.is_empty() && payload.fine_ids.is_empty() {
        return Err(ApiError::Validation(
            "a combined payment needs at least one month or fine".to_string(),
        ));
    }

    let paid_at = Utc::now();
    let dues = pending_dues(&state, &player, &payload.months, paid_at).await?;
    let fines = pending_fines(&state, &player, &payload.fine_ids).await?;

    let mut recorded = Vec::with_capacity(dues.len());
    for due in &dues {
        match state.store.dues.record(due).await {
            Ok(due) => recorded.push(due),
            Err(err) => {
                undo_settlement(&state, &recorded, &[]).await;
                return Err(err.into());
            }
        }
    }
    let mut settled = Vec::with_capacity(fines.len());
    for fine in &fines {
        match state.store.fines.mark_paid(&fine.id, paid_at).await {
            Ok(fine) => settled.push(fine),
            Err(err) => {
                undo_settlement(&state, &recorded, &settled).await;
                return Err(err.into());
            }
        }
    }

    let good_standing = state.store.refresh_standing(&player.national_id).await?;

    let mut fine_details = Vec::with_capacity(settled.len());
    for fine in settled {
        let cause = state.store.fine_causes.find_by_id(&fine.cause_id).await?;
        fine_details.push(FineDetail::new(fine, Some(&player), cause.as_ref()));
    }
    let due_records: Vec<PaymentRecord> = recorded
        .iter()
        .map(|due| PaymentRecord::from_due(due, Some(&player)))
        .collect();
    let total = due_records.iter().map(|r| r.amount).sum::<Decimal>()
        + fine_details.iter().map(|d| d.amount).sum::<Decimal>();

    tracing::info!(
        player = %player.national_id,
        dues = due_records.len(),
        fines = fine_details.len(),
        %total,
        "Combined payment recorded"
    );
    Ok((
        StatusCode::CREATED,
        Json(CombinedPaymentReceipt {
            player_id: player.national_id,
            paid_at,
            dues: due_records,
            fines: fine_details,
            total,
            account_in_good_standing: good_standing,
        }),
    ))
}

/// Dues for the requested months, charged the player's monthly fee.
async fn pending_dues(
    state: &AppState,
    player: &Player,
    months: &[DueMonth],
    paid_at: DateTime<Utc>,
) -> ApiResult<Vec<MonthlyDue>> {
    if months.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    if let Some(twice) = months.iter().find(|m| !seen.insert(**m)) {
        return Err(ApiError::field(
            "months",
            format!("Month {}/{} is listed twice", twice.month, twice.year),
        ));
    }

    let paid = state.store.dues.list_by_player(&player.national_id).await?;
    if let Some(taken) = months
        .iter()
        .find(|m| paid.iter().any(|due| due.covers(m.month, m.year)))
    {
        return Err(CoreError::AlreadyExists(format!(
            "monthly due {}/{} for player {}",
            taken.month, taken.year, player.national_id
        ))
        .into());
    }

    let amount = state.store.monthly_due_for(player).await?;
    months
        .iter()
        .map(|m| -> ApiResult<MonthlyDue> {
            let mut due = MonthlyDue::new(player.national_id.clone(), m.month, m.year, amount);
            due.paid_at = paid_at;
            due.validate()?;
            Ok(due)
        })
        .collect()
}

/// The player's unpaid fines among `ids`.
async fn pending_fines(state: &AppState, player: &Player, ids: &[uuid::Uuid]) -> ApiResult<Vec<Fine>> {
    let mut seen = HashSet::new();
    let mut fines = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(ApiError::field("fine_ids", format!("Fine {} is listed twice", id)));
        }
        let fine = state
            .store
            .fines
            .find_by_id(id)
            .await?
            .filter(|fine| fine.player_id == player.national_id)
            .ok_or_else(|| {
                ApiError::field("fine_ids", format!("Fine {} not found for this player", id))
            })?;
        if fine.paid {
            return Err(CoreError::InvalidState(format!("fine {} is already paid", id)).into());
        }
        fines.push(fine);
    }
    Ok(fines)
}

async fn undo_settlement(state: &AppState, dues: &[MonthlyDue], fines: &[Fine]) {
    for due in dues {
        if let Err(err) = state.store.dues.delete(&due.id).await {
            tracing::error!(due_id = %due.id, error = %err, "Failed to undo monthly due");
        }
    }
    for fine in fines {
        if let Err(err) = state.store.fines.set_paid(&fine.id, false).await {
            tracing::error!(fine_id = %fine.id, error = %err, "Failed to undo fine payment");
        }
    }
    tracing::warn!(dues = dues.len(), fines = fines.len(), "Combined payment rolled back");
}
