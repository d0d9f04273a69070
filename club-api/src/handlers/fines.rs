use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use club_core::{
    group_contributions, Fine, FineCause, FineDetail, GroupContributionSummary, Player, PlayerId,
    Repository,
};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::*,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    response::{paginate, ListQuery, PaginatedResponse, PaginationParams},
    security::ValidatedForm,
    AppState,
};

/// Fines with player and cause joined in. Players only see their own.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    params: PaginationParams,
    Query(query): Query<ListQuery>,
    Query(filter): Query<FineFilter>,
) -> ApiResult<PaginatedResponse<FineDetail>> {
    let scope = user.own_player_scope()?;
    let mut fines = state.store.fines.list().await?;

    fines.retain(|fine| {
        scope.map_or(true, |id| fine.player_id == id)
            && filter.player_id.as_ref().map_or(true, |id| &fine.player_id == id)
            && filter.paid.map_or(true, |paid| fine.paid == paid)
            && filter.group_id.map_or(true, |group| fine.group_id == Some(group))
    });

    let details = join_details(&state, fines).await?;
    paginate(details, &query, &params, state.default_page_size, None, &uri)
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<CreateFineRequest>,
) -> ApiResult<(StatusCode, Json<FineDetail>)> {
    let player = state
        .store
        .players
        .find_by_id(&payload.player_id)
        .await?
        .ok_or_else(|| ApiError::field("player_id", "Player not found"))?;
    let cause = find_cause(&state, &payload.cause_id).await?;

    let issued_on = payload.issued_on.unwrap_or_else(|| Utc::now().date_naive());
    let fine = state
        .store
        .fines
        .save(&Fine::new(player.national_id.clone(), cause.id, issued_on))
        .await?;
    state.store.refresh_standing(&player.national_id).await?;

    tracing::info!(fine_id = %fine.id, player = %player.national_id, "Fine issued");
    Ok((
        StatusCode::CREATED,
        Json(FineDetail::new(fine, Some(&player), Some(&cause))),
    ))
}

/// Mark a fine paid or unpaid.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFineRequest>,
) -> ApiResult<Json<Fine>> {
    let fine = state.store.fines.set_paid(&id, payload.paid).await?;
    state.store.refresh_standing(&fine.player_id).await?;
    tracing::info!(fine_id = %id, paid = payload.paid, "Fine updated");
    Ok(Json(fine))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    let fine = state
        .store
        .fines
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Fine {} not found", id)))?;
    state.store.fines.delete(&id).await?;
    state.store.refresh_standing(&fine.player_id).await?;
    tracing::info!(fine_id = %id, "Fine deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_causes(State(state): State<AppState>) -> ApiResult<Json<Vec<FineCause>>> {
    Ok(Json(state.store.fine_causes.list().await?))
}

pub async fn create_cause(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<CreateFineCauseRequest>,
) -> ApiResult<(StatusCode, Json<FineCause>)> {
    check_article(&state, payload.article_id.as_ref()).await?;
    let cause = FineCause::new(payload.description.trim().to_string(), payload.amount)
        .with_article(payload.article_id);
    cause.validate()?;

    let cause = state.store.fine_causes.save(&cause).await?;
    tracing::info!(cause_id = %cause.id, "Fine cause created");
    Ok((StatusCode::CREATED, Json(cause)))
}

/// Replace a cause's description, amount and article link. Existing fines
/// follow the new amount.
pub async fn update_cause(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedForm(payload): ValidatedForm<CreateFineCauseRequest>,
) -> ApiResult<Json<FineCause>> {
    let mut cause = state
        .store
        .fine_causes
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Fine cause {} not found", id)))?;
    check_article(&state, payload.article_id.as_ref()).await?;

    cause.description = payload.description.trim().to_string();
    cause.amount = payload.amount;
    cause.article_id = payload.article_id;
    cause.validate()?;

    let cause = state.store.fine_causes.update(&cause).await?;
    tracing::info!(cause_id = %id, amount = %cause.amount, "Fine cause updated");
    Ok(Json(cause))
}

pub async fn delete_cause(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.store.fines.any_with_cause(&id).await {
        return Err(ApiError::Conflict(
            "fine cause is used by existing fines".to_string(),
        ));
    }

    state.store.fine_causes.delete(&id).await?;
    tracing::info!(cause_id = %id, "Fine cause deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Group contribution: one fine per active player under a shared group id.
pub async fn create_group(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<GroupFineRequest>,
) -> ApiResult<(StatusCode, Json<GroupFineResponse>)> {
    let cause = find_cause(&state, &payload.cause_id).await?;
    let players = state.store.players.list_active().await?;
    if players.is_empty() {
        return Err(ApiError::Validation("there are no active players".to_string()));
    }

    let group_id = Uuid::new_v4();
    let concept = payload.concept.trim().to_string();
    let issued_on = payload.issued_on.unwrap_or_else(|| Utc::now().date_naive());

    let batch: Vec<Fine> = players
        .iter()
        .map(|player| {
            Fine::new(player.national_id.clone(), cause.id, issued_on)
                .in_group(group_id, concept.clone())
        })
        .collect();
    let saved = state.store.fines.save_all(&batch).await?;

    let mut fines = Vec::with_capacity(saved.len());
    for (fine, player) in saved.into_iter().zip(&players) {
        state.store.refresh_standing(&player.national_id).await?;
        fines.push(FineDetail::new(fine, Some(player), Some(&cause)));
    }

    tracing::info!(%group_id, count = fines.len(), "Group contribution issued");
    Ok((
        StatusCode::CREATED,
        Json(GroupFineResponse {
            group_id,
            concept,
            fines_created: fines.len(),
            fines,
        }),
    ))
}

pub async fn list_groups(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<GroupContributionSummary>>> {
    let fines = state.store.fines.list().await?;
    let causes = state.store.fine_causes.list().await?;
    Ok(Json(group_contributions(&fines, &causes)))
}

/// Every fine issued under one group contribution.
pub async fn group_detail(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<Vec<FineDetail>>> {
    let fines = state.store.fines.list_by_group(&group_id).await?;
    if fines.is_empty() {
        return Err(ApiError::NotFound(format!("Group contribution {} not found", group_id)));
    }
    Ok(Json(join_details(&state, fines).await?))
}

/// A cause may only point at an existing sanctionable article.
async fn check_article(state: &AppState, article_id: Option<&Uuid>) -> ApiResult<()> {
    let Some(id) = article_id else {
        return Ok(());
    };
    match state.store.articles.find_by_id(id).await? {
        Some(article) if article.is_sanctionable() => Ok(()),
        Some(_) => Err(ApiError::field("article_id", "Article is not sanctionable")),
        None => Err(ApiError::field("article_id", "Article not found")),
    }
}

async fn find_cause(state: &AppState, id: &Uuid) -> ApiResult<FineCause> {
    state
        .store
        .fine_causes
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::field("cause_id", "Fine cause not found"))
}

async fn join_details(state: &AppState, fines: Vec<Fine>) -> ApiResult<Vec<FineDetail>> {
    let players: HashMap<PlayerId, Player> = state
        .store
        .players
        .list()
        .await?
        .into_iter()
        .map(|p| (p.national_id.clone(), p))
        .collect();
    let causes: HashMap<Uuid, FineCause> = state
        .store
        .fine_causes
        .list()
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(fines
        .into_iter()
        .map(|fine| {
            let player = players.get(&fine.player_id);
            let cause = causes.get(&fine.cause_id);
            FineDetail::new(fine, player, cause)
        })
        .collect())
}
