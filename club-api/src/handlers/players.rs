use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use club_core::{Account, AccountStatement, Player, PlayerId, Repository, Role};
use validator::Validate;

use crate::{
    dto::*,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    response::{paginate, CsvFile, ListQuery, PaginatedResponse, PaginationParams},
    security::ValidatedForm,
    AppState,
};

pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: PaginationParams,
    Query(query): Query<ListQuery>,
    Query(filter): Query<PlayerFilter>,
) -> ApiResult<PaginatedResponse<Player>> {
    let mut players = state.store.players.list().await?;
    if let Some(active) = filter.active {
        players.retain(|p| p.active == active);
    }

    paginate(players, &query, &params, state.default_page_size, None, &uri)
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<CreatePlayerRequest>,
) -> ApiResult<(StatusCode, Json<Player>)> {
    let login = payload.login()?;
    let player = payload.into_player();
    player.validate()?;

    check_referrer(&state, &player).await?;
    if let Some((email, _)) = &login {
        if state.store.accounts.find_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict(format!("account {} already exists", email)));
        }
    }

    let player = state.store.players.create(&player).await?;

    if let Some((email, password)) = login {
        let account = Account::new(email, player.full_name(), &password, Role::Player)
            .for_player(player.national_id.clone());
        state.store.accounts.save(&account).await?;
    }

    tracing::info!(national_id = %player.national_id, "Player registered");
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<PlayerId>,
) -> ApiResult<Json<Player>> {
    if !user.can_view_player(&id) {
        return Err(ApiError::Forbidden);
    }

    Ok(Json(find_player(&state, &id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
    ValidatedForm(payload): ValidatedForm<PlayerForm>,
) -> ApiResult<Json<Player>> {
    let mut player = find_player(&state, &id).await?;
    payload.apply(&mut player);
    player.validate()?;

    if player.referred_by.as_deref() == Some(id.as_str()) {
        return Err(ApiError::field("referred_by", "A player cannot refer themselves"));
    }
    check_referrer(&state, &player).await?;

    let player = state.store.players.update(&player).await?;
    tracing::info!(national_id = %player.national_id, "Player updated");
    Ok(Json(player))
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
    Json(payload): Json<StatusRequest>,
) -> ApiResult<Json<Player>> {
    let player = state.store.players.set_active(&id, payload.active).await?;
    tracing::info!(national_id = %id, active = payload.active, "Player status changed");
    Ok(Json(player))
}

/// Pending fines, dues and contributions for one player.
pub async fn account(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<PlayerId>,
) -> ApiResult<Json<AccountStatement>> {
    if !user.can_view_player(&id) {
        return Err(ApiError::Forbidden);
    }

    let player = find_player(&state, &id).await?;
    let snapshot = state.store.snapshot().await?;
    Ok(Json(AccountStatement::compute(&player, &snapshot.ledger())))
}

pub async fn export_csv(State(state): State<AppState>) -> ApiResult<CsvFile> {
    let players = state.store.players.list().await?;
    tracing::info!(count = players.len(), "Exporting roster");
    Ok(CsvFile::new("players.csv", &players))
}

async fn find_player(state: &AppState, id: &PlayerId) -> ApiResult<Player> {
    state
        .store
        .players
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Player {} not found", id)))
}

async fn check_referrer(state: &AppState, player: &Player) -> ApiResult<()> {
    if let Some(referrer) = &player.referred_by {
        if state.store.players.find_by_id(referrer).await?.is_none() {
            return Err(ApiError::field("referred_by", "Referring player not found"));
        }
    }
    Ok(())
}
