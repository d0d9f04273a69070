use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use club_core::{Repository, Setting};
use validator::Validate;

use crate::{
    dto::{CreateSettingRequest, UpdateSettingRequest},
    error::{ApiError, ApiResult},
    security::ValidatedForm,
    AppState,
};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Setting>>> {
    Ok(Json(state.store.settings.list().await?))
}

pub async fn get(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<Json<Setting>> {
    state
        .store
        .settings
        .find_by_id(&key)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Setting {} not found", key)))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<CreateSettingRequest>,
) -> ApiResult<(StatusCode, Json<Setting>)> {
    payload.validate()?;

    let setting = state.store.settings.create(&payload.into_setting()).await?;
    tracing::info!(key = %setting.key, value = %setting.value, "Setting created");
    Ok((StatusCode::CREATED, Json(setting)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(key): Path<String>,
    ValidatedForm(payload): ValidatedForm<UpdateSettingRequest>,
) -> ApiResult<Json<Setting>> {
    payload.validate()?;

    let setting = state
        .store
        .settings
        .update(&key, payload.value, payload.description)
        .await?;

    tracing::info!(key = %setting.key, value = %setting.value, "Setting updated");
    Ok(Json(setting))
}

pub async fn delete(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<StatusCode> {
    state.store.settings.delete(&key).await?;
    tracing::info!(%key, "Setting deleted");
    Ok(StatusCode::NO_CONTENT)
}
