use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Duration;
use club_core::view::SessionPreferences;
use club_core::{Account, RESET_TOKEN_TTL_MINUTES};

use crate::{
    dto::*,
    error::{ApiError, ApiResult},
    middleware::{issue_token, AuthUser},
    security::ValidatedForm,
    AppState,
};

pub async fn login(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let account = state
        .store
        .accounts
        .authenticate(&payload.email, &payload.password)
        .await
        .map_err(|err| {
            tracing::warn!(email = %payload.email, "Failed login attempt");
            ApiError::from(err)
        })?;

    let token = issue_token(&state.auth, &account)?;
    tracing::info!(email = %account.email, role = account.role.as_str(), "User logged in");

    Ok(Json(LoginResponse::new(token, &account, state.auth.token_ttl)))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Account>> {
    let account = state
        .store
        .accounts
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("account {}", user.email)))?;

    Ok(Json(account))
}

pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(preferences): Json<SessionPreferences>,
) -> ApiResult<Json<SessionPreferences>> {
    let account = state
        .store
        .accounts
        .update_preferences(&user.email, preferences)
        .await?;

    Ok(Json(account.preferences))
}

/// Start a password reset. The answer is the same whether or not the email
/// belongs to an account.
pub async fn recover_password(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<RecoverPasswordRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    if let Some(account) = state.store.accounts.find_by_email(&payload.email).await? {
        let token = state
            .store
            .password_resets
            .issue(&account.email, Duration::minutes(RESET_TOKEN_TTL_MINUTES))
            .await;
        state.reset_notifier.send_reset(&account.email, &token);
        tracing::info!(email = %account.email, "Password reset requested");
    } else {
        tracing::warn!(email = %payload.email, "Password reset for unknown email");
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(
            "If the email belongs to an account, reset instructions have been sent",
        )),
    ))
}

pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .store
        .password_resets
        .consume(&payload.email, payload.token.trim())
        .await
        .map_err(|_| ApiError::BadRequest("invalid or expired reset token".to_string()))?;
    state
        .store
        .accounts
        .set_password(&payload.email, &payload.new_password)
        .await?;

    tracing::info!(email = %payload.email.to_lowercase(), "Password reset completed");
    Ok(Json(MessageResponse::new("Password updated")))
}
