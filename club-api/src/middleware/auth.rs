use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use club_core::{Account, PlayerId, Role};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

/// Token signing settings, taken from the server configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::hours(ttl_hours),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // account email
    pub exp: usize,
    pub iat: usize,
    pub role: Role,
    pub player_id: Option<PlayerId>,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub role: Role,
    pub player_id: Option<PlayerId>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins see everyone; players only themselves.
    pub fn can_view_player(&self, player_id: &str) -> bool {
        self.is_admin() || self.player_id.as_deref() == Some(player_id)
    }

    /// Player scope for list endpoints: `None` for admins.
    pub fn own_player_scope(&self) -> ApiResult<Option<&str>> {
        if self.is_admin() {
            return Ok(None);
        }
        self.player_id
            .as_deref()
            .map(Some)
            .ok_or(ApiError::Forbidden)
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            role: claims.role,
            player_id: claims.player_id,
        }
    }
}

/// Sign a token for `account`
pub fn issue_token(config: &AuthConfig, account: &Account) -> ApiResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: account.email.clone(),
        exp: (now + config.token_ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
        role: account.role,
        player_id: account.player_id.clone(),
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?)
}

/// Validate JWT token and extract claims
pub fn validate_token(config: &AuthConfig, token: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let claims = validate_token(&state.auth, token).map_err(|err| {
        tracing::warn!("Rejected bearer token: {}", err);
        err
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::new("test-secret", 1)
    }

    #[test]
    fn test_token_roundtrip() {
        let account = Account::new("p@club.com", "P", "pw", Role::Player).for_player("1001".into());
        let token = issue_token(&config(), &account).unwrap();
        let claims = validate_token(&config(), &token).unwrap();

        assert_eq!(claims.sub, "p@club.com");
        assert_eq!(claims.role, Role::Player);
        assert_eq!(claims.player_id.as_deref(), Some("1001"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let account = Account::new("a@club.com", "A", "pw", Role::Admin);
        let token = issue_token(&config(), &account).unwrap();
        assert!(validate_token(&AuthConfig::new("other", 1), &token).is_err());
    }

    #[test]
    fn test_player_scope() {
        let player = AuthUser {
            email: "p@club.com".into(),
            role: Role::Player,
            player_id: Some("1001".into()),
        };
        assert!(player.can_view_player("1001"));
        assert!(!player.can_view_player("2002"));
        assert_eq!(player.own_player_scope().unwrap(), Some("1001"));

        let admin = AuthUser {
            email: "a@club.com".into(),
            role: Role::Admin,
            player_id: None,
        };
        assert!(admin.can_view_player("2002"));
        assert_eq!(admin.own_player_scope().unwrap(), None);
    }
}
