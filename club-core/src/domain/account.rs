use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use validator::Validate;

use super::player::PlayerId;
use crate::view::SessionPreferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to every resource.
    Admin,
    /// Read access to the player's own fines, payments and statement.
    Player,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "player" => Some(Role::Player),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Player => "player",
        }
    }
}

/// Login identity for an administrator or a player.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Account {
    #[validate(email)]
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub preferences: SessionPreferences,
}

impl Account {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, password: &str, role: Role) -> Self {
        Self {
            email: email.into().to_lowercase(),
            display_name: display_name.into(),
            password_hash: hash_password(password),
            role,
            player_id: None,
            preferences: SessionPreferences::default(),
        }
    }

    pub fn for_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    pub fn verify_password(&self, password: &str) -> bool {
        hash_password(password) == self.password_hash
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Hex-encoded SHA-256 of the password.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// How long a password reset token stays valid.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 60;

/// Pending password reset. Only the token's hash is kept.
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub email: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl PasswordReset {
    /// New reset for `email`, plus the raw token to hand to the account owner.
    pub fn issue(email: &str, ttl: Duration) -> (Self, String) {
        let token = Uuid::new_v4().simple().to_string();
        let reset = Self {
            email: email.to_lowercase(),
            token_hash: hash_password(&token),
            expires_at: Utc::now() + ttl,
            used: false,
        };
        (reset, token)
    }

    pub fn accepts(&self, token: &str, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at && hash_password(token) == self.token_hash
    }
}
