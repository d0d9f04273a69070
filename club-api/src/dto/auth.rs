use chrono::Duration;
use club_core::view::{SessionPreferences, ValidationRule, ValidationRules};
use club_core::{Account, PlayerId, Role};
use serde::{Deserialize, Serialize};

use super::{with_pattern, EMAIL_PATTERN};
use crate::security::FormRules;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl FormRules for LoginRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field(
                "email",
                with_pattern(ValidationRule::new().required(), EMAIL_PATTERN),
            )
            .field("password", ValidationRule::new().required())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub player_id: Option<PlayerId>,
    pub preferences: SessionPreferences,
    pub show_shortcut_hint: bool,
}

impl LoginResponse {
    pub fn new(token: String, account: &Account, ttl: Duration) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in: ttl.num_seconds(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
            player_id: account.player_id.clone(),
            preferences: account.preferences,
            show_shortcut_hint: account.preferences.should_show_shortcut_hint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoverPasswordRequest {
    pub email: String,
}

impl FormRules for RecoverPasswordRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new().field(
            "email",
            with_pattern(ValidationRule::new().required(), EMAIL_PATTERN),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

impl FormRules for ResetPasswordRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field(
                "email",
                with_pattern(ValidationRule::new().required(), EMAIL_PATTERN),
            )
            .field("token", ValidationRule::new().required())
            .field("new_password", ValidationRule::new().required().min_length(6))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
