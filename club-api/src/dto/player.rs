use chrono::NaiveDate;
use club_core::view::{ValidationRule, ValidationRules};
use club_core::{Player, PlayerId, Position};
use serde::{Deserialize, Serialize};

use super::{with_pattern, DATE_PATTERN, DIGITS_PATTERN, EMAIL_PATTERN, PHONE_PATTERN};
use crate::error::{ApiError, ApiResult};
use crate::response::CsvRecord;
use crate::security::FormRules;

/// Editable player details, used as the update body and inside the create body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerForm {
    pub name: String,
    pub last_name: Option<String>,
    pub registration_name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub uniform_size: String,
    pub jersey_number: Option<i32>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub referred_by: Option<PlayerId>,
    #[serde(default)]
    pub position: Position,
}

fn player_form_rules() -> ValidationRules {
    ValidationRules::new()
        .field("name", ValidationRule::new().required().min_length(2).max_length(100))
        .field("last_name", ValidationRule::new().max_length(100))
        .field(
            "registration_name",
            ValidationRule::new().required().min_length(2).max_length(100),
        )
        .field("phone", with_pattern(ValidationRule::new().required(), PHONE_PATTERN))
        .field(
            "birth_date",
            with_pattern(ValidationRule::new().required(), DATE_PATTERN),
        )
        .field("uniform_size", ValidationRule::new().required().max_length(5))
        .field("jersey_number", ValidationRule::new().min(0.0).max(999.0))
        .field(
            "emergency_contact_name",
            ValidationRule::new().required().min_length(2).max_length(100),
        )
        .field(
            "emergency_contact_phone",
            with_pattern(ValidationRule::new().required(), PHONE_PATTERN),
        )
        .field("position", ValidationRule::new().custom(|value| match value.as_text() {
            Some("goalkeeper") | Some("field") | None => None,
            Some(_) => Some("Must be goalkeeper or field".to_string()),
        }))
}

impl FormRules for PlayerForm {
    fn rules() -> ValidationRules {
        player_form_rules()
    }
}

impl PlayerForm {
    /// Overwrite the editable fields of `player`.
    pub fn apply(self, player: &mut Player) {
        player.name = self.name;
        player.last_name = self.last_name.filter(|s| !s.trim().is_empty());
        player.registration_name = self.registration_name;
        player.phone = self.phone;
        player.birth_date = self.birth_date;
        player.uniform_size = self.uniform_size;
        player.jersey_number = self.jersey_number;
        player.emergency_contact_name = self.emergency_contact_name;
        player.emergency_contact_phone = self.emergency_contact_phone;
        player.referred_by = self.referred_by.filter(|s| !s.trim().is_empty());
        player.position = self.position;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    pub national_id: PlayerId,
    #[serde(flatten)]
    pub details: PlayerForm,
    /// Optional login for the player's self-service account.
    pub email: Option<String>,
    pub password: Option<String>,
}

impl FormRules for CreatePlayerRequest {
    fn rules() -> ValidationRules {
        player_form_rules()
            .field(
                "national_id",
                with_pattern(
                    ValidationRule::new().required().min_length(5).max_length(20),
                    DIGITS_PATTERN,
                ),
            )
            .field("email", with_pattern(ValidationRule::new(), EMAIL_PATTERN))
            .field("password", ValidationRule::new().min_length(6))
    }
}

impl CreatePlayerRequest {
    /// Email and password for the player account, when one was requested.
    pub fn login(&self) -> ApiResult<Option<(String, String)>> {
        let email = self.email.as_deref().filter(|e| !e.is_empty());
        let password = self.password.as_deref().filter(|p| !p.is_empty());
        match (email, password) {
            (Some(email), Some(password)) => Ok(Some((email.to_string(), password.to_string()))),
            (Some(_), None) => Err(ApiError::field("password", "This field is required")),
            (None, Some(_)) => Err(ApiError::field("email", "This field is required")),
            (None, None) => Ok(None),
        }
    }

    pub fn into_player(self) -> Player {
        let PlayerForm {
            name,
            last_name,
            registration_name,
            phone,
            birth_date,
            uniform_size,
            jersey_number,
            emergency_contact_name,
            emergency_contact_phone,
            referred_by,
            position,
        } = self.details;

        let mut player = Player::new(
            self.national_id,
            name,
            last_name.filter(|s| !s.trim().is_empty()),
            registration_name,
            phone,
            birth_date,
            uniform_size,
            emergency_contact_name,
            emergency_contact_phone,
        );
        player.jersey_number = jersey_number;
        player.referred_by = referred_by.filter(|s| !s.trim().is_empty());
        player.position = position;
        player
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerFilter {
    pub active: Option<bool>,
}

impl CsvRecord for Player {
    fn headers() -> &'static [&'static str] {
        &[
            "national_id",
            "name",
            "registration_name",
            "phone",
            "birth_date",
            "uniform_size",
            "jersey_number",
            "position",
            "registered_on",
            "active",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.national_id.clone(),
            self.full_name(),
            self.registration_name.clone(),
            self.phone.clone(),
            self.birth_date.to_string(),
            self.uniform_size.clone(),
            self.jersey_number.map(|n| n.to_string()).unwrap_or_default(),
            if self.is_goalkeeper() { "goalkeeper" } else { "field" }.to_string(),
            self.registered_on.to_string(),
            self.active.to_string(),
        ]
    }
}
