use club_core::view::{ValidationRule, ValidationRules};
use club_core::Setting;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::security::FormRules;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSettingRequest {
    #[validate(length(min = 1, max = 100))]
    pub key: String,
    #[validate(custom(function = "club_core::validate_non_negative"))]
    pub value: Decimal,
    pub description: Option<String>,
}

impl FormRules for CreateSettingRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field("key", ValidationRule::new().required().max_length(100))
            .field("value", ValidationRule::new().min(0.0))
            .field("description", ValidationRule::new().max_length(500))
    }
}

impl CreateSettingRequest {
    pub fn into_setting(self) -> Setting {
        Setting::new(self.key.trim(), self.value, self.description)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSettingRequest {
    #[validate(custom(function = "club_core::validate_non_negative"))]
    pub value: Decimal,
    pub description: Option<String>,
}

impl FormRules for UpdateSettingRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field("value", ValidationRule::new().required().min(0.0))
            .field("description", ValidationRule::new().max_length(500))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingQuery {
    pub limit: Option<usize>,
}
