use chrono::NaiveDate;
use club_core::view::{ValidationRule, ValidationRules};
use club_core::{FineDetail, PlayerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::security::FormRules;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFineCauseRequest {
    pub description: String,
    pub amount: Decimal,
    /// Sanctionable article the cause enforces.
    pub article_id: Option<Uuid>,
}

impl FormRules for CreateFineCauseRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field(
                "description",
                ValidationRule::new().required().min_length(3).max_length(500),
            )
            .field("amount", ValidationRule::new().required().min(0.0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFineRequest {
    pub player_id: PlayerId,
    pub cause_id: Uuid,
    /// Defaults to today.
    pub issued_on: Option<NaiveDate>,
}

impl FormRules for CreateFineRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field("player_id", ValidationRule::new().required())
            .field("cause_id", ValidationRule::new().required())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFineRequest {
    pub paid: bool,
}

/// Issue the same fine to every active player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFineRequest {
    pub cause_id: Uuid,
    pub concept: String,
    pub issued_on: Option<NaiveDate>,
}

impl FormRules for GroupFineRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field("cause_id", ValidationRule::new().required())
            .field(
                "concept",
                ValidationRule::new().required().min_length(3).max_length(200),
            )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFineResponse {
    pub group_id: Uuid,
    pub concept: String,
    pub fines_created: usize,
    pub fines: Vec<FineDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FineFilter {
    pub paid: Option<bool>,
    pub player_id: Option<PlayerId>,
    pub group_id: Option<Uuid>,
}
