use club_core::view::{ValidationRule, ValidationRules};
use chrono::{DateTime, Utc};
use club_core::{FineDetail, PaymentKind, PaymentRecord, PlayerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::security::FormRules;

/// Record a monthly due (`month`, `year`) or any other contribution
/// (`concept`, `amount`). A due without `amount` is charged the configured
/// monthly fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub kind: PaymentKind,
    pub player_id: PlayerId,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub amount: Option<Decimal>,
    pub concept: Option<String>,
}

impl FormRules for CreatePaymentRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field("kind", ValidationRule::new().required())
            .field("player_id", ValidationRule::new().required())
            .field("month", ValidationRule::new().min(1.0).max(12.0))
            .field("year", ValidationRule::new().min(2000.0).max(2100.0))
            .field("amount", ValidationRule::new().min(0.0))
            .field("concept", ValidationRule::new().min_length(2).max_length(200))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentFilter {
    pub player_id: Option<PlayerId>,
    pub kind: Option<PaymentKind>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DueMonth {
    pub month: u32,
    pub year: i32,
}

/// Settle several monthly dues and fines of one player in a single payment.
/// Dues are charged the player's configured monthly fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedPaymentRequest {
    pub player_id: PlayerId,
    #[serde(default)]
    pub months: Vec<DueMonth>,
    #[serde(default)]
    pub fine_ids: Vec<Uuid>,
}

impl FormRules for CombinedPaymentRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new().field("player_id", ValidationRule::new().required())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedPaymentReceipt {
    pub player_id: PlayerId,
    pub paid_at: DateTime<Utc>,
    pub dues: Vec<PaymentRecord>,
    pub fines: Vec<FineDetail>,
    pub total: Decimal,
    pub account_in_good_standing: bool,
}
