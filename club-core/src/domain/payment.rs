use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::player::{Player, PlayerId};
use crate::view::{SortKey, Sortable, Searchable};

/// Monthly membership due paid by a player.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct MonthlyDue {
    pub id: Uuid,
    pub player_id: PlayerId,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(custom(function = "crate::domain::validate_non_negative"))]
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
}

impl MonthlyDue {
    pub fn new(player_id: PlayerId, month: u32, year: i32, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id,
            month,
            year,
            amount,
            paid_at: Utc::now(),
        }
    }

    pub fn covers(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }
}

/// Any other money a player hands in (tournament fees, donations...).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Contribution {
    pub id: Uuid,
    pub player_id: PlayerId,
    #[validate(length(min = 2, max = 200))]
    pub concept: String,
    #[validate(custom(function = "crate::domain::validate_non_negative"))]
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
}

impl Contribution {
    pub fn new(player_id: PlayerId, concept: String, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id,
            concept,
            amount,
            paid_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    MonthlyDue,
    Contribution,
}

/// Unified payment row combining dues and contributions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub kind: PaymentKind,
    pub player_id: PlayerId,
    pub player_name: String,
    pub concept: String,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PaymentRecord {
    pub fn from_due(due: &MonthlyDue, player: Option<&Player>) -> Self {
        Self {
            id: due.id,
            kind: PaymentKind::MonthlyDue,
            player_id: due.player_id.clone(),
            player_name: player.map(Player::full_name).unwrap_or_default(),
            concept: format!("Monthly due {}/{}", due.month, due.year),
            amount: due.amount,
            paid_at: due.paid_at,
            month: Some(due.month),
            year: Some(due.year),
        }
    }

    pub fn from_contribution(contribution: &Contribution, player: Option<&Player>) -> Self {
        Self {
            id: contribution.id,
            kind: PaymentKind::Contribution,
            player_id: contribution.player_id.clone(),
            player_name: player.map(Player::full_name).unwrap_or_default(),
            concept: contribution.concept.clone(),
            amount: contribution.amount,
            paid_at: contribution.paid_at,
            month: None,
            year: None,
        }
    }
}

impl Searchable for PaymentRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.player_name.as_str(),
            self.player_id.as_str(),
            self.concept.as_str(),
        ]
    }
}

impl Sortable for PaymentRecord {
    const SORT_FIELDS: &'static [&'static str] = &["paid_at", "amount", "player_name"];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "paid_at" => Some(self.paid_at.into()),
            "amount" => Some(self.amount.into()),
            "player_name" => Some(SortKey::text(&self.player_name)),
            _ => None,
        }
    }
}
