use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::player::{Player, PlayerId};
use crate::view::{SortKey, Sortable, Searchable};

/// Reason a fine is issued, with its fixed amount.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct FineCause {
    pub id: Uuid,
    #[validate(length(min = 3, max = 500))]
    pub description: String,
    #[validate(custom(function = "crate::domain::validate_non_negative"))]
    pub amount: Decimal,
    /// Sanctionable regulation article this cause enforces.
    #[serde(default)]
    pub article_id: Option<Uuid>,
}

impl FineCause {
    pub fn new(description: String, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            amount,
            article_id: None,
        }
    }

    pub fn with_article(mut self, article_id: Option<Uuid>) -> Self {
        self.article_id = article_id;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fine {
    pub id: Uuid,
    pub player_id: PlayerId,
    pub cause_id: Uuid,
    pub issued_on: NaiveDate,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    /// Shared by every fine created for the same group contribution.
    pub group_id: Option<Uuid>,
    pub group_concept: Option<String>,
}

impl Fine {
    pub fn new(player_id: PlayerId, cause_id: Uuid, issued_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id,
            cause_id,
            issued_on,
            paid: false,
            paid_at: None,
            group_id: None,
            group_concept: None,
        }
    }

    pub fn in_group(mut self, group_id: Uuid, concept: impl Into<String>) -> Self {
        self.group_id = Some(group_id);
        self.group_concept = Some(concept.into());
        self
    }

    pub fn is_group_contribution(&self) -> bool {
        self.group_id.is_some()
    }

    pub fn mark_paid(&mut self, at: DateTime<Utc>) {
        self.paid = true;
        self.paid_at = Some(at);
    }

    pub fn mark_unpaid(&mut self) {
        self.paid = false;
        self.paid_at = None;
    }
}

/// A fine joined with its player and cause, as shown in listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FineDetail {
    #[serde(flatten)]
    pub fine: Fine,
    pub player_name: String,
    pub cause_description: String,
    pub amount: Decimal,
}

impl FineDetail {
    pub fn new(fine: Fine, player: Option<&Player>, cause: Option<&FineCause>) -> Self {
        Self {
            player_name: player.map(Player::full_name).unwrap_or_default(),
            cause_description: cause.map(|c| c.description.clone()).unwrap_or_default(),
            amount: cause.map(|c| c.amount).unwrap_or_default(),
            fine,
        }
    }
}

impl Searchable for FineDetail {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.player_name.as_str(),
            self.fine.player_id.as_str(),
            self.cause_description.as_str(),
        ];
        if let Some(concept) = &self.fine.group_concept {
            fields.push(concept);
        }
        fields
    }
}

impl Sortable for FineDetail {
    const SORT_FIELDS: &'static [&'static str] = &["issued_on", "player_name", "amount", "paid"];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "issued_on" => Some(self.fine.issued_on.into()),
            "player_name" => Some(SortKey::text(&self.player_name)),
            "amount" => Some(self.amount.into()),
            "paid" => Some(self.fine.paid.into()),
            _ => None,
        }
    }
}
