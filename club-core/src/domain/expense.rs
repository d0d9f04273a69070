use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::view::{SortKey, Sortable, Searchable};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ExpenseCategory {
    pub id: Uuid,
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

impl ExpenseCategory {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub category_id: Uuid,
    #[validate(length(min = 2, max = 200))]
    pub concept: String,
    #[validate(custom(function = "crate::domain::validate_non_negative"))]
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    /// Invoice or receipt number.
    pub receipt: Option<String>,
    pub notes: Option<String>,
}

impl Expense {
    pub fn new(category_id: Uuid, concept: String, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            concept,
            amount,
            date: Utc::now(),
            receipt: None,
            notes: None,
        }
    }
}

impl Searchable for Expense {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.concept.as_str()];
        if let Some(receipt) = &self.receipt {
            fields.push(receipt);
        }
        fields
    }
}

impl Sortable for Expense {
    const SORT_FIELDS: &'static [&'static str] = &["date", "amount", "concept"];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "date" => Some(self.date.into()),
            "amount" => Some(self.amount.into()),
            "concept" => Some(SortKey::text(&self.concept)),
            _ => None,
        }
    }
}
