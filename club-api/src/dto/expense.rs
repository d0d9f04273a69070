use chrono::{DateTime, Utc};
use club_core::view::{SortKey, Sortable, Searchable, ValidationRule, ValidationRules};
use club_core::{Expense, ExpenseCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::response::CsvRecord;
use crate::security::FormRules;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub category_id: Uuid,
    pub concept: String,
    pub amount: Decimal,
    /// Defaults to now.
    pub date: Option<DateTime<Utc>>,
    pub receipt: Option<String>,
    pub notes: Option<String>,
}

impl FormRules for CreateExpenseRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field("category_id", ValidationRule::new().required())
            .field(
                "concept",
                ValidationRule::new().required().min_length(2).max_length(200),
            )
            .field("amount", ValidationRule::new().required().min(0.0))
            .field("receipt", ValidationRule::new().max_length(50))
            .field("notes", ValidationRule::new().max_length(1000))
    }
}

impl CreateExpenseRequest {
    pub fn into_expense(self) -> Expense {
        let mut expense = Expense::new(self.category_id, self.concept, self.amount);
        if let Some(date) = self.date {
            expense.date = date;
        }
        expense.receipt = self.receipt.filter(|r| !r.trim().is_empty());
        expense.notes = self.notes.filter(|n| !n.trim().is_empty());
        expense
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

impl FormRules for CreateCategoryRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field("name", ValidationRule::new().required().min_length(2).max_length(100))
            .field("description", ValidationRule::new().max_length(500))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseFilter {
    pub category: Option<Uuid>,
}

/// An expense joined with its category name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseDetail {
    #[serde(flatten)]
    pub expense: Expense,
    pub category_name: String,
}

impl ExpenseDetail {
    pub fn new(expense: Expense, category: Option<&ExpenseCategory>) -> Self {
        Self {
            category_name: category.map(|c| c.name.clone()).unwrap_or_default(),
            expense,
        }
    }
}

impl Searchable for ExpenseDetail {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = self.expense.search_fields();
        fields.push(self.category_name.as_str());
        fields
    }
}

impl Sortable for ExpenseDetail {
    const SORT_FIELDS: &'static [&'static str] = &["date", "amount", "concept", "category"];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "category" => Some(SortKey::text(&self.category_name)),
            other => self.expense.sort_key(other),
        }
    }
}

impl CsvRecord for ExpenseDetail {
    fn headers() -> &'static [&'static str] {
        &["date", "category", "concept", "amount", "receipt", "notes"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.expense.date.format("%Y-%m-%d").to_string(),
            self.category_name.clone(),
            self.expense.concept.clone(),
            self.expense.amount.to_string(),
            self.expense.receipt.clone().unwrap_or_default(),
            self.expense.notes.clone().unwrap_or_default(),
        ]
    }
}
