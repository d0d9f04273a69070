use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Well-known setting keys.
pub mod keys {
    pub const MONTHLY_DUE: &str = "monthly_due";
    pub const GOALKEEPER_MONTHLY_DUE: &str = "goalkeeper_monthly_due";
}

/// Numeric club setting such as the monthly due amount.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Setting {
    #[validate(length(min = 1, max = 100))]
    pub key: String,
    #[validate(custom(function = "crate::domain::validate_non_negative"))]
    pub value: Decimal,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: Decimal, description: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
            description,
            updated_at: Utc::now(),
        }
    }

    pub fn update(&mut self, value: Decimal, description: Option<String>) {
        self.value = value;
        if description.is_some() {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}
