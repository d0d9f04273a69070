use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::view::{SortKey, Sortable, Searchable};

/// National identity number, the player's primary key.
pub type PlayerId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Goalkeeper,
    #[default]
    Field,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Player {
    #[validate(length(min = 5, max = 20))]
    pub national_id: PlayerId,
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub last_name: Option<String>,
    /// Alias the player registers under; unique across the roster.
    #[validate(length(min = 2, max = 100))]
    pub registration_name: String,
    #[validate(length(min = 7, max = 20))]
    pub phone: String,
    pub birth_date: NaiveDate,
    pub uniform_size: String,
    #[validate(range(min = 0, max = 999))]
    pub jersey_number: Option<i32>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub referred_by: Option<PlayerId>,
    pub registered_on: NaiveDate,
    pub position: Position,
    pub account_in_good_standing: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Player {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        national_id: PlayerId,
        name: String,
        last_name: Option<String>,
        registration_name: String,
        phone: String,
        birth_date: NaiveDate,
        uniform_size: String,
        emergency_contact_name: String,
        emergency_contact_phone: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            national_id,
            name,
            last_name,
            registration_name,
            phone,
            birth_date,
            uniform_size,
            jersey_number: None,
            emergency_contact_name,
            emergency_contact_phone,
            referred_by: None,
            registered_on: now.date_naive(),
            position: Position::Field,
            account_in_good_standing: true,
            active: true,
            created_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {}", self.name, last),
            _ => self.name.clone(),
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.position == Position::Goalkeeper
    }
}

impl Searchable for Player {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.national_id.as_str(),
            self.registration_name.as_str(),
        ];
        if let Some(last) = &self.last_name {
            fields.push(last);
        }
        fields
    }
}

impl Sortable for Player {
    const SORT_FIELDS: &'static [&'static str] = &[
        "name",
        "national_id",
        "registration_name",
        "jersey_number",
        "registered_on",
        "birth_date",
    ];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::text(&self.full_name())),
            "national_id" => Some(SortKey::text(&self.national_id)),
            "registration_name" => Some(SortKey::text(&self.registration_name)),
            "jersey_number" => Some(self.jersey_number.into()),
            "registered_on" => Some(self.registered_on.into()),
            "birth_date" => Some(self.birth_date.into()),
            _ => None,
        }
    }
}
