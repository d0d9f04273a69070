use club_core::view::{SortDirection, SortSpec};
use serde::{Deserialize, Serialize};

/// Search and ordering options shared by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive substring matched against the entity's search fields.
    pub search: Option<String>,
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl ListQuery {
    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }

    /// Requested ordering, or `fallback` when no sort field was given.
    pub fn sort_spec(&self, fallback: Option<SortSpec>) -> Option<SortSpec> {
        match &self.sort {
            Some(field) if !field.trim().is_empty() => {
                Some(SortSpec::new(field.trim(), self.direction))
            }
            _ => fallback,
        }
    }
}
