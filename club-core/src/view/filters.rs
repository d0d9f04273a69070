//! Search and ordering helpers for in-memory lists.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{CoreError, Result};

/// True when any of `fields` contains `term`, ignoring case and surrounding whitespace.
pub fn matches_any<'a>(fields: impl IntoIterator<Item = &'a str>, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// Items that can be matched against a free-text search term.
pub trait Searchable {
    /// Text fields the search term is compared against.
    fn search_fields(&self) -> Vec<&str>;

    fn matches_search(&self, term: &str) -> bool {
        matches_any(self.search_fields(), term)
    }
}

/// Filter predicate for any [`Searchable`] item, usable with `Paginator::with_filter`.
pub fn search_filter<T: Searchable>(item: &T, term: &str) -> bool {
    item.matches_search(term)
}

/// Comparable value extracted from an item for ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Missing,
    Bool(bool),
    Number(Decimal),
    Integer(i64),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl SortKey {
    /// Text keys compare case-insensitively.
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }
}

impl<T: Into<SortKey>> From<Option<T>> for SortKey {
    fn from(value: Option<T>) -> Self {
        value.map_or(SortKey::Missing, Into::into)
    }
}

impl From<Decimal> for SortKey {
    fn from(value: Decimal) -> Self {
        SortKey::Number(value)
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        SortKey::Integer(value)
    }
}

impl From<i32> for SortKey {
    fn from(value: i32) -> Self {
        SortKey::Integer(i64::from(value))
    }
}

impl From<bool> for SortKey {
    fn from(value: bool) -> Self {
        SortKey::Bool(value)
    }
}

impl From<NaiveDate> for SortKey {
    fn from(value: NaiveDate) -> Self {
        SortKey::Date(value)
    }
}

impl From<DateTime<Utc>> for SortKey {
    fn from(value: DateTime<Utc>) -> Self {
        SortKey::Timestamp(value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::text(value)
    }
}

/// Items that expose named sort keys.
pub trait Sortable {
    /// Field names accepted by [`Sortable::sort_key`].
    const SORT_FIELDS: &'static [&'static str];

    /// Returns `None` for unknown field names.
    fn sort_key(&self, field: &str) -> Option<SortKey>;
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Sort specification for list ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort by.
    pub field: String,

    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Stable in-place sort. Rejects fields the item type does not expose.
    pub fn sort<T: Sortable>(&self, items: &mut [T]) -> Result<()> {
        if !T::SORT_FIELDS.contains(&self.field.as_str()) {
            return Err(CoreError::Validation(format!(
                "cannot sort by '{}', expected one of: {}",
                self.field,
                T::SORT_FIELDS.join(", ")
            )));
        }

        items.sort_by(|a, b| {
            let ordering = a.sort_key(&self.field).cmp(&b.sort_key(&self.field));
            self.direction.apply(ordering)
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, i64);

    impl Sortable for Row {
        const SORT_FIELDS: &'static [&'static str] = &["name", "score"];

        fn sort_key(&self, field: &str) -> Option<SortKey> {
            match field {
                "name" => Some(SortKey::text(self.0)),
                "score" => Some(self.1.into()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_matches_any_trims_term() {
        assert!(matches_any(["1020", "Carlos"], "  carl "));
        assert!(matches_any(["Juan Pérez"], ""));
        assert!(!matches_any(["Juan"], "pedro"));
        assert!(!matches_any(["1020", "Carlos"], "maria"));
        assert!(matches_any(Vec::<&str>::new(), "   "));
    }

    #[test]
    fn test_sort_desc_and_text_case() {
        let mut rows = vec![Row("beta", 2), Row("Alpha", 3), Row("gamma", 1)];
        SortSpec::asc("name").sort(&mut rows).unwrap();
        assert_eq!(rows.iter().map(|r| r.0).collect::<Vec<_>>(), vec!["Alpha", "beta", "gamma"]);

        SortSpec::desc("score").sort(&mut rows).unwrap();
        assert_eq!(rows.iter().map(|r| r.1).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_unknown_field_rejected() {
        let mut rows = vec![Row("a", 1)];
        assert!(matches!(
            SortSpec::asc("nope").sort(&mut rows),
            Err(CoreError::Validation(_))
        ));
    }
}
