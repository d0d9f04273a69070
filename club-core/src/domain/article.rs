use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::view::{SortKey, Sortable, Searchable};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleKind {
    /// Plain rule text.
    #[default]
    Informative,
    /// Breaking it carries a fine; fine causes link to these.
    Sanctionable,
}

/// One article of the club regulations.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct RegulationArticle {
    pub id: Uuid,
    /// Article number as printed, e.g. "5.2". Unique.
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub kind: ArticleKind,
    pub display_order: u32,
    pub active: bool,
    pub effective_from: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RegulationArticle {
    pub fn new(number: String, title: String, content: String, kind: ArticleKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            number,
            title,
            content,
            kind,
            display_order: 0,
            active: true,
            effective_from: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_sanctionable(&self) -> bool {
        self.kind == ArticleKind::Sanctionable
    }

    /// Active copy under a new number, placed right after the original.
    pub fn duplicate(&self, number: String) -> Self {
        let mut copy = Self::new(
            number,
            format!("[COPY] {}", self.title),
            self.content.clone(),
            self.kind,
        );
        copy.display_order = self.display_order + 1;
        copy
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Regulation order: display order, then article number.
pub fn sort_articles(articles: &mut [RegulationArticle]) {
    articles.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.number.cmp(&b.number))
    });
}

impl Searchable for RegulationArticle {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str(), self.title.as_str(), self.content.as_str()]
    }
}

impl Sortable for RegulationArticle {
    const SORT_FIELDS: &'static [&'static str] = &["display_order", "number", "title", "updated_at"];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "display_order" => Some(i64::from(self.display_order).into()),
            "number" => Some(SortKey::text(&self.number)),
            "title" => Some(SortKey::text(&self.title)),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}
