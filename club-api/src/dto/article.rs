use club_core::view::{ValidationRule, ValidationRules};
use club_core::{ArticleKind, FineCause, RegulationArticle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::security::FormRules;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    pub number: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub kind: ArticleKind,
    #[serde(default)]
    pub display_order: u32,
    pub active: Option<bool>,
}

impl FormRules for CreateArticleRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field("number", ValidationRule::new().required().max_length(20))
            .field("title", ValidationRule::new().required().max_length(200))
            .field("content", ValidationRule::new().required())
            .field("display_order", ValidationRule::new().min(0.0))
    }
}

impl CreateArticleRequest {
    pub fn into_article(self) -> RegulationArticle {
        let mut article = RegulationArticle::new(
            self.number.trim().to_string(),
            self.title.trim().to_string(),
            self.content,
            self.kind,
        );
        article.display_order = self.display_order;
        article.active = self.active.unwrap_or(true);
        article
    }
}

/// Partial update; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateArticleRequest {
    pub number: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub kind: Option<ArticleKind>,
    pub display_order: Option<u32>,
    pub active: Option<bool>,
}

impl FormRules for UpdateArticleRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new()
            .field("number", ValidationRule::new().max_length(20))
            .field("title", ValidationRule::new().max_length(200))
            .field("display_order", ValidationRule::new().min(0.0))
    }
}

impl UpdateArticleRequest {
    pub fn apply(self, article: &mut RegulationArticle) {
        if let Some(number) = self.number {
            article.number = number.trim().to_string();
        }
        if let Some(title) = self.title {
            article.title = title.trim().to_string();
        }
        if let Some(content) = self.content {
            article.content = content;
        }
        if let Some(kind) = self.kind {
            article.kind = kind;
        }
        if let Some(order) = self.display_order {
            article.display_order = order;
        }
        if let Some(active) = self.active {
            article.active = active;
        }
        article.touch();
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleQuery {
    /// Only active articles unless explicitly turned off.
    pub active_only: Option<bool>,
    pub kind: Option<ArticleKind>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleOrder {
    pub id: Uuid,
    pub display_order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderArticlesRequest {
    pub orders: Vec<ArticleOrder>,
}

impl FormRules for ReorderArticlesRequest {
    fn rules() -> ValidationRules {
        ValidationRules::new().field("orders", ValidationRule::new().required())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DuplicateArticleQuery {
    pub new_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleCount {
    pub count: usize,
}

/// An article with the fine causes that enforce it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: RegulationArticle,
    pub causes: Vec<FineCause>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RemovalOutcome {
    Deleted,
    /// Kept because fine causes still point at it.
    Deactivated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRemoval {
    pub id: Uuid,
    pub outcome: RemovalOutcome,
}
