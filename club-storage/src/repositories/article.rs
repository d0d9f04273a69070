use async_trait::async_trait;
use club_core::{sort_articles, ArticleKind, CoreError, RegulationArticle, Repository, Result};
use uuid::Uuid;

use crate::memory::MemoryTable;

/// Filters for listing and counting regulation articles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleFilter {
    pub active_only: bool,
    pub kind: Option<ArticleKind>,
}

impl ArticleFilter {
    fn matches(&self, article: &RegulationArticle) -> bool {
        (!self.active_only || article.active) && self.kind.map_or(true, |kind| article.kind == kind)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArticleRepository {
    rows: MemoryTable<Uuid, RegulationArticle>,
}

impl ArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_by_number(&self, number: &str) -> Result<Option<RegulationArticle>> {
        Ok(self.rows.find(|a| a.number == number))
    }

    /// Create or replace an article; numbers are unique
    pub async fn upsert(&self, article: &RegulationArticle) -> Result<RegulationArticle> {
        if let Some(other) = self.find_by_number(&article.number).await? {
            if other.id != article.id {
                return Err(CoreError::AlreadyExists(format!(
                    "article number {}",
                    article.number
                )));
            }
        }

        self.rows.insert(article.id, article.clone());
        Ok(article.clone())
    }

    /// Matching articles in regulation order
    pub async fn list_filtered(&self, filter: ArticleFilter) -> Result<Vec<RegulationArticle>> {
        let mut articles = self.rows.filter(|a| filter.matches(a));
        sort_articles(&mut articles);
        Ok(articles)
    }

    pub async fn count(&self, filter: ArticleFilter) -> usize {
        self.rows.filter(|a| filter.matches(a)).len()
    }

    pub async fn set_active(&self, id: &Uuid, active: bool) -> Result<RegulationArticle> {
        self.rows
            .update(id, |article| {
                article.active = active;
                article.touch();
            })
            .ok_or_else(|| CoreError::NotFound(format!("article {}", id)))
    }

    /// Apply every `(id, display_order)` pair, or none when an id is unknown.
    pub async fn reorder(&self, orders: &[(Uuid, u32)]) -> Result<Vec<RegulationArticle>> {
        if let Some((missing, _)) = orders.iter().find(|(id, _)| !self.rows.contains(id)) {
            return Err(CoreError::NotFound(format!("article {}", missing)));
        }

        Ok(orders
            .iter()
            .filter_map(|(id, order)| {
                self.rows.update(id, |article| {
                    article.display_order = *order;
                    article.touch();
                })
            })
            .collect())
    }

    /// Copy an article under a new, unused number
    pub async fn duplicate(&self, id: &Uuid, number: &str) -> Result<RegulationArticle> {
        let original = self
            .rows
            .get(id)
            .ok_or_else(|| CoreError::NotFound(format!("article {}", id)))?;
        let copy = original.duplicate(number.to_string());
        self.upsert(&copy).await
    }
}

#[async_trait]
impl Repository<RegulationArticle, Uuid> for ArticleRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<RegulationArticle>> {
        Ok(self.rows.get(id))
    }

    async fn list(&self) -> Result<Vec<RegulationArticle>> {
        self.list_filtered(ArticleFilter::default()).await
    }

    async fn save(&self, entity: &RegulationArticle) -> Result<RegulationArticle> {
        self.upsert(entity).await
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("article {}", id)))
    }
}
