use async_trait::async_trait;
use chrono::{DateTime, Utc};
use club_core::{CoreError, Fine, FineCause, Repository, Result};
use uuid::Uuid;

use crate::memory::MemoryTable;

#[derive(Debug, Clone, Default)]
pub struct FineRepository {
    rows: MemoryTable<Uuid, Fine>,
}

impl FineRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fines issued to one player, newest first
    pub async fn list_by_player(&self, player_id: &str) -> Result<Vec<Fine>> {
        let mut fines = self.rows.filter(|f| f.player_id == player_id);
        newest_first(&mut fines);
        Ok(fines)
    }

    pub async fn list_by_group(&self, group_id: &Uuid) -> Result<Vec<Fine>> {
        let mut fines = self.rows.filter(|f| f.group_id.as_ref() == Some(group_id));
        newest_first(&mut fines);
        Ok(fines)
    }

    pub async fn set_paid(&self, id: &Uuid, paid: bool) -> Result<Fine> {
        self.rows
            .update(id, |fine| {
                if paid {
                    fine.mark_paid(Utc::now());
                } else {
                    fine.mark_unpaid();
                }
            })
            .ok_or_else(|| CoreError::NotFound(format!("fine {}", id)))
    }

    /// Insert a batch of new fines. Either every fine is stored or none is.
    pub async fn save_all(&self, fines: &[Fine]) -> Result<Vec<Fine>> {
        for (stored, fine) in fines.iter().enumerate() {
            if !self.rows.insert_new(fine.id, fine.clone()) {
                for earlier in &fines[..stored] {
                    self.rows.remove(&earlier.id);
                }
                tracing::warn!(fine_id = %fine.id, rolled_back = stored, "fine batch rejected");
                return Err(CoreError::AlreadyExists(format!("fine {}", fine.id)));
            }
        }
        Ok(fines.to_vec())
    }

    /// Settle a fine as part of a payment made at `at`
    pub async fn mark_paid(&self, id: &Uuid, at: DateTime<Utc>) -> Result<Fine> {
        self.rows
            .update(id, |fine| fine.mark_paid(at))
            .ok_or_else(|| CoreError::NotFound(format!("fine {}", id)))
    }

    pub async fn any_with_cause(&self, cause_id: &Uuid) -> bool {
        self.rows.any(|_, fine| fine.cause_id == *cause_id)
    }
}

fn newest_first(fines: &mut [Fine]) {
    fines.sort_by(|a, b| b.issued_on.cmp(&a.issued_on).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl Repository<Fine, Uuid> for FineRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Fine>> {
        Ok(self.rows.get(id))
    }

    async fn list(&self) -> Result<Vec<Fine>> {
        let mut fines = self.rows.values();
        newest_first(&mut fines);
        Ok(fines)
    }

    async fn save(&self, entity: &Fine) -> Result<Fine> {
        self.rows.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("fine {}", id)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct FineCauseRepository {
    rows: MemoryTable<Uuid, FineCause>,
}

impl FineCauseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace an existing cause
    pub async fn update(&self, cause: &FineCause) -> Result<FineCause> {
        self.rows
            .update(&cause.id, |stored| *stored = cause.clone())
            .ok_or_else(|| CoreError::NotFound(format!("fine cause {}", cause.id)))
    }

    /// Causes enforcing one regulation article
    pub async fn list_by_article(&self, article_id: &Uuid) -> Result<Vec<FineCause>> {
        let mut causes = self.rows.filter(|c| c.article_id.as_ref() == Some(article_id));
        causes.sort_by_cached_key(|c| c.description.to_lowercase());
        Ok(causes)
    }

    pub async fn any_with_article(&self, article_id: &Uuid) -> bool {
        self.rows
            .any(|_, cause| cause.article_id.as_ref() == Some(article_id))
    }
}

#[async_trait]
impl Repository<FineCause, Uuid> for FineCauseRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<FineCause>> {
        Ok(self.rows.get(id))
    }

    async fn list(&self) -> Result<Vec<FineCause>> {
        let mut causes = self.rows.values();
        causes.sort_by_cached_key(|c| c.description.to_lowercase());
        Ok(causes)
    }

    async fn save(&self, entity: &FineCause) -> Result<FineCause> {
        self.rows.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("fine cause {}", id)))
    }
}
