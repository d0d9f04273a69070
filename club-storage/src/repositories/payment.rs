use async_trait::async_trait;
use club_core::{Contribution, CoreError, MonthlyDue, Repository, Result};
use uuid::Uuid;

use crate::memory::MemoryTable;

#[derive(Debug, Clone, Default)]
pub struct MonthlyDueRepository {
    rows: MemoryTable<Uuid, MonthlyDue>,
}

impl MonthlyDueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a due; a player pays each month at most once
    pub async fn record(&self, due: &MonthlyDue) -> Result<MonthlyDue> {
        let duplicate = self.rows.any(|_, existing| {
            existing.player_id == due.player_id && existing.covers(due.month, due.year)
        });
        if duplicate {
            return Err(CoreError::AlreadyExists(format!(
                "monthly due {}/{} for player {}",
                due.month, due.year, due.player_id
            )));
        }

        self.rows.insert(due.id, due.clone());
        tracing::debug!(player = %due.player_id, month = due.month, year = due.year, "monthly due recorded");
        Ok(due.clone())
    }

    pub async fn list_by_player(&self, player_id: &str) -> Result<Vec<MonthlyDue>> {
        let mut dues = self.rows.filter(|d| d.player_id == player_id);
        dues.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(dues)
    }
}

#[async_trait]
impl Repository<MonthlyDue, Uuid> for MonthlyDueRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MonthlyDue>> {
        Ok(self.rows.get(id))
    }

    async fn list(&self) -> Result<Vec<MonthlyDue>> {
        let mut dues = self.rows.values();
        dues.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(dues)
    }

    async fn save(&self, entity: &MonthlyDue) -> Result<MonthlyDue> {
        self.rows.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("monthly due {}", id)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContributionRepository {
    rows: MemoryTable<Uuid, Contribution>,
}

impl ContributionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_by_player(&self, player_id: &str) -> Result<Vec<Contribution>> {
        let mut contributions = self.rows.filter(|c| c.player_id == player_id);
        contributions.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(contributions)
    }
}

#[async_trait]
impl Repository<Contribution, Uuid> for ContributionRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Contribution>> {
        Ok(self.rows.get(id))
    }

    async fn list(&self) -> Result<Vec<Contribution>> {
        let mut contributions = self.rows.values();
        contributions.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(contributions)
    }

    async fn save(&self, entity: &Contribution) -> Result<Contribution> {
        self.rows.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("contribution {}", id)))
    }
}
