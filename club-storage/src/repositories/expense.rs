use async_trait::async_trait;
use club_core::{CoreError, Expense, ExpenseCategory, Repository, Result};
use uuid::Uuid;

use crate::memory::MemoryTable;

#[derive(Debug, Clone, Default)]
pub struct ExpenseRepository {
    rows: MemoryTable<Uuid, Expense>,
}

impl ExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_by_category(&self, category_id: &Uuid) -> Result<Vec<Expense>> {
        let mut expenses = self.rows.filter(|e| e.category_id == *category_id);
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    /// The `limit` most recent expenses
    pub async fn latest(&self, limit: usize) -> Result<Vec<Expense>> {
        let mut expenses = self.list().await?;
        expenses.truncate(limit);
        Ok(expenses)
    }

    pub async fn any_in_category(&self, category_id: &Uuid) -> bool {
        self.rows.any(|_, expense| expense.category_id == *category_id)
    }
}

#[async_trait]
impl Repository<Expense, Uuid> for ExpenseRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Expense>> {
        Ok(self.rows.get(id))
    }

    async fn list(&self) -> Result<Vec<Expense>> {
        let mut expenses = self.rows.values();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    async fn save(&self, entity: &Expense) -> Result<Expense> {
        self.rows.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("expense {}", id)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseCategoryRepository {
    rows: MemoryTable<Uuid, ExpenseCategory>,
}

impl ExpenseCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a category; names are unique ignoring case
    pub async fn create(&self, category: &ExpenseCategory) -> Result<ExpenseCategory> {
        let name = category.name.to_lowercase();
        if self
            .rows
            .any(|id, other| id != &category.id && other.name.to_lowercase() == name)
        {
            return Err(CoreError::AlreadyExists(format!(
                "expense category {}",
                category.name
            )));
        }

        self.rows.insert(category.id, category.clone());
        Ok(category.clone())
    }

    /// Rename or describe an existing category, keeping names unique
    pub async fn update(&self, category: &ExpenseCategory) -> Result<ExpenseCategory> {
        if !self.rows.contains(&category.id) {
            return Err(CoreError::NotFound(format!("expense category {}", category.id)));
        }
        self.create(category).await
    }
}

#[async_trait]
impl Repository<ExpenseCategory, Uuid> for ExpenseCategoryRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ExpenseCategory>> {
        Ok(self.rows.get(id))
    }

    async fn list(&self) -> Result<Vec<ExpenseCategory>> {
        let mut categories = self.rows.values();
        categories.sort_by_cached_key(|c| c.name.to_lowercase());
        Ok(categories)
    }

    async fn save(&self, entity: &ExpenseCategory) -> Result<ExpenseCategory> {
        self.create(entity).await
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("expense category {}", id)))
    }
}
