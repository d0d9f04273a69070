use async_trait::async_trait;
use club_core::{CoreError, Repository, Result, Setting};
use rust_decimal::Decimal;

use crate::memory::MemoryTable;

#[derive(Debug, Clone, Default)]
pub struct SettingRepository {
    rows: MemoryTable<String, Setting>,
}

impl SettingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric value for `key`, if configured
    pub async fn value(&self, key: &str) -> Option<Decimal> {
        self.rows.get(&key.to_string()).map(|s| s.value)
    }

    /// Add a new setting; keys are unique
    pub async fn create(&self, setting: &Setting) -> Result<Setting> {
        if !self.rows.insert_new(setting.key.clone(), setting.clone()) {
            return Err(CoreError::AlreadyExists(format!("setting {}", setting.key)));
        }
        Ok(setting.clone())
    }

    pub async fn update(
        &self,
        key: &str,
        value: Decimal,
        description: Option<String>,
    ) -> Result<Setting> {
        self.rows
            .update(&key.to_string(), |setting| setting.update(value, description))
            .ok_or_else(|| CoreError::NotFound(format!("setting {}", key)))
    }
}

#[async_trait]
impl Repository<Setting, String> for SettingRepository {
    async fn find_by_id(&self, id: &String) -> Result<Option<Setting>> {
        Ok(self.rows.get(id))
    }

    async fn list(&self) -> Result<Vec<Setting>> {
        let mut settings = self.rows.values();
        settings.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(settings)
    }

    async fn save(&self, entity: &Setting) -> Result<Setting> {
        self.rows.insert(entity.key.clone(), entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &String) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("setting {}", id)))
    }
}
