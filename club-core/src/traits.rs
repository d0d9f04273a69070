use async_trait::async_trait;

use crate::error::Result;

/// Basic persistence contract shared by every entity store.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync,
{
    async fn find_by_id(&self, id: &ID) -> Result<Option<T>>;
    async fn list(&self) -> Result<Vec<T>>;
    async fn save(&self, entity: &T) -> Result<T>;
    async fn delete(&self, id: &ID) -> Result<()>;
}
