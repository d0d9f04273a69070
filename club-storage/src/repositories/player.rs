use async_trait::async_trait;
use club_core::{CoreError, Player, PlayerId, Repository, Result};

use crate::memory::MemoryTable;

#[derive(Debug, Clone, Default)]
pub struct PlayerRepository {
    rows: MemoryTable<PlayerId, Player>,
}

impl PlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new player, enforcing the roster's unique columns
    pub async fn create(&self, player: &Player) -> Result<Player> {
        if self.rows.contains(&player.national_id) {
            return Err(CoreError::AlreadyExists(format!(
                "player with national id {}",
                player.national_id
            )));
        }
        self.check_unique(player)?;

        self.rows.insert(player.national_id.clone(), player.clone());
        tracing::debug!(national_id = %player.national_id, "player created");
        Ok(player.clone())
    }

    /// Replace an existing player
    pub async fn update(&self, player: &Player) -> Result<Player> {
        if !self.rows.contains(&player.national_id) {
            return Err(CoreError::NotFound(format!("player {}", player.national_id)));
        }
        self.check_unique(player)?;

        self.rows.insert(player.national_id.clone(), player.clone());
        Ok(player.clone())
    }

    pub async fn set_active(&self, id: &PlayerId, active: bool) -> Result<Player> {
        self.rows
            .update(id, |player| player.active = active)
            .ok_or_else(|| CoreError::NotFound(format!("player {}", id)))
    }

    pub async fn set_good_standing(&self, id: &PlayerId, good_standing: bool) -> Result<Player> {
        self.rows
            .update(id, |player| player.account_in_good_standing = good_standing)
            .ok_or_else(|| CoreError::NotFound(format!("player {}", id)))
    }

    /// Active players only, ordered by name
    pub async fn list_active(&self) -> Result<Vec<Player>> {
        let mut players = self.rows.filter(|p| p.active);
        sort_by_name(&mut players);
        Ok(players)
    }

    pub async fn count(&self) -> usize {
        self.rows.len()
    }

    fn check_unique(&self, player: &Player) -> Result<()> {
        let alias = player.registration_name.to_lowercase();
        let clash = |field: &str| {
            CoreError::AlreadyExists(format!("another player already uses this {}", field))
        };

        if self.rows.any(|id, other| {
            id != &player.national_id && other.registration_name.to_lowercase() == alias
        }) {
            return Err(clash("registration name"));
        }

        if self
            .rows
            .any(|id, other| id != &player.national_id && other.phone == player.phone)
        {
            return Err(clash("phone"));
        }

        if let Some(number) = player.jersey_number {
            if self.rows.any(|id, other| {
                id != &player.national_id && other.jersey_number == Some(number)
            }) {
                return Err(clash("jersey number"));
            }
        }

        Ok(())
    }
}

fn sort_by_name(players: &mut [Player]) {
    players.sort_by_cached_key(|p| p.full_name().to_lowercase());
}

#[async_trait]
impl Repository<Player, PlayerId> for PlayerRepository {
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>> {
        Ok(self.rows.get(id))
    }

    async fn list(&self) -> Result<Vec<Player>> {
        let mut players = self.rows.values();
        sort_by_name(&mut players);
        Ok(players)
    }

    async fn save(&self, entity: &Player) -> Result<Player> {
        if self.rows.contains(&entity.national_id) {
            self.update(entity).await
        } else {
            self.create(entity).await
        }
    }

    async fn delete(&self, id: &PlayerId) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("player {}", id)))
    }
}
