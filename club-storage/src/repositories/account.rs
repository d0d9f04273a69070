use async_trait::async_trait;
use club_core::view::SessionPreferences;
use chrono::{Duration, Utc};
use club_core::{hash_password, Account, CoreError, PasswordReset, Repository, Result};

use crate::memory::MemoryTable;

/// Login accounts keyed by lower-cased email.
#[derive(Debug, Clone, Default)]
pub struct AccountRepository {
    rows: MemoryTable<String, Account>,
}

impl AccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self.rows.get(&email.to_lowercase()))
    }

    pub async fn find_by_player(&self, player_id: &str) -> Result<Option<Account>> {
        Ok(self
            .rows
            .find(|a| a.player_id.as_deref() == Some(player_id)))
    }

    /// Check credentials, returning the account when they match
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account> {
        match self.find_by_email(email).await? {
            Some(account) if account.verify_password(password) => Ok(account),
            _ => Err(CoreError::Unauthorized("invalid email or password".to_string())),
        }
    }

    pub async fn set_password(&self, email: &str, password: &str) -> Result<Account> {
        let password_hash = hash_password(password);
        self.rows
            .update(&email.to_lowercase(), |account| account.password_hash = password_hash)
            .ok_or_else(|| CoreError::NotFound(format!("account {}", email)))
    }

    pub async fn update_preferences(
        &self,
        email: &str,
        preferences: SessionPreferences,
    ) -> Result<Account> {
        self.rows
            .update(&email.to_lowercase(), |account| account.preferences = preferences)
            .ok_or_else(|| CoreError::NotFound(format!("account {}", email)))
    }
}

#[async_trait]
impl Repository<Account, String> for AccountRepository {
    async fn find_by_id(&self, id: &String) -> Result<Option<Account>> {
        self.find_by_email(id).await
    }

    async fn list(&self) -> Result<Vec<Account>> {
        let mut accounts = self.rows.values();
        accounts.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(accounts)
    }

    async fn save(&self, entity: &Account) -> Result<Account> {
        self.rows.insert(entity.email.to_lowercase(), entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: &String) -> Result<()> {
        self.rows
            .remove(&id.to_lowercase())
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("account {}", id)))
    }
}

/// Outstanding reset tokens, at most one per email.
#[derive(Debug, Clone, Default)]
pub struct PasswordResetRepository {
    rows: MemoryTable<String, PasswordReset>,
}

impl PasswordResetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a reset for `email`, replacing any earlier token. Returns the raw token.
    pub async fn issue(&self, email: &str, ttl: Duration) -> String {
        let (reset, token) = PasswordReset::issue(email, ttl);
        self.rows.insert(reset.email.clone(), reset);
        token
    }

    /// Spend a token. Unknown, expired and already used tokens are rejected alike.
    pub async fn consume(&self, email: &str, token: &str) -> Result<()> {
        let now = Utc::now();
        let mut accepted = false;
        self.rows.update(&email.to_lowercase(), |reset| {
            if reset.accepts(token, now) {
                reset.used = true;
                accepted = true;
            }
        });

        if accepted {
            Ok(())
        } else {
            Err(CoreError::Validation("invalid or expired reset token".to_string()))
        }
    }
}
