use club_core::{
    keys, Account, Contribution, CoreError, Expense, ExpenseCategory, Fine, FineCause, Ledger,
    MonthlyDue, Player, PlayerId, Repository, Result, Role, Setting,
};
use rust_decimal::Decimal;

use crate::repositories::*;

/// Every repository the club needs, shared between request handlers.
///
/// Cloning is cheap: clones share the same underlying tables.
#[derive(Debug, Clone, Default)]
pub struct ClubStore {
    pub players: PlayerRepository,
    pub fines: FineRepository,
    pub fine_causes: FineCauseRepository,
    pub dues: MonthlyDueRepository,
    pub contributions: ContributionRepository,
    pub expenses: ExpenseRepository,
    pub expense_categories: ExpenseCategoryRepository,
    pub settings: SettingRepository,
    pub accounts: AccountRepository,
    pub password_resets: PasswordResetRepository,
    pub articles: ArticleRepository,
}

impl ClubStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the default settings and the administrator account when missing.
    pub async fn seed(&self, admin_email: &str, admin_password: &str) -> Result<()> {
        let defaults = [
            (keys::MONTHLY_DUE, Decimal::new(30000, 0), "Monthly due for field players"),
            (
                keys::GOALKEEPER_MONTHLY_DUE,
                Decimal::new(15000, 0),
                "Monthly due for goalkeepers",
            ),
        ];
        for (key, value, description) in defaults {
            if self.settings.find_by_id(&key.to_string()).await?.is_none() {
                self.settings
                    .save(&Setting::new(key, value, Some(description.to_string())))
                    .await?;
            }
        }

        if self.accounts.find_by_email(admin_email).await?.is_none() {
            let admin = Account::new(admin_email, "Administrator", admin_password, Role::Admin);
            self.accounts.save(&admin).await?;
            tracing::info!(email = %admin.email, "seeded administrator account");
        }

        Ok(())
    }

    /// Monthly due a player owes, taking goalkeeper pricing into account.
    pub async fn monthly_due_for(&self, player: &Player) -> Result<Decimal> {
        if player.is_goalkeeper() {
            if let Some(value) = self.settings.value(keys::GOALKEEPER_MONTHLY_DUE).await {
                return Ok(value);
            }
        }
        self.settings.value(keys::MONTHLY_DUE).await.ok_or_else(|| {
            CoreError::Validation(format!("setting '{}' is not configured", keys::MONTHLY_DUE))
        })
    }

    /// A player is in good standing while no fine is left unpaid.
    pub async fn refresh_standing(&self, player_id: &PlayerId) -> Result<bool> {
        let up_to_date = !self
            .fines
            .list_by_player(player_id)
            .await?
            .iter()
            .any(|fine| !fine.paid);
        self.players.set_good_standing(player_id, up_to_date).await?;
        Ok(up_to_date)
    }

    /// Copy every table needed by the reports.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            players: self.players.list().await?,
            fines: self.fines.list().await?,
            causes: self.fine_causes.list().await?,
            dues: self.dues.list().await?,
            contributions: self.contributions.list().await?,
            expenses: self.expenses.list().await?,
            categories: self.expense_categories.list().await?,
        })
    }
}

/// Owned copy of the ledger tables at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub fines: Vec<Fine>,
    pub causes: Vec<FineCause>,
    pub dues: Vec<MonthlyDue>,
    pub contributions: Vec<Contribution>,
    pub expenses: Vec<Expense>,
    pub categories: Vec<ExpenseCategory>,
}

impl Snapshot {
    pub fn ledger(&self) -> Ledger<'_> {
        Ledger {
            players: &self.players,
            fines: &self.fines,
            causes: &self.causes,
            dues: &self.dues,
            contributions: &self.contributions,
            expenses: &self.expenses,
            categories: &self.categories,
        }
    }
}
