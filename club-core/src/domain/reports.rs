//! Aggregations behind the dashboard, account statements and summaries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

use super::expense::{Expense, ExpenseCategory};
use super::fine::{Fine, FineCause, FineDetail};
use super::payment::{Contribution, MonthlyDue};
use super::player::{Player, PlayerId};

/// Borrowed view over every record the reports read.
#[derive(Debug, Clone, Copy)]
pub struct Ledger<'a> {
    pub players: &'a [Player],
    pub fines: &'a [Fine],
    pub causes: &'a [FineCause],
    pub dues: &'a [MonthlyDue],
    pub contributions: &'a [Contribution],
    pub expenses: &'a [Expense],
    pub categories: &'a [ExpenseCategory],
}

impl<'a> Ledger<'a> {
    pub(crate) fn cause_amounts(&self) -> HashMap<Uuid, Decimal> {
        self.causes.iter().map(|c| (c.id, c.amount)).collect()
    }

    pub(crate) fn fine_amount(amounts: &HashMap<Uuid, Decimal>, fine: &Fine) -> Decimal {
        amounts.get(&fine.cause_id).copied().unwrap_or_default()
    }

    pub fn total_income(&self) -> Decimal {
        let amounts = self.cause_amounts();
        let dues: Decimal = self.dues.iter().map(|d| d.amount).sum();
        let contributions: Decimal = self.contributions.iter().map(|c| c.amount).sum();
        let paid_fines: Decimal = self
            .fines
            .iter()
            .filter(|f| f.paid)
            .map(|f| Self::fine_amount(&amounts, f))
            .sum();
        dues + contributions + paid_fines
    }

    pub fn total_expenses(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    pub fn players_with_pending_fines(&self) -> HashSet<&'a str> {
        self.fines
            .iter()
            .filter(|f| !f.paid)
            .map(|f| f.player_id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub balance: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_players: usize,
    pub active_players: usize,
    pub players_up_to_date: usize,
    pub players_with_pending_fines: usize,
    pub generated_at: DateTime<Utc>,
}

impl DashboardSummary {
    pub fn compute(ledger: &Ledger<'_>) -> Self {
        let total_income = ledger.total_income();
        let total_expenses = ledger.total_expenses();
        let pending = ledger.players_with_pending_fines();
        let with_pending = ledger
            .players
            .iter()
            .filter(|p| pending.contains(p.national_id.as_str()))
            .count();

        Self {
            balance: total_income - total_expenses,
            total_income,
            total_expenses,
            total_players: ledger.players.len(),
            active_players: ledger.players.iter().filter(|p| p.active).count(),
            players_up_to_date: ledger.players.len() - with_pending,
            players_with_pending_fines: with_pending,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FineRankingEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub total_fines: usize,
    pub pending_fines: usize,
    pub total_amount: Decimal,
    pub pending_amount: Decimal,
}

/// Players with at least one fine, most fined first. Ties break on amount, then name.
pub fn fine_ranking(ledger: &Ledger<'_>, limit: usize) -> Vec<FineRankingEntry> {
    let amounts = ledger.cause_amounts();
    let mut by_player: HashMap<&str, FineRankingEntry> = HashMap::new();

    for player in ledger.players {
        by_player.insert(
            player.national_id.as_str(),
            FineRankingEntry {
                player_id: player.national_id.clone(),
                player_name: player.full_name(),
                total_fines: 0,
                pending_fines: 0,
                total_amount: Decimal::ZERO,
                pending_amount: Decimal::ZERO,
            },
        );
    }

    for fine in ledger.fines {
        let Some(entry) = by_player.get_mut(fine.player_id.as_str()) else {
            continue;
        };
        let amount = Ledger::fine_amount(&amounts, fine);
        entry.total_fines += 1;
        entry.total_amount += amount;
        if !fine.paid {
            entry.pending_fines += 1;
            entry.pending_amount += amount;
        }
    }

    let mut ranking: Vec<_> = by_player
        .into_values()
        .filter(|e| e.total_fines > 0)
        .collect();
    ranking.sort_by(|a, b| {
        b.total_fines
            .cmp(&a.total_fines)
            .then(b.total_amount.cmp(&a.total_amount))
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    ranking.truncate(limit);
    ranking
}

/// Per-player financial statement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountStatement {
    pub player_id: PlayerId,
    pub player_name: String,
    pub pending_fines: Vec<FineDetail>,
    pub pending_fines_total: Decimal,
    pub paid_fines_total: Decimal,
    pub dues: Vec<MonthlyDue>,
    pub dues_total: Decimal,
    pub contributions: Vec<Contribution>,
    pub contributions_total: Decimal,
    pub up_to_date: bool,
}

impl AccountStatement {
    pub fn compute(player: &Player, ledger: &Ledger<'_>) -> Self {
        let causes: HashMap<Uuid, &FineCause> = ledger.causes.iter().map(|c| (c.id, c)).collect();
        let details: Vec<FineDetail> = ledger
            .fines
            .iter()
            .filter(|f| f.player_id == player.national_id)
            .map(|f| FineDetail::new(f.clone(), Some(player), causes.get(&f.cause_id).copied()))
            .collect();

        let paid_fines_total = details.iter().filter(|d| d.fine.paid).map(|d| d.amount).sum();
        let pending_fines: Vec<FineDetail> = details.into_iter().filter(|d| !d.fine.paid).collect();
        let pending_fines_total = pending_fines.iter().map(|d| d.amount).sum();

        let mut dues: Vec<MonthlyDue> = ledger
            .dues
            .iter()
            .filter(|d| d.player_id == player.national_id)
            .cloned()
            .collect();
        dues.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        let dues_total = dues.iter().map(|d| d.amount).sum();

        let contributions: Vec<Contribution> = ledger
            .contributions
            .iter()
            .filter(|c| c.player_id == player.national_id)
            .cloned()
            .collect();
        let contributions_total = contributions.iter().map(|c| c.amount).sum();

        Self {
            player_id: player.national_id.clone(),
            player_name: player.full_name(),
            up_to_date: pending_fines.is_empty(),
            pending_fines,
            pending_fines_total,
            paid_fines_total,
            dues,
            dues_total,
            contributions,
            contributions_total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub category_id: Uuid,
    pub category_name: String,
    pub expense_count: usize,
    pub total: Decimal,
}

/// Totals per expense category, largest first. Categories without expenses are included.
pub fn expense_summary(categories: &[ExpenseCategory], expenses: &[Expense]) -> Vec<CategorySummary> {
    let mut summary: Vec<CategorySummary> = categories
        .iter()
        .map(|category| {
            let matching = expenses.iter().filter(|e| e.category_id == category.id);
            CategorySummary {
                category_id: category.id,
                category_name: category.name.clone(),
                expense_count: matching.clone().count(),
                total: matching.map(|e| e.amount).sum(),
            }
        })
        .collect();
    summary.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category_name.cmp(&b.category_name)));
    summary
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupContributionSummary {
    pub group_id: Uuid,
    pub concept: String,
    pub issued_on: NaiveDate,
    pub fine_count: usize,
    pub paid_count: usize,
    pub total_amount: Decimal,
    pub collected_amount: Decimal,
}

/// One row per group contribution, newest first.
pub fn group_contributions(fines: &[Fine], causes: &[FineCause]) -> Vec<GroupContributionSummary> {
    let amounts: HashMap<Uuid, Decimal> = causes.iter().map(|c| (c.id, c.amount)).collect();
    let mut groups: BTreeMap<Uuid, GroupContributionSummary> = BTreeMap::new();

    for fine in fines {
        let Some(group_id) = fine.group_id else {
            continue;
        };
        let amount = Ledger::fine_amount(&amounts, fine);
        let entry = groups.entry(group_id).or_insert_with(|| GroupContributionSummary {
            group_id,
            concept: fine.group_concept.clone().unwrap_or_default(),
            issued_on: fine.issued_on,
            fine_count: 0,
            paid_count: 0,
            total_amount: Decimal::ZERO,
            collected_amount: Decimal::ZERO,
        });
        entry.fine_count += 1;
        entry.total_amount += amount;
        if fine.paid {
            entry.paid_count += 1;
            entry.collected_amount += amount;
        }
    }

    let mut rows: Vec<_> = groups.into_values().collect();
    rows.sort_by(|a, b| b.issued_on.cmp(&a.issued_on));
    rows
}
