//! Participation records: one player's entry into one tournament.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TournamentId;

/// Reasons a participation record is rejected before aggregation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("player name is empty")]
    EmptyPlayerName,

    #[error("tournament id is empty")]
    EmptyTournamentId,

    #[error("finish place must be positive, got 0")]
    ZeroFinishPlace,

    #[error("{field} must be a finite non-negative amount, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },
}

/// The tournament a participation record belongs to, as embedded by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRef {
    pub id: TournamentId,

    /// When the tournament was recorded
    pub created_at: DateTime<Utc>,

    /// Cost of a single entry
    pub buy_in: f64,

    pub prize_pool: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Currency code (e.g. "EUR"); formatting falls back to `$` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Per-elimination bounty, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounty: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounty_pool: Option<f64>,
}

impl TournamentRef {
    pub fn new(
        id: impl Into<TournamentId>,
        created_at: DateTime<Utc>,
        buy_in: f64,
        prize_pool: f64,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            buy_in,
            prize_pool,
            name: None,
            currency: None,
            bounty: None,
            bounty_pool: None,
        }
    }

    /// Builder method to set the tournament name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set the currency code.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Builder method to set bounty and bounty pool.
    pub fn with_bounty(mut self, bounty: f64, bounty_pool: f64) -> Self {
        self.bounty = Some(bounty);
        self.bounty_pool = Some(bounty_pool);
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyTournamentId);
        }
        check_amount("buy_in", self.buy_in)?;
        check_amount("prize_pool", self.prize_pool)?;
        if let Some(bounty) = self.bounty {
            check_amount("bounty", bounty)?;
        }
        if let Some(pool) = self.bounty_pool {
            check_amount("bounty_pool", pool)?;
        }
        Ok(())
    }
}

/// One player's participation in one tournament.
///
/// Field aliases accept the store's row shape (`name`, `buy_ins`, `place`,
/// `tournaments`) as well as the names used here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    /// Player name; players are matched by exact string equality
    #[serde(alias = "name")]
    pub player_name: String,

    /// Number of entries paid, re-entries included
    #[serde(alias = "buy_ins")]
    pub buy_in_count: u32,

    /// Finishing place (1 = winner); absent when the player did not cash
    #[serde(alias = "place", default)]
    pub finish_place: Option<u32>,

    pub won_amount: f64,

    #[serde(alias = "tournaments")]
    pub tournament: TournamentRef,
}

impl ParticipationRecord {
    pub fn new(player_name: impl Into<String>, buy_in_count: u32, tournament: TournamentRef) -> Self {
        Self {
            player_name: player_name.into(),
            buy_in_count,
            finish_place: None,
            won_amount: 0.0,
            tournament,
        }
    }

    /// Builder method to record a finish and its payout.
    pub fn with_finish(mut self, place: u32, won_amount: f64) -> Self {
        self.finish_place = Some(place);
        self.won_amount = won_amount;
        self
    }

    /// Builder method to set the payout without a place.
    pub fn with_won_amount(mut self, won_amount: f64) -> Self {
        self.won_amount = won_amount;
        self
    }

    /// Amount this player paid into the tournament.
    pub fn spent(&self) -> f64 {
        f64::from(self.buy_in_count) * self.tournament.buy_in
    }

    /// Whether this record counts as a paid finish (placed and won something).
    pub fn is_paid_finish(&self) -> bool {
        self.finish_place.is_some() && self.won_amount > 0.0
    }

    /// Check the record's preconditions for aggregation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.player_name.is_empty() {
            return Err(ValidationError::EmptyPlayerName);
        }
        if self.finish_place == Some(0) {
            return Err(ValidationError::ZeroFinishPlace);
        }
        check_amount("won_amount", self.won_amount)?;
        self.tournament.validate()
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount { field, value })
    }
}
