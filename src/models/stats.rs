//! Derived statistics models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TournamentId;

/// Per-player totals across every tournament the player appears in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,

    /// Number of participation records for this player
    pub tournaments_played: u32,

    /// Sum of buy-in count times tournament buy-in
    pub total_spent: f64,

    pub total_won: f64,

    /// Finish place -> times finished there with a payout
    pub paid_place_counts: BTreeMap<u32, u32>,

    /// `total_won - total_spent`
    pub net_profit: f64,
}

impl PlayerStats {
    /// Zeroed stats for a newly seen player.
    pub fn new(name: String) -> Self {
        Self {
            name,
            tournaments_played: 0,
            total_spent: 0.0,
            total_won: 0.0,
            paid_place_counts: BTreeMap::new(),
            net_profit: 0.0,
        }
    }

    /// Total number of paid finishes across all places.
    pub fn total_paid_finishes(&self) -> u32 {
        self.paid_place_counts.values().sum()
    }

    /// Times this player finished first with a payout.
    pub fn wins(&self) -> u32 {
        self.paid_place_counts.get(&1).copied().unwrap_or(0)
    }
}

/// Per-tournament rollup, metadata snapshotted from the first record seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentStats {
    pub id: TournamentId,

    pub date: DateTime<Utc>,

    /// Participation records for this tournament (not distinct players)
    pub participant_count: u32,

    pub prize_pool: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// One paid finisher in a tournament summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidFinish {
    pub player_name: String,
    pub place: u32,
    pub won_amount: f64,
}

/// Detail view of a single tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    pub buy_in: f64,
    pub prize_pool: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounty: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounty_pool: Option<f64>,

    /// Participation records, re-entering players counted per record
    pub total_participants: u32,

    pub unique_players: u32,

    /// Sum of buy-in counts
    pub total_buy_ins: u64,

    /// Paid finishers ordered by place
    pub paid_finishes: Vec<PaidFinish>,

    pub total_paid_out: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_player_stats_new_is_zeroed() {
        let stats = PlayerStats::new("Alice".to_string());
        assert_eq!(stats.tournaments_played, 0);
        assert_eq!(stats.total_spent, 0.0);
        assert_eq!(stats.total_won, 0.0);
        assert_eq!(stats.net_profit, 0.0);
        assert!(stats.paid_place_counts.is_empty());
    }

    #[test]
    fn test_total_paid_finishes_and_wins() {
        let mut stats = PlayerStats::new("Alice".to_string());
        stats.paid_place_counts.insert(1, 2);
        stats.paid_place_counts.insert(3, 1);

        assert_eq!(stats.total_paid_finishes(), 3);
        assert_eq!(stats.wins(), 2);
    }

    #[test]
    fn test_wins_without_first_place() {
        let mut stats = PlayerStats::new("Bob".to_string());
        stats.paid_place_counts.insert(2, 4);
        assert_eq!(stats.wins(), 0);
    }

    #[test]
    fn test_player_stats_serialization() {
        let mut stats = PlayerStats::new("Alice".to_string());
        stats.paid_place_counts.insert(1, 1);
        stats.total_won = 50.0;
        stats.net_profit = 50.0;

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"paid_place_counts\":{\"1\":1}"));

        let deserialized: PlayerStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, deserialized);
    }

    #[test]
    fn test_tournament_stats_skips_missing_optionals() {
        let stats = TournamentStats {
            id: TournamentId::from("t-1"),
            date: Utc.with_ymd_and_hms(2025, 5, 1, 20, 0, 0).unwrap(),
            participant_count: 7,
            prize_pool: 140.0,
            name: None,
            currency: None,
        };

        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("name"));
        assert!(!json.contains("currency"));
    }
}
