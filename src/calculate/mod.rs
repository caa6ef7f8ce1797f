//! Statistics calculation engine.
//!
//! Turns a flat list of participation records into derived views:
//! - Per-player totals (spend, winnings, paid places, net profit)
//! - Per-tournament rollups (participant count, prize pool)
//! - Single-tournament summaries
//! - Ranked leaderboards (see [`rankings`])
//!
//! Every entry point validates its whole input before accumulating anything,
//! so callers get either complete results or an error.

pub mod rankings;

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    PaidFinish, ParticipationRecord, PlayerStats, TournamentId, TournamentRef, TournamentStats,
    TournamentSummary, ValidationError,
};

pub use rankings::*;

/// Errors raised by the calculation engine.
#[derive(Debug, Error)]
pub enum CalculateError {
    #[error("Invalid participation record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Validate every record, failing on the first bad one.
pub fn validate_records(records: &[ParticipationRecord]) -> Result<(), CalculateError> {
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|source| CalculateError::InvalidRecord { index, source })?;
    }
    Ok(())
}

/// Aggregate per-player statistics.
///
/// Output is in order of each player's first appearance.
pub fn compute_player_stats(
    records: &[ParticipationRecord],
) -> Result<Vec<PlayerStats>, CalculateError> {
    validate_records(records)?;

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut players: Vec<PlayerStats> = Vec::new();

    for record in records {
        let slot = *index
            .entry(record.player_name.as_str())
            .or_insert_with(|| {
                players.push(PlayerStats::new(record.player_name.clone()));
                players.len() - 1
            });
        let stats = &mut players[slot];

        stats.tournaments_played += 1;
        stats.total_spent += record.spent();
        stats.total_won += record.won_amount;

        if let Some(place) = record.finish_place.filter(|_| record.is_paid_finish()) {
            *stats.paid_place_counts.entry(place).or_insert(0) += 1;
        }
    }

    // Net profit is only derived once all records are in.
    for stats in &mut players {
        stats.net_profit = stats.total_won - stats.total_spent;
    }

    debug!(
        "Computed stats for {} players from {} records",
        players.len(),
        records.len()
    );
    Ok(players)
}

/// Aggregate per-tournament statistics.
///
/// Date, prize pool, name and currency come from the first record seen for
/// each tournament id; later records only bump the participant count.
pub fn compute_tournament_stats(
    records: &[ParticipationRecord],
) -> Result<Vec<TournamentStats>, CalculateError> {
    validate_records(records)?;

    let mut index: HashMap<&TournamentId, usize> = HashMap::new();
    let mut tournaments: Vec<TournamentStats> = Vec::new();

    for record in records {
        let t = &record.tournament;
        let slot = match index.entry(&t.id) {
            Entry::Occupied(e) => {
                if metadata_diverges(&tournaments[*e.get()], t) {
                    warn!(
                        "Tournament {} has diverging metadata across records; keeping first",
                        t.id
                    );
                }
                *e.get()
            }
            Entry::Vacant(e) => {
                tournaments.push(TournamentStats {
                    id: t.id.clone(),
                    date: t.created_at,
                    participant_count: 0,
                    prize_pool: t.prize_pool,
                    name: t.name.clone(),
                    currency: t.currency.clone(),
                });
                *e.insert(tournaments.len() - 1)
            }
        };

        tournaments[slot].participant_count += 1;
    }

    debug!(
        "Computed stats for {} tournaments from {} records",
        tournaments.len(),
        records.len()
    );
    Ok(tournaments)
}

/// Whether a later record disagrees with any field snapshotted from the first.
fn metadata_diverges(snapshot: &TournamentStats, t: &TournamentRef) -> bool {
    snapshot.date != t.created_at
        || snapshot.prize_pool != t.prize_pool
        || snapshot.name != t.name
        || snapshot.currency != t.currency
}

/// Distinct player names in order of first appearance.
pub fn known_players(records: &[ParticipationRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.player_name.as_str()))
        .map(|r| r.player_name.clone())
        .collect()
}

/// Build the detail view for one tournament.
///
/// Returns `Ok(None)` when no record references `id`.
pub fn summarize_tournament(
    records: &[ParticipationRecord],
    id: &TournamentId,
) -> Result<Option<TournamentSummary>, CalculateError> {
    validate_records(records)?;

    let entries: Vec<&ParticipationRecord> =
        records.iter().filter(|r| &r.tournament.id == id).collect();
    let Some(first) = entries.first() else {
        return Ok(None);
    };
    let t = &first.tournament;

    let unique_players = entries
        .iter()
        .map(|r| r.player_name.as_str())
        .collect::<HashSet<_>>()
        .len() as u32;

    let mut paid_finishes: Vec<PaidFinish> = entries
        .iter()
        .filter_map(|r| match r.finish_place {
            Some(place) if r.won_amount > 0.0 => Some(PaidFinish {
                player_name: r.player_name.clone(),
                place,
                won_amount: r.won_amount,
            }),
            _ => None,
        })
        .collect();
    paid_finishes.sort_by_key(|f| f.place);

    Ok(Some(TournamentSummary {
        id: t.id.clone(),
        date: t.created_at,
        name: t.name.clone(),
        currency: t.currency.clone(),
        buy_in: t.buy_in,
        prize_pool: t.prize_pool,
        bounty: t.bounty,
        bounty_pool: t.bounty_pool,
        total_participants: entries.len() as u32,
        unique_players,
        total_buy_ins: entries.iter().map(|r| u64::from(r.buy_in_count)).sum(),
        total_paid_out: paid_finishes.iter().map(|f| f.won_amount).sum(),
        paid_finishes,
    }))
}
