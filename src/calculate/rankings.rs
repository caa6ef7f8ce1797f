//! Ranked leaderboard projections over computed stats.
//!
//! Each projection filters, sorts and truncates a fresh copy of its input.
//! Sorting is stable: entries with equal keys keep their input order, and no
//! secondary key is applied. No board ever holds more than
//! [`LEADERBOARD_SIZE`] entries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{PlayerStats, TournamentStats};

/// Number of entries shown on each dashboard leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

fn ranked<T, F, C>(items: &[T], keep: F, cmp: C, limit: usize) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
    C: FnMut(&T, &T) -> Ordering,
{
    let mut out: Vec<T> = items.iter().filter(|i| keep(*i)).cloned().collect();
    out.sort_by(cmp);
    out.truncate(limit.min(LEADERBOARD_SIZE));
    out
}

fn paid_places_within(players: &[PlayerStats], limit: usize) -> Vec<PlayerStats> {
    ranked(
        players,
        |p| !p.paid_place_counts.is_empty(),
        |a, b| b.total_paid_finishes().cmp(&a.total_paid_finishes()),
        limit,
    )
}

fn active_players_within(players: &[PlayerStats], limit: usize) -> Vec<PlayerStats> {
    ranked(
        players,
        |_| true,
        |a, b| b.tournaments_played.cmp(&a.tournaments_played),
        limit,
    )
}

fn losers_within(players: &[PlayerStats], limit: usize) -> Vec<PlayerStats> {
    ranked(
        players,
        |p| p.net_profit < 0.0,
        |a, b| a.net_profit.total_cmp(&b.net_profit),
        limit,
    )
}

fn winners_within(players: &[PlayerStats], limit: usize) -> Vec<PlayerStats> {
    ranked(
        players,
        |p| p.net_profit > 0.0,
        |a, b| b.net_profit.total_cmp(&a.net_profit),
        limit,
    )
}

fn visited_within(tournaments: &[TournamentStats], limit: usize) -> Vec<TournamentStats> {
    ranked(
        tournaments,
        |_| true,
        |a, b| b.participant_count.cmp(&a.participant_count),
        limit,
    )
}

fn prize_pools_within(tournaments: &[TournamentStats], limit: usize) -> Vec<TournamentStats> {
    ranked(
        tournaments,
        |_| true,
        |a, b| b.prize_pool.total_cmp(&a.prize_pool),
        limit,
    )
}

/// Players with at least one paid finish, most paid finishes first.
pub fn most_paid_places(players: &[PlayerStats]) -> Vec<PlayerStats> {
    paid_places_within(players, LEADERBOARD_SIZE)
}

/// Players ordered by tournaments played, most first.
pub fn most_active_players(players: &[PlayerStats]) -> Vec<PlayerStats> {
    active_players_within(players, LEADERBOARD_SIZE)
}

/// The "ludiki" board: players in the red, biggest loss first.
pub fn net_losers(players: &[PlayerStats]) -> Vec<PlayerStats> {
    losers_within(players, LEADERBOARD_SIZE)
}

/// The "majors" board: players in profit, biggest profit first.
pub fn net_winners(players: &[PlayerStats]) -> Vec<PlayerStats> {
    winners_within(players, LEADERBOARD_SIZE)
}

/// Tournaments ordered by participation records, most first.
pub fn most_visited_tournaments(tournaments: &[TournamentStats]) -> Vec<TournamentStats> {
    visited_within(tournaments, LEADERBOARD_SIZE)
}

/// Tournaments ordered by prize pool, largest first.
pub fn biggest_prize_pools(tournaments: &[TournamentStats]) -> Vec<TournamentStats> {
    prize_pools_within(tournaments, LEADERBOARD_SIZE)
}

/// All dashboard leaderboards for one set of stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboards {
    pub most_paid_places: Vec<PlayerStats>,
    pub most_active_players: Vec<PlayerStats>,
    pub net_losers: Vec<PlayerStats>,
    pub net_winners: Vec<PlayerStats>,
    pub most_visited_tournaments: Vec<TournamentStats>,
    pub biggest_prize_pools: Vec<TournamentStats>,
}

impl Leaderboards {
    /// Build every leaderboard with at most `limit` entries each.
    ///
    /// `limit` can shorten the boards but never lengthens them past
    /// [`LEADERBOARD_SIZE`].
    pub fn build(players: &[PlayerStats], tournaments: &[TournamentStats], limit: usize) -> Self {
        Self {
            most_paid_places: paid_places_within(players, limit),
            most_active_players: active_players_within(players, limit),
            net_losers: losers_within(players, limit),
            net_winners: winners_within(players, limit),
            most_visited_tournaments: visited_within(tournaments, limit),
            biggest_prize_pools: prize_pools_within(tournaments, limit),
        }
    }
}
