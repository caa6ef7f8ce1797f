use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poker_ledger::calculate::{
    compute_player_stats, compute_tournament_stats, known_players, summarize_tournament,
    Leaderboards,
};
use poker_ledger::config::AppConfig;
use poker_ledger::currency::format_money;
use poker_ledger::models::{ParticipationRecord, PlayerStats, TournamentId, TournamentStats};
use poker_ledger::storage::{read_participation, write_derived, StorageConfig};

#[derive(Parser)]
#[command(name = "poker-ledger")]
#[command(about = "Home-game poker tournament bookkeeping and analytics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every leaderboard
    Analytics {
        /// Participation records (JSONL); defaults to <data_dir>/participants.jsonl
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show stats for every player
    Players {
        #[arg(long)]
        input: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Show the summary of a single tournament
    Tournament {
        #[arg(long)]
        input: Option<PathBuf>,

        /// Tournament id
        #[arg(long)]
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Write derived player and tournament stats to <data_dir>/derived
    Derive {
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let log_level = cli.log_level.unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting poker-ledger v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Analytics { input, json } => {
            let records = load(&storage, input.as_deref())?;
            let players = compute_player_stats(&records)?;
            let tournaments = compute_tournament_stats(&records)?;
            let boards =
                Leaderboards::build(&players, &tournaments, config.analytics.leaderboard_size);

            tracing::info!(
                "Built leaderboards for {} players across {} tournaments",
                players.len(),
                tournaments.len()
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&boards)?);
            } else {
                print_leaderboards(&boards, &config);
            }
        }
        Commands::Players { input, json } => {
            let records = load(&storage, input.as_deref())?;
            let players = compute_player_stats(&records)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&players)?);
            } else {
                println!("\n=== Players ({}) ===", known_players(&records).len());
                for p in &players {
                    println!(
                        "{:<20} played {:>3}  wins {:>3}  spent {:>10}  won {:>10}  net {:>10}",
                        p.name,
                        p.tournaments_played,
                        p.wins(),
                        p.total_spent,
                        p.total_won,
                        p.net_profit
                    );
                }
            }
        }
        Commands::Tournament { input, id, json } => {
            let records = load(&storage, input.as_deref())?;
            let id = TournamentId::from(id);
            let Some(summary) = summarize_tournament(&records, &id)? else {
                anyhow::bail!("Tournament not found: {}", id);
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let currency = summary
                    .currency
                    .as_deref()
                    .or(config.report.default_currency.as_deref());
                println!("\n=== Tournament {} ===", summary.name.as_deref().unwrap_or(id.as_str()));
                println!("Date:          {}", summary.date.format("%A, %B %d, %Y"));
                println!("Buy-in:        {}", format_money(summary.buy_in, currency));
                println!("Prize pool:    {}", format_money(summary.prize_pool, currency));
                match summary.bounty_pool {
                    Some(pool) => println!("Bounty pool:   {}", format_money(pool, currency)),
                    None => println!("Bounty pool:   N/A"),
                }
                println!("Participants:  {}", summary.total_participants);
                println!("Players:       {}", summary.unique_players);
                println!("Buy-ins:       {}", summary.total_buy_ins);
                println!("\nPaid places:");
                for f in &summary.paid_finishes {
                    println!(
                        "  {:>2}. {:<20} {}",
                        f.place,
                        f.player_name,
                        format_money(f.won_amount, currency)
                    );
                }
            }
        }
        Commands::Derive { input } => {
            let records = load(&storage, input.as_deref())?;
            let players = compute_player_stats(&records)?;
            let tournaments = compute_tournament_stats(&records)?;
            let (p, t) = write_derived(&storage, &players, &tournaments)?;

            println!("\n=== Derive Results ===");
            println!("Players:      {}", p);
            println!("Tournaments:  {}", t);
            println!("Output:       {:?}", storage.derived_dir());
        }
    }

    Ok(())
}

fn load(storage: &StorageConfig, input: Option<&Path>) -> Result<Vec<ParticipationRecord>> {
    let path = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| storage.participants_path());
    read_participation(&path).with_context(|| format!("reading participation records from {:?}", path))
}

fn print_leaderboards(boards: &Leaderboards, config: &AppConfig) {
    let currency = config.report.default_currency.as_deref();

    print_players("Most paid places", &boards.most_paid_places, |p| {
        p.total_paid_finishes().to_string()
    });
    print_players("Most active players", &boards.most_active_players, |p| {
        p.tournaments_played.to_string()
    });
    print_players("Majors", &boards.net_winners, |p| {
        format!("+{}", format_money(p.net_profit, currency))
    });
    print_players("Ludiki", &boards.net_losers, |p| {
        format!("-{}", format_money(p.net_profit.abs(), currency))
    });
    print_tournaments("Most visited tournaments", &boards.most_visited_tournaments, |t| {
        t.participant_count.to_string()
    });
    print_tournaments("Biggest prize pools", &boards.biggest_prize_pools, |t| {
        format_money(t.prize_pool, t.currency.as_deref().or(currency))
    });
}

fn print_players(title: &str, players: &[PlayerStats], value: impl Fn(&PlayerStats) -> String) {
    println!("\n=== {} ===", title);
    if players.is_empty() {
        println!("  (none)");
    }
    for (i, p) in players.iter().enumerate() {
        println!("  {:>2}. {:<20} {}", i + 1, p.name, value(p));
    }
}

fn print_tournaments(
    title: &str,
    tournaments: &[TournamentStats],
    value: impl Fn(&TournamentStats) -> String,
) {
    println!("\n=== {} ===", title);
    if tournaments.is_empty() {
        println!("  (none)");
    }
    for (i, t) in tournaments.iter().enumerate() {
        let label = t.name.as_deref().unwrap_or(t.id.as_str());
        println!(
            "  {:>2}. {:<24} {}  {}",
            i + 1,
            label,
            t.date.format("%Y-%m-%d"),
            value(t)
        );
    }
}
