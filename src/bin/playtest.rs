//! Headless Playtester
//!
//! Plays complete games with a fixed strategy and outputs JSON results for
//! balancing the tuning table.

use std::path::PathBuf;

use boardroom::core::config::TuningConfig;
use boardroom::game::{Engine, GameOption, Phase, SessionSummary, TerminalReason};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless Playtester - automated games for tuning
#[derive(Parser, Debug)]
#[command(name = "playtest")]
#[command(about = "Play automated games and output results as JSON")]
struct Args {
    /// Random seed for the first game; later games use seed + n
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: u32,

    /// How options are chosen
    #[arg(long, value_enum, default_value_t = Strategy::BestOdds)]
    strategy: Strategy,

    /// Stop a game after this many rounds
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    /// Tuning table to load instead of the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Try every last resort before accepting game over
    #[arg(long)]
    last_resort: bool,

    /// Print a human-readable summary per game to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Strategy {
    /// Always the high-risk option when affordable
    Aggressive,
    /// Always the balanced option when affordable
    Balanced,
    /// Always the conservative option when affordable
    Conservative,
    /// Highest success chance, ties broken by impact
    BestOdds,
}

impl Strategy {
    fn preferred(self) -> Option<usize> {
        match self {
            Strategy::Aggressive => Some(0),
            Strategy::Balanced => Some(1),
            Strategy::Conservative => Some(2),
            Strategy::BestOdds => None,
        }
    }
}

/// JSON output structure
#[derive(Serialize)]
struct PlaytestOutput {
    seed: u64,
    strategy: Strategy,
    games: Vec<GameResult>,
    aggregate: AggregateStats,
}

#[derive(Serialize)]
struct GameResult {
    seed: u64,
    rounds: u32,
    rescues_used: u32,
    rescues_saved: u32,
    ended: Option<TerminalReason>,
    summary: SessionSummary,
}

#[derive(Serialize, Default)]
struct AggregateStats {
    mean_rounds: f64,
    mean_score: f64,
    best_score: f64,
    survived_to_cap: u32,
    success_rate: f64,
}

fn main() {
    let args = Args::parse();

    // JSON goes to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boardroom=warn")),
        )
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => TuningConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load tuning '{}': {}", path.display(), e);
            eprintln!("Using default tuning");
            TuningConfig::default()
        }),
        None => TuningConfig::default(),
    };

    let mut games = Vec::with_capacity(args.games as usize);
    for n in 0..args.games {
        let game_seed = seed.wrapping_add(n as u64);
        let mut engine = Engine::seeded_with_config(config.clone(), game_seed);
        let result = play(&mut engine, &args, game_seed);
        if args.verbose {
            eprintln!("Game {} (seed {}): {}", n + 1, game_seed, result.summary.summary());
        }
        games.push(result);
    }

    let output = PlaytestOutput {
        seed,
        strategy: args.strategy,
        aggregate: aggregate(&games, args.max_rounds),
        games,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    );
}

fn play(engine: &mut Engine, args: &Args, seed: u64) -> GameResult {
    let mut rescues_used = 0;
    let mut rescues_saved = 0;
    let mut ended = None;

    while engine.state().round <= args.max_rounds {
        match engine.phase().clone() {
            Phase::Deciding => {
                manage_pressure(engine);
                if *engine.phase() != Phase::Deciding {
                    continue;
                }
                match choose(engine, args.strategy) {
                    Some(index) => {
                        if engine.decide(index).is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            Phase::Resolved => {
                if engine.state().round == args.max_rounds {
                    break;
                }
                if engine.advance().is_err() {
                    break;
                }
            }
            Phase::Terminal { .. } => {
                let next = engine.available_last_resorts().into_iter().next();
                match next.filter(|_| args.last_resort) {
                    Some(action) => {
                        rescues_used += 1;
                        match engine.last_resort(action) {
                            Ok(true) => rescues_saved += 1,
                            Ok(false) => tracing::debug!(?action, seed, "rescue did not clear crisis"),
                            Err(e) => tracing::debug!(?action, seed, %e, "rescue rejected"),
                        }
                    }
                    None => {
                        ended = engine.finalize().ok();
                        break;
                    }
                }
            }
            Phase::Finalized { reason } => {
                ended = Some(reason);
                break;
            }
        }
    }

    GameResult {
        seed,
        rounds: engine.state().round,
        rescues_used,
        rescues_saved,
        ended,
        summary: engine.summary(),
    }
}

/// Shed stress or calm the market before it turns fatal
fn manage_pressure(engine: &mut Engine) {
    let r = &engine.state().resources;
    let (stress, volatility) = (r.stress(), r.market_volatility());
    if stress >= 70 && engine.state().can_laissez_faire {
        let _ = engine.laissez_faire();
    } else if volatility >= 80 && stress < 80 {
        let _ = engine.stabilize_market();
    }
}

fn choose(engine: &Engine, strategy: Strategy) -> Option<usize> {
    let scenario = engine.scenario();
    if let Some(index) = strategy.preferred() {
        if scenario.option(index).is_some_and(|o| engine.is_eligible(o)) {
            return Some(index);
        }
    }
    scenario
        .eligible_options(&engine.state().resources)
        .max_by(|(_, a), (_, b)| {
            let key = |o: &GameOption| (engine.success_chance(o), o.impact);
            key(*a).partial_cmp(&key(*b)).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(index, _)| index)
}

fn aggregate(games: &[GameResult], cap: u32) -> AggregateStats {
    if games.is_empty() {
        return AggregateStats::default();
    }
    let n = games.len() as f64;
    let decisions: u32 = games.iter().map(|g| g.summary.statistics.decisions_made).sum();
    let successes: u32 = games.iter().map(|g| g.summary.statistics.successes).sum();

    AggregateStats {
        mean_rounds: games.iter().map(|g| g.rounds as f64).sum::<f64>() / n,
        mean_score: games.iter().map(|g| g.summary.score).sum::<f64>() / n,
        best_score: games.iter().map(|g| g.summary.score).fold(f64::MIN, f64::max),
        survived_to_cap: games
            .iter()
            .filter(|g| g.ended.is_none() && g.rounds >= cap)
            .count() as u32,
        success_rate: if decisions == 0 {
            0.0
        } else {
            successes as f64 / decisions as f64
        },
    }
}
