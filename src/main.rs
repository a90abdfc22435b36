//! Boardroom - Entry Point
//!
//! Interactive terminal front end for the decision simulation. Loads the
//! tuning table, seeds the engine and runs a simple command loop.

use boardroom::core::config::TuningConfig;
use boardroom::core::error::Result;
use boardroom::game::systems::LastResort;
use boardroom::game::{DecisionOutcome, Engine, Phase};

use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const TUNING_PATH: &str = "data/tuning.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boardroom=info")),
        )
        .init();

    let config = match TuningConfig::load(Path::new(TUNING_PATH)) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Could not load {}: {} - using built-in tuning", TUNING_PATH, e);
            TuningConfig::default()
        }
    };

    let seed: u64 = rand::random();
    tracing::info!(seed, "Boardroom starting...");
    let mut engine = Engine::seeded_with_config(config, seed);

    println!("\n=== BOARDROOM ===");
    println!("Run a company one decision at a time. Don't go under.");
    println!();
    print_help();

    loop {
        display_status(&engine);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let mut words = input.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "1" | "2" | "3" => {
                let index = command.parse::<usize>().unwrap_or(1) - 1;
                match engine.decide(index) {
                    Ok(outcome) => report_outcome(&outcome),
                    Err(e) => println!("Cannot decide: {}", e),
                }
            }
            "next" | "n" => match engine.advance() {
                Ok(_) => println!("On to round {}.", engine.state().round),
                Err(e) => println!("Cannot advance: {}", e),
            },
            "loan" => match parse_amount(argument) {
                Some(amount) => match engine.take_loan(amount) {
                    Ok(()) => println!("Borrowed ${}.", amount),
                    Err(e) => println!("Loan refused: {}", e),
                },
                None => println!("Usage: loan <amount> (ceiling ${})", engine.loan_ceiling()),
            },
            "repay" => match parse_amount(argument) {
                Some(amount) => match engine.repay_loan(amount) {
                    Ok(()) => println!("Repaid ${}.", amount),
                    Err(e) => println!("Repayment refused: {}", e),
                },
                None => println!("Usage: repay <amount>"),
            },
            "rest" => match engine.laissez_faire() {
                Ok(()) => println!("You step back and let the market run."),
                Err(e) => println!("Cannot rest: {}", e),
            },
            "stabilize" => match engine.stabilize_market() {
                Ok(()) => println!("Markets calmed at the cost of some stress."),
                Err(e) => println!("Cannot stabilize: {}", e),
            },
            "rescue" => match argument.and_then(LastResort::from_name) {
                Some(action) => match engine.last_resort(action) {
                    Ok(true) => println!("{} worked. The company survives.", action.label()),
                    Ok(false) => println!("{} was not enough.", action.label()),
                    Err(e) => println!("Cannot rescue: {}", e),
                },
                None => println!(
                    "Usage: rescue <loan|sell|restructure|merger|bankruptcy|takeover>"
                ),
            },
            "accept" => match engine.finalize() {
                Ok(reason) => {
                    println!("\nGAME OVER - {}", reason.description());
                    println!("{}", engine.summary().summary());
                    println!("Type 'reset' to play again.");
                }
                Err(e) => println!("Cannot accept: {}", e),
            },
            "reset" => {
                engine.reset();
                println!("New game started. High score: {:.1}", engine.state().high_score);
            }
            "status" | "s" => println!("{}", engine.summary().summary()),
            "log" => {
                for event in &engine.state().log.events {
                    println!("  [round {}] {}", event.round, event.event_type.message());
                }
            }
            _ => println!("Unknown command. Type 'help' for a list."),
        }
    }

    println!("\nGoodbye! {}", engine.summary().summary());
    Ok(())
}

fn parse_amount(argument: Option<&str>) -> Option<i64> {
    argument.and_then(|a| a.trim_start_matches('$').parse::<i64>().ok())
}

fn print_help() {
    println!("Commands:");
    println!("  1 / 2 / 3          - Choose an option");
    println!("  next / n           - Move on to the next round");
    println!("  loan <amount>      - Borrow from the bank");
    println!("  repay <amount>     - Pay down the loan");
    println!("  rest               - Laissez-faire: shed stress, once per round");
    println!("  stabilize          - Calm the market at a stress cost");
    println!("  rescue <action>    - Last resort during a crisis");
    println!("  accept             - Accept game over");
    println!("  reset              - Start a new game");
    println!("  status / s         - Session summary");
    println!("  log                - Event log");
    println!("  quit / q           - Exit");
    println!();
}

fn report_outcome(outcome: &DecisionOutcome) {
    println!();
    if outcome.success {
        println!("Success! ({:.0}% chance) Score {:+.1}", outcome.chance * 100.0, outcome.score_delta);
    } else {
        println!("Failure. ({:.0}% chance) Score {:+.1}", outcome.chance * 100.0, outcome.score_delta);
    }
    if let Some(message) = &outcome.random_event {
        println!("  Event: {}", message);
    }
    if outcome.loan_payment > 0 {
        println!("  Automatic loan payment: ${}", outcome.loan_payment);
    }
    for achievement in &outcome.unlocked {
        println!("  Achievement unlocked: {}", achievement.label());
    }
}

fn display_status(engine: &Engine) {
    let state = engine.state();
    let r = &state.resources;
    println!();
    println!(
        "--- Round {} | Score {:.1} (best {:.1}) | Difficulty {:.1} ---",
        state.round, state.score, state.high_score, state.difficulty
    );
    println!(
        "  Capital ${}  Reputation {}  Connections {}  Credit {}",
        r.capital(),
        r.reputation(),
        r.connections(),
        r.credit()
    );
    println!(
        "  Stress {}%  Volatility {}%  Loan ${} at {:.1}% (interest due ${})",
        r.stress(),
        r.market_volatility(),
        r.loan_amount(),
        r.loan_interest() * 100.0,
        engine.interest_due()
    );

    match engine.phase() {
        Phase::Deciding => {
            let scenario = engine.scenario();
            println!();
            println!("{}", scenario.question);
            for (i, option) in scenario.options.iter().enumerate() {
                let marker = if engine.is_eligible(option) { " " } else { "x" };
                println!(
                    "  {}{} [{}] {} - cost ${:.0}, impact {:.1}, {:.0}% success",
                    marker,
                    i + 1,
                    option.risk.archetype(),
                    option.text,
                    option.cost,
                    option.impact,
                    engine.success_chance(option) * 100.0
                );
            }
        }
        Phase::Resolved => println!("\nType 'next' to continue."),
        Phase::Terminal { reason, .. } => {
            println!("\nCRISIS: {}", reason.description());
            let options: Vec<&str> = engine
                .available_last_resorts()
                .iter()
                .map(|a| a.label())
                .collect();
            if options.is_empty() {
                println!("No rescues left. Type 'accept'.");
            } else {
                println!("Rescues available: {}", options.join(", "));
                println!("Use 'rescue <action>' or 'accept'.");
            }
        }
        Phase::Finalized { .. } => println!("\nGame over. Type 'reset' to play again."),
    }
}
