//! Engine façade: owns the game state and exposes commands and queries
//!
//! Decisions are two-phase. `decide` resolves the choice and parks the next
//! scenario; the caller invokes `advance` whenever it is ready to show it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::TuningConfig;
use crate::core::error::Rejected;
use crate::core::random::RandomSource;
use crate::game::events::EventType;
use crate::game::output::SessionSummary;
use crate::game::scenario::{GameOption, Scenario};
use crate::game::state::GameState;
use crate::game::systems::{
    self, DecisionOutcome, LastResort, PassAction, TerminalReason,
};

/// Where the engine is in its turn cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// A scenario is open for a decision
    Deciding,
    /// A decision was resolved and the next scenario is waiting
    Resolved,
    /// The company faces game over; rescues may still be tried
    Terminal {
        reason: TerminalReason,
        spent: Vec<LastResort>,
    },
    /// Game over accepted; only `reset` is possible
    Finalized { reason: TerminalReason },
}

pub struct Engine<R: RandomSource = ChaCha8Rng> {
    config: TuningConfig,
    rng: R,
    state: GameState,
    scenario: Scenario,
    pending: Option<Scenario>,
    phase: Phase,
}

impl Engine<ChaCha8Rng> {
    /// Default tuning on a seeded ChaCha stream
    pub fn seeded(seed: u64) -> Self {
        Self::new(TuningConfig::default(), ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn seeded_with_config(config: TuningConfig, seed: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Engine<R> {
    pub fn new(config: TuningConfig, mut rng: R) -> Self {
        let state = GameState::new(&config);
        let scenario =
            systems::generate_scenario(state.difficulty, &state.resources, &config.generation, &mut rng);
        let mut engine = Self {
            config,
            rng,
            state,
            scenario,
            pending: None,
            phase: Phase::Deciding,
        };
        engine.settle();
        engine
    }

    // === QUERIES ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn config(&self) -> &TuningConfig {
        &self.config
    }

    pub fn is_eligible(&self, option: &GameOption) -> bool {
        option.is_eligible(&self.state.resources)
    }

    pub fn has_any_eligible_option(&self, scenario: &Scenario) -> bool {
        scenario.has_eligible_option(&self.state.resources)
    }

    pub fn success_chance(&self, option: &GameOption) -> f64 {
        systems::success_chance(option, &self.state.resources, &self.config.resolution)
    }

    pub fn loan_ceiling(&self) -> i64 {
        systems::loan_ceiling(&self.state.resources, &self.config.loans)
            .floor()
            .max(0.0) as i64
    }

    pub fn interest_due(&self) -> i64 {
        systems::interest_due(&self.state.resources)
    }

    /// Rescues still available in the current crisis
    pub fn available_last_resorts(&self) -> Vec<LastResort> {
        match &self.phase {
            Phase::Terminal { spent, .. } => LastResort::ALL
                .into_iter()
                .filter(|a| !spent.contains(a))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_state(&self.state)
    }

    // === COMMANDS ===

    /// Resolve the option at `index` of the current scenario
    pub fn decide(&mut self, index: usize) -> Result<DecisionOutcome, Rejected> {
        self.expect_deciding()?;
        let option = self
            .scenario
            .option(index)
            .ok_or(Rejected::UnknownOption(index))?;
        if !option.is_eligible(&self.state.resources) {
            tracing::debug!(index, "ineligible option ignored");
            return Err(Rejected::Ineligible);
        }

        let resolution = systems::resolve(option, &self.state, &self.scenario, &self.config, &mut self.rng);
        let outcome = resolution.outcome;
        self.state = resolution.state;

        tracing::debug!(
            round = self.state.round,
            success = outcome.success,
            chance = outcome.chance,
            delta = outcome.score_delta,
            capital = self.state.resources.capital(),
            "decision resolved"
        );

        match outcome.terminal {
            Some(reason) => {
                self.scenario = resolution.next_scenario;
                self.enter_terminal(reason);
            }
            None => {
                self.pending = Some(resolution.next_scenario);
                self.phase = Phase::Resolved;
            }
        }
        Ok(outcome)
    }

    /// Install the scenario prepared by the last decision and start the next round
    pub fn advance(&mut self) -> Result<&Scenario, Rejected> {
        if self.phase != Phase::Resolved {
            return Err(Rejected::WrongPhase);
        }
        let next = self.pending.take().ok_or(Rejected::WrongPhase)?;
        self.scenario = next;
        self.state.round += 1;
        self.phase = Phase::Deciding;
        Ok(&self.scenario)
    }

    pub fn take_loan(&mut self, amount: i64) -> Result<(), Rejected> {
        self.expect_deciding()?;
        systems::take_loan(&mut self.state.resources, amount, &self.config.loans)
            .map_err(|e| log_rejection("take_loan", e))?;
        tracing::debug!(amount, balance = self.state.resources.loan_amount(), "loan taken");
        self.settle();
        Ok(())
    }

    pub fn repay_loan(&mut self, amount: i64) -> Result<(), Rejected> {
        self.expect_deciding()?;
        systems::repay_loan(&mut self.state.resources, amount, &self.config.loans)
            .map_err(|e| log_rejection("repay_loan", e))?;
        tracing::debug!(amount, balance = self.state.resources.loan_amount(), "loan repaid");
        self.settle();
        Ok(())
    }

    /// Skip a round to shed stress, once per round
    pub fn laissez_faire(&mut self) -> Result<(), Rejected> {
        self.expect_deciding()?;
        if !self.state.can_laissez_faire {
            return Err(log_rejection("laissez_faire", Rejected::LaissezFaireSpent));
        }
        self.state.can_laissez_faire = false;
        self.pass(PassAction::LaissezFaire);
        Ok(())
    }

    pub fn stabilize_market(&mut self) -> Result<(), Rejected> {
        self.expect_deciding()?;
        self.pass(PassAction::StabilizeMarket);
        Ok(())
    }

    /// Try a rescue during a crisis. Returns true if the company is saved.
    pub fn last_resort(&mut self, action: LastResort) -> Result<bool, Rejected> {
        let Phase::Terminal { spent, .. } = &mut self.phase else {
            return Err(Rejected::WrongPhase);
        };
        if spent.contains(&action) {
            return Err(log_rejection("last_resort", Rejected::LastResortSpent));
        }
        spent.push(action);

        systems::apply_last_resort(
            action,
            &mut self.state.resources,
            &mut self.state.effects,
            &self.config.last_resort,
        );
        if action == LastResort::EmergencyLoan {
            self.state.can_laissez_faire = true;
        }
        let round = self.state.round;
        self.state.log.add_event(EventType::LastResort { action }, round);

        self.scenario = systems::generate_scenario(
            self.state.difficulty,
            &self.state.resources,
            &self.config.generation,
            &mut self.rng,
        );

        match systems::check_terminal(&self.state.resources, &self.scenario, &self.config.terminal) {
            None => {
                tracing::info!(?action, round, "company saved");
                self.state.terminal = None;
                self.state.log.add_event(EventType::CrisisAverted, round);
                self.phase = Phase::Deciding;
                Ok(true)
            }
            Some(reason) => {
                tracing::info!(?action, %reason, "rescue failed to clear crisis");
                self.state.terminal = Some(reason);
                if let Phase::Terminal { reason: current, .. } = &mut self.phase {
                    *current = reason;
                }
                Ok(false)
            }
        }
    }

    /// Accept game over
    pub fn finalize(&mut self) -> Result<TerminalReason, Rejected> {
        let Phase::Terminal { reason, .. } = self.phase else {
            return Err(Rejected::WrongPhase);
        };
        let round = self.state.round;
        self.state.log.add_event(EventType::GameOver { reason }, round);
        self.phase = Phase::Finalized { reason };
        tracing::info!(%reason, round, score = self.state.score, "game over");
        Ok(reason)
    }

    /// Start a new game, keeping the high score
    pub fn reset(&mut self) {
        self.state = self.state.reset(&self.config);
        self.pending = None;
        self.scenario = systems::generate_scenario(
            self.state.difficulty,
            &self.state.resources,
            &self.config.generation,
            &mut self.rng,
        );
        self.phase = Phase::Deciding;
        self.settle();
    }

    // === INTERNALS ===

    fn expect_deciding(&self) -> Result<(), Rejected> {
        if self.phase == Phase::Deciding {
            Ok(())
        } else {
            Err(Rejected::WrongPhase)
        }
    }

    fn pass(&mut self, action: PassAction) {
        systems::apply_pass_action(action, &mut self.state.resources, &self.config.pass_actions);
        let round = self.state.round;
        self.state.log.add_event(EventType::PassAction { action }, round);
        tracing::debug!(?action, round, "pass action");
        self.settle();
    }

    /// Re-check the current scenario after a command that moved resources
    fn settle(&mut self) {
        if self.phase != Phase::Deciding {
            return;
        }
        if let Some(reason) =
            systems::check_terminal(&self.state.resources, &self.scenario, &self.config.terminal)
        {
            self.enter_terminal(reason);
        }
    }

    fn enter_terminal(&mut self, reason: TerminalReason) {
        let round = self.state.round;
        self.state.terminal = Some(reason);
        self.pending = None;
        self.state.log.add_event(EventType::CrisisStarted { reason }, round);
        self.phase = Phase::Terminal {
            reason,
            spent: Vec::new(),
        };
        tracing::info!(%reason, round, "crisis");
    }
}

fn log_rejection(command: &'static str, reason: Rejected) -> Rejected {
    tracing::debug!(command, %reason, "command rejected");
    reason
}
