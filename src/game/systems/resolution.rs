//! Decision resolution
//!
//! Resolving a decision works on a copy of the game state and returns the
//! updated copy alongside the outcome and the next scenario. Draw order is
//! fixed: success roll, volatility drift, random-event trigger, random-event
//! pick (only when triggered), then the draws of the next scenario.

use serde::{Deserialize, Serialize};

use crate::core::config::{ResolutionConfig, TuningConfig};
use crate::core::random::RandomSource;
use crate::core::types::Polarity;
use crate::game::effects::ActiveEffect;
use crate::game::events::EventType;
use crate::game::resources::ResourceState;
use crate::game::scenario::{GameOption, Scenario};
use crate::game::state::{DecisionRecord, GameState};
use crate::game::systems::achievements::{qualifying_achievements, Achievement};
use crate::game::systems::generation::generate_scenario;
use crate::game::systems::loans::auto_payment;
use crate::game::systems::terminal::{check_terminal, TerminalReason};

/// Probability that `option` succeeds with the given resources
pub fn success_chance(option: &GameOption, resources: &ResourceState, config: &ResolutionConfig) -> f64 {
    let chance = config.base_success.get(option.risk)
        + resources.reputation() as f64 * config.reputation_bonus
        + resources.connections() as f64 * config.connections_bonus
        - resources.stress() as f64 * config.stress_penalty
        - resources.market_volatility() as f64 * config.volatility_penalty;
    chance.clamp(config.min_success, config.max_success)
}

/// Scale applied to per-decision resource deltas
pub fn difficulty_multiplier(difficulty: f64, config: &ResolutionConfig) -> f64 {
    1.0 + difficulty * config.difficulty_scaling
}

/// What happened when a decision was resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub success: bool,
    pub chance: f64,
    pub score_delta: f64,
    /// Message of the random event that fired, if any
    pub random_event: Option<String>,
    /// Automatic loan payment taken from capital
    pub loan_payment: i64,
    /// Achievements unlocked by this decision
    pub unlocked: Vec<Achievement>,
    pub terminal: Option<TerminalReason>,
}

/// Result of resolving one decision
#[derive(Debug, Clone)]
pub struct Resolution {
    pub state: GameState,
    pub outcome: DecisionOutcome,
    /// Scenario for the next round (already checked against `state`)
    pub next_scenario: Scenario,
}

/// Resolve `option` from `scenario` against `state`.
///
/// Callers check eligibility first; this function does not.
pub fn resolve<R: RandomSource + ?Sized>(
    option: &GameOption,
    state: &GameState,
    scenario: &Scenario,
    config: &TuningConfig,
    rng: &mut R,
) -> Resolution {
    let rc = &config.resolution;
    let mut next = state.clone();
    let tier = option.risk;

    // 1-2. Success roll
    let chance = success_chance(option, &state.resources, rc);
    let success = rng.next_unit() < chance;

    // 3. Score and history
    let score_delta = if success {
        option.impact
    } else {
        -option.impact * rc.failure_score_share
    };
    next.score += score_delta;
    next.decisions.push(DecisionRecord {
        scenario: scenario.question.clone(),
        decision: option.text.clone(),
        impact: score_delta,
        round: state.round,
        success,
    });

    // 4. Resource deltas
    let scale = difficulty_multiplier(state.difficulty, rc);
    let resources = &mut next.resources;

    let profit = if success {
        option.cost * rc.profit_multiplier.get(tier)
    } else {
        0.0
    };
    resources.adjust_capital(profit - option.cost);

    if success {
        resources.adjust_reputation(rc.reputation_gain.get(tier) * scale);
        resources.adjust_connections(rc.connections_gain.get(tier) * scale);
        resources.add_credit(rc.credit_gain.get(tier));
    } else {
        resources.adjust_reputation(-rc.reputation_loss.get(tier) * scale);
        resources.adjust_connections(-rc.connections_loss.get(tier) * scale);
        resources.add_credit(-rc.credit_loss.get(tier));
    }
    resources.adjust_stress(rc.stress_increase.get(tier) * scale);

    let drift = rng.next_unit() * rc.volatility_span + rc.volatility_offset;
    resources.adjust_volatility(drift * scale);

    // 5. Loan servicing
    let loan_payment = auto_payment(resources, &config.loans);

    // 6. Random side event
    let mut random_event = None;
    let spec = &scenario.random_event;
    if rng.next_unit() * 100.0 < spec.trigger && !spec.events.is_empty() {
        let event = &spec.events[rng.next_index(spec.events.len())];
        event.apply(resources);
        random_event = Some(event.message.clone());
    }

    // 7. Timed effects
    next.effects.tick();
    for name in &option.consequences.positive {
        next.effects.push(ActiveEffect::new(
            name.clone(),
            Polarity::Positive,
            rc.positive_effect_rounds,
            rc.positive_effect_value,
        ));
    }
    for name in &option.consequences.negative {
        next.effects.push(ActiveEffect::new(
            name.clone(),
            Polarity::Negative,
            rc.negative_effect_rounds,
            rc.negative_effect_value,
        ));
    }
    next.effects.apply(&mut next.resources);

    if let Some(message) = &random_event {
        next.log.add_event(
            EventType::RandomEvent {
                message: message.clone(),
            },
            state.round,
        );
    }

    // 8. Difficulty and the next scenario
    let next_difficulty = (state.difficulty + 1.0).floor();
    next.difficulty = state.difficulty + rc.difficulty_step;
    let next_scenario = generate_scenario(next_difficulty, &next.resources, &config.generation, rng);

    // 9. Terminal check
    let terminal = check_terminal(&next.resources, &next_scenario, &config.terminal);
    next.terminal = terminal;

    // 10. Achievements
    let mut unlocked = Vec::new();
    for achievement in
        qualifying_achievements(next.score, state.high_score, &next.resources, &config.achievements)
    {
        if next.unlock(achievement) {
            unlocked.push(achievement);
        }
    }
    next.high_score = next.high_score.max(next.score);
    next.can_laissez_faire = true;

    Resolution {
        state: next,
        outcome: DecisionOutcome {
            success,
            chance,
            score_delta,
            random_event,
            loan_payment,
            unlocked,
            terminal,
        },
        next_scenario,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedSource;
    use crate::core::types::RiskTier;
    use crate::game::resources::ResourceLevels;
    use crate::game::scenario::{Consequences, Requirements};

    fn option(risk: RiskTier, cost: f64) -> GameOption {
        GameOption {
            text: "Stable Development".into(),
            impact: 40.0,
            risk,
            cost,
            requirements: Requirements::default(),
            consequences: Consequences::default(),
        }
    }

    fn scenario(config: &TuningConfig, state: &GameState) -> Scenario {
        generate_scenario(1.0, &state.resources, &config.generation, &mut ScriptedSource::constant(0.0))
    }

    /// success, zero volatility drift, no random event, then generation draws
    fn quiet_success() -> ScriptedSource {
        ScriptedSource::new([0.0, 0.25, 0.99]).with_fallback(0.0)
    }

    fn quiet_failure() -> ScriptedSource {
        ScriptedSource::new([0.99, 0.25, 0.99]).with_fallback(0.0)
    }

    #[test]
    fn test_success_chance_base_rates() {
        let config = TuningConfig::default();
        let zero = ResourceState::from(ResourceLevels {
            capital: 0,
            reputation: 0,
            connections: 0,
            stress: 0,
            market_volatility: 0,
            credit: 700,
            loan_amount: 0,
            loan_interest: 0.05,
        });
        let rc = &config.resolution;
        assert!((success_chance(&option(RiskTier::High, 0.0), &zero, rc) - 0.45).abs() < 1e-9);
        assert!((success_chance(&option(RiskTier::Medium, 0.0), &zero, rc) - 0.55).abs() < 1e-9);
        assert!((success_chance(&option(RiskTier::Low, 0.0), &zero, rc) - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_success_chance_clamped() {
        let config = TuningConfig::default();
        let star = ResourceState::from(ResourceLevels {
            reputation: 80,
            ..ResourceLevels::from(&config.initial)
        });
        let wreck = ResourceState::from(ResourceLevels {
            stress: 100,
            market_volatility: 100,
            reputation: 0,
            connections: 0,
            ..ResourceLevels::from(&config.initial)
        });
        let rc = &config.resolution;
        assert_eq!(success_chance(&option(RiskTier::Low, 0.0), &star, rc), 0.8);
        assert_eq!(success_chance(&option(RiskTier::High, 0.0), &wreck, rc), 0.4);
    }

    #[test]
    fn test_conservative_success_nets_twenty_percent() {
        let config = TuningConfig::default();
        let state = GameState::new(&config);
        let scenario = scenario(&config, &state);
        let choice = option(RiskTier::Low, 4_000.0);

        let res = resolve(&choice, &state, &scenario, &config, &mut quiet_success());
        assert!(res.outcome.success);
        assert_eq!(res.state.resources.capital(), 10_800);
        assert_eq!(res.outcome.score_delta, 40.0);
        assert_eq!(res.state.score, 40.0);
        // scale = 1.03: reputation 5 + 1.03, connections 3 + 2.06, stress 4.12
        assert_eq!(res.state.resources.reputation(), 6);
        assert_eq!(res.state.resources.connections(), 5);
        assert_eq!(res.state.resources.stress(), 4);
        assert_eq!(res.state.resources.market_volatility(), 0);
        assert_eq!(res.state.resources.credit(), 710);
    }

    #[test]
    fn test_failure_costs_half_impact_and_full_cost() {
        let config = TuningConfig::default();
        let state = GameState::new(&config);
        let scenario = scenario(&config, &state);
        let choice = option(RiskTier::High, 2_000.0);

        let res = resolve(&choice, &state, &scenario, &config, &mut quiet_failure());
        assert!(!res.outcome.success);
        assert_eq!(res.outcome.score_delta, -20.0);
        assert_eq!(res.state.resources.capital(), 8_000);
        // 5 - 2 * 1.03 = 2.94
        assert_eq!(res.state.resources.reputation(), 2);
        assert_eq!(res.state.resources.connections(), 3);
        assert_eq!(res.state.resources.credit(), 690);
        assert_eq!(res.state.resources.stress(), 10);
    }

    #[test]
    fn test_volatility_drift_top_of_range() {
        let config = TuningConfig::default();
        let state = GameState::new(&config);
        let scenario = scenario(&config, &state);
        let mut rng = ScriptedSource::new([0.0, 0.999, 0.99]).with_fallback(0.0);
        let res = resolve(&option(RiskTier::Low, 4_000.0), &state, &scenario, &config, &mut rng);
        // (0.999 * 8 - 2) * 1.03 = 6.17
        assert_eq!(res.state.resources.market_volatility(), 6);
    }

    #[test]
    fn test_volatility_drift_offset_clamps_at_zero() {
        let config = TuningConfig::default();
        let mut state = GameState::new(&config);
        state.resources.set_volatility(1);
        let scenario = scenario(&config, &state);
        let mut rng = ScriptedSource::new([0.0, 0.0, 0.99]).with_fallback(0.0);
        let res = resolve(&option(RiskTier::Low, 4_000.0), &state, &scenario, &config, &mut rng);
        // 1 - 2 * 1.03 would be negative
        assert_eq!(res.state.resources.market_volatility(), 0);
    }

    #[test]
    fn test_input_state_untouched() {
        let config = TuningConfig::default();
        let state = GameState::new(&config);
        let scenario = scenario(&config, &state);
        let before = state.resources.clone();
        let _ = resolve(&option(RiskTier::Low, 4_000.0), &state, &scenario, &config, &mut quiet_success());
        assert_eq!(state.resources, before);
        assert!(state.decisions.is_empty());
    }

    #[test]
    fn test_history_records_round_and_texts() {
        let config = TuningConfig::default();
        let state = GameState::new(&config);
        let scenario = scenario(&config, &state);
        let res = resolve(&option(RiskTier::Low, 4_000.0), &state, &scenario, &config, &mut quiet_success());
        let record = &res.state.decisions[0];
        assert_eq!(record.round, 1);
        assert_eq!(record.scenario, scenario.question);
        assert_eq!(record.decision, "Stable Development");
    }

    #[test]
    fn test_random_event_applied_when_triggered() {
        let config = TuningConfig::default();
        let state = GameState::new(&config);
        let scenario = scenario(&config, &state);
        // success, zero drift, trigger, pick the crash (index 0)
        let mut rng = ScriptedSource::new([0.0, 0.25, 0.0, 0.0]).with_fallback(0.0);
        let res = resolve(&option(RiskTier::Low, 4_000.0), &state, &scenario, &config, &mut rng);
        // 10800 * 0.95
        assert_eq!(res.state.resources.capital(), 10_260);
        assert_eq!(
            res.outcome.random_event.as_deref(),
            Some("Market crash! All investments lose 5% value")
        );
        assert_eq!(res.state.log.random_event_messages().count(), 1);
    }

    #[test]
    fn test_consequences_become_effects_and_apply() {
        let config = TuningConfig::default();
        let state = GameState::new(&config);
        let scenario = scenario(&config, &state);
        let mut choice = option(RiskTier::Low, 4_000.0);
        choice.consequences = Consequences {
            positive: vec!["Improved market share".into()],
            negative: vec!["Regulatory scrutiny".into()],
        };
        let res = resolve(&choice, &state, &scenario, &config, &mut quiet_success());
        assert_eq!(res.state.effects.len(), 2);
        // 10800 * 1.02 = 11016, * 0.99 = 10905.84
        assert_eq!(res.state.resources.capital(), 10_905);
    }

    #[test]
    fn test_difficulty_grows_and_next_scenario_uses_next_round() {
        let config = TuningConfig::default();
        let state = GameState::new(&config);
        let scenario = scenario(&config, &state);
        let res = resolve(&option(RiskTier::Low, 4_000.0), &state, &scenario, &config, &mut quiet_success());
        assert!((res.state.difficulty - 1.2).abs() < 1e-9);
        assert!(res.next_scenario.question.starts_with("Round 2: "));
    }

    #[test]
    fn test_outstanding_loan_is_serviced() {
        let config = TuningConfig::default();
        let mut state = GameState::new(&config);
        state.resources.borrow(5_000);
        let scenario = scenario(&config, &state);
        let res = resolve(&option(RiskTier::Low, 4_000.0), &state, &scenario, &config, &mut quiet_success());
        // capital 15800 after the decision, 5% = 790
        assert_eq!(res.outcome.loan_payment, 790);
        assert_eq!(res.state.resources.loan_amount(), 4_210);
        assert_eq!(res.state.resources.capital(), 15_010);
        assert_eq!(res.state.resources.credit(), 720);
    }

    #[test]
    fn test_deep_loss_is_terminal() {
        let config = TuningConfig::default();
        let mut state = GameState::new(&config);
        state.resources.set_capital(1_000);
        let scenario = scenario(&config, &state);
        let res = resolve(&option(RiskTier::High, 4_000.0), &state, &scenario, &config, &mut quiet_failure());
        assert_eq!(res.state.resources.capital(), -3_000);
        assert_eq!(res.outcome.terminal, Some(TerminalReason::Bankruptcy));
        assert_eq!(res.state.terminal, Some(TerminalReason::Bankruptcy));
    }

    #[test]
    fn test_achievements_unlock_once() {
        let config = TuningConfig::default();
        let state = GameState::new(&config);
        let scenario = scenario(&config, &state);
        let first = resolve(&option(RiskTier::Low, 4_000.0), &state, &scenario, &config, &mut quiet_success());
        assert!(first.outcome.unlocked.contains(&Achievement::NewHighScore));
        assert!(first.outcome.unlocked.contains(&Achievement::StressMaster));
        assert_eq!(first.state.high_score, 40.0);

        let second = resolve(
            &option(RiskTier::Low, 4_000.0),
            &first.state,
            &first.next_scenario,
            &config,
            &mut quiet_success(),
        );
        assert!(!second.outcome.unlocked.contains(&Achievement::StressMaster));
        assert_eq!(
            second
                .state
                .achievements
                .iter()
                .filter(|a| **a == Achievement::StressMaster)
                .count(),
            1
        );
    }
}
