//! Scenario generation

use crate::core::config::GenerationConfig;
use crate::core::random::RandomSource;
use crate::core::types::{Polarity, RiskTier, ScenarioKind};
use crate::game::catalog;
use crate::game::resources::ResourceState;
use crate::game::scenario::{
    Consequences, GameOption, RandomEventSpec, Requirements, Scenario,
};

/// Scaling factor that makes richer companies face harder scenarios
pub fn resource_multiplier(resources: &ResourceState, config: &GenerationConfig) -> f64 {
    let weighted = resources.capital() as f64 / config.capital_norm
        + resources.reputation() as f64 / config.reputation_norm
        + resources.connections() as f64 / config.connections_norm
        + resources.credit() as f64 / config.credit_norm;
    1.0 + weighted * config.resource_weight
}

/// `min(difficulty * resource_multiplier, max_difficulty)`
pub fn adjusted_difficulty(
    difficulty: f64,
    resources: &ResourceState,
    config: &GenerationConfig,
) -> f64 {
    (difficulty * resource_multiplier(resources, config)).min(config.max_difficulty)
}

/// Generate the next decision point.
///
/// Draw order: tag, question, then for each option in tier order its text,
/// positive labels and negative labels.
pub fn generate_scenario<R: RandomSource + ?Sized>(
    difficulty: f64,
    resources: &ResourceState,
    config: &GenerationConfig,
    rng: &mut R,
) -> Scenario {
    let adjusted = adjusted_difficulty(difficulty, resources, config);
    let base_cost = config.base_cost * adjusted;
    let base_impact = config.base_impact * adjusted;

    let kind = ScenarioKind::ALL[rng.next_index(ScenarioKind::ALL.len())];
    let pool = catalog::questions(kind);
    let title = pool[rng.next_index(pool.len())];

    let options = RiskTier::ALL.map(|tier| build_option(tier, adjusted, base_cost, base_impact, config, rng));

    tracing::trace!(?kind, adjusted, base_cost, "generated scenario");

    Scenario {
        question: format!("Round {}: {}", difficulty.floor() as i64, title),
        kind,
        difficulty: adjusted,
        options,
        random_event: RandomEventSpec {
            trigger: config.event_trigger_base + adjusted * config.event_trigger_per_difficulty,
            events: catalog::random_events(),
        },
    }
}

fn build_option<R: RandomSource + ?Sized>(
    tier: RiskTier,
    adjusted: f64,
    base_cost: f64,
    base_impact: f64,
    config: &GenerationConfig,
    rng: &mut R,
) -> GameOption {
    let terms = config.tiers.get(tier);
    let texts = catalog::option_texts(tier);
    let text = texts[rng.next_index(texts.len())].to_string();

    let positive = sample_labels(catalog::consequences(Polarity::Positive), terms.consequences, rng);
    let negative = sample_labels(catalog::consequences(Polarity::Negative), terms.consequences, rng);

    GameOption {
        text,
        impact: base_impact * terms.impact,
        risk: tier,
        cost: base_cost * terms.cost,
        requirements: Requirements {
            capital: Some(base_cost * terms.capital_requirement),
            reputation: Some((adjusted * terms.reputation_requirement).ceil() as i32),
            connections: Some((adjusted * terms.connections_requirement).ceil() as i32),
        },
        consequences: Consequences { positive, negative },
    }
}

/// Draw `count` distinct labels (partial Fisher-Yates)
fn sample_labels<R: RandomSource + ?Sized>(
    pool: &[&'static str],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut remaining: Vec<&str> = pool.to_vec();
    let take = count.min(remaining.len());
    let mut picked = Vec::with_capacity(take);
    for _ in 0..take {
        let idx = rng.next_index(remaining.len());
        picked.push(remaining.swap_remove(idx).to_string());
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{InitialConfig, TuningConfig};
    use crate::core::random::ScriptedSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn initial() -> ResourceState {
        ResourceState::initial(&InitialConfig::default())
    }

    #[test]
    fn test_resource_multiplier_at_start() {
        let config = TuningConfig::default();
        // 1 + (0.5 + 0.25 + 0.3 + 0.35) * 0.1
        let m = resource_multiplier(&initial(), &config.generation);
        assert!((m - 1.14).abs() < 1e-9);
    }

    #[test]
    fn test_adjusted_difficulty_capped() {
        let config = TuningConfig::default();
        assert_eq!(adjusted_difficulty(10.0, &initial(), &config.generation), 5.0);
    }

    #[test]
    fn test_options_follow_tier_multipliers() {
        let config = TuningConfig::default();
        let mut rng = ScriptedSource::constant(0.0);
        let scenario = generate_scenario(1.0, &initial(), &config.generation, &mut rng);

        let adjusted = scenario.difficulty;
        let base_cost = 4_000.0 * adjusted;
        let [aggressive, balanced, conservative] = &scenario.options;

        assert_eq!(aggressive.risk, RiskTier::High);
        assert!((aggressive.cost - base_cost * 1.5).abs() < 1e-6);
        assert!((balanced.cost - base_cost * 1.2).abs() < 1e-6);
        assert!((conservative.cost - base_cost).abs() < 1e-6);
        assert!((aggressive.impact - 40.0 * adjusted * 1.3).abs() < 1e-6);
        assert_eq!(aggressive.requirements.reputation, Some((adjusted * 0.8).ceil() as i32));
        assert_eq!(conservative.requirements.connections, Some((adjusted * 0.3).ceil() as i32));
        assert_eq!(conservative.requirements.capital, Some(base_cost));
    }

    #[test]
    fn test_consequence_counts_per_tier() {
        let config = TuningConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let scenario = generate_scenario(2.0, &initial(), &config.generation, &mut rng);
        let counts: Vec<_> = scenario
            .options
            .iter()
            .map(|o| (o.consequences.positive.len(), o.consequences.negative.len()))
            .collect();
        assert_eq!(counts, vec![(2, 2), (1, 1), (1, 1)]);

        let aggressive = &scenario.options[0].consequences.positive;
        assert_ne!(aggressive[0], aggressive[1], "drawn without replacement");
    }

    #[test]
    fn test_question_prefix_and_tag_pool() {
        let config = TuningConfig::default();
        let mut rng = ScriptedSource::constant(0.0);
        let scenario = generate_scenario(2.6, &initial(), &config.generation, &mut rng);
        assert_eq!(scenario.kind, ScenarioKind::Market);
        assert_eq!(scenario.question, "Round 2: Market Volatility Crisis");
    }

    #[test]
    fn test_random_event_trigger_scales_with_difficulty() {
        let config = TuningConfig::default();
        let mut rng = ScriptedSource::constant(0.5);
        let scenario = generate_scenario(1.0, &initial(), &config.generation, &mut rng);
        let expected = 40.0 + scenario.difficulty * 5.0;
        assert!((scenario.random_event.trigger - expected).abs() < 1e-9);
        assert_eq!(scenario.random_event.events.len(), 4);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let config = TuningConfig::default();
        let a = generate_scenario(3.0, &initial(), &config.generation, &mut ChaCha8Rng::seed_from_u64(99));
        let b = generate_scenario(3.0, &initial(), &config.generation, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
