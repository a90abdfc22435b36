//! Game tuning configuration
//!
//! Every balance number used by scenario generation, decision resolution,
//! loans, emergency actions and game-over detection is collected here so a
//! balance pass never has to touch system code. All sections deserialize with
//! defaults, so a TOML file only needs to name the values it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{BoardroomError, Result};
use crate::core::types::RiskTier;

/// One value per risk tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerTier<T> {
    pub high: T,
    pub medium: T,
    pub low: T,
}

impl<T: Copy> PerTier<T> {
    pub const fn new(high: T, medium: T, low: T) -> Self {
        Self { high, medium, low }
    }

    pub fn get(&self, tier: RiskTier) -> T {
        match tier {
            RiskTier::High => self.high,
            RiskTier::Medium => self.medium,
            RiskTier::Low => self.low,
        }
    }
}

/// Resources and difficulty a fresh game starts with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConfig {
    pub capital: i64,
    pub reputation: i32,
    pub connections: i32,
    pub stress: i32,
    pub market_volatility: i32,
    pub credit: i32,
    pub loan_amount: i64,
    pub loan_interest: f64,
    pub difficulty: f64,
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            capital: 10_000,
            reputation: 5,
            connections: 3,
            stress: 0,
            market_volatility: 0,
            credit: 700,
            loan_amount: 0,
            loan_interest: 0.05,
            difficulty: 1.0,
        }
    }
}

/// Multipliers for one option archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierGeneration {
    /// Option cost as a multiple of the scenario base cost
    pub cost: f64,
    /// Option impact as a multiple of the scenario base impact
    pub impact: f64,
    /// Capital requirement as a multiple of the base cost
    pub capital_requirement: f64,
    /// Reputation requirement as a multiple of adjusted difficulty (ceil'd)
    pub reputation_requirement: f64,
    /// Connections requirement as a multiple of adjusted difficulty (ceil'd)
    pub connections_requirement: f64,
    /// Consequence labels drawn per polarity
    pub consequences: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Normalisers for the resource multiplier. Each resource is divided by
    /// its normaliser, the results summed and scaled by `resource_weight`.
    pub capital_norm: f64,
    pub reputation_norm: f64,
    pub connections_norm: f64,
    pub credit_norm: f64,
    pub resource_weight: f64,

    /// Cap on `difficulty * resource_multiplier`
    pub max_difficulty: f64,
    pub base_cost: f64,
    pub base_impact: f64,

    /// Random-event trigger chance in percent: `base + adjusted * per_difficulty`
    pub event_trigger_base: f64,
    pub event_trigger_per_difficulty: f64,

    pub tiers: PerTier<TierGeneration>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            capital_norm: 20_000.0,
            reputation_norm: 20.0,
            connections_norm: 10.0,
            credit_norm: 2_000.0,
            resource_weight: 0.1,
            max_difficulty: 5.0,
            base_cost: 4_000.0,
            base_impact: 40.0,
            event_trigger_base: 40.0,
            event_trigger_per_difficulty: 5.0,
            tiers: PerTier::new(
                TierGeneration {
                    cost: 1.5,
                    impact: 1.3,
                    capital_requirement: 2.0,
                    reputation_requirement: 0.8,
                    connections_requirement: 0.6,
                    consequences: 2,
                },
                TierGeneration {
                    cost: 1.2,
                    impact: 1.1,
                    capital_requirement: 1.5,
                    reputation_requirement: 0.6,
                    connections_requirement: 0.4,
                    consequences: 1,
                },
                TierGeneration {
                    cost: 1.0,
                    impact: 1.0,
                    capital_requirement: 1.0,
                    reputation_requirement: 0.4,
                    connections_requirement: 0.3,
                    consequences: 1,
                },
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    // === SUCCESS CHANCE ===
    pub base_success: PerTier<f64>,
    pub reputation_bonus: f64,
    pub connections_bonus: f64,
    pub stress_penalty: f64,
    pub volatility_penalty: f64,
    pub min_success: f64,
    pub max_success: f64,

    /// Score lost on failure as a share of the option impact
    pub failure_score_share: f64,

    /// Resource deltas are scaled by `1 + difficulty * difficulty_scaling`
    pub difficulty_scaling: f64,

    // === RESOURCE DELTAS ===
    pub stress_increase: PerTier<f64>,
    pub reputation_gain: PerTier<f64>,
    pub reputation_loss: PerTier<f64>,
    pub connections_gain: PerTier<f64>,
    pub connections_loss: PerTier<f64>,
    pub credit_gain: PerTier<i32>,
    pub credit_loss: PerTier<i32>,
    /// Capital returned on success as a multiple of the option cost
    pub profit_multiplier: PerTier<f64>,
    /// Volatility drift is `draw * span + offset`, scaled by difficulty
    pub volatility_span: f64,
    pub volatility_offset: f64,

    /// Difficulty added per resolved decision
    pub difficulty_step: f64,

    // === TIMED EFFECTS ===
    pub positive_effect_rounds: u32,
    pub positive_effect_value: f64,
    pub negative_effect_rounds: u32,
    pub negative_effect_value: f64,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            base_success: PerTier::new(0.45, 0.55, 0.65),
            reputation_bonus: 0.01,
            connections_bonus: 0.005,
            stress_penalty: 0.002,
            volatility_penalty: 0.001,
            min_success: 0.4,
            max_success: 0.8,
            failure_score_share: 0.5,
            difficulty_scaling: 0.03,
            stress_increase: PerTier::new(10.0, 7.0, 4.0),
            reputation_gain: PerTier::new(3.0, 2.0, 1.0),
            reputation_loss: PerTier::new(2.0, 1.0, 0.5),
            connections_gain: PerTier::new(1.0, 1.0, 2.0),
            connections_loss: PerTier::new(0.0, 0.0, 1.0),
            credit_gain: PerTier::new(5, 7, 10),
            credit_loss: PerTier::new(10, 7, 5),
            profit_multiplier: PerTier::new(1.5, 1.3, 1.2),
            volatility_span: 8.0,
            volatility_offset: -2.0,
            difficulty_step: 0.2,
            positive_effect_rounds: 4,
            positive_effect_value: 0.02,
            negative_effect_rounds: 2,
            negative_effect_value: -0.01,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanConfig {
    /// Ceiling is `capital * ceiling_multiple * (credit / credit_reference)`
    pub ceiling_multiple: f64,
    pub credit_reference: f64,
    /// Interest is `base_interest + (1 - credit / 1000) * interest_spread`
    pub base_interest: f64,
    pub interest_spread: f64,
    /// Share of capital paid toward the loan after each decision
    pub auto_payment_share: f64,
    /// Auto-payment earns credit when it covers this share of the remaining loan
    pub auto_payment_threshold: f64,
    pub auto_payment_credit: i32,
    /// Manual repayment of at least this share of the loan earns the larger bonus
    pub large_repayment_share: f64,
    pub large_repayment_credit: i32,
    pub small_repayment_credit: i32,
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            ceiling_multiple: 2.0,
            credit_reference: 700.0,
            base_interest: 0.05,
            interest_spread: 0.1,
            auto_payment_share: 0.05,
            auto_payment_threshold: 0.05,
            auto_payment_credit: 10,
            large_repayment_share: 0.1,
            large_repayment_credit: 10,
            small_repayment_credit: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PassActionConfig {
    pub laissez_faire_stress: i32,
    pub laissez_faire_volatility: i32,
    pub stabilize_volatility: i32,
    pub stabilize_stress: i32,
}

impl Default for PassActionConfig {
    fn default() -> Self {
        Self {
            laissez_faire_stress: -30,
            laissez_faire_volatility: 10,
            stabilize_volatility: -20,
            stabilize_stress: 10,
        }
    }
}

/// Additive resource shift plus a lasting capital penalty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftTerms {
    pub capital: i64,
    pub reputation: i32,
    pub connections: i32,
    pub stress: i32,
    pub volatility: i32,
    pub effect_rounds: u32,
    pub effect_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmergencyLoanTerms {
    /// Loan size as a multiple of current capital
    pub capital_multiple: f64,
    pub interest: f64,
    pub stress: i32,
    pub credit: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetSaleTerms {
    /// Proceeds as a share of current capital
    pub capital_share: f64,
    pub reputation: i32,
    pub stress: i32,
    pub volatility: i32,
}

/// Bankruptcy overwrites most resources instead of shifting them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BankruptcyTerms {
    pub capital: i64,
    pub reputation: i32,
    pub connections: i32,
    pub stress: i32,
    pub volatility: i32,
    pub credit: i32,
    pub loan_interest: f64,
    pub effect_rounds: u32,
    pub effect_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LastResortConfig {
    pub emergency_loan: EmergencyLoanTerms,
    pub asset_sale: AssetSaleTerms,
    pub restructuring: ShiftTerms,
    pub merger: ShiftTerms,
    pub bankruptcy: BankruptcyTerms,
    pub hostile_takeover: ShiftTerms,
}

impl Default for LastResortConfig {
    fn default() -> Self {
        Self {
            emergency_loan: EmergencyLoanTerms {
                capital_multiple: 3.0,
                interest: 0.15,
                stress: 20,
                credit: -100,
            },
            asset_sale: AssetSaleTerms {
                capital_share: 0.5,
                reputation: -2,
                stress: 15,
                volatility: 15,
            },
            restructuring: ShiftTerms {
                capital: -1_000,
                reputation: -3,
                connections: -2,
                stress: 25,
                volatility: 20,
                effect_rounds: 3,
                effect_value: -0.1,
            },
            merger: ShiftTerms {
                capital: 10_000,
                reputation: -4,
                connections: -3,
                stress: 30,
                volatility: 25,
                effect_rounds: 5,
                effect_value: -0.15,
            },
            bankruptcy: BankruptcyTerms {
                capital: 2_000,
                reputation: -5,
                connections: -4,
                stress: 50,
                volatility: 50,
                credit: 300,
                loan_interest: 0.05,
                effect_rounds: 8,
                effect_value: -0.2,
            },
            hostile_takeover: ShiftTerms {
                capital: 15_000,
                reputation: -6,
                connections: -5,
                stress: 40,
                volatility: 35,
                effect_rounds: 10,
                effect_value: -0.25,
            },
        }
    }
}

/// Thresholds that end the game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Bankrupt when capital drops strictly below this
    pub bankruptcy_capital: i64,
    /// Overwhelmed when stress reaches this
    pub stress_limit: i32,
    /// Market collapse when volatility exceeds this
    pub volatility_limit: i32,
    /// Credit crisis when credit drops strictly below this
    pub credit_floor: i32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            bankruptcy_capital: -2_000,
            stress_limit: 100,
            volatility_limit: 95,
            credit_floor: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementConfig {
    pub capital_above: i64,
    pub reputation_above: i32,
    pub stress_below: i32,
    pub credit_above: i32,
}

impl Default for AchievementConfig {
    fn default() -> Self {
        Self {
            capital_above: 20_000,
            reputation_above: 20,
            stress_below: 20,
            credit_above: 900,
        }
    }
}

/// Complete tuning table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub initial: InitialConfig,
    pub generation: GenerationConfig,
    pub resolution: ResolutionConfig,
    pub loans: LoanConfig,
    pub pass_actions: PassActionConfig,
    pub last_resort: LastResortConfig,
    pub terminal: TerminalConfig,
    pub achievements: AchievementConfig,
}

impl TuningConfig {
    /// Load and validate a tuning table from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: TuningConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let r = &self.resolution;
        if !(0.0..=1.0).contains(&r.min_success)
            || !(0.0..=1.0).contains(&r.max_success)
            || r.min_success > r.max_success
        {
            return Err(invalid(format!(
                "success bounds must satisfy 0 <= min ({}) <= max ({}) <= 1",
                r.min_success, r.max_success
            )));
        }

        for tier in RiskTier::ALL {
            let base = r.base_success.get(tier);
            if !(0.0..=1.0).contains(&base) {
                return Err(invalid(format!(
                    "base success for {} tier ({}) must be a probability",
                    tier.archetype(),
                    base
                )));
            }
            if r.profit_multiplier.get(tier) < 0.0 {
                return Err(invalid(format!(
                    "profit multiplier for {} tier must not be negative",
                    tier.archetype()
                )));
            }
        }

        if r.positive_effect_rounds == 0 || r.negative_effect_rounds == 0 {
            return Err(invalid("timed effects must last at least one round".into()));
        }

        let g = &self.generation;
        if g.max_difficulty <= 0.0 || g.base_cost <= 0.0 {
            return Err(invalid("max_difficulty and base_cost must be positive".into()));
        }
        let norms = [g.capital_norm, g.reputation_norm, g.connections_norm, g.credit_norm];
        if norms.iter().any(|n| *n <= 0.0) {
            return Err(invalid("resource normalisers must be positive".into()));
        }

        if self.loans.credit_reference <= 0.0 {
            return Err(invalid("loans.credit_reference must be positive".into()));
        }

        let init = &self.initial;
        if init.difficulty < 1.0 {
            return Err(invalid(format!(
                "initial difficulty ({}) must be at least 1",
                init.difficulty
            )));
        }
        if init.reputation < 0 || init.connections < 0 || init.loan_amount < 0 {
            return Err(invalid(
                "initial reputation, connections and loan must not be negative".into(),
            ));
        }

        Ok(())
    }
}

fn invalid(msg: String) -> BoardroomError {
    BoardroomError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TuningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides_only_named_values() {
        let toml = r#"
            [initial]
            capital = 25000

            [resolution]
            difficulty_step = 0.5
        "#;
        let config = TuningConfig::from_toml(toml).expect("partial config should parse");
        assert_eq!(config.initial.capital, 25_000);
        assert_eq!(config.initial.credit, 700);
        assert_eq!(config.resolution.difficulty_step, 0.5);
        assert_eq!(config.resolution.min_success, 0.4);
    }

    #[test]
    fn test_inverted_success_bounds_rejected() {
        let mut config = TuningConfig::default();
        config.resolution.min_success = 0.9;
        config.resolution.max_success = 0.5;
        assert!(matches!(
            config.validate(),
            Err(BoardroomError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = TuningConfig::from_toml("[initial\ncapital = ");
        assert!(matches!(result, Err(BoardroomError::TomlError(_))));
    }

    #[test]
    fn test_load_shipped_tuning_file() {
        let config = TuningConfig::load(Path::new("data/tuning.toml"))
            .expect("shipped tuning file should load");
        let defaults = TuningConfig::default();
        assert_eq!(config.initial.capital, defaults.initial.capital);
        assert_eq!(config.terminal.bankruptcy_capital, defaults.terminal.bankruptcy_capital);
        assert_eq!(
            config.generation.tiers.high.consequences,
            defaults.generation.tiers.high.consequences
        );
    }

    #[test]
    fn test_per_tier_lookup() {
        let table = PerTier::new(1, 2, 3);
        assert_eq!(table.get(RiskTier::High), 1);
        assert_eq!(table.get(RiskTier::Medium), 2);
        assert_eq!(table.get(RiskTier::Low), 3);
    }
}
