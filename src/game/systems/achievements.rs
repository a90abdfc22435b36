//! Achievement unlocks checked after every decision

use serde::{Deserialize, Serialize};

use crate::core::config::AchievementConfig;
use crate::game::resources::ResourceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    NewHighScore,
    CapitalMaster,
    IndustryLeader,
    StressMaster,
    CreditMaster,
}

impl Achievement {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NewHighScore => "New High Score!",
            Self::CapitalMaster => "Capital Master",
            Self::IndustryLeader => "Industry Leader",
            Self::StressMaster => "Stress Master",
            Self::CreditMaster => "Credit Master",
        }
    }
}

/// Every achievement whose condition currently holds.
///
/// `previous_high` is the high score before this decision was scored.
pub fn qualifying_achievements(
    score: f64,
    previous_high: f64,
    resources: &ResourceState,
    config: &AchievementConfig,
) -> Vec<Achievement> {
    let mut earned = Vec::new();
    if score > previous_high {
        earned.push(Achievement::NewHighScore);
    }
    if resources.capital() > config.capital_above {
        earned.push(Achievement::CapitalMaster);
    }
    if resources.reputation() > config.reputation_above {
        earned.push(Achievement::IndustryLeader);
    }
    if resources.stress() < config.stress_below {
        earned.push(Achievement::StressMaster);
    }
    if resources.credit() > config.credit_above {
        earned.push(Achievement::CreditMaster);
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{InitialConfig, TuningConfig};
    use crate::game::resources::ResourceLevels;

    #[test]
    fn test_fresh_company_is_only_stress_master() {
        let config = TuningConfig::default();
        let r = ResourceState::initial(&InitialConfig::default());
        assert_eq!(
            qualifying_achievements(0.0, 0.0, &r, &config.achievements),
            vec![Achievement::StressMaster]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let config = TuningConfig::default();
        let mut raw = ResourceLevels::from(&InitialConfig::default());
        raw.capital = 20_000;
        raw.reputation = 21;
        raw.stress = 20;
        raw.credit = 901;
        let r = ResourceState::from(raw);
        assert_eq!(
            qualifying_achievements(50.0, 10.0, &r, &config.achievements),
            vec![
                Achievement::NewHighScore,
                Achievement::IndustryLeader,
                Achievement::CreditMaster
            ]
        );
    }
}
