//! The game-state aggregate

use serde::{Deserialize, Serialize};

use crate::core::config::TuningConfig;
use crate::core::types::Round;
use crate::game::effects::EffectLedger;
use crate::game::events::EventLog;
use crate::game::resources::ResourceState;
use crate::game::systems::{Achievement, TerminalReason};

/// One resolved decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub scenario: String,
    pub decision: String,
    /// Score change the decision produced
    pub impact: f64,
    pub round: Round,
    pub success: bool,
}

/// Everything that survives between commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub round: Round,
    pub score: f64,
    /// Best score seen this session, kept across resets
    pub high_score: f64,
    pub decisions: Vec<DecisionRecord>,
    pub resources: ResourceState,
    pub effects: EffectLedger,
    /// Unlocked achievements in unlock order, each at most once
    pub achievements: Vec<Achievement>,
    pub difficulty: f64,
    /// Set while the game is in (or has ended in) a terminal condition
    pub terminal: Option<TerminalReason>,
    /// Laissez-faire is usable once per round
    pub can_laissez_faire: bool,
    pub log: EventLog,
}

impl GameState {
    pub fn new(config: &TuningConfig) -> Self {
        Self {
            round: 1,
            score: 0.0,
            high_score: 0.0,
            decisions: Vec::new(),
            resources: ResourceState::initial(&config.initial),
            effects: EffectLedger::new(),
            achievements: Vec::new(),
            difficulty: config.initial.difficulty,
            terminal: None,
            can_laissez_faire: true,
            log: EventLog::new(),
        }
    }

    /// Fresh state that keeps the running high score
    pub fn reset(&self, config: &TuningConfig) -> Self {
        Self {
            high_score: self.high_score,
            ..Self::new(config)
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.terminal.is_some()
    }

    /// Record an achievement. Returns false if it was already unlocked.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.achievements.contains(&achievement) {
            return false;
        }
        self.achievements.push(achievement);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_at_round_one() {
        let state = GameState::new(&TuningConfig::default());
        assert_eq!(state.round, 1);
        assert_eq!(state.difficulty, 1.0);
        assert!(!state.is_game_over());
        assert!(state.can_laissez_faire);
    }

    #[test]
    fn test_unlock_is_one_shot() {
        let mut state = GameState::new(&TuningConfig::default());
        assert!(state.unlock(Achievement::StressMaster));
        assert!(!state.unlock(Achievement::StressMaster));
        assert_eq!(state.achievements.len(), 1);
    }

    #[test]
    fn test_reset_keeps_high_score_only() {
        let config = TuningConfig::default();
        let mut state = GameState::new(&config);
        state.score = 120.0;
        state.high_score = 150.0;
        state.round = 7;
        state.resources.add_capital(-9_000);
        state.unlock(Achievement::CreditMaster);

        let fresh = state.reset(&config);
        assert_eq!(fresh.high_score, 150.0);
        assert_eq!(fresh.score, 0.0);
        assert_eq!(fresh.round, 1);
        assert_eq!(fresh.resources.capital(), 10_000);
        assert!(fresh.achievements.is_empty());
    }
}
