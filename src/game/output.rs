//! Session summary and serialization

use serde::{Deserialize, Serialize};

use crate::core::types::Round;
use crate::game::events::Event;
use crate::game::resources::ResourceLevels;
use crate::game::state::{DecisionRecord, GameState};
use crate::game::systems::{Achievement, TerminalReason};

/// Snapshot of a session for reporting
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub round: Round,
    pub score: f64,
    pub high_score: f64,
    pub difficulty: f64,
    pub resources: ResourceLevels,
    pub achievements: Vec<Achievement>,
    pub terminal: Option<TerminalReason>,
    pub statistics: SessionStats,
    pub decisions: Vec<DecisionRecord>,
    pub events: Vec<Event>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub decisions_made: u32,
    pub successes: u32,
    pub failures: u32,
    pub success_rate: f64,
    pub random_events: u32,
    pub active_effects: u32,
}

impl SessionSummary {
    pub fn from_state(state: &GameState) -> Self {
        let decisions_made = state.decisions.len() as u32;
        let successes = state.decisions.iter().filter(|d| d.success).count() as u32;
        let success_rate = if decisions_made == 0 {
            0.0
        } else {
            successes as f64 / decisions_made as f64
        };

        Self {
            round: state.round,
            score: state.score,
            high_score: state.high_score,
            difficulty: state.difficulty,
            resources: state.resources.levels(),
            achievements: state.achievements.clone(),
            terminal: state.terminal,
            statistics: SessionStats {
                decisions_made,
                successes,
                failures: decisions_made - successes,
                success_rate,
                random_events: state.log.random_event_messages().count() as u32,
                active_effects: state.effects.len() as u32,
            },
            decisions: state.decisions.clone(),
            events: state.log.events.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let outcome = match self.terminal {
            Some(reason) => reason.label(),
            None => "In progress",
        };
        format!(
            "Round {} | score {:.1} (best {:.1}) | {}\n{} decisions, {} succeeded, {} random events | capital {}",
            self.round,
            self.score,
            self.high_score,
            outcome,
            self.statistics.decisions_made,
            self.statistics.successes,
            self.statistics.random_events,
            self.resources.capital,
        )
    }
}
