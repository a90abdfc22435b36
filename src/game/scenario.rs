//! Scenarios and the options they offer

use serde::{Deserialize, Serialize};

use crate::core::types::{Polarity, RiskTier, ScenarioKind};
use crate::game::resources::ResourceState;

/// Minimum resources needed to pick an option. Unset fields impose nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    pub capital: Option<f64>,
    pub reputation: Option<i32>,
    pub connections: Option<i32>,
}

impl Requirements {
    pub fn met_by(&self, resources: &ResourceState) -> bool {
        self.capital.map_or(true, |c| resources.capital() as f64 >= c)
            && self.reputation.map_or(true, |r| resources.reputation() >= r)
            && self.connections.map_or(true, |c| resources.connections() >= c)
    }
}

/// Named effect labels attached to an option
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Consequences {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// One selectable action within a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOption {
    pub text: String,
    /// Expected score effect
    pub impact: f64,
    pub risk: RiskTier,
    pub cost: f64,
    pub requirements: Requirements,
    pub consequences: Consequences,
}

impl GameOption {
    pub fn is_eligible(&self, resources: &ResourceState) -> bool {
        self.requirements.met_by(resources)
    }
}

/// Side effect applied when a random event fires
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EventEffect {
    /// Fractional capital change (0.03 = +3%)
    pub capital: Option<f64>,
    pub reputation: Option<i32>,
    pub connections: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomEvent {
    pub polarity: Polarity,
    pub message: String,
    pub effect: EventEffect,
}

impl RandomEvent {
    pub fn apply(&self, resources: &mut ResourceState) {
        if let Some(share) = self.effect.capital {
            resources.scale_capital(1.0 + share);
        }
        if let Some(delta) = self.effect.reputation {
            resources.add_reputation(delta);
        }
        if let Some(delta) = self.effect.connections {
            resources.add_connections(delta);
        }
    }
}

/// Chance (in percent) that one of `events` fires after a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomEventSpec {
    pub trigger: f64,
    pub events: Vec<RandomEvent>,
}

/// A generated decision point with exactly three options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub question: String,
    pub kind: ScenarioKind,
    /// Adjusted difficulty the scenario was generated at
    pub difficulty: f64,
    /// Ordered aggressive, balanced, conservative
    pub options: [GameOption; 3],
    pub random_event: RandomEventSpec,
}

impl Scenario {
    pub fn option(&self, index: usize) -> Option<&GameOption> {
        self.options.get(index)
    }

    pub fn has_eligible_option(&self, resources: &ResourceState) -> bool {
        self.options.iter().any(|o| o.is_eligible(resources))
    }

    pub fn eligible_options<'a>(
        &'a self,
        resources: &'a ResourceState,
    ) -> impl Iterator<Item = (usize, &'a GameOption)> + 'a {
        self.options
            .iter()
            .enumerate()
            .filter(move |(_, o)| o.is_eligible(resources))
    }
}
