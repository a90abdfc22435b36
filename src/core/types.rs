//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Round counter (1-based)
pub type Round = u32;

/// Risk tier of an option. Each tier corresponds to one option archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// Generation order of options within a scenario
    pub const ALL: [RiskTier; 3] = [RiskTier::High, RiskTier::Medium, RiskTier::Low];

    /// Archetype name shown for this tier
    pub fn archetype(&self) -> &'static str {
        match self {
            Self::High => "aggressive",
            Self::Medium => "balanced",
            Self::Low => "conservative",
        }
    }
}

/// Direction of a consequence or timed effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

/// Categorical tag of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Market,
    Crisis,
    Opportunity,
    Challenge,
    Innovation,
    Competition,
    Regulation,
    Partnership,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 8] = [
        ScenarioKind::Market,
        ScenarioKind::Crisis,
        ScenarioKind::Opportunity,
        ScenarioKind::Challenge,
        ScenarioKind::Innovation,
        ScenarioKind::Competition,
        ScenarioKind::Regulation,
        ScenarioKind::Partnership,
    ];
}
