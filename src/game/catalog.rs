//! Fixed text pools and random-event definitions

use crate::core::types::{Polarity, RiskTier, ScenarioKind};
use crate::game::scenario::{EventEffect, RandomEvent};

/// Canned question titles for a scenario tag
pub fn questions(kind: ScenarioKind) -> &'static [&'static str] {
    match kind {
        ScenarioKind::Market => &[
            "Market Volatility Crisis",
            "Emerging Market Opportunity",
            "Market Share Battle",
            "Market Disruption Threat",
        ],
        ScenarioKind::Crisis => &[
            "Financial Crisis Management",
            "Supply Chain Disruption",
            "Competitive Threat Response",
            "Regulatory Compliance Crisis",
        ],
        ScenarioKind::Opportunity => &[
            "Global Expansion Opportunity",
            "Strategic Partnership Chance",
            "Innovation Investment Window",
            "Market Entry Opportunity",
        ],
        ScenarioKind::Challenge => &[
            "Technology Disruption Challenge",
            "Regulatory Compliance Challenge",
            "Talent Acquisition Challenge",
            "Resource Management Challenge",
        ],
        ScenarioKind::Innovation => &[
            "R&D Investment Decision",
            "Product Innovation Opportunity",
            "Technology Adoption Challenge",
            "Innovation Strategy Pivot",
        ],
        ScenarioKind::Competition => &[
            "Competitive Response Strategy",
            "Market Share Defense",
            "Competitive Advantage Building",
            "Industry Leadership Battle",
        ],
        ScenarioKind::Regulation => &[
            "Regulatory Compliance Strategy",
            "Policy Change Adaptation",
            "Legal Framework Challenge",
            "Compliance Risk Management",
        ],
        ScenarioKind::Partnership => &[
            "Strategic Alliance Opportunity",
            "Joint Venture Decision",
            "Partnership Negotiation",
            "Collaboration Strategy",
        ],
    }
}

/// Option labels for an archetype
pub fn option_texts(tier: RiskTier) -> &'static [&'static str] {
    match tier {
        RiskTier::High => &[
            "Aggressive Market Expansion",
            "High-Risk Investment",
            "Bold Strategic Move",
            "Disruptive Innovation",
            "Market Dominance Push",
        ],
        RiskTier::Medium => &[
            "Strategic Partnership",
            "Moderate Investment",
            "Balanced Approach",
            "Controlled Expansion",
            "Sustainable Growth",
        ],
        RiskTier::Low => &[
            "Risk-Averse Strategy",
            "Minimal Investment",
            "Defensive Position",
            "Gradual Growth",
            "Stable Development",
        ],
    }
}

/// Consequence labels per polarity
pub fn consequences(polarity: Polarity) -> &'static [&'static str] {
    match polarity {
        Polarity::Positive => &[
            "Market leadership position",
            "Increased brand value",
            "Enhanced competitive advantage",
            "Improved market share",
            "Stronger industry position",
            "Better resource allocation",
            "Enhanced innovation capability",
            "Improved operational efficiency",
        ],
        Polarity::Negative => &[
            "Increased operational costs",
            "Higher market volatility",
            "Resource constraints",
            "Competitive pressure",
            "Regulatory scrutiny",
            "Market uncertainty",
            "Resource depletion",
            "Strategic vulnerability",
        ],
    }
}

/// The four side-effect events every scenario can trigger
pub fn random_events() -> Vec<RandomEvent> {
    vec![
        RandomEvent {
            polarity: Polarity::Negative,
            message: "Market crash! All investments lose 5% value".into(),
            effect: EventEffect {
                capital: Some(-0.05),
                ..EventEffect::default()
            },
        },
        RandomEvent {
            polarity: Polarity::Positive,
            message: "Unexpected market boom! All investments gain 3%".into(),
            effect: EventEffect {
                capital: Some(0.03),
                ..EventEffect::default()
            },
        },
        RandomEvent {
            polarity: Polarity::Negative,
            message: "Regulatory crackdown! Reputation takes a hit".into(),
            effect: EventEffect {
                reputation: Some(-2),
                ..EventEffect::default()
            },
        },
        RandomEvent {
            polarity: Polarity::Positive,
            message: "Industry recognition! Reputation boost".into(),
            effect: EventEffect {
                reputation: Some(2),
                ..EventEffect::default()
            },
        },
    ]
}

pub const RESTRUCTURING_EFFECT: &str = "Company Restructuring";
pub const MERGER_EFFECT: &str = "Merger Integration";
pub const BANKRUPTCY_EFFECT: &str = "Bankruptcy Recovery";
pub const TAKEOVER_EFFECT: &str = "Hostile Takeover Aftermath";
