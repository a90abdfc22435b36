//! Game-over detection

use serde::{Deserialize, Serialize};

use crate::core::config::TerminalConfig;
use crate::game::resources::ResourceState;
use crate::game::scenario::Scenario;

/// Why the company cannot continue, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalReason {
    Bankruptcy,
    ReputationRuined,
    OverwhelmingStress,
    MarketCollapse,
    CreditCrisis,
    NoOptionsAvailable,
}

impl TerminalReason {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bankruptcy => "Bankruptcy",
            Self::ReputationRuined => "Reputation Ruined",
            Self::OverwhelmingStress => "Overwhelming Stress",
            Self::MarketCollapse => "Market Collapse",
            Self::CreditCrisis => "Credit Crisis",
            Self::NoOptionsAvailable => "No Options Available",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Bankruptcy => "Bankruptcy: Capital fell below -$2000",
            Self::ReputationRuined => {
                "Reputation Ruined: Your standing in the industry is destroyed"
            }
            Self::OverwhelmingStress => {
                "Overwhelming Stress: Your company cannot handle the pressure"
            }
            Self::MarketCollapse => "Market Collapse: Market conditions are too unstable",
            Self::CreditCrisis => "Credit Crisis: Your credit rating is too low to continue",
            Self::NoOptionsAvailable => {
                "No Options Available: You cannot meet the requirements for any decisions"
            }
        }
    }
}

impl std::fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// First terminal condition that holds, if any
pub fn check_terminal(
    resources: &ResourceState,
    next: &Scenario,
    config: &TerminalConfig,
) -> Option<TerminalReason> {
    if resources.capital() < config.bankruptcy_capital {
        Some(TerminalReason::Bankruptcy)
    } else if resources.reputation() < 0 {
        Some(TerminalReason::ReputationRuined)
    } else if resources.stress() >= config.stress_limit {
        Some(TerminalReason::OverwhelmingStress)
    } else if resources.market_volatility() > config.volatility_limit {
        Some(TerminalReason::MarketCollapse)
    } else if resources.credit() < config.credit_floor {
        Some(TerminalReason::CreditCrisis)
    } else if !next.has_eligible_option(resources) {
        Some(TerminalReason::NoOptionsAvailable)
    } else {
        None
    }
}
