//! Pass actions and last-resort rescues

use serde::{Deserialize, Serialize};

use crate::core::config::{LastResortConfig, PassActionConfig, ShiftTerms};
use crate::game::catalog;
use crate::game::effects::{ActiveEffect, EffectLedger};
use crate::game::resources::ResourceState;

/// Actions that skip a decision to manage pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassAction {
    LaissezFaire,
    StabilizeMarket,
}

impl PassAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LaissezFaire => "Laissez-faire (Take a Break)",
            Self::StabilizeMarket => "Market Stabilization",
        }
    }
}

pub fn apply_pass_action(action: PassAction, resources: &mut ResourceState, config: &PassActionConfig) {
    match action {
        PassAction::LaissezFaire => {
            resources.add_stress(config.laissez_faire_stress);
            resources.add_volatility(config.laissez_faire_volatility);
        }
        PassAction::StabilizeMarket => {
            resources.add_volatility(config.stabilize_volatility);
            resources.add_stress(config.stabilize_stress);
        }
    }
}

/// Emergency rescues offered while the company faces game over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LastResort {
    EmergencyLoan,
    AssetSale,
    Restructuring,
    Merger,
    Bankruptcy,
    HostileTakeover,
}

impl LastResort {
    pub const ALL: [LastResort; 6] = [
        LastResort::EmergencyLoan,
        LastResort::AssetSale,
        LastResort::Restructuring,
        LastResort::Merger,
        LastResort::Bankruptcy,
        LastResort::HostileTakeover,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::EmergencyLoan => "Emergency Loan",
            Self::AssetSale => "Sell Assets",
            Self::Restructuring => "Company Restructuring",
            Self::Merger => "Merger",
            Self::Bankruptcy => "Declare Bankruptcy",
            Self::HostileTakeover => "Hostile Takeover",
        }
    }

    /// Parse the short command name used by the front ends
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "loan" | "emergency-loan" => Some(Self::EmergencyLoan),
            "sell" | "asset-sale" => Some(Self::AssetSale),
            "restructure" | "restructuring" => Some(Self::Restructuring),
            "merger" | "merge" => Some(Self::Merger),
            "bankruptcy" => Some(Self::Bankruptcy),
            "takeover" | "hostile-takeover" => Some(Self::HostileTakeover),
            _ => None,
        }
    }
}

pub fn apply_last_resort(
    action: LastResort,
    resources: &mut ResourceState,
    effects: &mut EffectLedger,
    config: &LastResortConfig,
) {
    match action {
        LastResort::EmergencyLoan => {
            let terms = &config.emergency_loan;
            let amount = (resources.capital() as f64 * terms.capital_multiple).floor() as i64;
            if amount > 0 {
                resources.borrow(amount);
            } else {
                resources.add_capital(amount);
            }
            resources.set_loan_interest(terms.interest);
            resources.add_stress(terms.stress);
            resources.add_credit(terms.credit);
        }
        LastResort::AssetSale => {
            let terms = &config.asset_sale;
            resources.scale_capital(1.0 + terms.capital_share);
            resources.add_reputation(terms.reputation);
            resources.add_stress(terms.stress);
            resources.add_volatility(terms.volatility);
        }
        LastResort::Restructuring => {
            apply_shift(&config.restructuring, catalog::RESTRUCTURING_EFFECT, resources, effects)
        }
        LastResort::Merger => apply_shift(&config.merger, catalog::MERGER_EFFECT, resources, effects),
        LastResort::Bankruptcy => {
            let terms = &config.bankruptcy;
            resources.set_capital(terms.capital);
            resources.add_reputation(terms.reputation);
            resources.add_connections(terms.connections);
            resources.set_stress(terms.stress);
            resources.set_volatility(terms.volatility);
            resources.set_credit(terms.credit);
            resources.clear_loan();
            resources.set_loan_interest(terms.loan_interest);
            effects.push(ActiveEffect::penalty(
                catalog::BANKRUPTCY_EFFECT,
                terms.effect_rounds,
                terms.effect_value,
            ));
        }
        LastResort::HostileTakeover => {
            apply_shift(&config.hostile_takeover, catalog::TAKEOVER_EFFECT, resources, effects)
        }
    }
}

/// Additive shift; capital never drops below zero through a rescue
fn apply_shift(
    terms: &ShiftTerms,
    name: &str,
    resources: &mut ResourceState,
    effects: &mut EffectLedger,
) {
    resources.set_capital(resources.capital().saturating_add(terms.capital).max(0));
    resources.add_reputation(terms.reputation);
    resources.add_connections(terms.connections);
    resources.add_stress(terms.stress);
    resources.add_volatility(terms.volatility);
    effects.push(ActiveEffect::penalty(name, terms.effect_rounds, terms.effect_value));
}
