//! Player resources with clamped mutation
//!
//! Bounds are enforced on every mutation by clamping, never by rejecting the
//! change. Capital is the only unbounded quantity.

use serde::{Deserialize, Serialize};

use crate::core::config::InitialConfig;

pub const STRESS_MIN: i32 = 0;
pub const STRESS_MAX: i32 = 100;
pub const VOLATILITY_MIN: i32 = 0;
pub const VOLATILITY_MAX: i32 = 100;
pub const CREDIT_MIN: i32 = 300;
pub const CREDIT_MAX: i32 = 1000;

/// Raw resource levels with no invariants attached.
///
/// Used to build a [`ResourceState`] (which clamps) and as its serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceLevels {
    pub capital: i64,
    pub reputation: i32,
    pub connections: i32,
    pub stress: i32,
    pub market_volatility: i32,
    pub credit: i32,
    pub loan_amount: i64,
    pub loan_interest: f64,
}

impl From<&InitialConfig> for ResourceLevels {
    fn from(init: &InitialConfig) -> Self {
        Self {
            capital: init.capital,
            reputation: init.reputation,
            connections: init.connections,
            stress: init.stress,
            market_volatility: init.market_volatility,
            credit: init.credit,
            loan_amount: init.loan_amount,
            loan_interest: init.loan_interest,
        }
    }
}

/// Current standing of the player's company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResourceLevels", into = "ResourceLevels")]
pub struct ResourceState {
    capital: i64,
    reputation: i32,
    connections: i32,
    stress: i32,
    market_volatility: i32,
    credit: i32,
    loan_amount: i64,
    loan_interest: f64,
}

impl From<ResourceLevels> for ResourceState {
    fn from(levels: ResourceLevels) -> Self {
        Self {
            capital: levels.capital,
            reputation: levels.reputation.max(0),
            connections: levels.connections.max(0),
            stress: levels.stress.clamp(STRESS_MIN, STRESS_MAX),
            market_volatility: levels.market_volatility.clamp(VOLATILITY_MIN, VOLATILITY_MAX),
            credit: levels.credit.clamp(CREDIT_MIN, CREDIT_MAX),
            loan_amount: levels.loan_amount.max(0),
            loan_interest: levels.loan_interest.max(0.0),
        }
    }
}

impl From<ResourceState> for ResourceLevels {
    fn from(state: ResourceState) -> Self {
        state.levels()
    }
}

impl ResourceState {
    /// Starting resources from the tuning table
    pub fn initial(init: &InitialConfig) -> Self {
        Self::from(ResourceLevels::from(init))
    }

    pub fn levels(&self) -> ResourceLevels {
        ResourceLevels {
            capital: self.capital,
            reputation: self.reputation,
            connections: self.connections,
            stress: self.stress,
            market_volatility: self.market_volatility,
            credit: self.credit,
            loan_amount: self.loan_amount,
            loan_interest: self.loan_interest,
        }
    }

    pub fn capital(&self) -> i64 {
        self.capital
    }

    pub fn reputation(&self) -> i32 {
        self.reputation
    }

    pub fn connections(&self) -> i32 {
        self.connections
    }

    pub fn stress(&self) -> i32 {
        self.stress
    }

    pub fn market_volatility(&self) -> i32 {
        self.market_volatility
    }

    pub fn credit(&self) -> i32 {
        self.credit
    }

    pub fn loan_amount(&self) -> i64 {
        self.loan_amount
    }

    pub fn loan_interest(&self) -> f64 {
        self.loan_interest
    }

    pub fn has_loan(&self) -> bool {
        self.loan_amount > 0
    }

    // === CAPITAL ===

    pub fn add_capital(&mut self, delta: i64) {
        self.capital = self.capital.saturating_add(delta);
    }

    /// Fractional shift, rounded down after adding
    pub fn adjust_capital(&mut self, delta: f64) {
        self.capital = (self.capital as f64 + delta).floor() as i64;
    }

    pub fn set_capital(&mut self, value: i64) {
        self.capital = value;
    }

    /// Multiply capital by `factor`, rounding down
    pub fn scale_capital(&mut self, factor: f64) {
        self.capital = (self.capital as f64 * factor).floor() as i64;
    }

    // === REPUTATION / CONNECTIONS ===

    pub fn add_reputation(&mut self, delta: i32) {
        self.reputation = self.reputation.saturating_add(delta).max(0);
    }

    /// Fractional shift, rounded down after adding
    pub fn adjust_reputation(&mut self, delta: f64) {
        self.reputation = shifted(self.reputation, delta).max(0);
    }

    pub fn add_connections(&mut self, delta: i32) {
        self.connections = self.connections.saturating_add(delta).max(0);
    }

    pub fn adjust_connections(&mut self, delta: f64) {
        self.connections = shifted(self.connections, delta).max(0);
    }

    // === STRESS / VOLATILITY ===

    pub fn add_stress(&mut self, delta: i32) {
        self.stress = self.stress.saturating_add(delta).clamp(STRESS_MIN, STRESS_MAX);
    }

    pub fn adjust_stress(&mut self, delta: f64) {
        self.stress = shifted(self.stress, delta).clamp(STRESS_MIN, STRESS_MAX);
    }

    pub fn set_stress(&mut self, value: i32) {
        self.stress = value.clamp(STRESS_MIN, STRESS_MAX);
    }

    pub fn add_volatility(&mut self, delta: i32) {
        self.market_volatility = self
            .market_volatility
            .saturating_add(delta)
            .clamp(VOLATILITY_MIN, VOLATILITY_MAX);
    }

    pub fn adjust_volatility(&mut self, delta: f64) {
        self.market_volatility =
            shifted(self.market_volatility, delta).clamp(VOLATILITY_MIN, VOLATILITY_MAX);
    }

    pub fn set_volatility(&mut self, value: i32) {
        self.market_volatility = value.clamp(VOLATILITY_MIN, VOLATILITY_MAX);
    }

    // === CREDIT / LOAN ===

    pub fn add_credit(&mut self, delta: i32) {
        self.credit = self.credit.saturating_add(delta).clamp(CREDIT_MIN, CREDIT_MAX);
    }

    pub fn set_credit(&mut self, value: i32) {
        self.credit = value.clamp(CREDIT_MIN, CREDIT_MAX);
    }

    /// Borrow `amount`: capital and outstanding balance both grow
    pub fn borrow(&mut self, amount: i64) {
        self.capital = self.capital.saturating_add(amount);
        self.loan_amount = self.loan_amount.saturating_add(amount).max(0);
    }

    /// Pay `amount` out of capital toward the loan. The balance floors at zero.
    pub fn pay_down(&mut self, amount: i64) {
        self.capital = self.capital.saturating_sub(amount);
        self.loan_amount = self.loan_amount.saturating_sub(amount).max(0);
    }

    pub fn set_loan_interest(&mut self, rate: f64) {
        self.loan_interest = rate.max(0.0);
    }

    pub fn clear_loan(&mut self) {
        self.loan_amount = 0;
    }
}

fn shifted(current: i32, delta: f64) -> i32 {
    (current as f64 + delta).floor() as i32
}
