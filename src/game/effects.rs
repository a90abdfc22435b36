//! Timed capital modifiers left behind by past decisions

use serde::{Deserialize, Serialize};

use crate::core::types::Polarity;
use crate::game::resources::ResourceState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub name: String,
    pub polarity: Polarity,
    pub rounds_left: u32,
    /// Fractional capital change applied each round while active
    pub value: f64,
}

impl ActiveEffect {
    pub fn new(name: impl Into<String>, polarity: Polarity, rounds: u32, value: f64) -> Self {
        Self {
            name: name.into(),
            polarity,
            rounds_left: rounds,
            value,
        }
    }

    /// Lasting penalty attached by an emergency action
    pub fn penalty(name: impl Into<String>, rounds: u32, value: f64) -> Self {
        Self::new(name, Polarity::Negative, rounds, value)
    }
}

/// Ordered set of running effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectLedger {
    effects: Vec<ActiveEffect>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: ActiveEffect) {
        self.effects.push(effect);
    }

    /// Count every effect down by one round and drop the expired ones
    pub fn tick(&mut self) {
        for effect in &mut self.effects {
            effect.rounds_left = effect.rounds_left.saturating_sub(1);
        }
        self.effects.retain(|e| e.rounds_left > 0);
    }

    /// Apply every running effect to capital, in insertion order
    pub fn apply(&self, resources: &mut ResourceState) {
        for effect in &self.effects {
            resources.scale_capital(1.0 + effect.value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::InitialConfig;

    #[test]
    fn test_tick_drops_expired_effects() {
        let mut ledger = EffectLedger::new();
        ledger.push(ActiveEffect::new("short", Polarity::Negative, 1, -0.01));
        ledger.push(ActiveEffect::new("long", Polarity::Positive, 3, 0.02));
        ledger.tick();
        assert_eq!(ledger.len(), 1);
        let remaining: Vec<_> = ledger.iter().collect();
        assert_eq!(remaining[0].name, "long");
        assert_eq!(remaining[0].rounds_left, 2);
    }

    #[test]
    fn test_apply_compounds_in_order() {
        let mut resources = ResourceState::initial(&InitialConfig::default());
        let mut ledger = EffectLedger::new();
        ledger.push(ActiveEffect::new("boost", Polarity::Positive, 4, 0.02));
        ledger.push(ActiveEffect::penalty("drag", 2, -0.01));
        ledger.apply(&mut resources);
        // 10000 * 1.02 = 10200, then 10200 * 0.99 = 10098
        assert_eq!(resources.capital(), 10_098);
    }
}
