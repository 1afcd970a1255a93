//! How a player picks its next move.
//!
//! A policy only hands out weights over [`Decision::ALL`]; the game does the
//! sampling, so every policy is driven by the same random source.

use crate::{Decision, error::ConfigError};
use std::collections::HashMap;

/// The 3x3 liveness window around a player, as packed by [`Grid::window`]
///
/// [`Grid::window`]: crate::Grid::window
pub type Observation = u16;

pub type Weights = [f64; 5];

pub trait DecisionPolicy {
    /// Relative odds of each decision, indexed by [`Decision::index`]
    fn weights(&self, observation: Observation) -> Weights;

    /// Told after the player gains (`points > 0`) or loses a point, along
    /// with what it saw and the decision that got it there
    fn feedback(&mut self, _observation: Observation, _decision: Decision, _points: i32) {}
}

fn check_weights(weights: &Weights) -> Result<(), ConfigError> {
    let valid = weights.iter().all(|w| w.is_finite() && *w >= 0.0);
    if !valid || weights.iter().sum::<f64>() <= 0.0 {
        return Err(ConfigError::InvalidWeights);
    }
    Ok(())
}

/// Every decision equally likely
#[derive(Debug, Default, Clone, Copy)]
pub struct Uniform;

impl DecisionPolicy for Uniform {
    fn weights(&self, _observation: Observation) -> Weights {
        [1.0; 5]
    }
}

/// Always stays put; keyboard-driven players use this
#[derive(Debug, Default, Clone, Copy)]
pub struct Idle;

impl DecisionPolicy for Idle {
    fn weights(&self, _observation: Observation) -> Weights {
        let mut weights = [0.0; 5];
        weights[Decision::Stay.index()] = 1.0;
        weights
    }
}

/// A fixed bias that ignores what the player sees
#[derive(Debug, Clone, Copy)]
pub struct Weighted {
    weights: Weights,
}

impl Weighted {
    pub fn new(weights: Weights) -> Result<Self, ConfigError> {
        check_weights(&weights)?;
        Ok(Self { weights })
    }
}

impl DecisionPolicy for Weighted {
    fn weights(&self, _observation: Observation) -> Weights {
        self.weights
    }
}

/// Remembers which decision preceded a gain or a loss in a given window
///
/// Seeing a remembered window again multiplies the weight of a decision that
/// led to a gain by `boost`, or drops a decision that led to a loss. Nothing
/// is learned beyond that.
#[derive(Debug, Clone)]
pub struct Memory {
    base: Weights,
    boost: f64,
    memory: HashMap<Observation, (Decision, i32)>,
}

impl Memory {
    pub const DEFAULT_BOOST: f64 = 4.0;

    pub fn new(base: Weights) -> Result<Self, ConfigError> {
        check_weights(&base)?;
        Ok(Self {
            base,
            boost: Self::DEFAULT_BOOST,
            memory: HashMap::new(),
        })
    }

    pub fn with_boost(mut self, boost: f64) -> Result<Self, ConfigError> {
        if !boost.is_finite() || boost <= 0.0 {
            return Err(ConfigError::InvalidBoost(boost));
        }
        self.boost = boost;
        Ok(self)
    }

    /// How many windows have been remembered so far
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

impl DecisionPolicy for Memory {
    fn weights(&self, observation: Observation) -> Weights {
        let mut weights = self.base;
        if let Some(&(decision, points)) = self.memory.get(&observation) {
            let slot = &mut weights[decision.index()];
            *slot = if points > 0 { *slot * self.boost } else { 0.0 };
        }
        // dropping the only option left would leave nothing to sample
        if weights.iter().sum::<f64>() <= 0.0 {
            return self.base;
        }
        weights
    }

    fn feedback(&mut self, observation: Observation, decision: Decision, points: i32) {
        if points != 0 {
            self.memory.insert(observation, (decision, points));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_only_stays() {
        let weights = Idle.weights(0);

        assert_eq!(weights, [1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn weighted_rejects_bad_vectors() {
        assert!(Weighted::new([1.0, 2.0, 0.0, 0.0, 1.0]).is_ok());
        assert_eq!(
            Weighted::new([0.0; 5]).unwrap_err(),
            ConfigError::InvalidWeights
        );
        assert!(Weighted::new([1.0, -1.0, 1.0, 1.0, 1.0]).is_err());
        assert!(Weighted::new([1.0, f64::NAN, 1.0, 1.0, 1.0]).is_err());
    }

    #[test]
    fn memory_boosts_rewarded_decision() {
        let mut policy = Memory::new([1.0; 5]).unwrap().with_boost(3.0).unwrap();
        policy.feedback(0b000_010_000, Decision::Left, 1);

        let weights = policy.weights(0b000_010_000);
        assert_eq!(weights[Decision::Left.index()], 3.0);
        assert_eq!(weights[Decision::Up.index()], 1.0);

        // other windows are unaffected
        assert_eq!(policy.weights(0), [1.0; 5]);
    }

    #[test]
    fn memory_avoids_punished_decision() {
        let mut policy = Memory::new([1.0; 5]).unwrap();
        policy.feedback(7, Decision::Up, -1);

        let weights = policy.weights(7);
        assert_eq!(weights[Decision::Up.index()], 0.0);
        assert_eq!(policy.len(), 1);
    }

    #[test]
    fn memory_never_returns_all_zero() {
        let mut policy = Memory::new([0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        policy.feedback(1, Decision::Right, -1);

        assert_eq!(policy.weights(1), [0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn memory_rejects_bad_boost() {
        let policy = Memory::new([1.0; 5]).unwrap();

        assert_eq!(
            policy.clone().with_boost(-2.0).unwrap_err(),
            ConfigError::InvalidBoost(-2.0)
        );
        assert!(policy.clone().with_boost(f64::NAN).is_err());
        assert!(policy.clone().with_boost(f64::INFINITY).is_err());
        assert!(policy.with_boost(0.5).is_ok());
    }
}
