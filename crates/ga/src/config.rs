// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evolution run configuration.
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The rates used to pick the operator that fills each offspring slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    /// Crossover rate.
    pub crossover: f64,
    /// Mutation rate.
    pub mutation: f64,
    /// Suit mutation rate.
    pub suit_mutation: f64,
    /// Elitism rate.
    pub elitism: f64,
}

/// The operator used to fill an offspring slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Recombine two parents.
    Crossover,
    /// Replace one card.
    Mutation,
    /// Force some cards to the same suit.
    SuitMutation,
    /// Copy the parent unchanged.
    Elitism,
}

impl Rates {
    /// The maximum distance of the rates sum from one.
    pub const TOLERANCE: f64 = 0.001;

    /// Creates validated rates.
    pub fn new(crossover: f64, mutation: f64, suit_mutation: f64, elitism: f64) -> Result<Self> {
        let rates = Self {
            crossover,
            mutation,
            suit_mutation,
            elitism,
        };

        rates.validate()?;
        Ok(rates)
    }

    /// Checks that all rates are non negative and they sum to one.
    pub fn validate(&self) -> Result<()> {
        let rates = [self.crossover, self.mutation, self.suit_mutation, self.elitism];
        let sum = rates.iter().sum::<f64>();

        // Written so that NaN rates fail the checks.
        let non_negative = rates.iter().all(|r| *r >= 0.0);
        if !non_negative || !((sum - 1.0).abs() <= Self::TOLERANCE) {
            return Err(Error::InvalidRateConfiguration { sum });
        }

        Ok(())
    }

    /// Picks an operator given a uniform draw in [0, 1).
    pub fn pick(&self, draw: f64) -> Operator {
        if draw < self.crossover {
            Operator::Crossover
        } else if draw < self.crossover + self.mutation {
            Operator::Mutation
        } else if draw < self.crossover + self.mutation + self.suit_mutation {
            Operator::SuitMutation
        } else {
            Operator::Elitism
        }
    }
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            crossover: 0.7,
            mutation: 0.1,
            suit_mutation: 0.1,
            elitism: 0.1,
        }
    }
}

/// Evolution run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The number of hands in the population.
    pub size: usize,
    /// Seed hands with a fitness above this threshold, after the fitness
    /// function is applied, are rejected, and a run stops as soon as a hand
    /// above it appears.
    pub threshold: u32,
    /// The maximum number of generations.
    pub generations: usize,
    /// The operators rates.
    pub rates: Rates,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 50,
            threshold: 7,
            generations: 100,
            rates: Rates::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_rates() {
        assert!(Rates::default().validate().is_ok());
        assert!(Rates::new(1.0, 0.0, 0.0, 0.0).is_ok());
        assert!(Rates::new(0.25, 0.25, 0.25, 0.25).is_ok());
        assert!(Rates::new(0.7, 0.1, 0.1, 0.1005).is_ok());
    }

    #[test]
    fn invalid_rates() {
        let err = Rates::new(0.7, 0.2, 0.1, 0.1).unwrap_err();
        assert!(matches!(err, Error::InvalidRateConfiguration { sum } if (sum - 1.1).abs() < 1e-9));

        assert!(Rates::new(0.5, 0.1, 0.1, 0.1).is_err());
        assert!(Rates::new(1.2, -0.2, 0.0, 0.0).is_err());
        assert!(Rates::new(f64::NAN, 0.0, 0.0, 1.0).is_err());
        assert!(Rates::new(0.7, 0.1, 0.1, 0.102).is_err());
    }

    #[test]
    fn pick_operator() {
        let rates = Rates::default();
        assert_eq!(rates.pick(0.0), Operator::Crossover);
        assert_eq!(rates.pick(0.69), Operator::Crossover);
        assert_eq!(rates.pick(0.75), Operator::Mutation);
        assert_eq!(rates.pick(0.85), Operator::SuitMutation);
        assert_eq!(rates.pick(0.95), Operator::Elitism);

        let rates = Rates::new(0.0, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(rates.pick(0.0), Operator::Elitism);
        assert_eq!(rates.pick(0.999), Operator::Elitism);
    }
}
