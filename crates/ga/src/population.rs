// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A population of poker hands evolved by fitness proportional selection.
use log::{debug, info};
use rand::prelude::*;
use std::fmt;

use pokergen_cards::{Hand, HandCategory};

use crate::{
    Error, Result,
    config::{Operator, Rates},
    operators,
};

/// A population member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    /// The hand fitness, the fitness function applied to the category score.
    pub fitness: u32,
    /// The hand.
    pub hand: Hand,
}

/// A summary of the current generation.
#[derive(Debug, Clone)]
pub struct GenerationStats {
    /// The generation number.
    pub generation: usize,
    /// The population average fitness.
    pub average: f64,
    /// The highest fitness in the population.
    pub best_fitness: u32,
    /// The hand with the highest fitness.
    pub best: Hand,
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation {} average fitness {:.3} highest fitness {} hand {}",
            self.generation, self.average, self.best_fitness, self.best
        )
    }
}

/// The result of an evolution run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// A hand above the threshold was found.
    pub found: bool,
    /// The best hand of the last generation.
    pub best: Hand,
    /// The generation counter when the run stopped.
    pub generations: usize,
}

/// A fixed size population of hands.
///
/// Members are kept sorted by fitness with an aligned array of fitness prefix
/// sums used to sample parents proportionally to their fitness.
#[derive(Debug)]
pub struct Population<F, R> {
    size: usize,
    fitness: F,
    threshold: u32,
    members: Vec<Individual>,
    /// `cumulative[i]` is the sum of the fitness of members `0..i`.
    cumulative: Vec<u64>,
    total_fitness: u64,
    best: Individual,
    generation: usize,
    rng: R,
}

impl<F, R> Population<F, R>
where
    F: Fn(u32) -> u32,
    R: Rng,
{
    /// Creates a population of `size` random hands.
    ///
    /// The `threshold` is passed through the `fitness` function and random hands
    /// with a fitness above it are not accepted in the initial population.
    pub fn new(size: usize, fitness: F, threshold: u32, mut rng: R) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidPopulationSize);
        }

        let threshold = fitness(threshold);
        if !HandCategory::categories().any(|c| fitness(c.score()) <= threshold) {
            return Err(Error::UnreachableThreshold(threshold));
        }

        let mut hands = Vec::with_capacity(size);
        while hands.len() < size {
            let hand = Hand::random(&mut rng);
            if fitness(hand.category_score()) <= threshold {
                hands.push(hand);
            }
        }

        Ok(Self::with_threshold(hands, fitness, threshold, rng))
    }

    /// Creates a population from the given hands, the population size is the
    /// number of hands.
    pub fn with_hands(hands: Vec<Hand>, fitness: F, threshold: u32, rng: R) -> Result<Self> {
        if hands.is_empty() {
            return Err(Error::InvalidPopulationSize);
        }

        let threshold = fitness(threshold);
        Ok(Self::with_threshold(hands, fitness, threshold, rng))
    }

    fn with_threshold(hands: Vec<Hand>, fitness: F, threshold: u32, rng: R) -> Self {
        let size = hands.len();
        let first = Individual {
            fitness: fitness(hands[0].category_score()),
            hand: hands[0].clone(),
        };

        let mut population = Self {
            size,
            fitness,
            threshold,
            members: Vec::new(),
            cumulative: Vec::new(),
            total_fitness: 0,
            best: first,
            generation: 0,
            rng,
        };

        population.replace(hands);
        population
    }

    /// The number of hands in the population.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The threshold after the fitness function is applied.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// The current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The sum of the fitness of all members.
    pub fn total_fitness(&self) -> u64 {
        self.total_fitness
    }

    /// The members sorted by fitness.
    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    /// The first member with the highest fitness.
    pub fn best(&self) -> &Individual {
        &self.best
    }

    /// A summary of the current generation.
    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            generation: self.generation,
            average: self.total_fitness as f64 / self.size as f64,
            best_fitness: self.best.fitness,
            best: self.best.hand.clone(),
        }
    }

    /// Creates the next generation.
    ///
    /// Returns whether any hand in the new generation has a fitness above the
    /// threshold, and the hand with the highest fitness.
    pub fn advance_generation(&mut self, rates: &Rates) -> Result<(bool, Hand)> {
        rates.validate()?;

        let mut next = Vec::with_capacity(self.size + 1);
        while next.len() < self.size {
            let operator = rates.pick(self.rng.random::<f64>());
            let p1 = self.select_parent();

            match operator {
                Operator::Crossover => {
                    let p2 = self.select_mate();
                    let (a, b) = (&self.members[p1].hand, &self.members[p2].hand);
                    match operators::crossover(a, b, &mut self.rng) {
                        Ok((c1, c2)) => {
                            next.push(c1);
                            next.push(c2);
                        }
                        Err(e) => debug!("Crossover of {a} and {b} skipped: {e}"),
                    }
                }
                Operator::Mutation => {
                    next.push(operators::mutate(&self.members[p1].hand, &mut self.rng));
                }
                Operator::SuitMutation => {
                    next.push(operators::suit_mutate(&self.members[p1].hand, &mut self.rng));
                }
                Operator::Elitism => {
                    next.push(self.members[p1].hand.clone());
                }
            }
        }

        // A crossover may add one hand too many.
        if next.len() > self.size {
            let idx = self.rng.random_range(0..next.len());
            next.remove(idx);
        }

        let found = self.replace(next);
        self.generation += 1;
        debug!("{}", self.stats());

        Ok((found, self.best.hand.clone()))
    }

    /// Evolves the population for up to `max_generations` generations.
    ///
    /// Stops as soon as a generation has a hand with fitness above the
    /// threshold.
    pub fn run(&mut self, max_generations: usize, rates: &Rates) -> Result<RunOutcome> {
        self.run_with(max_generations, rates, |_| {})
    }

    /// Like [Population::run] but calls `on_generation` after each generation.
    pub fn run_with<C>(
        &mut self,
        max_generations: usize,
        rates: &Rates,
        mut on_generation: C,
    ) -> Result<RunOutcome>
    where
        C: FnMut(&GenerationStats),
    {
        let mut best = self.best.hand.clone();
        for _ in 0..max_generations {
            let (found, hand) = self.advance_generation(rates)?;
            on_generation(&self.stats());

            if found {
                info!(
                    "Found {} {hand} at generation {}",
                    hand.hand_kind_label(),
                    self.generation
                );

                return Ok(RunOutcome {
                    found,
                    best: hand,
                    generations: self.generation,
                });
            }

            best = hand;
        }

        Ok(RunOutcome {
            found: false,
            best,
            generations: self.generation,
        })
    }

    /// Selects a parent index drawing from 1..=total fitness.
    fn select_parent(&mut self) -> usize {
        if self.total_fitness == 0 {
            return self.rng.random_range(0..self.members.len());
        }

        let draw = self.rng.random_range(1..=self.total_fitness);
        lower_bound_owner(&self.cumulative, draw)
    }

    /// Selects a crossover mate index drawing from 0..total fitness.
    fn select_mate(&mut self) -> usize {
        if self.total_fitness == 0 {
            return self.rng.random_range(0..self.members.len());
        }

        let draw = self.rng.random_range(0..self.total_fitness);
        upper_bound_owner(&self.cumulative, draw)
    }

    /// Replaces the population members with the given hands and returns true
    /// if any hand fitness is above the threshold.
    fn replace(&mut self, hands: Vec<Hand>) -> bool {
        let mut members = hands
            .into_iter()
            .map(|hand| Individual {
                fitness: (self.fitness)(hand.category_score()),
                hand,
            })
            .collect::<Vec<_>>();

        let found = members.iter().any(|m| m.fitness > self.threshold);

        // First member with the highest fitness in generation order.
        let mut best = 0;
        for (idx, m) in members.iter().enumerate() {
            if m.fitness > members[best].fitness {
                best = idx;
            }
        }
        self.best = members[best].clone();

        members.sort_by_key(|m| m.fitness);

        self.cumulative = members
            .iter()
            .scan(0u64, |acc, m| {
                let start = *acc;
                *acc += m.fitness as u64;
                Some(start)
            })
            .collect();
        self.total_fitness = members.iter().map(|m| m.fitness as u64).sum();
        self.members = members;

        found
    }
}

/// Returns the member owning `draw` in 1..=total using the leftmost insertion
/// point, member `i` owns the draws in `cumulative[i] + 1..=cumulative[i + 1]`.
fn lower_bound_owner(cumulative: &[u64], draw: u64) -> usize {
    cumulative.partition_point(|&c| c < draw).saturating_sub(1)
}

/// Returns the member owning `draw` in 0..total using the rightmost insertion
/// point, member `i` owns the draws in `cumulative[i]..cumulative[i + 1]`.
fn upper_bound_owner(cumulative: &[u64], draw: u64) -> usize {
    cumulative.partition_point(|&c| c <= draw).saturating_sub(1)
}
