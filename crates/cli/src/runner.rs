// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Repeated evolution runs and their best hands tally.
use anyhow::Result;
use clap::ValueEnum;
use log::info;
use rand::prelude::*;
use std::{collections::BTreeMap, fmt};

use pokergen_ga::{Config, Hand, HandCategory, Population};

/// The function applied to a hand category score to get its fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Wrapper {
    /// The fitness is the category score.
    Identity,
    /// The fitness is the category score plus one.
    PlusOne,
}

impl Wrapper {
    /// Applies this wrapper to a category score.
    pub fn apply(&self, score: u32) -> u32 {
        match self {
            Wrapper::Identity => score,
            Wrapper::PlusOne => score + 1,
        }
    }
}

/// The best hand of a run.
#[derive(Debug, Clone)]
pub struct Trial {
    /// A hand above the threshold was found.
    pub found: bool,
    /// The best hand.
    pub best: Hand,
    /// The best hand fitness.
    pub fitness: u32,
    /// The number of generations.
    pub generations: usize,
}

/// Number of runs that ended with a best hand in each category.
#[derive(Debug, Default)]
pub struct Tally(BTreeMap<HandCategory, usize>);

impl Tally {
    /// Adds a best hand to the tally.
    pub fn add(&mut self, hand: &Hand) {
        *self.0.entry(hand.category()).or_default() += 1;
    }

    /// The number of best hands in the given category.
    pub fn count(&self, category: HandCategory) -> usize {
        self.0.get(&category).copied().unwrap_or_default()
    }

    /// The total number of runs.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (category, count) in self.0.iter().rev() {
            writeln!(f, "{:<22}{count}", category.label())?;
        }

        Ok(())
    }
}

/// Runs a single evolution and returns its best hand.
pub fn run_trial<R: Rng>(
    config: &Config,
    wrapper: Wrapper,
    rng: R,
    verbose: bool,
) -> Result<Trial> {
    let mut population = Population::new(config.size, |s| wrapper.apply(s), config.threshold, rng)?;
    if verbose {
        println!("{}", population.stats());
    }

    let outcome = population.run_with(config.generations, &config.rates, |stats| {
        if verbose {
            println!("{stats}");
        }
    })?;

    Ok(Trial {
        found: outcome.found,
        fitness: wrapper.apply(outcome.best.category_score()),
        best: outcome.best,
        generations: outcome.generations,
    })
}

/// Runs `runs` evolutions and returns the tally of their best hands.
///
/// With a seed each run uses a generator seeded with `seed + run`.
pub fn run_trials(
    config: &Config,
    wrapper: Wrapper,
    runs: usize,
    seed: Option<u64>,
    verbose: bool,
) -> Result<Tally> {
    config.rates.validate()?;

    let mut tally = Tally::default();
    for run in 0..runs {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run as u64)),
            None => StdRng::from_os_rng(),
        };

        println!("Run {run}");
        let trial = run_trial(config, wrapper, rng, verbose)?;
        if trial.found {
            info!("Run {run} found a hand above threshold");
        }

        println!("Best hand:     {} ({})", trial.best, trial.best.hand_kind_label());
        println!("Fitness value: {}", trial.fitness);
        println!("Generations:   {}", trial.generations);

        tally.add(&trial.best);
    }

    Ok(tally)
}
