// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pokergen genetic algorithm.
//!
//! Evolves a population of five cards hands toward stronger hand categories.
//! Each generation is created by selecting parents proportionally to their
//! fitness and applying one of crossover, mutation, suit mutation or elitism
//! chosen according to the configured [Rates]:
//!
//! ```
//! # use pokergen_ga::{Population, Rates};
//! # use rand::prelude::*;
//! let rng = StdRng::seed_from_u64(42);
//!
//! // Fitness is the hand category score plus one, and the run stops as soon as
//! // a hand better than a straight flush is found.
//! let mut population = Population::new(50, |score| score + 1, 7, rng).unwrap();
//! let outcome = population.run(100, &Rates::default()).unwrap();
//! assert!(outcome.generations <= 100);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod config;
pub use config::{Config, Operator, Rates};

mod error;
pub use error::{Error, Result};

pub mod operators;

pub mod population;
pub use population::{GenerationStats, Individual, Population, RunOutcome};

// Reexport cards types.
pub use pokergen_cards::{Card, Deck, Hand, HandCategory, Rank, Suit};
