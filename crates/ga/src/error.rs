// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Genetic algorithm errors.
use thiserror::Error;

/// Errors returned by the population engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The operator rates are negative or do not sum to one.
    #[error("Invalid rates configuration, rates must be non negative and sum to 1 (got {sum})")]
    InvalidRateConfiguration {
        /// The sum of the configured rates.
        sum: f64,
    },
    /// A population must have at least one individual.
    #[error("Invalid population size, size must be greater than 0")]
    InvalidPopulationSize,
    /// No hand category has a fitness within the threshold.
    #[error("No hand category has fitness within threshold {0}")]
    UnreachableThreshold(u32),
}

/// Result type for the population engine.
pub type Result<T> = std::result::Result<T, Error>;
