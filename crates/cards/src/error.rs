// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards and hands errors.
use thiserror::Error;

use crate::Card;

/// Errors returned when building cards and hands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A hand must have exactly five cards.
    #[error("Invalid hand size {0}, a hand must have 5 cards")]
    InvalidHandSize(usize),
    /// The same card appears more than once in a hand.
    #[error("Duplicate card {0} in hand")]
    DuplicateCard(Card),
    /// A rank or suit outside the valid values.
    #[error("Invalid card {0:?}")]
    InvalidCard(String),
    /// A card position outside the deck.
    #[error("Card position {0} out of range 0..52")]
    OutOfRange(usize),
}

/// Result type for cards and hands operations.
pub type Result<T> = std::result::Result<T, Error>;
