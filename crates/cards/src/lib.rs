// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pokergen cards and hands types.
//!
//! This crate defines the cards types, each card is identified by its position
//! in a 52 cards deck:
//!
//! ```
//! # use pokergen_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.position(), 3);
//! assert_eq!(Card::from_position(3), Ok(ah));
//! ```
//!
//! and the five cards [Hand] type with its ranking:
//!
//! ```
//! # use pokergen_cards::{Hand, HandCategory};
//! let hand = "8C 9H TH JC QS".parse::<Hand>().unwrap();
//! assert_eq!(hand.category(), HandCategory::Straight);
//! assert_eq!(hand.category_score(), 4);
//! ```
//!
//! The [Deck] type can be used to iterate through all five cards hands:
//!
//! ```no_run
//! # use pokergen_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each_hand(|hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod cards;
pub use cards::{Card, Deck, RANKS, Rank, SUITS, Suit};

mod error;
pub use error::{Error, Result};

pub mod hand;
pub use hand::{Hand, HandCategory};
