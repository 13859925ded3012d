// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Genetic operators on poker hands.
//!
//! All operators return new hands and never produce a hand with duplicate
//! cards, the operators that can generate a duplicate either retry or fail.
use log::debug;
use rand::{prelude::*, seq::index};

use pokergen_cards::{Card, Deck, Hand, Result, Suit};

/// Maximum number of attempts for a suit mutation.
pub const SUIT_MUTATION_ATTEMPTS: usize = 5;

/// Replaces one random card with a card that is not in the hand.
pub fn mutate<R: Rng>(hand: &Hand, rng: &mut R) -> Hand {
    let mut positions = hand.positions();
    let idx = rng.random_range(0..Hand::SIZE);

    let pos = loop {
        let pos = rng.random_range(0..Deck::SIZE as u8);
        if !hand.contains(pos) {
            break pos;
        }
    };

    positions[idx] = pos;
    Hand::from_positions(&positions).expect("mutated positions should be distinct")
}

/// Forces three to five random cards to the same random suit.
///
/// Moving cards with the same rank to one suit creates duplicates, in that case
/// the mutation is retried with new random choices up to
/// [SUIT_MUTATION_ATTEMPTS] times, if all attempts fail the hand is returned
/// unchanged.
pub fn suit_mutate<R: Rng>(hand: &Hand, rng: &mut R) -> Hand {
    for _ in 0..SUIT_MUTATION_ATTEMPTS {
        let count = rng.random_range(3..=Hand::SIZE);
        let selected = index::sample(rng, Hand::SIZE, count);
        let suit = Suit::random(rng);

        let mut cards = hand.cards().to_vec();
        for idx in selected.iter() {
            cards[idx] = Card::new(cards[idx].rank(), suit);
        }

        if let Ok(mutated) = Hand::new(&cards) {
            return mutated;
        }
    }

    debug!("Suit mutation failed for {hand}, keeping the parent hand");
    hand.clone()
}

/// Single point crossover at a random cut point in 1..=4.
///
/// Returns an error if any of the two children has duplicate cards.
pub fn crossover<R: Rng>(a: &Hand, b: &Hand, rng: &mut R) -> Result<(Hand, Hand)> {
    let cut = rng.random_range(1..Hand::SIZE);
    crossover_at(a, b, cut)
}

/// Crossover at the given cut point over the hands sorted positions.
///
/// The first child takes the positions before `cut` from `a` and the rest from
/// `b`, the second child is the complement.
pub(crate) fn crossover_at(a: &Hand, b: &Hand, cut: usize) -> Result<(Hand, Hand)> {
    assert!((1..Hand::SIZE).contains(&cut), "1 <= cut <= 4");

    let (pa, pb) = (a.positions(), b.positions());

    let mut c1 = pa;
    c1[cut..].copy_from_slice(&pb[cut..]);

    let mut c2 = pb;
    c2[cut..].copy_from_slice(&pa[cut..]);

    Ok((Hand::from_positions(&c1)?, Hand::from_positions(&c2)?))
}
