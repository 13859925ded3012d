// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five cards poker hands and their ranking.
//!
//! A [Hand] is an immutable set of five distinct cards, the hand category is
//! computed from the rank histogram and the sorted ranks and suits, and it is
//! cached on first use.
use ahash::AHashMap;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, hash, str::FromStr, sync::OnceLock};

use crate::{Card, Deck, Error, Rank, Result, Suit};

/// A five cards poker hand.
#[derive(Clone, Serialize, Deserialize)]
#[serde(into = "Vec<Card>", try_from = "Vec<Card>")]
pub struct Hand {
    /// The cards in the order they were given.
    cards: [Card; Hand::SIZE],
    /// The cards sorted by position.
    sorted: [Card; Hand::SIZE],
    category: OnceLock<HandCategory>,
    rank_counts: OnceLock<AHashMap<Rank, usize>>,
}

impl Hand {
    /// The number of cards in a hand.
    pub const SIZE: usize = 5;

    /// Creates a hand from five distinct cards.
    pub fn new(cards: &[Card]) -> Result<Self> {
        let cards: [Card; Hand::SIZE] = cards
            .try_into()
            .map_err(|_| Error::InvalidHandSize(cards.len()))?;

        let mut sorted = cards;
        sorted.sort_unstable();
        if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::DuplicateCard(w[0]));
        }

        Ok(Self {
            cards,
            sorted,
            category: OnceLock::new(),
            rank_counts: OnceLock::new(),
        })
    }

    /// Creates a hand from five distinct deck positions.
    pub fn from_positions(positions: &[u8]) -> Result<Self> {
        let cards = positions
            .iter()
            .map(|&pos| Card::from_position(pos as usize))
            .collect::<Result<Vec<_>>>()?;
        Self::new(&cards)
    }

    /// Creates a hand from a 52 bits mask indexed by card position.
    pub fn from_bitmask(bits: &[bool; Deck::SIZE]) -> Result<Self> {
        let cards = bits
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(|(pos, _)| Card::from_position(pos))
            .collect::<Result<Vec<_>>>()?;
        Self::new(&cards)
    }

    /// Creates a random hand drawing cards until there are five distinct ones.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut bits = [false; Deck::SIZE];
        let mut count = 0;
        while count < Hand::SIZE {
            let pos = Card::random(rng).position() as usize;
            if !bits[pos] {
                bits[pos] = true;
                count += 1;
            }
        }

        let cards = bits
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .filter_map(|(pos, _)| Card::from_position(pos).ok())
            .collect::<Vec<_>>();

        Self::from_sorted(&cards)
    }

    /// Creates a hand from cards already known to be distinct and sorted.
    fn from_sorted(cards: &[Card]) -> Self {
        let mut sorted = [cards[0]; Hand::SIZE];
        sorted.copy_from_slice(cards);
        Self {
            cards: sorted,
            sorted,
            category: OnceLock::new(),
            rank_counts: OnceLock::new(),
        }
    }

    /// The hand cards in the order they were given.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The hand cards sorted by position.
    pub fn sorted_cards(&self) -> &[Card] {
        &self.sorted
    }

    /// The sorted cards positions.
    pub fn positions(&self) -> [u8; Hand::SIZE] {
        self.sorted.map(|c| c.position())
    }

    /// The cards ranks aligned to the sorted positions.
    pub fn ranks(&self) -> [Rank; Hand::SIZE] {
        self.sorted.map(|c| c.rank())
    }

    /// The cards suits aligned to the sorted positions.
    pub fn suits(&self) -> [Suit; Hand::SIZE] {
        self.sorted.map(|c| c.suit())
    }

    /// Checks if this hand contains the card at the given position.
    pub fn contains(&self, pos: u8) -> bool {
        self.sorted.iter().any(|c| c.position() == pos)
    }

    /// The 52 bits mask for this hand.
    pub fn to_bitmask(&self) -> [bool; Deck::SIZE] {
        let mut bits = [false; Deck::SIZE];
        for card in &self.sorted {
            bits[card.position() as usize] = true;
        }
        bits
    }

    /// The number of cards for each rank in this hand.
    pub fn rank_counts(&self) -> &AHashMap<Rank, usize> {
        self.rank_counts.get_or_init(|| {
            let mut counts = AHashMap::with_capacity(Hand::SIZE);
            for card in &self.sorted {
                *counts.entry(card.rank()).or_insert(0) += 1;
            }
            counts
        })
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        *self.category.get_or_init(|| self.eval_category())
    }

    /// The hand category score from 0 (high card) to 9 (royal straight flush).
    pub fn category_score(&self) -> u32 {
        self.category().score()
    }

    /// The hand category name.
    pub fn hand_kind_label(&self) -> &'static str {
        self.category().label()
    }

    fn eval_category(&self) -> HandCategory {
        let counts = self.rank_counts();
        let pairs = counts.values().filter(|&&n| n == 2).count();
        let has_count = |n| counts.values().any(|&c| c == n);

        // The checks order matters, a two pair is detected before anything else.
        if pairs == 2 {
            return HandCategory::TwoPair;
        }

        if has_count(4) {
            return HandCategory::FourOfAKind;
        }

        if pairs == 1 {
            return if has_count(3) {
                HandCategory::FullHouse
            } else {
                HandCategory::OnePair
            };
        }

        if has_count(3) {
            return HandCategory::ThreeOfAKind;
        }

        // All ranks are distinct from here on.
        let ranks = self.ranks().map(|r| r as u8);
        let top_run = ranks[1..].windows(2).all(|w| w[1] - w[0] == 1);
        let is_royal = top_run && ranks[1] - ranks[0] == 9;
        let is_straight = is_royal || (top_run && ranks[1] - ranks[0] == 1);

        let suits = self.suits();
        let is_flush = suits.iter().all(|&s| s == suits[0]);

        match (is_straight, is_flush) {
            (true, true) if is_royal => HandCategory::RoyalStraightFlush,
            (true, true) => HandCategory::StraightFlush,
            (true, false) => HandCategory::Straight,
            (false, true) => HandCategory::Flush,
            (false, false) => HandCategory::HighCard,
        }
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.sorted == other.sorted
    }
}

impl Eq for Hand {}

impl hash::Hash for Hand {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        hash::Hash::hash(&self.sorted, state);
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand({self})")
    }
}

impl FromStr for Hand {
    type Err = Error;

    /// Parses a hand like `3D 6H TH QS KS`, commas are also accepted.
    fn from_str(s: &str) -> Result<Self> {
        let cards = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Card>>>()?;
        Self::new(&cards)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.cards.to_vec()
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = Error;

    fn try_from(cards: Vec<Card>) -> Result<Self> {
        Self::new(&cards)
    }
}

/// A poker hand category, ordered from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// No pairs, straights or flushes.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three cards with the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards with the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// A straight with all cards of the same suit.
    StraightFlush,
    /// Four cards with the same rank.
    FourOfAKind,
    /// Ten to ace all with the same suit.
    RoyalStraightFlush,
}

impl HandCategory {
    /// All categories from the weakest to the strongest.
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::StraightFlush,
        HandCategory::FourOfAKind,
        HandCategory::RoyalStraightFlush,
    ];

    /// Returns all categories.
    pub fn categories() -> impl DoubleEndedIterator<Item = HandCategory> {
        Self::ALL.into_iter()
    }

    /// The category score.
    pub fn score(&self) -> u32 {
        *self as u32
    }

    /// The category name.
    pub fn label(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "Pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::StraightFlush => "Straight flush",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::RoyalStraightFlush => "Royal straight flush",
        }
    }
}

impl TryFrom<u32> for HandCategory {
    type Error = Error;

    fn try_from(score: u32) -> Result<Self> {
        Self::ALL
            .get(score as usize)
            .copied()
            .ok_or(Error::OutOfRange(score as usize))
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Deck {
    /// Calls the `f` closure for each five cards hand in this deck.
    pub fn for_each_hand<F>(&self, mut f: F)
    where
        F: FnMut(&Hand),
    {
        let cards = &self.cards;
        let n = cards.len();

        let mut h = [Card::new(Rank::Ace, Suit::Clubs); Hand::SIZE];
        for c1 in 0..n {
            h[0] = cards[c1];

            for c2 in (c1 + 1)..n {
                h[1] = cards[c2];

                for c3 in (c2 + 1)..n {
                    h[2] = cards[c3];

                    for c4 in (c3 + 1)..n {
                        h[3] = cards[c4];

                        for c5 in (c4 + 1)..n {
                            h[4] = cards[c5];
                            f(&Hand::from_sorted(&h));
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn hand_categories() {
        assert_eq!(hand("3D 6H 10H QS KS").category_score(), 0);
        assert_eq!(hand("4S 6C 6S 6D QC").category_score(), 3);
        assert_eq!(hand("5S 5H 6H JD JH").category_score(), 2);
        assert_eq!(hand("8C 9H 10H JC QS").category_score(), 4);

        assert_eq!(hand("2C 2D 7H 9S KC").category(), HandCategory::OnePair);
        assert_eq!(hand("AH 5H 9H JH KH").category(), HandCategory::Flush);
        assert_eq!(hand("QC QD QH 4S 4C").category(), HandCategory::FullHouse);
        assert_eq!(hand("9C 9S 9D 9H 2C").category(), HandCategory::FourOfAKind);
        assert_eq!(hand("5S 6S 7S 8S 9S").category(), HandCategory::StraightFlush);
        assert_eq!(hand("AD 2D 3D 4D 5D").category(), HandCategory::StraightFlush);
        assert_eq!(hand("AC 2H 3D 4S 5C").category(), HandCategory::Straight);
        assert_eq!(hand("TC JH QD KS AC").category(), HandCategory::Straight);
        assert_eq!(hand("JC QH KD AS 2C").category(), HandCategory::HighCard);

        for suit in Suit::suits() {
            let cards = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]
                .map(|r| Card::new(r, suit));
            let royal = Hand::new(&cards).unwrap();
            assert_eq!(royal.category_score(), 9);
            assert_eq!(royal.hand_kind_label(), "Royal straight flush");
        }
    }

    #[test]
    fn category_is_stable() {
        let mut rng = StdRng::seed_from_u64(101);
        for _ in 0..1_000 {
            let h = Hand::random(&mut rng);
            let first = h.category_score();
            assert!(first <= 9);
            assert_eq!(h.category_score(), first);
            assert_eq!(h.clone().category_score(), first);

            // A fresh hand from the same cards gives the same score.
            let same = Hand::new(h.cards()).unwrap();
            assert_eq!(same.category_score(), first);
        }
    }

    #[test]
    fn categories_frequencies() {
        let mut counts = [0usize; 10];
        Deck::default().for_each_hand(|h| {
            counts[h.category_score() as usize] += 1;
        });

        assert_eq!(counts.iter().sum::<usize>(), 2_598_960);
        assert_eq!(counts[HandCategory::HighCard as usize], 1_302_540);
        assert_eq!(counts[HandCategory::OnePair as usize], 1_098_240);
        assert_eq!(counts[HandCategory::TwoPair as usize], 123_552);
        assert_eq!(counts[HandCategory::ThreeOfAKind as usize], 54_912);
        assert_eq!(counts[HandCategory::Straight as usize], 10_200);
        assert_eq!(counts[HandCategory::Flush as usize], 5_108);
        assert_eq!(counts[HandCategory::FullHouse as usize], 3_744);
        assert_eq!(counts[HandCategory::StraightFlush as usize], 36);
        assert_eq!(counts[HandCategory::FourOfAKind as usize], 624);
        assert_eq!(counts[HandCategory::RoyalStraightFlush as usize], 4);
    }

    #[test]
    fn rank_counts() {
        let h = hand("QC QD QH 4S 4C");
        let counts = h.rank_counts();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(&Rank::Queen), Some(&3));
        assert_eq!(counts.get(&Rank::Four), Some(&2));
    }

    #[test]
    fn hand_size() {
        let deck = Deck::default().into_iter().collect::<Vec<_>>();
        for n in [0, 1, 4, 6, 7, 52] {
            assert_eq!(Hand::new(&deck[..n]), Err(Error::InvalidHandSize(n)));
        }

        assert!(Hand::new(&deck[10..15]).is_ok());
    }

    #[test]
    fn duplicate_cards() {
        let deck = Deck::default().into_iter().collect::<Vec<_>>();

        for n in 2..=7 {
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }

                    let mut cards = deck[20..20 + n].to_vec();
                    cards[j] = cards[i];

                    let res = Hand::new(&cards);
                    assert!(res.is_err(), "{cards:?}");
                    if n == Hand::SIZE {
                        assert_eq!(res, Err(Error::DuplicateCard(cards[i])));
                    }
                }
            }
        }
    }

    #[test]
    fn hand_positions() {
        let h = hand("KS 3D QS 6H TH");
        assert_eq!(h.positions(), [10, 23, 39, 45, 49]);
        assert_eq!(
            h.ranks(),
            [Rank::Trey, Rank::Six, Rank::Ten, Rank::Queen, Rank::King]
        );
        assert_eq!(
            h.suits(),
            [Suit::Diamonds, Suit::Hearts, Suit::Hearts, Suit::Spades, Suit::Spades]
        );

        // Display keeps the original order.
        assert_eq!(h.to_string(), "KS 3D QS 6H TH");

        let p = Hand::from_positions(&h.positions()).unwrap();
        assert_eq!(p, h);
        assert_eq!(Hand::from_positions(&[0, 1, 2, 3, 52]), Err(Error::OutOfRange(52)));
    }

    #[test]
    fn hand_bitmask() {
        let h = hand("AC 2S 3D 4H KH");
        let bits = h.to_bitmask();
        assert_eq!(bits.iter().filter(|b| **b).count(), Hand::SIZE);
        assert!(bits[0] && bits[5] && bits[10] && bits[15] && bits[51]);
        assert_eq!(Hand::from_bitmask(&bits), Ok(h));

        let mut bits = [false; Deck::SIZE];
        bits[..4].fill(true);
        assert_eq!(Hand::from_bitmask(&bits), Err(Error::InvalidHandSize(4)));

        bits[4..6].fill(true);
        assert_eq!(Hand::from_bitmask(&bits), Err(Error::InvalidHandSize(6)));
    }

    #[test]
    fn random_hands() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut hands = HashSet::default();
        for _ in 0..1_000 {
            let h = Hand::random(&mut rng);
            let positions = h.positions();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            assert!(positions.iter().all(|&p| (p as usize) < Deck::SIZE));
            hands.insert(h);
        }

        // Collisions are possible but very unlikely in 2.6M hands.
        assert!(hands.len() > 990);
    }

    #[test]
    fn hand_from_string() {
        assert_eq!(hand("3D,6H,TH,QS,KS"), hand("3D 6H 10H QS KS"));
        assert!(matches!("3D 6H TH QS".parse::<Hand>(), Err(Error::InvalidHandSize(4))));
        assert!(matches!("3D 6H TH QS 3D".parse::<Hand>(), Err(Error::DuplicateCard(_))));
        assert!(matches!("3D 6H TH QS ZZ".parse::<Hand>(), Err(Error::InvalidCard(_))));
    }

    #[test]
    fn category_labels() {
        let labels = HandCategory::categories()
            .map(|c| c.label())
            .collect::<HashSet<_>>();
        assert_eq!(labels.len(), 10);

        for (score, category) in HandCategory::categories().enumerate() {
            assert_eq!(category.score(), score as u32);
            assert_eq!(HandCategory::try_from(score as u32), Ok(category));
        }

        assert_eq!(HandCategory::try_from(10), Err(Error::OutOfRange(10)));
        assert_eq!(hand("5S 5H 6H JD JH").hand_kind_label(), "Two pair");
    }

    #[test]
    fn hand_serde() {
        let h = hand("KS 3D QS 6H TH");
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, "[49,10,45,23,39]");

        let de = serde_json::from_str::<Hand>(&json).unwrap();
        assert_eq!(de, h);
        assert_eq!(de.to_string(), h.to_string());
        assert_eq!(de.category(), HandCategory::HighCard);

        // Positions outside the deck are rejected.
        assert!(serde_json::from_str::<Hand>("[0, 1, 2, 3, 200]").is_err());
        assert!(serde_json::from_str::<Hand>("[0, 1, 2, 3, 52]").is_err());
        assert!(serde_json::from_str::<Hand>("[0, 1, 2, 3]").is_err());
        assert!(serde_json::from_str::<Hand>("[0, 1, 2, 3, 3]").is_err());
    }
}
