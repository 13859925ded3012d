// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// All ranks in position order.
pub const RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Deuce,
    Rank::Trey,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

/// All suits in position order.
pub const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Diamonds, Suit::Hearts];

/// A Poker card.
///
/// A card is identified by its position in an ordered deck, the position is
/// computed from the rank and suit indices as:
///
/// ```text
///   position = rank * 4 + suit
///   rank = ace=0, deuce=1, trey=2, ..., ten=9, jack=10, queen=11, king=12
///   suit = clubs=0, spades=1, diamonds=2, hearts=3
/// ```
///
/// so that the ace of clubs has position 0 and the king of hearts position 51.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Create a card given a rank and suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self((rank as u8) * SUITS.len() as u8 + suit as u8)
    }

    /// Create a card from its position in the deck.
    pub fn from_position(pos: usize) -> Result<Card> {
        if pos < Deck::SIZE {
            Ok(Self(pos as u8))
        } else {
            Err(Error::OutOfRange(pos))
        }
    }

    /// Create a random card drawing rank and suit independently.
    pub fn random<R: Rng>(rng: &mut R) -> Card {
        let rank = RANKS[rng.random_range(0..RANKS.len())];
        let suit = SUITS[rng.random_range(0..SUITS.len())];
        Self::new(rank, suit)
    }

    /// This card position in the deck.
    #[inline]
    pub fn position(&self) -> u8 {
        self.0
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        RANKS[(self.0 / 4) as usize]
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        SUITS[(self.0 % 4) as usize]
    }
}

impl TryFrom<u8> for Card {
    type Error = Error;

    fn try_from(pos: u8) -> Result<Self> {
        Card::from_position(pos as usize)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.position()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = Error;

    /// Parses a card like `AS`, `TH` or `10H`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.char_indices().last() {
            Some((idx, _)) if idx > 0 => {
                let rank = s[..idx].parse::<Rank>()?;
                let suit = s[idx..].parse::<Suit>()?;
                Ok(Card::new(rank, suit))
            }
            _ => Err(Error::InvalidCard(s.to_string())),
        }
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Ace
    Ace = 0,
    /// Deuce
    Deuce,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        RANKS.into_iter()
    }
}

impl TryFrom<u8> for Rank {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        RANKS
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::InvalidCard(format!("rank {value}")))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Ace => 'A',
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        };

        write!(f, "{rank}")
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "A" => Rank::Ace,
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            _ => return Err(Error::InvalidCard(format!("rank {s}"))),
        };

        Ok(rank)
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Spades suit.
    Spades = 1,
    /// Diamonds suit.
    Diamonds = 2,
    /// Hearts suit.
    Hearts = 3,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        SUITS.into_iter()
    }

    /// Returns a random suit.
    pub fn random<R: Rng>(rng: &mut R) -> Suit {
        SUITS[rng.random_range(0..SUITS.len())]
    }
}

impl TryFrom<u8> for Suit {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        SUITS
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::InvalidCard(format!("suit {value}")))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
        };

        write!(f, "{suit}")
    }
}

impl FromStr for Suit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let suit = match s.to_ascii_uppercase().as_str() {
            "C" | "CLUB" | "CLUBS" => Suit::Clubs,
            "S" | "SPADE" | "SPADES" => Suit::Spades,
            "D" | "DIAMOND" | "DIAMONDS" => Suit::Diamonds,
            "H" | "HEART" | "HEARTS" => Suit::Hearts,
            _ => return Err(Error::InvalidCard(format!("suit {s}"))),
        };

        Ok(suit)
    }
}

/// The 52 cards in position order.
#[derive(Debug)]
pub struct Deck {
    pub(crate) cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;
}

impl Default for Deck {
    fn default() -> Self {
        let cards = (0..Deck::SIZE as u8).map(Card).collect();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn card_position() {
        let mut positions = HashSet::default();
        for card in Deck::default() {
            let pos = card.position() as usize;
            assert_eq!(pos, card.rank() as usize * 4 + card.suit() as usize);
            assert_eq!(Card::from_position(pos), Ok(card));
            positions.insert(pos);
        }

        // Check uniquness.
        assert_eq!(positions.len(), Deck::SIZE);

        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).position(), 0);
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).position(), 3);
        assert_eq!(Card::new(Rank::Ten, Suit::Spades).position(), 37);
        assert_eq!(Card::new(Rank::King, Suit::Hearts).position(), 51);
    }

    #[test]
    fn card_from_position_out_of_range() {
        assert_eq!(Card::from_position(52), Err(Error::OutOfRange(52)));
        assert_eq!(Card::from_position(1000), Err(Error::OutOfRange(1000)));
    }

    #[test]
    fn rank_suit_try_from() {
        for (idx, rank) in Rank::ranks().enumerate() {
            assert_eq!(Rank::try_from(idx as u8), Ok(rank));
        }

        for (idx, suit) in Suit::suits().enumerate() {
            assert_eq!(Suit::try_from(idx as u8), Ok(suit));
        }

        assert!(matches!(Rank::try_from(13), Err(Error::InvalidCard(_))));
        assert!(matches!(Suit::try_from(4), Err(Error::InvalidCard(_))));
    }

    #[test]
    fn card_from_string() {
        assert_eq!("KD".parse::<Card>(), Ok(Card::new(Rank::King, Suit::Diamonds)));
        assert_eq!("th".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("10H".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("2C".parse::<Card>(), Ok(Card::new(Rank::Deuce, Suit::Clubs)));

        for card in Deck::default() {
            assert_eq!(card.to_string().parse::<Card>(), Ok(card));
        }

        assert!(matches!("".parse::<Card>(), Err(Error::InvalidCard(_))));
        assert!(matches!("H".parse::<Card>(), Err(Error::InvalidCard(_))));
        assert!(matches!("1H".parse::<Card>(), Err(Error::InvalidCard(_))));
        assert!(matches!("AX".parse::<Card>(), Err(Error::InvalidCard(_))));
    }

    #[test]
    fn random_card_covers_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::default();
        for _ in 0..5_000 {
            seen.insert(Card::random(&mut rng));
        }

        assert_eq!(seen.len(), Deck::SIZE);
    }

    #[test]
    fn card_display_and_serde() {
        for card in Deck::default() {
            let text = format!("{}{}", card.rank(), card.suit());
            assert_eq!(card.to_string(), text);
            assert_eq!(format!("{card:?}"), format!("Card({text})"));

            let pos = u8::from(card);
            assert_eq!(Card::try_from(pos), Ok(card));
        }

        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "TH");
        assert_eq!(Card::try_from(52), Err(Error::OutOfRange(52)));

        let json = serde_json::to_string(&Card::new(Rank::King, Suit::Hearts)).unwrap();
        assert_eq!(json, "51");
        assert_eq!(serde_json::from_str::<Card>("3").unwrap(), Card::new(Rank::Ace, Suit::Hearts));
        assert!(serde_json::from_str::<Card>("52").is_err());
        assert!(serde_json::from_str::<Card>("200").is_err());
    }
}
