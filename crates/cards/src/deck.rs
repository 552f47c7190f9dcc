// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[cfg(feature = "parallel")]
mod parallel;

/// A Poker card.
///
/// A card is a (rank, suit) pair with rank values from 2 to 14 (the ace),
/// ordered by rank first and then suit so that sorting a hand gives a
/// canonical order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a rank and a suit.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Self { rank, suit }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// This card unique index in `0..52`, used for bitmask sets.
    pub fn index(&self) -> usize {
        (self.rank.value() as usize - 2) * 4 + self.suit as usize
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

/// Error parsing a card token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCardError {
    /// The token rank is not one of 2-9, T, J, Q, K, A or 2..14.
    #[error("unknown rank in card token {0:?}")]
    UnknownRank(String),
    /// The token suit is not one of c, d, h, s.
    #[error("unknown suit in card token {0:?}")]
    UnknownSuit(String),
    /// The token is empty or truncated.
    #[error("malformed card token {0:?}")]
    Malformed(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses a card token.
    ///
    /// Two notations are accepted, the `<rank><suit>` tokens produced by
    /// the card recognizer (`Ah`, `Tc`, `10d`) and the legacy
    /// `<SUIT><NUMBER>` notation (`H14`, `C8`) found in persisted tables.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseCardError::Malformed(s.to_string());
        if s.len() < 2 || !s.is_ascii() {
            return Err(malformed());
        }

        let first = s.chars().next().ok_or_else(malformed)?;
        let (rank_str, suit_str) = if matches!(
            first,
            'H' | 'S' | 'C' | 'D' | 'h' | 's' | 'c' | 'd'
        ) && s[1..].bytes().all(|b| b.is_ascii_digit())
        {
            // Legacy suit-first notation, the suit letter is followed by
            // the rank value ("H14").
            let (suit, rank) = s.split_at(1);
            (rank, suit)
        } else {
            s.split_at(s.len() - 1)
        };

        let rank = match rank_str.to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" | "11" => Rank::Jack,
            "Q" | "12" => Rank::Queen,
            "K" | "13" => Rank::King,
            "A" | "14" => Rank::Ace,
            _ => return Err(ParseCardError::UnknownRank(s.to_string())),
        };

        let suit = match suit_str {
            "C" | "c" => Suit::Clubs,
            "D" | "d" => Suit::Diamonds,
            "H" | "h" => Suit::Hearts,
            "S" | "s" => Suit::Spades,
            _ => return Err(ParseCardError::UnknownSuit(s.to_string())),
        };

        Ok(Card::new(rank, suit))
    }
}

/// Parses a whitespace separated sequence of card tokens.
///
/// Tokens are parsed in order, the first malformed token aborts the parse.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Card rank, the ace is high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 2,
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
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks in ascending order.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank numeric value, from 2 for the deuce to 14 for the ace.
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
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
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

/// A cards Deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// The cards in the deck, in deck order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Hands are enumerated in lexicographic order over the deck order so
    /// that repeated enumerations index the same hand at the same
    /// position.
    ///
    /// Panics if k is not 2 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!(2 <= k && k <= 7, "2 <= k <= 7");

        if k > self.cards.len() {
            return;
        }

        let n = self.cards.len();
        let mut h = vec![Card::new(Rank::Ace, Suit::Hearts); 7];

        for c1 in 0..n {
            h[0] = self.cards[c1];

            for c2 in (c1 + 1)..n {
                h[1] = self.cards[c2];

                if k == 2 {
                    f(&h[0..k]);
                    continue;
                }

                for c3 in (c2 + 1)..n {
                    h[2] = self.cards[c3];

                    if k == 3 {
                        f(&h[0..k]);
                        continue;
                    }

                    for c4 in (c3 + 1)..n {
                        h[3] = self.cards[c4];

                        if k == 4 {
                            f(&h[0..k]);
                            continue;
                        }

                        for c5 in (c4 + 1)..n {
                            h[4] = self.cards[c5];

                            if k == 5 {
                                f(&h[0..k]);
                                continue;
                            }

                            for c6 in (c5 + 1)..n {
                                h[5] = self.cards[c6];

                                if k == 6 {
                                    f(&h[0..k]);
                                    continue;
                                }

                                for c7 in (c6 + 1)..n {
                                    h[6] = self.cards[c7];
                                    f(&h[0..k]);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
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

/// Calls the `f` closure for each k-subset of the given cards.
///
/// Subsets are enumerated in lexicographic order over the input order,
/// each subset has no duplicate cards and no subset is generated twice as
/// long as the input cards are distinct.
///
/// Panics if `k > cards.len()` or the input contains duplicate cards.
pub fn for_each_combination<F>(cards: &[Card], k: usize, mut f: F)
where
    F: FnMut(&[Card]),
{
    let n = cards.len();
    assert!(k <= n, "k={k} must be <= {n} cards");

    let mut seen = 0u64;
    for c in cards {
        assert!(seen & (1 << c.index()) == 0, "duplicate card {c}");
        seen |= 1 << c.index();
    }

    if k == 0 {
        return;
    }

    let mut idx = (0..k).collect::<Vec<_>>();
    let mut h = vec![cards[0]; k];

    loop {
        for (slot, &i) in idx.iter().enumerate() {
            h[slot] = cards[i];
        }
        f(&h);

        // Advance the rightmost index that has room to move.
        let mut j = k;
        loop {
            if j == 0 {
                return;
            }
            j -= 1;
            if idx[j] < j + n - k {
                break;
            }
        }

        idx[j] += 1;
        for t in (j + 1)..k {
            idx[t] = idx[t - 1] + 1;
        }
    }
}

/// Returns all k-subsets of the given cards in lexicographic order.
///
/// Panics if `k > cards.len()` or the input contains duplicate cards.
pub fn combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    let mut out = Vec::new();
    for_each_combination(cards, k, |h| out.push(h.to_vec()));
    out
}
