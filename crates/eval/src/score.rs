// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The 5 cards hand scorer.
//!
//! A hand maps to a [Score] whose integer part is the category band and
//! whose fraction encodes the kickers, most significant kicker in the
//! largest digit group. Bands ascending: high card below 100, one pair
//! from 100, two pair from 200, three of a kind from 300, straight from
//! 400, flush from 500, full house from 600, four of a kind from 700,
//! straight flush from 800, royal flush exactly 900.
//!
//! Two historical quirks of the scale are kept on purpose, changing
//! either would reorder every persisted rank table:
//!
//! - the wheel (A-2-3-4-5) is not recognized as a straight and scores as
//!   high card;
//! - in the three of a kind band the top kicker lands in the same digit
//!   group as the triple rank, so a high kicker can outweigh a higher
//!   triple.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use railbird_cards::Card;

use crate::EvalError;

/// A 5 cards hand score.
///
/// Scores are totally ordered, a stronger hand always compares greater
/// within its category band (up to the quirks documented in the module
/// docs).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw score value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The hand category this score falls in.
    pub fn category(&self) -> HandCategory {
        match self.0 {
            v if v < 100.0 => HandCategory::HighCard,
            v if v < 200.0 => HandCategory::OnePair,
            v if v < 300.0 => HandCategory::TwoPair,
            v if v < 400.0 => HandCategory::ThreeOfAKind,
            v if v < 500.0 => HandCategory::Straight,
            v if v < 600.0 => HandCategory::Flush,
            v if v < 700.0 => HandCategory::FullHouse,
            v if v < 800.0 => HandCategory::FourOfAKind,
            v if v < 900.0 => HandCategory::StraightFlush,
            _ => HandCategory::RoyalFlush,
        }
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The standard Poker hand categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    /// High card.
    HighCard,
    /// One pair.
    OnePair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
    /// Royal flush.
    RoyalFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        };

        write!(f, "{name}")
    }
}

/// Scores a 5 cards hand.
///
/// The score is a pure function of the hand as a set, the input order
/// does not matter. Hands with a cardinality other than 5 or containing
/// duplicate cards are rejected with [EvalError::InvalidHand].
pub fn score_hand(cards: &[Card]) -> Result<Score, EvalError> {
    if cards.len() != 5 {
        return Err(EvalError::InvalidHand(format!(
            "expected 5 cards, got {}",
            cards.len()
        )));
    }

    let mut seen = 0u64;
    for c in cards {
        if seen & (1 << c.index()) != 0 {
            return Err(EvalError::InvalidHand(format!("duplicate card {c}")));
        }
        seen |= 1 << c.index();
    }

    Ok(Score(score5(cards)))
}

/// Scores 5 distinct cards, the caller guarantees the contract.
pub(crate) fn score5(cards: &[Card]) -> f64 {
    debug_assert_eq!(cards.len(), 5);

    let mut ranks = [0u8; 5];
    for (r, c) in ranks.iter_mut().zip(cards) {
        *r = c.rank().value();
    }
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());

    // Group the descending ranks by multiplicity, pairs and singles come
    // out in descending rank order.
    let mut quad = None;
    let mut trip = None;
    let mut pairs = [0u8; 2];
    let mut npairs = 0;
    let mut singles = [0u8; 5];
    let mut nsingles = 0;

    let mut i = 0;
    while i < 5 {
        let mut run = 1;
        while i + run < 5 && ranks[i + run] == ranks[i] {
            run += 1;
        }
        match run {
            4 => quad = Some(ranks[i]),
            3 => trip = Some(ranks[i]),
            2 => {
                pairs[npairs] = ranks[i];
                npairs += 1;
            }
            _ => {
                singles[nsingles] = ranks[i];
                nsingles += 1;
            }
        }
        i += run;
    }

    let hi = ranks[0] as f64;

    // Five distinct consecutive ranks, the ace only plays high so the
    // wheel does not qualify.
    let straight = nsingles == 5 && ranks[0] - ranks[4] == 4;

    if flush && ranks == [14, 13, 12, 11, 10] {
        900.0
    } else if flush && straight {
        800.0 + hi
    } else if let Some(q) = quad {
        700.0 + q as f64 + singles[0] as f64 / 100.0
    } else if let Some(t) = trip {
        if npairs == 1 {
            600.0 + t as f64 + pairs[0] as f64 / 100.0
        } else {
            // Top kicker shares the digit group of the triple rank.
            300.0 + t as f64 + singles[0] as f64 + singles[1] as f64 / 1000.0
        }
    } else if npairs == 2 {
        200.0 + pairs[0] as f64 + pairs[1] as f64 / 100.0 + singles[0] as f64 / 1000.0
    } else if npairs == 1 {
        100.0
            + pairs[0] as f64
            + singles[0] as f64 / 100.0
            + singles[1] as f64 / 1000.0
            + singles[2] as f64 / 10000.0
    } else if flush {
        500.0 + hi / 100.0
    } else if straight {
        400.0 + hi
    } else {
        hi + ranks[1] as f64 / 100.0
            + ranks[2] as f64 / 1000.0
            + ranks[3] as f64 / 10000.0
            + ranks[4] as f64 / 100000.0
    }
}
