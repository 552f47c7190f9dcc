// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Railbird Poker hand scorer and equity engine.
//!
//! The scorer maps a 5 cards hand to a [Score], a single ordered value
//! whose integer part is the hand category band and whose fraction
//! encodes the kickers:
//!
//! ```
//! # use railbird_eval::*;
//! let royal = score_hand(&parse_cards("Ah Kh Qh Jh Th").unwrap()).unwrap();
//! assert_eq!(royal.value(), 900.0);
//! assert_eq!(royal.category(), HandCategory::RoyalFlush);
//!
//! let pair = score_hand(&parse_cards("Ah Ad 9c 5s 2h").unwrap()).unwrap();
//! assert!(pair < royal);
//! ```
//!
//! The [RankTable] scores every 5 cards hand of a deck and sorts them
//! ascending, giving each hand a percentile used as a win probability
//! proxy by the [EquityEstimator] and the [should_call] advisor:
//!
//! ```no_run
//! # use railbird_eval::*;
//! // Score all 2.6M hands once per process.
//! let table = RankTable::build(&Deck::default());
//! let estimator = EquityEstimator::new(&table);
//!
//! let cards = parse_cards("Ah Kd 7c 2s 9h").unwrap();
//! let equity = estimator.evaluate(&cards).unwrap();
//!
//! let current = table.percentile(equity.current);
//! let future = table.percentile(equity.future);
//! let advice = should_call(2, current.max(future), 10.0, 2.0);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod advisor;
pub mod equity;
pub mod score;
pub mod table;

pub use advisor::{Action, Advice, should_call};
pub use equity::{Equity, EquityEstimator};
pub use score::{HandCategory, Score, score_hand};
pub use table::{Entry, RankTable};

// Reexport cards types.
pub use railbird_cards::{Card, Deck, ParseCardError, Rank, Suit, parse_cards};

/// Errors reported by the scorer and the equity estimator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// The hand has the wrong number of cards or contains duplicates.
    #[error("invalid hand: {0}")]
    InvalidHand(String),
    /// The equity estimator takes 5, 6, or 7 known cards.
    #[error("unsupported hand size {0}, expected 5, 6, or 7 cards")]
    UnsupportedHandSize(usize),
}
