// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Railbird Poker cards types.
//!
//! This crate defines types to create cards:
//!
//! ```
//! # use railbird_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = Card::new(Rank::King, Suit::Diamonds);
//! ```
//!
//! cards can also be parsed from the tokens produced by upstream
//! recognizers, in either `Ah` or legacy `H14` notation:
//!
//! ```
//! # use railbird_cards::{Card, Rank, Suit, parse_cards};
//! let cards = parse_cards("Ah Kd Tc").unwrap();
//! assert_eq!(cards[0], "H14".parse::<Card>().unwrap());
//! ```
//!
//! and a [Deck] type for enumerating k-cards hands in a fixed
//! deterministic order. For example to iterate through all 5 cards hands:
//!
//! ```no_run
//! # use railbird_cards::{Card, Deck, Rank, Suit};
//! // Iterate through all 5 cards hands (2.6M hands).
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
//!
//! The **`parallel`** feature enables partitioned iteration with a given
//! number of tasks, the closure `task_id` can be used to store per task
//! data to reduce contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each() {
//! # use std::sync::atomic;
//! # use railbird_cards::{Card, Deck, Rank, Suit};
//! let counter = atomic::AtomicU64::new(0);
//! Deck::default().par_for_each(4, 5, |task_id, hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 2_598_960);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit, combinations, for_each_combination, parse_cards};
