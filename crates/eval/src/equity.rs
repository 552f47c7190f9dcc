// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The expected value estimator for partial hands.
//!
//! Given 5, 6, or 7 known cards (hole cards plus revealed board) the
//! estimator returns the best score the cards make now and an estimate of
//! the score once the remaining board cards are revealed.
//!
//! The future estimate averages the rank table entries that share four
//! cards with a subset of the known cards, it is a table driven heuristic
//! and not a conditional distribution over the undrawn cards. With 5
//! known cards both 3-card and 4-card subsets are scanned; a 3-card
//! subset can never share four cards with an entry so only the 4-card
//! subsets contribute samples. Kept as is, the estimate feeds the same
//! percentile scale as the current score.
use ahash::AHashMap;
use parking_lot::RwLock;

use railbird_cards::{Card, for_each_combination};

use crate::{
    EvalError,
    score::{Score, score5},
    table::{RankTable, hand_mask},
};

/// The current and projected scores of a partial hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equity {
    /// Best score over the 5 cards hands the known cards make now.
    pub current: Score,
    /// Estimated score once the remaining board cards are revealed, equal
    /// to `current` when the hand is complete.
    pub future: Score,
}

/// Estimates hand equity against the rank table.
///
/// The estimator holds a reference to the immutable table and a session
/// cache of subset scans keyed by the known cards and the subset size, so
/// re-evaluating the same board across streets does not rescan the table.
/// Evaluations only take `&self` and can run from multiple threads.
pub struct EquityEstimator<'a> {
    table: &'a RankTable,
    cache: RwLock<AHashMap<(u64, usize), (f64, usize)>>,
}

impl<'a> EquityEstimator<'a> {
    /// Creates an estimator for the given table.
    pub fn new(table: &'a RankTable) -> Self {
        Self {
            table,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Evaluates 5, 6, or 7 known distinct cards.
    ///
    /// Any other cardinality fails with
    /// [EvalError::UnsupportedHandSize], duplicate cards with
    /// [EvalError::InvalidHand].
    pub fn evaluate(&self, cards: &[Card]) -> Result<Equity, EvalError> {
        if !matches!(cards.len(), 5..=7) {
            return Err(EvalError::UnsupportedHandSize(cards.len()));
        }

        let mut seen = 0u64;
        for c in cards {
            if seen & (1 << c.index()) != 0 {
                return Err(EvalError::InvalidHand(format!("duplicate card {c}")));
            }
            seen |= 1 << c.index();
        }

        let current = if cards.len() == 5 {
            Score::new(score5(cards))
        } else {
            let mut best = f64::MIN;
            for_each_combination(cards, 5, |h| best = best.max(score5(h)));
            Score::new(best)
        };

        let future = match cards.len() {
            5 => {
                let (sum3, count3) = self.subset_scan(cards, 3);
                let (sum4, count4) = self.subset_scan(cards, 4);
                mean_or(sum3 + sum4, count3 + count4, current)
            }
            6 => {
                let (sum, count) = self.subset_scan(cards, 4);
                mean_or(sum, count, current)
            }
            // No draws remain on a complete hand.
            _ => current,
        };

        Ok(Equity { current, future })
    }

    /// Sum and count of the scores of table entries sharing exactly four
    /// cards with some k-subset of the known cards, entries counted once
    /// per matching subset.
    fn subset_scan(&self, cards: &[Card], k: usize) -> (f64, usize) {
        let key = (hand_mask(cards), k);
        if let Some(&cached) = self.cache.read().get(&key) {
            return cached;
        }

        let mut sum = 0.0;
        let mut count = 0usize;
        for_each_combination(cards, k, |subset| {
            let sm = hand_mask(subset);
            for (e, &m) in self.table.entries().iter().zip(self.table.masks()) {
                if (sm & m).count_ones() == 4 {
                    sum += e.score.value();
                    count += 1;
                }
            }
        });

        self.cache.write().insert(key, (sum, count));
        (sum, count)
    }
}

/// The sample mean, or the fallback when there are no samples.
fn mean_or(sum: f64, count: usize, fallback: Score) -> Score {
    if count == 0 {
        fallback
    } else {
        Score::new(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railbird_cards::{Deck, combinations, parse_cards};

    /// A 10 cards deck keeps the scans small: C(10,5) = 252 entries.
    fn small_table() -> (Deck, RankTable) {
        let mut deck = Deck::default();
        for &card in Deck::default().cards().iter().take(42) {
            deck.remove(card);
        }
        assert_eq!(deck.count(), 10);
        let table = RankTable::build(&deck);
        (deck, table)
    }

    #[test]
    fn five_cards_current_is_hand_score() {
        let (deck, table) = small_table();
        let estimator = EquityEstimator::new(&table);

        let cards = deck.cards()[..5].to_vec();
        let equity = estimator.evaluate(&cards).unwrap();
        assert_eq!(equity.current, Score::new(score5(&cards)));
    }

    #[test]
    fn five_cards_future_matches_brute_force() {
        let (deck, table) = small_table();
        let estimator = EquityEstimator::new(&table);

        let cards = deck.cards()[..5].to_vec();
        let equity = estimator.evaluate(&cards).unwrap();

        // Average over table entries containing a 4-subset of the known
        // cards, counted once per matching subset; 3-subsets never match.
        let mut sum = 0.0;
        let mut count = 0;
        for k in [3, 4] {
            for subset in combinations(&cards, k) {
                for e in table.entries() {
                    let shared = subset.iter().filter(|c| e.cards.contains(c)).count();
                    if shared == 4 {
                        sum += e.score.value();
                        count += 1;
                    }
                }
            }
        }
        assert!(count > 0);
        assert_eq!(equity.future, Score::new(sum / count as f64));
    }

    #[test]
    fn six_cards_current_is_best_subset() {
        let (deck, table) = small_table();
        let estimator = EquityEstimator::new(&table);

        let cards = deck.cards()[..6].to_vec();
        let equity = estimator.evaluate(&cards).unwrap();

        let best = combinations(&cards, 5)
            .into_iter()
            .map(|h| Score::new(score5(&h)))
            .max()
            .unwrap();
        assert_eq!(equity.current, best);
    }

    #[test]
    fn seven_cards_future_equals_current() {
        let (deck, table) = small_table();
        let estimator = EquityEstimator::new(&table);

        let cards = deck.cards()[..7].to_vec();
        let equity = estimator.evaluate(&cards).unwrap();
        assert_eq!(equity.future, equity.current);
    }

    #[test]
    fn repeated_evaluations_hit_the_cache() {
        let (deck, table) = small_table();
        let estimator = EquityEstimator::new(&table);

        let cards = deck.cards()[..6].to_vec();
        let first = estimator.evaluate(&cards).unwrap();
        assert_eq!(estimator.cache.read().len(), 1);

        let second = estimator.evaluate(&cards).unwrap();
        assert_eq!(first, second);
        assert_eq!(estimator.cache.read().len(), 1);
    }

    #[test]
    fn rejects_unsupported_sizes() {
        let (deck, table) = small_table();
        let estimator = EquityEstimator::new(&table);

        for n in [0, 2, 4, 8] {
            let cards = deck.cards()[..n].to_vec();
            assert_eq!(
                estimator.evaluate(&cards),
                Err(EvalError::UnsupportedHandSize(n))
            );
        }
    }

    #[test]
    fn rejects_duplicate_cards() {
        let (_, table) = small_table();
        let estimator = EquityEstimator::new(&table);

        let cards = parse_cards("Ah Kh Qh Jh Ah").unwrap();
        assert!(matches!(
            estimator.evaluate(&cards),
            Err(EvalError::InvalidHand(_))
        ));
    }
}
