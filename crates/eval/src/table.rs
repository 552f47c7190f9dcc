// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The global 5 cards hand rank table.
//!
//! The table scores every 5 cards hand of a deck and sorts them
//! ascending, the position of a hand is its percentile and the proxy for
//! its win probability. Building the full 52 cards table scores 2,598,960
//! hands, it is done once per process or persisted and reloaded.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use railbird_cards::{Card, Deck, parse_cards};

use crate::{
    EvalError,
    score::{Score, score5},
};

/// A scored hand in the rank table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The hand cards, in generation order.
    pub cards: [Card; 5],
    /// The hand score.
    pub score: Score,
}

/// The ascending sorted table of all 5 cards hand scores of a deck.
///
/// The table is immutable after construction and can be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct RankTable {
    entries: Vec<Entry>,
    masks: Vec<u64>,
}

impl RankTable {
    /// The number of 5 cards hands in a full 52 cards deck table.
    pub const FULL_SIZE: usize = 2_598_960;

    /// Builds the table by scoring every 5 cards hand of the deck.
    pub fn build(deck: &Deck) -> Self {
        let mut entries = if deck.count() == Deck::SIZE {
            Vec::with_capacity(Self::FULL_SIZE)
        } else {
            Vec::new()
        };
        deck.for_each(5, |hand| {
            entries.push(Entry {
                cards: [hand[0], hand[1], hand[2], hand[3], hand[4]],
                score: Score::new(score5(hand)),
            });
        });

        Self::from_entries(entries)
    }

    /// Builds the table scoring partitions of the hand space in parallel.
    ///
    /// Partitions are concatenated in index order before the final sort,
    /// the result is identical to [RankTable::build].
    #[cfg(feature = "parallel")]
    pub fn par_build(deck: &Deck, num_tasks: usize) -> Self {
        use parking_lot::Mutex;

        // Per task buffers, each task only ever locks its own.
        let parts = (0..num_tasks)
            .map(|_| Mutex::new(Vec::new()))
            .collect::<Vec<_>>();

        deck.par_for_each(num_tasks, 5, |task_id, hand| {
            parts[task_id].lock().push(Entry {
                cards: [hand[0], hand[1], hand[2], hand[3], hand[4]],
                score: Score::new(score5(hand)),
            });
        });

        let mut entries = Vec::new();
        for part in parts {
            entries.append(&mut part.into_inner());
        }

        Self::from_entries(entries)
    }

    /// Stable sorts the entries ascending, equal scores keep generation
    /// order.
    fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| a.score.cmp(&b.score));
        let masks = entries.iter().map(|e| hand_mask(&e.cards)).collect();
        Self { entries, masks }
    }

    /// Number of hands in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The table entries in ascending score order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The card bitmask of each entry, in table order.
    pub(crate) fn masks(&self) -> &[u64] {
        &self.masks
    }

    /// The percentile of a score in `[0, 100]`.
    ///
    /// This is the position of the first entry with a score greater than
    /// or equal to the given one over the table size.
    pub fn percentile(&self, score: Score) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }

        let idx = self.entries.partition_point(|e| e.score < score);
        idx as f64 / self.entries.len() as f64 * 100.0
    }

    /// Average preflop equity of two hole cards in `[0, 100]`.
    ///
    /// The equity of a table entry is its position over the table size,
    /// the result is the mean over every entry containing both cards, or
    /// zero when no entry does.
    pub fn starting_hand_equity(&self, c1: Card, c2: Card) -> Result<f64, EvalError> {
        if c1 == c2 {
            return Err(EvalError::InvalidHand(format!("duplicate card {c1}")));
        }

        let pair = (1 << c1.index()) | (1 << c2.index());
        let mut sum = 0.0;
        let mut count = 0usize;
        for (idx, mask) in self.masks.iter().enumerate() {
            if mask & pair == pair {
                sum += idx as f64 / self.entries.len() as f64;
                count += 1;
            }
        }

        if count == 0 {
            Ok(0.0)
        } else {
            Ok(sum / count as f64 * 100.0)
        }
    }

    /// Writes the table as a flat delimited file, one
    /// `<c1> <c2> <c3> <c4> <c5>,<score>` row per hand in ascending
    /// order.
    ///
    /// A write failure leaves the in-memory table untouched.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("creating rank table {}", path.display()))?;
        let mut w = BufWriter::new(file);

        for e in &self.entries {
            writeln!(
                w,
                "{} {} {} {} {},{}",
                e.cards[0], e.cards[1], e.cards[2], e.cards[3], e.cards[4], e.score
            )?;
        }

        w.flush()
            .with_context(|| format!("writing rank table {}", path.display()))?;
        Ok(())
    }

    /// Loads a table from a flat delimited file written by
    /// [RankTable::save].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("opening rank table {}", path.display()))?;

        let mut entries = Vec::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let (hand, value) = line
                .rsplit_once(',')
                .with_context(|| format!("missing score at line {}", lineno + 1))?;
            let cards = parse_cards(hand)
                .with_context(|| format!("bad hand at line {}", lineno + 1))?;
            anyhow::ensure!(
                cards.len() == 5,
                "expected 5 cards at line {}, got {}",
                lineno + 1,
                cards.len()
            );
            let score = value
                .trim()
                .parse::<f64>()
                .with_context(|| format!("bad score at line {}", lineno + 1))?;

            entries.push(Entry {
                cards: [cards[0], cards[1], cards[2], cards[3], cards[4]],
                score: Score::new(score),
            });
        }

        Ok(Self::from_entries(entries))
    }

    /// Writes the table to a binary cache for fast reloads.
    pub fn save_cache<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("creating table cache {}", path.display()))?;
        let mut w = BufWriter::new(file);
        bincode::serialize_into(&mut w, &self.entries)
            .with_context(|| format!("writing table cache {}", path.display()))?;
        Ok(())
    }

    /// Loads a table from a binary cache written by
    /// [RankTable::save_cache].
    pub fn load_cache<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening table cache {}", path.display()))?;
        let entries: Vec<Entry> = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("reading table cache {}", path.display()))?;
        Ok(Self::from_entries(entries))
    }
}

/// The bitmask with one bit set per card.
pub(crate) fn hand_mask(cards: &[Card]) -> u64 {
    cards.iter().fold(0u64, |m, c| m | 1 << c.index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use std::{env, fs};

    /// A 20 cards deck keeps debug test runs fast: C(20,5) = 15504.
    fn small_deck() -> Deck {
        let mut deck = Deck::default();
        for &card in Deck::default().cards().iter().take(32) {
            deck.remove(card);
        }
        assert_eq!(deck.count(), 20);
        deck
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("railbird-{}-{name}", std::process::id()))
    }

    #[test]
    fn build_small_deck() {
        let table = RankTable::build(&small_deck());
        assert_eq!(table.len(), 15_504);

        // Ascending with no duplicate hands.
        let mut hands = HashSet::default();
        for w in table.entries().windows(2) {
            assert!(w[0].score <= w[1].score);
        }
        for e in table.entries() {
            assert!(hands.insert(hand_mask(&e.cards)));
        }
        assert_eq!(hands.len(), table.len());
    }

    #[test]
    fn build_is_deterministic() {
        let t1 = RankTable::build(&small_deck());
        let t2 = RankTable::build(&small_deck());
        assert_eq!(t1.entries(), t2.entries());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn par_build_matches_build() {
        let deck = small_deck();
        let seq = RankTable::build(&deck);
        let par = RankTable::par_build(&deck, 4);
        assert_eq!(seq.entries(), par.entries());
    }

    #[test]
    fn percentile_endpoints() {
        let table = RankTable::build(&small_deck());

        let lowest = table.entries().first().unwrap().score;
        assert_eq!(table.percentile(lowest), 0.0);

        let above_all = Score::new(901.0);
        assert_eq!(table.percentile(above_all), 100.0);

        // Monotonic in the score.
        let mid = table.entries()[table.len() / 2].score;
        let p = table.percentile(mid);
        assert!(p > 0.0 && p < 100.0);
    }

    #[test]
    fn save_load_round_trip() {
        let table = RankTable::build(&small_deck());

        let path = temp_path("roundtrip.csv");
        table.save(&path).unwrap();
        let loaded = RankTable::load(&path).unwrap();
        assert_eq!(table.entries(), loaded.entries());

        // Two saves of the same table are byte identical.
        let path2 = temp_path("roundtrip2.csv");
        loaded.save(&path2).unwrap();
        assert_eq!(fs::read(&path).unwrap(), fs::read(&path2).unwrap());

        fs::remove_file(&path).unwrap();
        fs::remove_file(&path2).unwrap();
    }

    #[test]
    fn cache_round_trip() {
        let table = RankTable::build(&small_deck());

        let path = temp_path("cache.bin");
        table.save_cache(&path).unwrap();
        let loaded = RankTable::load_cache(&path).unwrap();
        assert_eq!(table.entries(), loaded.entries());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_failure_keeps_table_usable() {
        let table = RankTable::build(&small_deck());
        assert!(table.save("/no/such/dir/hands.csv").is_err());

        // The in-memory table is still usable.
        let lowest = table.entries().first().unwrap().score;
        assert_eq!(table.percentile(lowest), 0.0);
    }

    #[test]
    fn starting_hand_equity_mean() {
        let deck = small_deck();
        let table = RankTable::build(&deck);

        let c1 = deck.cards()[0];
        let c2 = deck.cards()[1];
        let eq = table.starting_hand_equity(c1, c2).unwrap();

        // Brute force the expected mean.
        let mut sum = 0.0;
        let mut count = 0;
        for (idx, e) in table.entries().iter().enumerate() {
            if e.cards.contains(&c1) && e.cards.contains(&c2) {
                sum += idx as f64 / table.len() as f64;
                count += 1;
            }
        }
        assert_eq!(count, 816); // C(18, 3)
        assert_eq!(eq, sum / count as f64 * 100.0);

        assert!(table.starting_hand_equity(c1, c1).is_err());
    }

    // Full deck sweep, takes a while in debug mode.
    #[test]
    #[ignore]
    fn build_full_deck() {
        let table = RankTable::build(&Deck::default());
        assert_eq!(table.len(), RankTable::FULL_SIZE);

        for w in table.entries().windows(2) {
            assert!(w[0].score <= w[1].score);
        }

        // Rebuilding produces identical output.
        let again = RankTable::build(&Deck::default());
        assert_eq!(table.entries(), again.entries());
    }
}
