// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Railbird advisor CLI.
//!
//! Thin front end over the engine crates: parses the card tokens and
//! betting economics handed over by the upstream recognizers, drives the
//! rank table and the equity estimator, and prints the recommendation.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use railbird_cards::parse_cards;
use railbird_eval::{Action, Deck, EquityEstimator, RankTable, should_call};

#[derive(Debug, Parser)]
#[command(about = "Railbird Poker hand advisor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Builds the rank table and writes it to disk.
    Build {
        /// The rank table file.
        #[clap(long, short, default_value = "hands.csv")]
        out: PathBuf,
        /// Number of build tasks.
        #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=32))]
        tasks: u8,
    },
    /// Advises on a hand given the known cards and the pot economics.
    Advise {
        /// The known cards, hole cards first (e.g. "Ah Kd 7c 2s 9h").
        #[clap(long, short)]
        cards: String,
        /// Number of active players.
        #[clap(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=9))]
        players: u32,
        /// The pot size.
        #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pot: f64,
        /// The price to call.
        #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
        price: f64,
        /// The rank table file, built on the fly when missing.
        #[clap(long, short, default_value = "hands.csv")]
        table: PathBuf,
        /// Number of build tasks when the table is missing.
        #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=32))]
        tasks: u8,
    },
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build { out, tasks } => build(&out, tasks as usize),
        Command::Advise {
            cards,
            players,
            pot,
            price,
            table,
            tasks,
        } => advise(&cards, players, pot, price, &table, tasks as usize),
    }
}

fn build(out: &Path, tasks: usize) -> Result<()> {
    let now = Instant::now();
    let table = build_table(tasks);
    info!(
        "scored {} hands in {:.3}s",
        table.len(),
        now.elapsed().as_secs_f64()
    );

    table.save(out)?;
    info!("rank table written to {}", out.display());

    if let Err(e) = table.save_cache(out.with_extension("bin")) {
        warn!("table cache not written: {e:#}");
    }

    Ok(())
}

fn advise(
    tokens: &str,
    players: u32,
    pot: f64,
    price: f64,
    table_path: &Path,
    tasks: usize,
) -> Result<()> {
    let cards = parse_cards(tokens)?;
    let table = load_table(table_path, tasks)?;

    // Two cards is the preflop case, the table percentile of the hole
    // cards average is all there is to go on.
    if cards.len() == 2 {
        let equity = table.starting_hand_equity(cards[0], cards[1])?;
        let action = if equity < 50.0 { "fold" } else { "call" };
        println!(
            "Hole cards {} {}: average equity {equity:.2}%, action: {action}",
            cards[0], cards[1]
        );
        return Ok(());
    }

    let estimator = EquityEstimator::new(&table);
    let equity = estimator.evaluate(&cards)?;

    let current = table.percentile(equity.current);
    let future = table.percentile(equity.future);
    println!(
        "Current hand: {} at {current:.2}%, projected {future:.2}%",
        equity.current.category()
    );

    // The higher of the two percentiles drives the recommendation.
    let advice = should_call(players, current.max(future), pot, price);
    println!(
        "Win probability against {players} player(s): {:.2}%",
        advice.pwin
    );

    match advice.action {
        Action::Fold => println!("You should fold."),
        Action::Bet { ceiling } => {
            println!("You should bet as long as it is less than {ceiling:.2}.");
            println!(
                "The expected value of calling {price:.2} is {:.2}.",
                advice.margin
            );
        }
    }

    Ok(())
}

/// Loads the rank table, preferring the binary cache, then the flat
/// file, then a fresh build persisted for the next run.
fn load_table(path: &Path, tasks: usize) -> Result<RankTable> {
    let cache = path.with_extension("bin");
    if cache.exists() {
        match RankTable::load_cache(&cache) {
            Ok(table) => {
                info!("loaded table cache {}", cache.display());
                return Ok(table);
            }
            Err(e) => warn!("discarding table cache {}: {e:#}", cache.display()),
        }
    }

    if path.exists() {
        let table = RankTable::load(path)?;
        info!("loaded rank table {}", path.display());
        if let Err(e) = table.save_cache(&cache) {
            warn!("table cache not written: {e:#}");
        }
        return Ok(table);
    }

    info!("no rank table at {}, building it", path.display());
    let now = Instant::now();
    let table = build_table(tasks);
    info!(
        "scored {} hands in {:.3}s",
        table.len(),
        now.elapsed().as_secs_f64()
    );

    // Persistence failures leave the in-memory table usable.
    if let Err(e) = table.save(path) {
        warn!("rank table not persisted: {e:#}");
    }
    if let Err(e) = table.save_cache(&cache) {
        warn!("table cache not written: {e:#}");
    }

    Ok(table)
}

#[cfg(feature = "parallel")]
fn build_table(tasks: usize) -> RankTable {
    RankTable::par_build(&Deck::default(), tasks)
}

#[cfg(not(feature = "parallel"))]
fn build_table(_tasks: usize) -> RankTable {
    RankTable::build(&Deck::default())
}
