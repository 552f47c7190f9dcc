// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The call/fold decision advisor.
//!
//! Converts a win percentile and the betting economics into a win
//! probability and a recommendation. Opponents are assumed independent,
//! winning against n players is modeled as winning n independent
//! showdowns at the same percentile.
use std::fmt;

/// What to do with the hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Calling has no positive expected value.
    Fold,
    /// Bet any amount up to the ceiling.
    Bet {
        /// The maximum acceptable bet.
        ceiling: f64,
    },
}

/// A recommendation with its betting economics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advice {
    /// Estimated win probability in `[0, 100]`.
    pub pwin: f64,
    /// Expected value of the pot at that win probability.
    pub ev: f64,
    /// Marginal expected value of calling at the given price.
    pub margin: f64,
    /// The recommendation.
    pub action: Action,
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Fold => write!(f, "fold"),
            Action::Bet { ceiling } => write!(f, "bet up to {ceiling:.2}"),
        }
    }
}

/// Recommends whether to call given the active players, a win percentile
/// in `[0, 100]`, the pot, and the price to call.
///
/// Zero or negative pot and price are legitimate degenerate inputs, they
/// lead to a fold recommendation rather than an error. Callers holding
/// both a current and a projected percentile should pass the higher of
/// the two.
pub fn should_call(players: u32, win_percentile: f64, pot: f64, price: f64) -> Advice {
    let pwin = (win_percentile / 100.0).powi(players as i32);
    let ev = pwin * pot;

    let action = if ev <= 0.0 {
        Action::Fold
    } else {
        Action::Bet { ceiling: ev }
    };

    Advice {
        pwin: pwin * 100.0,
        ev,
        margin: ev - price,
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sure_win_bets_the_pot() {
        let advice = should_call(1, 100.0, 100.0, 10.0);
        assert_eq!(advice.pwin, 100.0);
        assert_eq!(advice.ev, 100.0);
        assert_eq!(advice.margin, 90.0);
        assert_eq!(advice.action, Action::Bet { ceiling: 100.0 });
    }

    #[test]
    fn empty_pot_folds() {
        let advice = should_call(1, 80.0, 0.0, 5.0);
        assert_eq!(advice.ev, 0.0);
        assert_eq!(advice.action, Action::Fold);
    }

    #[test]
    fn negative_pot_folds() {
        // Degenerate economics are not an error.
        let advice = should_call(2, 90.0, -10.0, 0.0);
        assert!(advice.ev <= 0.0);
        assert_eq!(advice.action, Action::Fold);
    }

    #[test]
    fn more_players_shrink_the_win_probability() {
        let one = should_call(1, 50.0, 100.0, 0.0);
        let two = should_call(2, 50.0, 100.0, 0.0);
        assert_eq!(one.pwin, 50.0);
        assert_eq!(two.pwin, 25.0);
        assert!(two.ev < one.ev);
    }

    #[test]
    fn zero_percentile_folds() {
        let advice = should_call(3, 0.0, 50.0, 5.0);
        assert_eq!(advice.pwin, 0.0);
        assert_eq!(advice.action, Action::Fold);
    }

    #[test]
    fn advice_display() {
        let advice = should_call(1, 100.0, 100.0, 10.0);
        assert_eq!(advice.to_string(), "bet up to 100.00");

        let advice = should_call(1, 50.0, 0.0, 0.0);
        assert_eq!(advice.to_string(), "fold");
    }
}
