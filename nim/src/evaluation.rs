use std::{iter::Sum, ops::AddAssign};

use rand::{seq::SliceRandom, Rng};

use crate::{
    agent::QLearner,
    env::{Environment, Player},
};

/// Wins and losses of the agent. Nim cannot end in a draw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub wins: u32,
    pub losses: u32,
}

impl AddAssign for Evaluation {
    fn add_assign(&mut self, rhs: Self) {
        self.wins += rhs.wins;
        self.losses += rhs.losses;
    }
}

impl Sum for Evaluation {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut a, b| {
            a += b;
            a
        })
    }
}

impl Evaluation {
    #[must_use]
    pub fn win_rate(&self) -> f32 {
        let games = self.wins + self.losses;
        if games == 0 {
            return 0.0;
        }
        self.wins as f32 / games as f32
    }

    #[must_use]
    pub fn win() -> Self {
        Self {
            wins: 1,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn loss() -> Self {
        Self {
            losses: 1,
            ..Default::default()
        }
    }
}

/// Play the greedy agent against a uniformly random opponent.
/// The agent moves first in even games and second in odd ones.
///
/// # Errors
///
/// Returns an error if either side picks an illegal action.
pub fn evaluate<E: Environment>(
    agent: &QLearner<E>,
    games: u32,
    rng: &mut impl Rng,
) -> Result<Evaluation, E::Error> {
    let mut actions = Vec::new();
    (0..games)
        .map(|game| -> Result<Evaluation, E::Error> {
            let seat = if game % 2 == 0 {
                Player::First
            } else {
                Player::Second
            };
            let mut env = E::default();
            while env.winner().is_none() {
                let action = if env.to_move() == seat {
                    agent.choose_action(&env.state(), false, rng)
                } else {
                    actions.clear();
                    env.populate_actions(&mut actions);
                    actions.choose(rng).copied()
                };
                // No legal moves left without a winner.
                let Some(action) = action else { break };
                env.step(action)?;
            }
            Ok(match env.winner() {
                Some(winner) if winner == seat => Evaluation::win(),
                _ => Evaluation::loss(),
            })
        })
        .sum()
}
