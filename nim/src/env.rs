use std::{fmt, hash::Hash};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Player {
    #[default]
    First,
    Second,
}

impl Player {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A two-player game with alternating moves.
pub trait Environment: Clone + Default {
    /// Value snapshot of the position, usable as a table key
    /// after the environment has moved on.
    type State: Clone + PartialEq + Eq + Hash + fmt::Debug;
    type Action: Copy + PartialEq + Eq + Hash + fmt::Debug;
    type Error: std::error::Error;

    fn state(&self) -> Self::State;
    /// Legal actions in a position, in a deterministic order.
    fn actions(state: &Self::State, actions: &mut Vec<Self::Action>);

    /// Apply an action for the player to move.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is not legal in the current position.
    fn step(&mut self, action: Self::Action) -> Result<(), Self::Error>;

    fn to_move(&self) -> Player;
    fn winner(&self) -> Option<Player>;

    fn populate_actions(&self, actions: &mut Vec<Self::Action>) {
        Self::actions(&self.state(), actions);
    }

    /// Result from the perspective of the player to move.
    fn terminal(&self) -> Option<Terminal> {
        self.winner().map(|winner| {
            if winner == self.to_move() {
                Terminal::Win
            } else {
                Terminal::Loss
            }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    Win,
    Loss,
}

impl From<Terminal> for f64 {
    fn from(value: Terminal) -> Self {
        match value {
            Terminal::Win => 1.0,
            Terminal::Loss => -1.0,
        }
    }
}
