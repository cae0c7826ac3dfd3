use std::{array, fmt};

use thiserror::Error;

use crate::env::{Environment, Player};

/// Take `count` objects from pile `pile`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub pile: usize,
    pub count: u32,
}

impl From<(usize, u32)> for Action {
    fn from((pile, count): (usize, u32)) -> Self {
        Self { pile, count }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from pile {}", self.count, self.pile)
    }
}

/// Who wins when the board is emptied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Taking the last object wins.
    #[default]
    Normal,
    /// Taking the last object loses.
    Misere,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game was already won by player {0}")]
    InvalidState(Player),
    #[error("there is no pile {pile}, only {piles} piles")]
    InvalidPile { pile: usize, piles: usize },
    #[error("cannot take {count} from pile {pile} which has {size}")]
    InvalidCount { pile: usize, count: u32, size: u32 },
}

/// Every `(pile, count)` with `1 <= count <= piles[pile]`, by pile then count.
#[must_use]
pub fn available_actions(piles: &[u32]) -> Vec<Action> {
    let mut actions = Vec::new();
    populate(piles, &mut actions);
    actions
}

fn populate(piles: &[u32], actions: &mut Vec<Action>) {
    actions.extend(
        piles
            .iter()
            .enumerate()
            .flat_map(|(pile, &size)| (1..=size).map(move |count| Action { pile, count })),
    );
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nim<const N: usize> {
    piles: [u32; N],
    player: Player,
    winner: Option<Player>,
    variant: Variant,
}

/// Piles of 1, 3, 5, ... objects, so four piles start at `[1, 3, 5, 7]`.
impl<const N: usize> Default for Nim<N> {
    fn default() -> Self {
        Self::new(array::from_fn(|i| 2 * i as u32 + 1))
    }
}

impl<const N: usize> Nim<N> {
    #[must_use]
    pub fn new(piles: [u32; N]) -> Self {
        Self::with_variant(piles, Variant::Normal)
    }

    /// A board which is already empty has no winner and no legal moves.
    #[must_use]
    pub fn with_variant(piles: [u32; N], variant: Variant) -> Self {
        Self {
            piles,
            player: Player::First,
            winner: None,
            variant,
        }
    }

    #[must_use]
    pub const fn piles(&self) -> &[u32; N] {
        &self.piles
    }

    #[must_use]
    pub const fn player(&self) -> Player {
        self.player
    }

    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Take objects from a pile and pass the turn.
    ///
    /// # Errors
    ///
    /// Fails if the game is over, if the pile does not exist,
    /// or if `count` is not within `1..=pile`.
    pub fn play(&mut self, action: Action) -> Result<(), MoveError> {
        let Action { pile, count } = action;
        if let Some(winner) = self.winner {
            return Err(MoveError::InvalidState(winner));
        }
        let size = *self.piles.get(pile).ok_or(MoveError::InvalidPile {
            pile,
            piles: N,
        })?;
        if count < 1 || count > size {
            return Err(MoveError::InvalidCount { pile, count, size });
        }

        self.piles[pile] -= count;
        let mover = self.player;
        self.player = mover.other();

        if self.piles.iter().all(|&pile| pile == 0) {
            self.winner = Some(match self.variant {
                Variant::Normal => mover,
                Variant::Misere => mover.other(),
            });
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Display for Nim<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Piles:")?;
        for (i, pile) in self.piles.iter().enumerate() {
            writeln!(f, "Pile {i}: {pile}")?;
        }
        Ok(())
    }
}

impl<const N: usize> Environment for Nim<N> {
    type Action = Action;
    type Error = MoveError;
    type State = [u32; N];

    fn state(&self) -> Self::State {
        self.piles
    }

    fn actions(state: &Self::State, actions: &mut Vec<Self::Action>) {
        populate(state, actions);
    }

    fn step(&mut self, action: Self::Action) -> Result<(), Self::Error> {
        self.play(action)
    }

    fn to_move(&self) -> Player {
        self.player
    }

    fn winner(&self) -> Option<Player> {
        self.winner
    }
}
