#![warn(clippy::pedantic)]
#![warn(clippy::style)]
#![warn(clippy::nursery)]
// Just let me cast in peace
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod agent;
pub mod env;
pub mod evaluation;
pub mod game;
pub mod train;

pub use agent::{QConfig, QLearner};
pub use env::{Environment, Player, Terminal};
pub use evaluation::{evaluate, Evaluation};
pub use game::{available_actions, Action, MoveError, Nim, Variant};
pub use train::train;
