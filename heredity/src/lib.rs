#![warn(clippy::pedantic)]
#![warn(clippy::style)]
#![warn(clippy::nursery)]

pub mod data;
pub mod inference;
pub mod population;
pub mod posterior;
pub mod probability;

pub use inference::{infer, joint_probability, Assignment};
pub use population::{Person, PersonSet, Population, PopulationError};
pub use posterior::{Distribution, Marginal, Posterior};
pub use probability::{Copies, Probabilities};
