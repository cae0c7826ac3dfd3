#![warn(clippy::pedantic, clippy::style)]

use clap::Parser;
use nim::{evaluate, train, Nim, QConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// The game to learn.
const N: usize = 4;
type Env = Nim<N>;

#[derive(Parser, Debug)]
struct Args {
    /// Number of self-play games to train on
    #[arg(long, default_value_t = 10_000)]
    games: usize,
    /// Number of games to play against the random opponent
    #[arg(long, default_value_t = 1_000)]
    matches: u32,
    /// Learning rate
    #[arg(long, default_value_t = nim::agent::ALPHA)]
    alpha: f64,
    /// Exploration rate during training
    #[arg(long, default_value_t = nim::agent::EPSILON)]
    epsilon: f64,
    /// Seed for the RNG
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("seed: {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = QConfig {
        alpha: args.alpha,
        epsilon: args.epsilon,
    };
    let agent = match train::<Env>(args.games, config, &mut rng) {
        Ok(agent) => agent,
        Err(err) => {
            log::error!("training failed: {err}");
            return;
        }
    };

    match evaluate(&agent, args.matches, &mut rng) {
        Ok(evaluation) => println!(
            "{} wins, {} losses: {:.1}% against a random opponent",
            evaluation.wins,
            evaluation.losses,
            evaluation.win_rate() * 100.0
        ),
        Err(err) => log::error!("evaluation failed: {err}"),
    }
}
