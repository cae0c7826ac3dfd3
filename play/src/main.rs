#![warn(clippy::pedantic, clippy::style, clippy::nursery)]

use std::io;

use clap::Parser;
use input::{read_action, InputError};
use nim::{available_actions, train, MoveError, Nim, Player, QConfig, QLearner};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

mod input;

// The game to learn.
const N: usize = 4;
type Env = Nim<N>;

#[derive(Parser, Debug)]
struct Args {
    /// Number of self-play games to train on
    #[arg(long, default_value_t = 10_000)]
    games: usize,
    /// Seat of the human, 0 moves first. Picked at random if not given.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    human_player: Option<u8>,
    /// Seed for the RNG
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Error)]
enum PlayError {
    #[error("{0}")]
    Input(#[from] InputError),
    #[error("{0}")]
    Move(#[from] MoveError),
    #[error("the agent found no legal move")]
    NoMoves,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("seed: {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let agent = match train::<Env>(args.games, QConfig::default(), &mut rng) {
        Ok(agent) => agent,
        Err(err) => {
            log::error!("training failed: {err}");
            return;
        }
    };

    let human = human_seat(args.human_player, &mut rng);

    match play(&agent, human, &mut rng) {
        Ok(()) | Err(PlayError::Input(InputError::Closed)) => {}
        Err(err) => log::error!("{err}"),
    }
}

/// The seat from the command line, or a random one.
fn human_seat(choice: Option<u8>, rng: &mut impl Rng) -> Player {
    let seat = choice.unwrap_or_else(|| rng.gen_range(0..=1));
    if seat == 0 {
        Player::First
    } else {
        Player::Second
    }
}

/// One game of the human against the greedy agent.
fn play(agent: &QLearner<Env>, human: Player, rng: &mut impl Rng) -> Result<(), PlayError> {
    let mut stdin = io::stdin().lock();
    let mut line = String::new();
    let mut game = Env::default();

    loop {
        println!();
        print!("{game}");
        println!();

        let action = if game.player() == human {
            println!("Your Turn");
            read_action(&mut stdin, &mut line, &available_actions(game.piles()))?
        } else {
            println!("AI's Turn");
            let action = agent
                .choose_action(game.piles(), false, rng)
                .ok_or(PlayError::NoMoves)?;
            println!("AI chose to {action}.");
            action
        };
        game.play(action)?;

        if let Some(winner) = game.winner() {
            println!();
            println!("GAME OVER");
            let winner = if winner == human { "Human" } else { "AI" };
            println!("Winner is {winner}");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use nim::Player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::human_seat;

    #[test]
    fn seat_choice() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(human_seat(Some(0), &mut rng), Player::First);
        assert_eq!(human_seat(Some(1), &mut rng), Player::Second);

        let seats: Vec<_> = (0..100).map(|_| human_seat(None, &mut rng)).collect();
        assert!(seats.contains(&Player::First));
        assert!(seats.contains(&Player::Second));
    }
}
